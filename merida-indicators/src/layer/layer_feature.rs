use geo::Geometry;
use serde_json::{Map, Value};

/// one row of a polygon layer in WGS84 with its attribute table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFeature {
    pub geometry: Geometry<f64>,
    pub attributes: Map<String, Value>,
}

impl LayerFeature {
    pub fn new(geometry: Geometry<f64>, attributes: Map<String, Value>) -> LayerFeature {
        LayerFeature {
            geometry,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// reads an attribute as text. integral numbers are written without a
    /// fractional part so numeric identifiers survive the round trip.
    pub fn attribute_string(&self, name: &str) -> Result<String, String> {
        match self.attribute(name) {
            None => Err(format!("attribute '{name}' is missing")),
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(Value::Number(n)) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Ok(i.to_string()),
                (_, Some(u)) => Ok(u.to_string()),
                _ => Ok(n.to_string()),
            },
            Some(other) => Err(format!("attribute '{name}' has unexpected value {other}")),
        }
    }

    /// reads an attribute as an integer identifier.
    pub fn attribute_i64(&self, name: &str) -> Result<i64, String> {
        match self.attribute(name) {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                    _ => Err(format!("attribute '{name}' value {n} is not an integer")),
                }
            }
            _ => {
                let s = self.attribute_string(name)?;
                s.parse::<i64>()
                    .map_err(|e| format!("attribute '{name}' value '{s}' is not an integer: {e}"))
            }
        }
    }
}
