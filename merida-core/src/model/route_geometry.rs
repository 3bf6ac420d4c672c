use geo::LineString;

/// a transit route path, built from one GTFS shape.
///
/// several shapes (directions, variants) may carry the same `route_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub route_id: i64,
    pub shape_id: String,
    pub geometry: LineString<f64>,
}

impl RouteGeometry {
    /// derives the route identifier from a composite shape identifier such as
    /// "104D1", keeping the integer prefix before the first `separator`.
    pub fn route_id_from_shape_id(shape_id: &str, separator: char) -> Result<i64, String> {
        let prefix = shape_id.split(separator).next().unwrap_or_default();
        prefix.trim().parse::<i64>().map_err(|e| {
            format!("shape id '{shape_id}' does not start with an integer route id before '{separator}': {e}")
        })
    }
}
