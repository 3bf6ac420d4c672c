use regex::Regex;
use std::sync::OnceLock;

/// a raw population count as found in a census layer.
///
/// some census files store counts as numbers, others as text where
/// suppressed or missing values are encoded with placeholders such as "*"
/// or "N/D". both are accepted and normalized by the same rule.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationValue {
    Number(f64),
    Text(String),
    Missing,
}

fn non_digits() -> &'static Regex {
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]+").expect("static regex is valid"))
}

impl PopulationValue {
    /// normalizes this value to a non-negative count.
    ///
    /// text: each run of non-digit characters becomes "0" and the resulting
    /// digits are read as an integer, saturating at [`u64::MAX`].
    /// numbers: truncated toward zero, with negative, NaN and infinite values
    /// mapped to 0. missing values are 0.
    pub fn normalize(&self) -> u64 {
        match self {
            PopulationValue::Number(n) if n.is_finite() && *n >= 0.0 => n.trunc() as u64,
            PopulationValue::Number(_) => 0,
            PopulationValue::Text(s) => {
                let digits = non_digits().replace_all(s.trim(), "0");
                digits.bytes().fold(0u64, |acc, b| {
                    acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
                })
            }
            PopulationValue::Missing => 0,
        }
    }
}

impl From<&serde_json::Value> for PopulationValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PopulationValue::Missing,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => PopulationValue::Number(f),
                None => PopulationValue::Missing,
            },
            serde_json::Value::String(s) => PopulationValue::Text(s.clone()),
            other => PopulationValue::Text(other.to_string()),
        }
    }
}
