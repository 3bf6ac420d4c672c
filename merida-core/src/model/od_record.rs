use serde::{Deserialize, Serialize};

/// trips between two zones of the origin-destination matrix during one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdRecord {
    pub origin_zone: i64,
    pub destination_zone: i64,
    pub hour: u32,
    pub trips: f64,
}

impl OdRecord {
    /// reads the hour from a period code like "p8" or "p17". the code is a
    /// single leading tag character followed by the hour.
    pub fn parse_period(period: &str) -> Result<u32, String> {
        let mut chars = period.trim().chars();
        if chars.next().is_none() {
            return Err(String::from("empty period code"));
        }
        chars
            .as_str()
            .parse::<u32>()
            .map_err(|e| format!("period code '{period}' does not encode an hour: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::OdRecord;

    #[test]
    fn test_parse_period() {
        assert_eq!(OdRecord::parse_period("p8"), Ok(8));
        assert_eq!(OdRecord::parse_period("p23"), Ok(23));
        assert_eq!(OdRecord::parse_period(" p0 "), Ok(0));
        assert!(OdRecord::parse_period("").is_err());
        assert!(OdRecord::parse_period("pm").is_err());
    }
}
