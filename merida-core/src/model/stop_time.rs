/// a single visit of a trip to a stop.
///
/// times are stored as seconds since midnight of the service day, which is
/// how GTFS encodes them. values past 24:00:00 are legal in GTFS for trips
/// running after midnight, so `hour` may exceed 23.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: i64,
    pub arrival_time: Option<u32>,
    pub departure_time: Option<u32>,
    /// hour-of-day bucket of the departure, or of the arrival when the
    /// departure is not listed.
    pub hour: u32,
}

impl StopTime {
    pub const SECONDS_PER_HOUR: u32 = 3600;

    /// builds a stop time, deriving the hour bucket. returns None when
    /// both times are missing since no bucket can be assigned.
    pub fn new(
        trip_id: String,
        stop_id: i64,
        arrival_time: Option<u32>,
        departure_time: Option<u32>,
    ) -> Option<StopTime> {
        let hour = departure_time.or(arrival_time)? / Self::SECONDS_PER_HOUR;
        Some(StopTime {
            trip_id,
            stop_id,
            arrival_time,
            departure_time,
            hour,
        })
    }

    /// parses a GTFS "HH:MM:SS" time into seconds since midnight. hours
    /// may exceed 23.
    pub fn parse_gtfs_time(s: &str) -> Result<u32, String> {
        let parts = s.trim().split(':').collect::<Vec<_>>();
        match parts.as_slice() {
            [h, m, sec] => {
                let h = h
                    .parse::<u32>()
                    .map_err(|e| format!("invalid hours in time '{s}': {e}"))?;
                let m = m
                    .parse::<u32>()
                    .map_err(|e| format!("invalid minutes in time '{s}': {e}"))?;
                let sec = sec
                    .parse::<u32>()
                    .map_err(|e| format!("invalid seconds in time '{s}': {e}"))?;
                if m > 59 || sec > 59 {
                    return Err(format!("time '{s}' has minutes or seconds out of range"));
                }
                Ok(h * Self::SECONDS_PER_HOUR + m * 60 + sec)
            }
            _ => Err(format!("expected time in HH:MM:SS format, found '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StopTime;

    #[test]
    fn test_hour_from_departure() {
        let st = StopTime::new(String::from("t1"), 1, Some(28_700), Some(28_800))
            .expect("has times");
        assert_eq!(st.hour, 8);
    }

    #[test]
    fn test_hour_falls_back_to_arrival() {
        let st = StopTime::new(String::from("t1"), 1, Some(3_600 * 25 + 30), None)
            .expect("has arrival");
        assert_eq!(st.hour, 25);
        assert!(StopTime::new(String::from("t1"), 1, None, None).is_none());
    }

    #[test]
    fn test_parse_gtfs_time() {
        assert_eq!(StopTime::parse_gtfs_time("08:05:10"), Ok(29_110));
        assert_eq!(StopTime::parse_gtfs_time("24:00:00"), Ok(86_400));
        assert!(StopTime::parse_gtfs_time("8:61:00").is_err());
        assert!(StopTime::parse_gtfs_time("08:00").is_err());
    }
}
