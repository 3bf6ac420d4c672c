use geo::Point;

/// a GTFS stop with an integer identifier and a WGS84 location.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub stop_id: i64,
    pub geometry: Point<f64>,
}

impl Stop {
    pub fn new(stop_id: i64, lon: f64, lat: f64) -> Stop {
        Stop {
            stop_id,
            geometry: Point::new(lon, lat),
        }
    }
}
