use geo::MultiPolygon;

/// a zone of the origin-destination survey. stops are assigned to it by
/// spatial intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandZone {
    pub zone_id: i64,
    pub geometry: MultiPolygon<f64>,
}
