use geo::MultiPolygon;

/// the area reachable on foot within a fixed time budget from a census
/// block. `cvegeo` ties it back to the block it was computed for, and the
/// polygon may extend beyond that block's own footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochronePolygon {
    pub cvegeo: String,
    pub geometry: MultiPolygon<f64>,
}
