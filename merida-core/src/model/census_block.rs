use super::PopulationAttributes;
use geo::MultiPolygon;

/// a census block (manzana) identified by its CVEGEO code.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusBlock {
    pub cvegeo: String,
    pub geometry: MultiPolygon<f64>,
    pub population: PopulationAttributes,
}
