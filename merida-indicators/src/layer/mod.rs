//! readers for the external datasets: polygon layers (zones, isochrones,
//! census blocks) and the origin-destination matrix.
mod layer_feature;
mod layer_ops;
mod layer_source;
mod od_reader;

pub use layer_feature::LayerFeature;
pub use layer_ops::{read_census_blocks, read_demand_zones, read_isochrones, CVEGEO_COLUMN};
pub use layer_source::LayerSource;
pub use od_reader::read_od_records;
