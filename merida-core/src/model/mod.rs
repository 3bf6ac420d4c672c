mod census_block;
mod demand_zone;
mod isochrone_polygon;
mod od_record;
mod population_attributes;
mod population_value;
mod route_geometry;
mod stop;
mod stop_time;

pub use census_block::CensusBlock;
pub use demand_zone::DemandZone;
pub use isochrone_polygon::IsochronePolygon;
pub use od_record::OdRecord;
pub use population_attributes::{PopulationAttributes, PopulationDelta, PopulationField};
pub use population_value::PopulationValue;
pub use route_geometry::RouteGeometry;
pub use stop::Stop;
pub use stop_time::StopTime;
