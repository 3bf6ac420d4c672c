//! hourly correlation between transit supply and travel demand across the
//! zones of the origin-destination survey.
mod correlation_ops;
mod pearson;
mod supply_demand;
mod zone_hour_table;

pub use correlation_ops::{demand_by_zone_hour, run, supply_by_zone_hour};
pub use pearson::pearson;
pub use supply_demand::{CorrelationRow, SupplyDemandCorrelation};
pub use zone_hour_table::ZoneHourTable;
