//! files written by an indicator run.
mod csv_output;
mod geojson_output;
mod impact_summary;
mod output_file;

pub use csv_output::{write_correlation, write_feed_summary, write_zone_hour_table};
pub use geojson_output::{write_served_blocks, write_wait_times};
pub use impact_summary::{write_impact_summary, ImpactDelta, ImpactSummary, ScenarioIndicators};
pub use output_file::{check_outputs, OutputFile, IMPACT_SUMMARY_FILENAME};
