use super::FeedError;
use merida_core::model::{RouteGeometry, Stop, StopTime};

/// tabular views over a GTFS feed, as consumed by the indicator engines.
///
/// implementations must return rows in a stable order so that repeated runs
/// over the same feed produce identical results.
pub trait FeedAccessor {
    /// stops with an integer id and a WGS84 location inside the study area.
    fn stops(&self) -> Result<Vec<Stop>, FeedError>;

    /// every stop time of the feed with its hour-of-day bucket. not filtered
    /// by the study area.
    fn stop_times(&self) -> Result<Vec<StopTime>, FeedError>;

    /// one route geometry per GTFS shape touching the study area.
    fn routes(&self) -> Result<Vec<RouteGeometry>, FeedError>;
}
