use super::{FeedAccessor, FeedError};
use merida_core::model::{RouteGeometry, Stop, StopTime};

/// a feed held as plain tables, for synthetic scenarios and for callers
/// that already materialized the tables of a [`super::GtfsFeed`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeed {
    pub stops: Vec<Stop>,
    pub stop_times: Vec<StopTime>,
    pub routes: Vec<RouteGeometry>,
}

impl InMemoryFeed {
    pub fn new(stops: Vec<Stop>, stop_times: Vec<StopTime>, routes: Vec<RouteGeometry>) -> Self {
        Self {
            stops,
            stop_times,
            routes,
        }
    }

    /// copies the tables out of another accessor.
    pub fn materialize(feed: &dyn FeedAccessor) -> Result<InMemoryFeed, FeedError> {
        Ok(InMemoryFeed {
            stops: feed.stops()?,
            stop_times: feed.stop_times()?,
            routes: feed.routes()?,
        })
    }

    /// appends a stop time given GTFS "HH:MM:SS" strings; empty strings are
    /// treated as missing times.
    pub fn push_stop_time(
        &mut self,
        trip_id: &str,
        stop_id: i64,
        arrival_time: &str,
        departure_time: &str,
    ) -> Result<(), FeedError> {
        let parse = |s: &str| -> Result<Option<u32>, FeedError> {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                StopTime::parse_gtfs_time(s)
                    .map(Some)
                    .map_err(FeedError::OtherError)
            }
        };
        let arrival = parse(arrival_time)?;
        let departure = parse(departure_time)?;
        let stop_time = StopTime::new(trip_id.to_string(), stop_id, arrival, departure)
            .ok_or_else(|| {
                FeedError::MissingAllStopTimesError(format!("trip '{trip_id}' at stop {stop_id}"))
            })?;
        self.stop_times.push(stop_time);
        Ok(())
    }
}

impl FeedAccessor for InMemoryFeed {
    fn stops(&self) -> Result<Vec<Stop>, FeedError> {
        Ok(self.stops.clone())
    }

    fn stop_times(&self) -> Result<Vec<StopTime>, FeedError> {
        Ok(self.stop_times.clone())
    }

    fn routes(&self) -> Result<Vec<RouteGeometry>, FeedError> {
        Ok(self.routes.clone())
    }
}
