use super::{FeedAccessor, FeedConfig, FeedError};
use geo::{Coord, Intersects, LineString, Point};
use gtfs_structures::Gtfs;
use itertools::Itertools;
use merida_core::model::{RouteGeometry, Stop, StopTime};
use std::sync::Arc;

/// a GTFS archive (zip or directory) read with `gtfs_structures`.
pub struct GtfsFeed {
    source: String,
    gtfs: Gtfs,
    config: FeedConfig,
}

impl GtfsFeed {
    pub fn new(bundle_file: &str, config: FeedConfig) -> Result<GtfsFeed, FeedError> {
        let gtfs = Gtfs::new(bundle_file)?;
        log::info!(
            "read GTFS feed {bundle_file}: {} stops, {} trips, {} shapes",
            gtfs.stops.len(),
            gtfs.trips.len(),
            gtfs.shapes.len()
        );
        Ok(GtfsFeed::from_gtfs(bundle_file, gtfs, config))
    }

    pub fn from_gtfs(source: &str, gtfs: Gtfs, config: FeedConfig) -> GtfsFeed {
        GtfsFeed {
            source: source.to_string(),
            gtfs,
            config,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FeedAccessor for GtfsFeed {
    fn stops(&self) -> Result<Vec<Stop>, FeedError> {
        let window = &self.config.longitude_window;
        let mut missing_location = 0;
        let mut stops = vec![];
        for (stop_id, stop) in self.gtfs.stops.iter() {
            let point = match get_stop_location(stop, &self.gtfs) {
                Some(p) => p,
                None => {
                    missing_location += 1;
                    continue;
                }
            };
            if !window.contains(point.x()) {
                continue;
            }
            stops.push(Stop {
                stop_id: parse_id("stop", stop_id)?,
                geometry: point,
            });
        }
        if missing_location > 0 {
            log::warn!(
                "{}: {missing_location} stops have no location, even via a parent station, and were dropped",
                self.source
            );
        }
        stops.sort_by_key(|s| s.stop_id);
        Ok(stops)
    }

    fn stop_times(&self) -> Result<Vec<StopTime>, FeedError> {
        let mut result = vec![];
        for (trip_id, trip) in self.gtfs.trips.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let ordered = trip
                .stop_times
                .iter()
                .sorted_by_key(|st| st.stop_sequence);
            for st in ordered {
                let stop_id = parse_id("stop", &st.stop.id)?;
                let stop_time =
                    StopTime::new(trip_id.clone(), stop_id, st.arrival_time, st.departure_time)
                        .ok_or_else(|| {
                            FeedError::MissingAllStopTimesError(format!(
                                "trip '{trip_id}' at stop '{}' (sequence {})",
                                st.stop.id, st.stop_sequence
                            ))
                        })?;
                result.push(stop_time);
            }
        }
        Ok(result)
    }

    fn routes(&self) -> Result<Vec<RouteGeometry>, FeedError> {
        let window = self.config.longitude_window.rect();
        let separator = self.config.shape_id_separator;
        let mut routes = vec![];
        for (shape_id, points) in self.gtfs.shapes.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let coords = points
                .iter()
                .sorted_by_key(|p| p.sequence)
                .map(|p| Coord {
                    x: p.longitude,
                    y: p.latitude,
                })
                .collect_vec();
            let geometry = LineString::new(coords);
            if !geometry.intersects(&window) {
                continue;
            }
            let route_id = RouteGeometry::route_id_from_shape_id(shape_id, separator)
                .map_err(|_| FeedError::InvalidIdentifier {
                    kind: "shape",
                    id: shape_id.clone(),
                })?;
            routes.push(RouteGeometry {
                route_id,
                shape_id: shape_id.clone(),
                geometry,
            });
        }
        Ok(routes)
    }
}

fn parse_id(kind: &'static str, id: &str) -> Result<i64, FeedError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| FeedError::InvalidIdentifier {
            kind,
            id: id.to_string(),
        })
}

/// location of the stop, or of its parent station when the stop itself has
/// none. only one level of parent is followed.
fn get_stop_location(stop: &Arc<gtfs_structures::Stop>, gtfs: &Gtfs) -> Option<Point<f64>> {
    if let (Some(lon), Some(lat)) = (stop.longitude, stop.latitude) {
        return Some(Point::new(lon, lat));
    }
    stop.parent_station
        .as_ref()
        .and_then(|parent_id| gtfs.stops.get(parent_id))
        .and_then(
            |parent_stop| match (parent_stop.longitude, parent_stop.latitude) {
                (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
                _ => None,
            },
        )
}
