//! mean headway at stops, aggregated to census blocks through the stops
//! inside each block's walking isochrone.
use crate::IndicatorError;
use chrono::NaiveTime;
use geo::MultiPolygon;
use itertools::Itertools;
use kdam::tqdm;
use merida_core::model::{CensusBlock, IsochronePolygon, StopTime};
use merida_core::util::polygonal_rtree::PolygonalRTree;
use merida_gtfs::feed::FeedAccessor;
use std::collections::{BTreeMap, HashMap};

/// stop times of hour 24 and later belong to trips running past midnight
/// and are left out.
pub const HOURS_PER_DAY: u32 = 24;

/// mean wait at the stops reachable on foot from a census block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockWaitTime {
    pub cvegeo: String,
    /// minutes, None when no contributing stop has two or more arrivals
    pub mean_time: Option<f64>,
    pub geometry: MultiPolygon<f64>,
}

pub fn run(
    feed: &dyn FeedAccessor,
    isochrones: &[IsochronePolygon],
    blocks: &[CensusBlock],
) -> Result<Vec<BlockWaitTime>, IndicatorError> {
    let headways = stop_headways(&feed.stop_times()?)?;
    let stops = feed.stops()?;

    let rtree = PolygonalRTree::new(
        isochrones
            .iter()
            .map(|iso| (iso.geometry.clone(), iso.cvegeo.as_str()))
            .collect_vec(),
    )
    .map_err(|e| IndicatorError::SpatialIndexError(String::from("isochrones"), e))?;

    // one entry per (isochrone, contained stop) pair
    let located = stops
        .iter()
        .filter_map(|s| headways.get(&s.stop_id).map(|h| (s, *h)))
        .collect_vec();
    let stop_iter = tqdm!(
        located.iter(),
        total = located.len(),
        desc = "stops x isochrones"
    );
    let mut pooled: HashMap<&str, Vec<Option<f64>>> = HashMap::new();
    for (stop, headway) in stop_iter {
        for entry in rtree.containing_point(&stop.geometry) {
            pooled.entry(entry.data).or_default().push(*headway);
        }
    }
    eprintln!();

    let result = blocks
        .iter()
        .filter_map(|block| {
            pooled
                .get(block.cvegeo.as_str())
                .map(|headways| BlockWaitTime {
                    cvegeo: block.cvegeo.clone(),
                    mean_time: mean_skipping_missing(headways.iter().copied()),
                    geometry: block.geometry.clone(),
                })
        })
        .collect_vec();
    log::info!(
        "{} stops with headways, {} isochrones containing stops, {} of {} census blocks with a wait time",
        located.len(),
        pooled.len(),
        result.len(),
        blocks.len()
    );
    Ok(result)
}

/// mean minutes between consecutive arrivals at each stop, keyed by stop id.
///
/// only stop times before hour 24 are used, and rows without an arrival are
/// skipped. a stop with a single arrival maps to None.
pub fn stop_headways(
    stop_times: &[StopTime],
) -> Result<BTreeMap<i64, Option<f64>>, IndicatorError> {
    let mut arrivals: BTreeMap<i64, Vec<NaiveTime>> = BTreeMap::new();
    for st in stop_times.iter().filter(|st| st.hour < HOURS_PER_DAY) {
        let Some(seconds) = st.arrival_time else {
            continue;
        };
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).ok_or_else(|| {
            IndicatorError::InvalidArrivalTime {
                trip_id: st.trip_id.clone(),
                stop_id: st.stop_id,
                seconds,
            }
        })?;
        arrivals.entry(st.stop_id).or_default().push(time);
    }

    let headways = arrivals
        .into_iter()
        .map(|(stop_id, mut times)| {
            times.sort();
            let gaps = times
                .iter()
                .tuple_windows()
                .map(|(a, b)| (*b - *a).num_milliseconds() as f64 / 60_000.0);
            (stop_id, mean_skipping_missing(gaps.map(Some)))
        })
        .collect();
    Ok(headways)
}

/// mean block wait time over the blocks where it is defined.
pub fn mean_block_wait_time(rows: &[BlockWaitTime]) -> Option<f64> {
    mean_skipping_missing(rows.iter().map(|r| r.mean_time))
}

fn mean_skipping_missing(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{mean_block_wait_time, run, stop_headways, BlockWaitTime};
    use crate::IndicatorError;
    use geo::{polygon, MultiPolygon, Point};
    use merida_core::model::{
        CensusBlock, IsochronePolygon, PopulationAttributes, Stop, StopTime,
    };
    use merida_gtfs::feed::InMemoryFeed;

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
            (x: x0, y: y0),
        ]])
    }

    fn block(cvegeo: &str, x0: f64) -> CensusBlock {
        CensusBlock {
            cvegeo: cvegeo.to_string(),
            geometry: square(x0, 0.0, 1.0),
            population: PopulationAttributes::default(),
        }
    }

    fn stop(stop_id: i64, x: f64, y: f64) -> Stop {
        Stop {
            stop_id,
            geometry: Point::new(x, y),
        }
    }

    #[test]
    fn test_headway_mean() {
        let mut feed = InMemoryFeed::default();
        for (trip, time) in [("t3", "08:25:00"), ("t1", "08:00:00"), ("t2", "08:10:00")] {
            feed.push_stop_time(trip, 1, time, time).expect("valid");
        }
        feed.push_stop_time("t1", 2, "09:00:00", "09:00:00")
            .expect("valid");
        let headways = stop_headways(&feed.stop_times).expect("headways");
        assert_eq!(headways.get(&1), Some(&Some(12.5)));
        assert_eq!(headways.get(&2), Some(&None));
    }

    #[test]
    fn test_late_and_missing_arrivals_skipped() {
        let mut feed = InMemoryFeed::default();
        feed.push_stop_time("t1", 1, "23:50:00", "23:50:00").expect("valid");
        feed.push_stop_time("t2", 1, "24:05:00", "24:05:00").expect("valid");
        feed.push_stop_time("t3", 1, "", "23:55:00").expect("valid");
        feed.push_stop_time("t4", 1, "23:58:00", "23:58:00").expect("valid");
        let headways = stop_headways(&feed.stop_times).expect("headways");
        assert_eq!(headways.get(&1), Some(&Some(8.0)));
    }

    #[test]
    fn test_arrival_past_midnight_on_kept_row_fails() {
        let bad = StopTime::new(String::from("t1"), 1, Some(86_500), Some(3_600))
            .expect("has times");
        match stop_headways(&[bad]) {
            Err(IndicatorError::InvalidArrivalTime { seconds, .. }) => assert_eq!(seconds, 86_500),
            other => panic!("expected invalid arrival time, found {other:?}"),
        }
    }

    #[test]
    fn test_isochrone_contains_stop_outside_block() {
        // stop 1 lies outside block A's footprint but inside its isochrone
        let mut feed = InMemoryFeed::default();
        feed.stops = vec![stop(1, 1.2, 0.5), stop(2, 5.5, 0.5)];
        for (trip, time) in [("t1", "08:00:00"), ("t2", "08:10:00"), ("t3", "08:30:00")] {
            feed.push_stop_time(trip, 1, time, time).expect("valid");
        }
        feed.push_stop_time("t1", 2, "08:05:00", "08:05:00").expect("valid");
        let isochrones = vec![
            IsochronePolygon {
                cvegeo: String::from("A"),
                geometry: square(-0.5, -0.5, 2.0),
            },
            IsochronePolygon {
                cvegeo: String::from("B"),
                geometry: square(5.0, 0.0, 1.0),
            },
        ];
        let blocks = vec![block("A", 0.0), block("B", 5.0), block("C", 9.0)];
        let rows = run(&feed, &isochrones, &blocks).expect("wait time");
        assert_eq!(
            rows.iter().map(|r| r.cvegeo.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(rows[0].mean_time, Some(15.0));
        assert_eq!(rows[1].mean_time, None);
        assert_eq!(mean_block_wait_time(&rows), Some(15.0));
    }

    #[test]
    fn test_boundary_stop_not_contained() {
        let mut feed = InMemoryFeed::default();
        feed.stops = vec![stop(1, 1.0, 0.5)];
        feed.push_stop_time("t1", 1, "08:00:00", "08:00:00").expect("valid");
        feed.push_stop_time("t2", 1, "08:10:00", "08:10:00").expect("valid");
        let isochrones = vec![IsochronePolygon {
            cvegeo: String::from("A"),
            geometry: square(0.0, 0.0, 1.0),
        }];
        let rows = run(&feed, &isochrones, &[block("A", 0.0)]).expect("wait time");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_pools_stops_per_block() {
        let mut feed = InMemoryFeed::default();
        feed.stops = vec![stop(1, 0.25, 0.5), stop(2, 0.75, 0.5)];
        for (trip, stop_id, time) in [
            ("t1", 1, "07:00:00"),
            ("t2", 1, "07:10:00"),
            ("t1", 2, "07:00:00"),
            ("t2", 2, "07:30:00"),
        ] {
            feed.push_stop_time(trip, stop_id, time, time).expect("valid");
        }
        let isochrones = vec![IsochronePolygon {
            cvegeo: String::from("A"),
            geometry: square(0.0, 0.0, 1.0),
        }];
        let rows: Vec<BlockWaitTime> =
            run(&feed, &isochrones, &[block("A", 0.0)]).expect("wait time");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mean_time, Some(20.0));
    }
}
