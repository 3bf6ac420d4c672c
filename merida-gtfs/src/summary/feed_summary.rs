use crate::feed::{FeedAccessor, FeedError};
use merida_core::util::fs_utils;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// activity of a feed within one hour-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSummaryRow {
    pub hour: u32,
    /// distinct trips with at least one stop time in the hour
    pub trips: usize,
    /// stop times in the hour
    pub departures: usize,
    /// distinct stops visited in the hour
    pub stops: usize,
}

#[derive(Default)]
struct HourAccumulator<'a> {
    trips: HashSet<&'a str>,
    stops: HashSet<i64>,
    departures: usize,
}

/// per-hour counts over every stop time of the feed, ordered by hour. hours
/// without service are absent.
pub fn summarize(feed: &dyn FeedAccessor) -> Result<Vec<FeedSummaryRow>, FeedError> {
    let stop_times = feed.stop_times()?;
    let mut by_hour: BTreeMap<u32, HourAccumulator> = BTreeMap::new();
    for st in stop_times.iter() {
        let acc = by_hour.entry(st.hour).or_default();
        acc.trips.insert(st.trip_id.as_str());
        acc.stops.insert(st.stop_id);
        acc.departures += 1;
    }
    let rows = by_hour
        .into_iter()
        .map(|(hour, acc)| FeedSummaryRow {
            hour,
            trips: acc.trips.len(),
            departures: acc.departures,
            stops: acc.stops.len(),
        })
        .collect::<Vec<_>>();
    log::info!(
        "summarized {} stop times into {} hours",
        stop_times.len(),
        rows.len()
    );
    Ok(rows)
}

/// writes summary rows as CSV to `output_file`.
pub fn write_summary(
    rows: &[FeedSummaryRow],
    output_file: &Path,
    overwrite: bool,
) -> Result<(), FeedError> {
    let directory = output_file.parent().unwrap_or_else(|| Path::new(""));
    let filename = output_file
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .ok_or_else(|| {
            FeedError::OtherError(format!(
                "output file {} has no file name",
                output_file.to_string_lossy()
            ))
        })?;
    let filepath =
        fs_utils::output_path(directory, &filename, overwrite).map_err(FeedError::OtherError)?;
    let path_str = filepath.to_string_lossy().to_string();
    let mut writer =
        csv::Writer::from_path(&filepath).map_err(|e| FeedError::CsvWriteError(path_str.clone(), e))?;
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| FeedError::CsvWriteError(path_str.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| FeedError::CsvWriteError(path_str.clone(), csv::Error::from(e)))?;
    log::info!("wrote {} summary rows to {path_str}", rows.len());
    Ok(())
}
