use crate::engine::correlation::{CorrelationRow, ZoneHourTable};
use crate::IndicatorError;
use itertools::Itertools;
use merida_gtfs::summary::FeedSummaryRow;
use std::fs::File;
use std::path::Path;

fn create_writer(path: &Path) -> Result<csv::Writer<File>, IndicatorError> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> IndicatorError {
    IndicatorError::OutputWriteError(path.to_string_lossy().to_string(), e.to_string())
}

/// writes the hourly correlation with a leading unnamed row index column.
/// undefined correlations are written as NaN.
pub fn write_correlation(rows: &[CorrelationRow], path: &Path) -> Result<(), IndicatorError> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(["", "hora", "correlacion"])
        .map_err(|e| write_error(path, e))?;
    for (idx, row) in rows.iter().enumerate() {
        writer
            .write_record([
                idx.to_string(),
                row.hora.to_string(),
                row.correlacion.to_string(),
            ])
            .map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    log::info!("wrote {} correlation rows to {}", rows.len(), path.display());
    Ok(())
}

/// writes a zone × hour table with one row per zone and one column per hour.
pub fn write_zone_hour_table(table: &ZoneHourTable, path: &Path) -> Result<(), IndicatorError> {
    let hours = table.hours().collect_vec();
    let mut writer = create_writer(path)?;
    let header = std::iter::once(String::from("zona_id"))
        .chain(hours.iter().map(|h| h.to_string()))
        .collect_vec();
    writer
        .write_record(&header)
        .map_err(|e| write_error(path, e))?;
    for zone in table.zones() {
        let record = std::iter::once(zone.to_string())
            .chain(table.row(zone, &hours).iter().map(|v| v.to_string()))
            .collect_vec();
        writer
            .write_record(&record)
            .map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    log::info!("wrote zone x hour table to {}", path.display());
    Ok(())
}

pub fn write_feed_summary(rows: &[FeedSummaryRow], path: &Path) -> Result<(), IndicatorError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;
    for row in rows.iter() {
        writer.serialize(row).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}
