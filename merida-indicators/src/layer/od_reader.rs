use crate::IndicatorError;
use merida_core::model::OdRecord;
use serde::Deserialize;

/// row of the mobile-phone origin-destination matrix. extra columns are
/// ignored.
#[derive(Deserialize)]
struct OdRow {
    origin_zone: i64,
    destination_zone: i64,
    origin_period: String,
    trips: Option<f64>,
}

/// reads the origin-destination matrix. an empty `trips` cell counts as no
/// trips.
pub fn read_od_records(file: &str) -> Result<Vec<OdRecord>, IndicatorError> {
    let err = |msg: String| IndicatorError::OdReadError(file.to_string(), msg);
    let mut reader = csv::Reader::from_path(file).map_err(|e| err(e.to_string()))?;
    let mut records = vec![];
    for (idx, row) in reader.deserialize::<OdRow>().enumerate() {
        let row = row.map_err(|e| err(format!("row {idx}: {e}")))?;
        let hour = OdRecord::parse_period(&row.origin_period)
            .map_err(|e| err(format!("row {idx}: {e}")))?;
        records.push(OdRecord {
            origin_zone: row.origin_zone,
            destination_zone: row.destination_zone,
            hour,
            trips: row.trips.unwrap_or(0.0),
        });
    }
    log::info!("read {} origin-destination records from {file}", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::read_od_records;
    use std::fs;

    fn write(name: &str, contents: &str) -> String {
        let dir = std::env::temp_dir().join("merida-indicators-od-reader");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("write");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_read_od_records() {
        let file = write(
            "od.csv",
            "origin_zone,destination_zone,origin_period,destination_period,trips\n\
             1,2,p8,p9,12.5\n\
             2,1,p17,p17,\n",
        );
        let records = read_od_records(&file).expect("valid file");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hour, 8);
        assert_eq!(records[0].trips, 12.5);
        assert_eq!(records[1].hour, 17);
        assert_eq!(records[1].trips, 0.0);
    }

    #[test]
    fn test_bad_period_reports_file() {
        let file = write(
            "bad_od.csv",
            "origin_zone,destination_zone,origin_period,trips\n1,2,pm,3\n",
        );
        let err = read_od_records(&file).expect_err("invalid period");
        assert!(err.to_string().contains("bad_od.csv"));
    }
}
