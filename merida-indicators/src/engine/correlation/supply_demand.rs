use super::ZoneHourTable;
use serde::{Deserialize, Serialize};

/// correlation between supply and demand for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub hora: u32,
    /// NaN when the hour has fewer than two zones or no variation
    pub correlacion: f64,
}

/// output of the correlation engine with the tables it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyDemandCorrelation {
    pub rows: Vec<CorrelationRow>,
    /// distinct trips per zone and hour
    pub supply: ZoneHourTable,
    /// trips originating per zone and hour
    pub demand: ZoneHourTable,
}

impl SupplyDemandCorrelation {
    /// average correlation over the hours where it is defined.
    pub fn mean_correlation(&self) -> Option<f64> {
        let defined = self
            .rows
            .iter()
            .map(|r| r.correlacion)
            .filter(|c| !c.is_nan())
            .collect::<Vec<_>>();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }
}
