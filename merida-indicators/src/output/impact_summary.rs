use crate::IndicatorError;
use merida_core::model::{PopulationAttributes, PopulationDelta};
use serde::{Deserialize, Serialize};
use std::io::BufWriter;
use std::path::Path;

/// headline values of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioIndicators {
    pub population_served: PopulationAttributes,
    pub served_blocks: usize,
    /// minutes, over blocks with a defined wait time
    pub mean_wait_time: Option<f64>,
    pub blocks_with_wait_time: usize,
    /// over hours with a defined correlation
    pub mean_correlation: Option<f64>,
}

/// treatment minus base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactDelta {
    pub population_served: PopulationDelta,
    pub mean_wait_time: Option<f64>,
    pub mean_correlation: Option<f64>,
}

/// base and treatment indicators side by side with their difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// walking time budget of the isochrones, in minutes
    pub walking_time: u32,
    pub base: ScenarioIndicators,
    pub treatment: ScenarioIndicators,
    pub impact: ImpactDelta,
}

impl ImpactSummary {
    pub fn new(
        walking_time: u32,
        base: ScenarioIndicators,
        treatment: ScenarioIndicators,
    ) -> ImpactSummary {
        let diff = |b: Option<f64>, t: Option<f64>| match (b, t) {
            (Some(b), Some(t)) => Some(t - b),
            _ => None,
        };
        let impact = ImpactDelta {
            population_served: base.population_served.delta_to(&treatment.population_served),
            mean_wait_time: diff(base.mean_wait_time, treatment.mean_wait_time),
            mean_correlation: diff(base.mean_correlation, treatment.mean_correlation),
        };
        ImpactSummary {
            walking_time,
            base,
            treatment,
            impact,
        }
    }
}

pub fn write_impact_summary(summary: &ImpactSummary, path: &Path) -> Result<(), IndicatorError> {
    let write_error =
        |e: String| IndicatorError::OutputWriteError(path.to_string_lossy().to_string(), e);
    let file = std::fs::File::create(path).map_err(|e| write_error(e.to_string()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .map_err(|e| write_error(e.to_string()))?;
    log::info!("wrote impact summary to {}", path.display());
    Ok(())
}
