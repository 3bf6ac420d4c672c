use crate::scenario::Scenario;
use crate::IndicatorError;
use merida_core::util::fs_utils;
use std::path::{Path, PathBuf};

pub const IMPACT_SUMMARY_FILENAME: &str = "indicadores_impacto.json";

/// per-scenario output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFile {
    Correlation,
    SupplyTable,
    DemandTable,
    FeedTimeSeries,
    ServedBlocks,
    WaitTime,
}

impl OutputFile {
    pub const ALL: [OutputFile; 6] = [
        OutputFile::Correlation,
        OutputFile::SupplyTable,
        OutputFile::DemandTable,
        OutputFile::FeedTimeSeries,
        OutputFile::ServedBlocks,
        OutputFile::WaitTime,
    ];

    pub fn filename(&self, scenario: Scenario) -> String {
        match self {
            OutputFile::Correlation => format!("correlacion_oferta_demanda_{scenario}.csv"),
            OutputFile::SupplyTable => format!("oferta_zona_hora_{scenario}.csv"),
            OutputFile::DemandTable => format!("viajes_origen_hora_zona_{scenario}.csv"),
            OutputFile::FeedTimeSeries => format!("feed_time_series_{scenario}.csv"),
            OutputFile::ServedBlocks => format!("manzanas_rutas_atendidas_{scenario}.geojson"),
            OutputFile::WaitTime => format!("manzanas_tiempo_promedio_{scenario}.geojson"),
        }
    }

    /// path of this file in `directory`, failing if it exists and
    /// overwriting is disabled.
    pub fn path(
        &self,
        directory: &Path,
        scenario: Scenario,
        overwrite: bool,
    ) -> Result<PathBuf, IndicatorError> {
        fs_utils::output_path(directory, &self.filename(scenario), overwrite)
            .map_err(IndicatorError::OutputExists)
    }
}

/// verifies up front that no output of the run would clobber an existing
/// file when overwriting is disabled.
pub fn check_outputs(
    directory: &Path,
    scenarios: &[Scenario],
    overwrite: bool,
) -> Result<(), IndicatorError> {
    for scenario in scenarios.iter() {
        for file in OutputFile::ALL.iter() {
            file.path(directory, *scenario, overwrite)?;
        }
    }
    fs_utils::output_path(directory, IMPACT_SUMMARY_FILENAME, overwrite)
        .map_err(IndicatorError::OutputExists)?;
    Ok(())
}
