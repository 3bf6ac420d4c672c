use crate::config::IndicatorsConfig;
use crate::scenario;
use crate::IndicatorError;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum IndicatorsOperation {
    /// compute correlation, coverage and wait time for both scenarios
    Run {
        /// TOML or JSON run configuration. without it, the default data
        /// layout is used
        #[arg(long)]
        config: Option<String>,
        /// walking time budget of the isochrones, in minutes
        #[arg(long)]
        walking_time: Option<u32>,
        #[arg(long)]
        output_directory: Option<String>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
        /// process the scenarios one after the other
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// print the default configuration as TOML
    Defaults,
}

impl IndicatorsOperation {
    pub fn run(&self) -> Result<(), IndicatorError> {
        match self {
            IndicatorsOperation::Run {
                config,
                walking_time,
                output_directory,
                overwrite,
                sequential,
            } => {
                let mut conf = match config {
                    Some(f) => IndicatorsConfig::try_from(f)?,
                    None => IndicatorsConfig::default(),
                };
                if let Some(t) = walking_time {
                    conf.walking_time = *t;
                }
                if let Some(dir) = output_directory {
                    conf.output_directory = dir.clone();
                }
                conf.overwrite = conf.overwrite || *overwrite;
                conf.parallelize = conf.parallelize && !*sequential;
                scenario::run(&conf)?;
                Ok(())
            }
            IndicatorsOperation::Defaults => {
                let text = toml::to_string_pretty(&IndicatorsConfig::default()).map_err(|e| {
                    IndicatorError::ConfigurationError(format!(
                        "failure encoding default configuration: {e}"
                    ))
                })?;
                println!("{text}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndicatorsOperation;
    use crate::app::IndicatorsApp;
    use crate::config::IndicatorsConfig;
    use clap::Parser;

    #[test]
    fn test_parse_run_overrides() {
        let app = IndicatorsApp::try_parse_from([
            "merida_indicators",
            "run",
            "--walking-time",
            "10",
            "--output-directory",
            "out",
            "--sequential",
        ])
        .expect("valid arguments");
        match app.op {
            IndicatorsOperation::Run {
                config,
                walking_time,
                output_directory,
                overwrite,
                sequential,
            } => {
                assert_eq!(config, None);
                assert_eq!(walking_time, Some(10));
                assert_eq!(output_directory.as_deref(), Some("out"));
                assert!(!overwrite);
                assert!(sequential);
            }
            other => panic!("expected run, found {other:?}"),
        }
    }

    #[test]
    fn test_default_config_toml_round_trip() {
        let default = IndicatorsConfig::default();
        let text = toml::to_string_pretty(&default).expect("encode");
        let decoded: IndicatorsConfig = toml::from_str(&text).expect("decode");
        assert_eq!(decoded, default);
    }
}
