mod indicators_config;

pub use indicators_config::IndicatorsConfig;
