mod indicators_app;
mod operation;

pub use indicators_app::IndicatorsApp;
pub use operation::IndicatorsOperation;
