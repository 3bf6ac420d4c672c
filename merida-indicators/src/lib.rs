pub mod app;
pub mod config;
pub mod engine;
pub mod indicator_error;
pub mod layer;
pub mod output;
pub mod scenario;

pub use indicator_error::IndicatorError;
