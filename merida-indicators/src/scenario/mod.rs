mod scenario;
mod scenario_ops;

pub use scenario::Scenario;
pub use scenario_ops::{run, run_scenario, ScenarioResult, SharedInputs};
