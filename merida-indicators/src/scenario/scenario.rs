use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the schedule variant an indicator run is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// the current network
    Base,
    /// the network with the proposed intervention
    Treatment,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Base, Scenario::Treatment];
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::Base => write!(f, "base"),
            Scenario::Treatment => write!(f, "treatment"),
        }
    }
}
