//! Cost mode selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EventsmithError;

/// Trade-off between prompt fidelity, retry budget and token spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Aggressive prompt compression, single title retry, no description extension.
    Economy,
    /// Moderate prompt compression, single title retry.
    #[default]
    Balanced,
    /// Prompts sent verbatim, two title retries.
    Premium,
}

impl CostMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostMode::Economy => "economy",
            CostMode::Balanced => "balanced",
            CostMode::Premium => "premium",
        }
    }

    /// Additional title rounds allowed after the primary call.
    pub fn title_retries(&self) -> u32 {
        match self {
            CostMode::Premium => 2,
            CostMode::Economy | CostMode::Balanced => 1,
        }
    }

    /// Whether a short description may be extended with a follow-up call.
    pub fn allows_extension(&self) -> bool {
        !matches!(self, CostMode::Economy)
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMode {
    type Err = EventsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(CostMode::Economy),
            "balanced" => Ok(CostMode::Balanced),
            "premium" => Ok(CostMode::Premium),
            other => Err(EventsmithError::InvalidInput(format!(
                "unknown cost mode '{other}' (expected economy, balanced or premium)"
            ))),
        }
    }
}
