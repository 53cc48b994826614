//! Engine configuration
//!
//! Registry capacity and the rebalancing strategy shared by every container.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Container count of the reference deployment
pub const DEFAULT_CONTAINERS: usize = 10_000;

/// How a container restores AVL balance after a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BalanceMode {
    /// Rebalance every node of the affected subtree (whole tree on insert).
    ///
    /// Cost per mutation grows with subtree size.
    #[default]
    Subtree,

    /// Rebalance only nodes on the mutated path; same resulting shape.
    Path,
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceMode::Subtree => write!(f, "subtree"),
            BalanceMode::Path => write!(f, "path"),
        }
    }
}

impl FromStr for BalanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtree" => Ok(BalanceMode::Subtree),
            "path" => Ok(BalanceMode::Path),
            other => Err(ConfigError::UnknownBalanceMode(other.to_string())),
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Registry must hold at least one container
    #[error("registry must hold at least one container")]
    NoContainers,

    /// Unrecognised balance mode name
    #[error("unknown balance mode '{0}' (expected 'subtree' or 'path')")]
    UnknownBalanceMode(String),
}

/// Configuration for a registry of containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of containers, addressed 1..=containers
    pub containers: usize,

    /// Rebalancing strategy for every container
    pub balance: BalanceMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            containers: DEFAULT_CONTAINERS,
            balance: BalanceMode::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with a custom container count
    pub fn with_containers(containers: usize) -> Self {
        Self {
            containers,
            ..Self::default()
        }
    }

    /// Reject configurations no registry can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.containers == 0 {
            return Err(ConfigError::NoContainers);
        }
        Ok(())
    }
}
