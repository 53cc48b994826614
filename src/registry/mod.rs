//! Fixed-size registry of containers
//!
//! Containers are addressed 1..=capacity and stay at their slot for the whole
//! session. Capacity is set once at construction.

use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::tree::PowerTree;

/// Lookup with an index outside 1..=capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Index 0 or beyond the last container
    #[error("container index {index} out of range 1..={capacity}")]
    IndexOutOfRange {
        /// Requested 1-based index
        index: usize,
        /// Number of containers in the registry
        capacity: usize,
    },
}

/// Pre-allocated, independently addressable containers
#[derive(Debug, Clone)]
pub struct ContainerRegistry {
    containers: Vec<PowerTree>,
}

impl ContainerRegistry {
    /// Allocate `config.containers` empty containers
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            containers = config.containers,
            balance = %config.balance,
            "allocating registry"
        );
        Ok(Self {
            containers: (0..config.containers)
                .map(|_| PowerTree::with_mode(config.balance))
                .collect(),
        })
    }

    /// Number of containers
    pub fn capacity(&self) -> usize {
        self.containers.len()
    }

    fn slot(&self, index: usize) -> Result<usize, RegistryError> {
        if index == 0 || index > self.containers.len() {
            return Err(RegistryError::IndexOutOfRange {
                index,
                capacity: self.containers.len(),
            });
        }
        Ok(index - 1)
    }

    /// Container at 1-based `index`
    pub fn get(&self, index: usize) -> Result<&PowerTree, RegistryError> {
        let slot = self.slot(index)?;
        Ok(&self.containers[slot])
    }

    /// Mutable container at 1-based `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut PowerTree, RegistryError> {
        let slot = self.slot(index)?;
        Ok(&mut self.containers[slot])
    }

    /// Iterate `(index, container)` pairs, 1-based
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PowerTree)> {
        self.containers
            .iter()
            .enumerate()
            .map(|(slot, tree)| (slot + 1, tree))
    }

    /// Total identifiers stored across all containers
    pub fn total_len(&self) -> usize {
        self.containers.iter().map(PowerTree::len).sum()
    }
}
