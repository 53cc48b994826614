//! # Indexed AVL priority containers
//!
//! A fixed registry of independent containers. Each container orders its
//! entries by a `u64` *power*; every power carries a bucket of `u64`
//! *identifiers*.
//!
//! ## Operations
//!
//! 1. **Insert**: store an identifier under a power (new powers create a node)
//! 2. **Extract min**: take the smallest identifier at the lowest power
//! 3. **Extract max**: take the smallest identifier at the highest power
//!
//! A node is unlinked the moment its bucket drains. After every structural
//! change the tree is restored to AVL balance, so height stays O(log n).
//!
//! ## Usage Example
//!
//! ```
//! use powertree::{create_container, ExtractError};
//!
//! let mut tree = create_container();
//! tree.insert(5, 10);
//! tree.insert(5, 20);
//! tree.insert(3, 99);
//!
//! assert_eq!(tree.extract_min(), Ok(99));
//! assert_eq!(tree.extract_min(), Ok(10));
//! assert_eq!(tree.extract_max(), Ok(20));
//! assert_eq!(tree.extract_min(), Err(ExtractError::Empty));
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod command; // Command decoding and dispatch
pub mod config; // Registry size and balance mode
pub mod registry; // Fixed-size container registry
pub mod tree; // AVL container, rotations and balancing

// Re-exports for convenience
pub use command::{Command, CommandError, CommandReader, Flow, Session, SessionStats};
pub use config::{BalanceMode, ConfigError, EngineConfig, DEFAULT_CONTAINERS};
pub use registry::{ContainerRegistry, RegistryError};
pub use tree::{Bucket, ExtractError, InvariantViolation, PowerTree, TreeSnapshot};

/// Create an empty container with the reference balancing behaviour.
pub fn create_container() -> PowerTree {
    PowerTree::new()
}
