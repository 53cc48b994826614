//! Line-oriented command surface
//!
//! | code | operands                       | effect                    |
//! |------|--------------------------------|---------------------------|
//! | 0    | tree index, identifier, power  | insert                    |
//! | 1    | tree index                     | extract max, print result |
//! | 2    | tree index                     | extract min, print result |
//! | 4    |                                | stop                      |
//! | *    |                                | ignored                   |
//!
//! Extraction prints the identifier in decimal or the literal `empty`.

mod parser;
mod session;

pub use parser::CommandReader;
pub use session::{Flow, Session, SessionStats};

use thiserror::Error;

use crate::registry::RegistryError;

/// One decoded dispatcher command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Code 0
    Insert {
        /// 1-based container index
        tree: usize,
        /// Token stored in the bucket
        identifier: u64,
        /// Ordering key
        power: u64,
    },

    /// Code 1
    ExtractMax {
        /// 1-based container index
        tree: usize,
    },

    /// Code 2
    ExtractMin {
        /// 1-based container index
        tree: usize,
    },

    /// Code 4
    Quit,

    /// Any other code; consumes no operands
    Ignored {
        /// The unrecognised code
        code: i64,
    },
}

/// Failures while reading or applying commands
#[derive(Debug, Error)]
pub enum CommandError {
    /// Token could not be parsed as the expected unsigned integer
    #[error("invalid {expected}: '{token}'")]
    InvalidToken {
        /// Raw token text
        token: String,
        /// What the token should have been
        expected: &'static str,
    },

    /// Input ended partway through a command
    #[error("input ended before the {operand} of {command}")]
    MissingOperand {
        /// Command being decoded
        command: &'static str,
        /// Missing operand name
        operand: &'static str,
    },

    /// Container index rejected by the registry (strict sessions only)
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Reading input or writing output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
