use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use super::{Command, CommandError, CommandReader};
use crate::config::{ConfigError, EngineConfig};
use crate::registry::{ContainerRegistry, RegistryError};
use crate::tree::{ExtractError, PowerTree};

/// Whether the dispatcher keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// Quit was received
    Stop,
}

/// Counters accumulated over one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Insert commands applied
    pub inserts: usize,
    /// Extractions that returned an identifier
    pub extracted: usize,
    /// Extractions that found an empty container
    pub empty: usize,
    /// Unknown codes and out-of-range indices
    pub skipped: usize,
}

/// Dispatcher state: a registry plus error policy.
#[derive(Debug)]
pub struct Session {
    registry: ContainerRegistry,
    strict: bool,
    stats: SessionStats,
}

impl Session {
    /// Session over a freshly allocated registry
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_registry(ContainerRegistry::new(config)?))
    }

    /// Session over an existing registry
    pub fn with_registry(registry: ContainerRegistry) -> Self {
        Self {
            registry,
            strict: false,
            stats: SessionStats::default(),
        }
    }

    /// Treat out-of-range container indices as fatal instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registry backing this session
    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    /// Counters so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Apply one command, writing any extraction result to `out`.
    pub fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, CommandError> {
        match command {
            Command::Insert {
                tree,
                identifier,
                power,
            } => {
                if let Some(container) = self.container(tree)? {
                    container.insert(power, identifier);
                    self.stats.inserts += 1;
                }
            }
            Command::ExtractMax { tree } => {
                if let Some(container) = self.container(tree)? {
                    let outcome = container.extract_max();
                    self.report(outcome, out)?;
                }
            }
            Command::ExtractMin { tree } => {
                if let Some(container) = self.container(tree)? {
                    let outcome = container.extract_min();
                    self.report(outcome, out)?;
                }
            }
            Command::Quit => {
                debug!("quit received");
                return Ok(Flow::Stop);
            }
            Command::Ignored { code } => {
                debug!(code, "ignoring unknown command code");
                self.stats.skipped += 1;
            }
        }
        Ok(Flow::Continue)
    }

    /// Read commands from `input` until quit or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<SessionStats, CommandError> {
        for command in CommandReader::new(input) {
            if self.apply(command?, out)? == Flow::Stop {
                break;
            }
        }
        out.flush()?;
        info!(
            inserts = self.stats.inserts,
            extracted = self.stats.extracted,
            empty = self.stats.empty,
            skipped = self.stats.skipped,
            "session finished"
        );
        Ok(self.stats)
    }

    /// Resolve a container, skipping bad indices unless strict.
    fn container(&mut self, index: usize) -> Result<Option<&mut PowerTree>, RegistryError> {
        match self.registry.get_mut(index) {
            Ok(container) => Ok(Some(container)),
            Err(err) if !self.strict => {
                warn!(%err, "skipping command");
                self.stats.skipped += 1;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn report<W: Write>(
        &mut self,
        outcome: Result<u64, ExtractError>,
        out: &mut W,
    ) -> Result<(), CommandError> {
        match outcome {
            Ok(identifier) => {
                self.stats.extracted += 1;
                writeln!(out, "{identifier}")?;
            }
            Err(ExtractError::Empty) => {
                self.stats.empty += 1;
                writeln!(out, "empty")?;
            }
        }
        Ok(())
    }
}
