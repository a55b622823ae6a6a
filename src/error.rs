//! Unified error types for ipforest

use crate::address::Address;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for parsing, construction and configuration
#[derive(Error, Debug)]
pub enum Error {
    // Address errors
    #[error("Invalid address '{0}'")]
    InvalidFormat(String),

    // Notation errors
    #[error("Invalid bracket notation: {0}")]
    InvalidNotation(String),

    #[error("Cycle detected: link {0} - {1} closes a loop")]
    CycleDetected(Address, Address),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    // Config errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    // Output errors
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type alias for ipforest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a mutation was refused
///
/// Mutations never fail loudly; they hand back one of these and leave the
/// forest exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("address {0} is not part of the forest")]
    UnknownAddress(Address),

    #[error("cannot link {0} to itself")]
    SelfLink(Address),

    #[error("{0} and {1} are already linked")]
    AlreadyLinked(Address, Address),

    #[error("{0} and {1} are not directly linked")]
    NotLinked(Address, Address),

    #[error("linking {0} and {1} would close a cycle")]
    WouldCycle(Address, Address),

    #[error("{0} - {1} is the last remaining link")]
    LastLink(Address, Address),

    #[error("nothing new to merge")]
    NothingToMerge,
}

/// Boolean-like result of a mutation
pub type Outcome = std::result::Result<(), Rejection>;
