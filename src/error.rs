//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails; only configuration loading and the
//! receipt session can.

use std::fmt;

use crate::sim::GamePhase;

/// Configuration could not be loaded or describes impossible geometry
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A numeric field is out of range
    InvalidValue { name: &'static str, value: f64 },
    /// A body is larger than the container
    DoesNotFit { body: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value for {}: {}", name, value)
            }
            ConfigError::DoesNotFit { body } => {
                write!(f, "{} does not fit inside the container", body)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Failure reported by a [`crate::receipts::ReceiptSource`]
#[derive(Debug)]
pub enum SourceError {
    /// No receipt with this id
    UnknownReceipt(u32),
    /// The upload was refused (bad file, processing failure)
    Rejected(String),
    /// A response body could not be decoded
    Decode(serde_json::Error),
    /// The collaborator could not be reached
    Unavailable(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::UnknownReceipt(id) => write!(f, "no receipt with id {}", id),
            SourceError::Rejected(reason) => write!(f, "upload rejected: {}", reason),
            SourceError::Decode(e) => write!(f, "malformed response: {}", e),
            SourceError::Unavailable(reason) => write!(f, "receipt service unavailable: {}", reason),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e)
    }
}

/// A session operation failed; game state is left as it was
#[derive(Debug)]
pub enum SessionError {
    Source(SourceError),
    /// The receipt has no line items to play with
    EmptyReceipt { id: u32 },
    /// A line item price is NaN or infinite
    InvalidPrice { index: usize, price: f64 },
    /// The requested phase change is not allowed from the current phase
    InvalidTransition { from: GamePhase, to: GamePhase },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Source(e) => write!(f, "{}", e),
            SessionError::EmptyReceipt { id } => write!(f, "receipt {} has no line items", id),
            SessionError::InvalidPrice { index, price } => {
                write!(f, "line item {} has an invalid price ({})", index, price)
            }
            SessionError::InvalidTransition { from, to } => {
                write!(f, "cannot go from {:?} to {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for SessionError {
    fn from(e: SourceError) -> Self {
        SessionError::Source(e)
    }
}
