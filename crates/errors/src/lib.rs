#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for vercheck
//!
//! This crate provides fine-grained error types organized by domain.
//! Upstream-contract violations (a corrupted ledger, an out-of-range
//! provenance value, a malformed index entry) each get their own kind so
//! callers never have to match on message text.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod index;
pub mod ledger;
pub mod network;
pub mod provenance;
pub mod signing;
pub mod storage;

// Re-export all error types at the root
pub use config::ConfigError;
pub use index::IndexError;
pub use ledger::LedgerError;
pub use network::NetworkError;
pub use provenance::ProvenanceError;
pub use signing::SigningError;
pub use storage::StorageError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("provenance error: {0}")]
    Provenance(#[from] ProvenanceError),

    #[error("signing error: {0}")]
    Signing(#[from] SigningError),
}

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::Storage(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Index(err) => err.user_message(),
            Error::Ledger(err) => err.user_message(),
            Error::Provenance(err) => err.user_message(),
            Error::Signing(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::Storage(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Index(err) => err.user_hint(),
            Error::Ledger(err) => err.user_hint(),
            Error::Provenance(err) => err.user_hint(),
            Error::Signing(err) => err.user_hint(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            Error::Storage(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::Storage(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Index(err) => err.user_code(),
            Error::Ledger(err) => err.user_code(),
            Error::Provenance(err) => err.user_code(),
            Error::Signing(err) => err.user_code(),
        }
    }
}
