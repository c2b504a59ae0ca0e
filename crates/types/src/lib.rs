#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for vercheck
//!
//! This crate holds the normalized, in-memory shape of both feeds (the
//! repository index and the verification ledger) and the per-package
//! report computed from them.

pub mod ledger;
pub mod package;
pub mod provenance;
pub mod reports;

// Re-export commonly used types
pub use ledger::{Ledger, VerificationRecord};
pub use package::{PackageMetadata, PackageTable, RawVersionCode};
pub use provenance::Provenance;
pub use reports::{LastVerified, Report, SigningVerdict, VerificationStatus};

use serde::{Deserialize, Serialize};

/// How a query string selects packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Exact package id match
    #[default]
    Exact,
    /// Case-insensitive substring match on the display name
    Search,
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Search => write!(f, "search"),
        }
    }
}
