//! Per-package reconciliation report

use crate::Provenance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the currently published version has been independently rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    NotVerified,
    SuccessfullyVerified,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotVerified => write!(f, "not verified"),
            Self::SuccessfullyVerified => write!(f, "successfully verified"),
        }
    }
}

/// Highest verified version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastVerified {
    pub version_code: u64,
    pub version_name: String,
}

/// Result of inspecting the actual artifact's signing certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningVerdict {
    /// The official repository signer is absent: the developer's own
    /// signature was kept on a reproducible build
    Yes,
    /// Signed by the official repository key
    No,
}

impl SigningVerdict {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Reconciled view of one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub package_id: String,
    pub name: String,
    pub current_version_name: String,
    pub current_version_code: u64,
    pub provenance: Option<Provenance>,
    pub status: VerificationStatus,
    pub total_verified: usize,
    pub last_verified: Option<LastVerified>,
    /// Display override from the signing check; the classification stays put
    pub signing_override: Option<SigningVerdict>,
}

impl Report {
    /// Display string for the provenance line, `None` when unavailable
    #[must_use]
    pub fn provenance_label(&self) -> Option<&'static str> {
        if let Some(verdict) = self.signing_override {
            return Some(verdict.label());
        }
        self.provenance.map(Provenance::label)
    }
}
