//! Verification ledger records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One independent rebuild of a package version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub package_id: String,
    pub verified: bool,
    pub local_version_code: u64,
    pub local_version_name: String,
}

/// All verification records, keyed by package id
///
/// Record order within a package is ledger order. Ids with no matching
/// index entry are kept; lookups simply never ask for them.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    packages: HashMap<String, Vec<VerificationRecord>>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records for one package id
    pub fn insert(&mut self, package_id: impl Into<String>, records: Vec<VerificationRecord>) {
        self.packages.insert(package_id.into(), records);
    }

    /// Records for a package id, empty if the ledger has none
    #[must_use]
    pub fn records_for(&self, package_id: &str) -> &[VerificationRecord] {
        self.packages.get(package_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}
