//! Package metadata from the repository index

use crate::Provenance;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current release of one package as published by the repository index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub package_id: String,
    /// Display name, empty when upstream has none
    pub name: String,
    pub current_version_name: String,
    pub current_version_code: u64,
    /// Only present when the index carries per-version package variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl PackageMetadata {
    /// Create metadata without a provenance classification
    pub fn new(
        package_id: impl Into<String>,
        name: impl Into<String>,
        current_version_name: impl Into<String>,
        current_version_code: u64,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            name: name.into(),
            current_version_name: current_version_name.into(),
            current_version_code,
            provenance: None,
        }
    }

    /// Attach a provenance classification
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Case-insensitive substring match against the display name
    #[must_use]
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

/// Package id keyed table that iterates in insertion order
///
/// Search results are reported in the order the index document lists its
/// packages, so a plain `HashMap` is not enough here.
#[derive(Debug, Clone, Default)]
pub struct PackageTable {
    entries: Vec<PackageMetadata>,
    positions: HashMap<String, usize>,
}

impl PackageTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert metadata; a repeated id replaces the earlier entry in place
    pub fn insert(&mut self, metadata: PackageMetadata) -> Option<PackageMetadata> {
        if let Some(&pos) = self.positions.get(&metadata.package_id) {
            return Some(std::mem::replace(&mut self.entries[pos], metadata));
        }
        self.positions
            .insert(metadata.package_id.clone(), self.entries.len());
        self.entries.push(metadata);
        None
    }

    #[must_use]
    pub fn get(&self, package_id: &str) -> Option<&PackageMetadata> {
        self.positions
            .get(package_id)
            .map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, package_id: &str) -> bool {
        self.positions.contains_key(package_id)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, PackageMetadata> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PackageMetadata> for PackageTable {
    fn from_iter<I: IntoIterator<Item = PackageMetadata>>(iter: I) -> Self {
        let mut table = Self::new();
        for metadata in iter {
            table.insert(metadata);
        }
        table
    }
}

impl<'a> IntoIterator for &'a PackageTable {
    type Item = &'a PackageMetadata;
    type IntoIter = std::slice::Iter<'a, PackageMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Version code as it appears on the wire
///
/// Both feeds are inconsistent about whether version codes are JSON numbers
/// or decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawVersionCode {
    Number(u64),
    Text(String),
}

impl RawVersionCode {
    /// Parse to an integer, `None` if the text form is not a decimal number
    #[must_use]
    pub fn parse(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for RawVersionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}
