//! Wire models of the upstream index documents

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use vercheck_types::RawVersionCode;

/// `index-v1.json`
///
/// Apps are kept as raw values so the exclusion check can run before an
/// entry's required fields are validated.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexV1Document {
    #[serde(default)]
    pub repo: Option<RepoInfo>,
    pub apps: Vec<serde_json::Value>,
    #[serde(default)]
    pub packages: HashMap<String, Vec<PackageVariant>>,
}

/// Repository header
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl RepoInfo {
    /// Publication time of the index
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }
}

/// One application entry of `index-v1.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub package_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub localized: HashMap<String, LocalizedEntry>,
    pub suggested_version_name: String,
    pub suggested_version_code: RawVersionCode,
}

/// Per-locale app texts; only the name matters here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedEntry {
    #[serde(default)]
    pub name: Option<String>,
}

/// One published build of a package version
///
/// Several variants may share a version code, e.g. a source-built
/// reproducible build next to the developer-signed binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVariant {
    pub version_code: RawVersionCode,
    /// Source tarball name; present only on variants built from source
    #[serde(default)]
    pub srcname: Option<String>,
}

impl PackageVariant {
    #[must_use]
    pub fn is_source_built(&self) -> bool {
        self.srcname.is_some()
    }
}

/// Entry of the flat metadata snapshot (`{id: {name, version, vercode}}`)
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    pub vercode: RawVersionCode,
}
