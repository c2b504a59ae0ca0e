//! Wire model of the verification ledger (`verified.json`)

use serde::Deserialize;
use std::collections::HashMap;
use vercheck_types::RawVersionCode;

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerDocument {
    pub packages: HashMap<String, Vec<LedgerEntry>>,
}

/// One verification run; fields other than these are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    pub verified: bool,
    pub local: LocalBuild,
}

/// The locally rebuilt artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBuild {
    pub version_code: RawVersionCode,
    pub version_name: String,
}
