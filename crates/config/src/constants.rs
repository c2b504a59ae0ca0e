//! Default feed locations and fixed identifiers
//!
//! Everything here can be overridden from the config file; these are only
//! the values used when a field is absent.

pub const INDEX_URL: &str = "https://f-droid.org/repo/index-v1.jar";
pub const INDEX_MEMBER: &str = "index-v1.json";
pub const LEDGER_URL: &str = "https://verification.f-droid.org/verified.json";
pub const REPO_URL: &str = "https://f-droid.org/repo";

/// Privileged-extension OTA bundle; listed as an app but has no release data
pub const OTA_PACKAGE: &str = "org.fdroid.fdroid.privileged.ota";

pub const NAME_LOCALE: &str = "en-US";

pub const SIGNING_TOOL: &str = "apksigner";
pub const OFFICIAL_SIGNER: &str = "CN=FDroid, OU=FDroid, O=fdroid.org, L=ORG, ST=ORG, C=UK";

/// Directory under the platform config dir holding the config file
pub const APP_DIR_NAME: &str = "vercheck";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform cache dir holding the snapshots
pub const CACHE_DIR_NAME: &str = "vercheck";

/// Snapshot file names inside the cache directory
pub const INDEX_SNAPSHOT: &str = "index.json";
pub const LEDGER_SNAPSHOT: &str = "verified.json";
