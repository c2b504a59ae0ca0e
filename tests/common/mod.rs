//! Mock feed server shared by the end-to-end tests
//!
//! Serves an index and a verification ledger the way the upstream
//! repository does, and builds an ops context pointed at them.

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Map, Value};
use std::io::{Cursor, Write};
use tempfile::TempDir;
use vercheck_config::{Config, IndexFormatKind};
use vercheck_ops::{OpsContextBuilder, OpsCtx};
use zip::write::SimpleFileOptions;

pub const INDEX_PATH: &str = "/repo/index-v1.jar";
pub const SNAPSHOT_PATH: &str = "/metadata.json";
pub const LEDGER_PATH: &str = "/verified.json";

/// Ledger entries keyed by package id, in insertion order
#[derive(Default)]
pub struct LedgerBuilder {
    packages: Map<String, Value>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one successful verification run
    pub fn verified(mut self, package_id: &str, version_code: Value, version_name: &str) -> Self {
        self.push(package_id, true, version_code, version_name);
        self
    }

    /// Append a run flagged as not verified
    pub fn unverified(mut self, package_id: &str, version_code: Value, version_name: &str) -> Self {
        self.push(package_id, false, version_code, version_name);
        self
    }

    fn push(&mut self, package_id: &str, verified: bool, version_code: Value, version_name: &str) {
        let entries = self
            .packages
            .entry(package_id.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(entries) = entries {
            entries.push(json!({
                "apk_url": format!("https://f-droid.org/repo/{package_id}.apk"),
                "verified": verified,
                "local": {"versionCode": version_code, "versionName": version_name}
            }));
        }
    }

    pub fn build(self) -> String {
        json!({ "packages": self.packages }).to_string()
    }
}

/// Zip `contents` as the single member of an `index-v1.jar`
pub fn index_jar(contents: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("index-v1.json", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(contents.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// A mock upstream plus a private cache directory
pub struct TestEnvironment {
    pub server: MockServer,
    pub cache_dir: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start_async().await,
            cache_dir: TempDir::new().unwrap(),
        }
    }

    pub async fn serve(&self, path: &str, body: impl Into<Vec<u8>>) -> Mock<'_> {
        let body = body.into();
        self.server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).body(body);
            })
            .await
    }

    /// Configuration pointed at the mock server
    pub fn config(&self, format: IndexFormatKind) -> Config {
        let mut config = Config::default();
        config.cache.dir = Some(self.cache_dir.path().to_path_buf());
        config.feeds.index_format = format;
        config.feeds.index_url = match format {
            IndexFormatKind::IndexV1 => self.server.url(INDEX_PATH),
            IndexFormatKind::Snapshot => self.server.url(SNAPSHOT_PATH),
        };
        config.feeds.ledger_url = self.server.url(LEDGER_PATH);
        config.feeds.repo_url = self.server.url("/repo");
        config
    }

    pub fn context(&self, format: IndexFormatKind) -> OpsCtx {
        OpsContextBuilder::new()
            .with_config(self.config(format))
            .build()
            .unwrap()
    }
}
