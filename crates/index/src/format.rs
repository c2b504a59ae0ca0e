//! Index document formats
//!
//! Every upstream format reduces to the same capability: turn the raw
//! document into a [`PackageTable`]. Only one format is in use per
//! deployment, selected by `feeds.index_format`.

use crate::models::{AppEntry, IndexV1Document, PackageVariant, SnapshotEntry};
use crate::provenance::classify;
use std::collections::HashSet;
use tracing::{debug, info};
use vercheck_config::{FeedConfig, IndexFormatKind};
use vercheck_errors::{Error, IndexError};
use vercheck_types::{PackageMetadata, PackageTable, RawVersionCode};

/// A parser for one upstream index format
pub trait MetadataFormat: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Parse a whole document
    ///
    /// # Errors
    ///
    /// Returns an `IndexError` if the document or any non-excluded entry is
    /// malformed, or a `ProvenanceError` if classification fails.
    fn parse(&self, document: &[u8]) -> Result<PackageTable, Error>;
}

/// Build the parser configured for this deployment
#[must_use]
pub fn format_for(feeds: &FeedConfig) -> Box<dyn MetadataFormat> {
    match feeds.index_format {
        IndexFormatKind::IndexV1 => Box::new(IndexV1Format::new(
            feeds.excluded_packages.iter().cloned(),
            feeds.name_locale.clone(),
        )),
        IndexFormatKind::Snapshot => {
            Box::new(SnapshotFormat::new(feeds.excluded_packages.iter().cloned()))
        }
    }
}

fn parse_version_code(package_id: &str, raw: &RawVersionCode) -> Result<u64, Error> {
    raw.parse().ok_or_else(|| {
        IndexError::InvalidVersionCode {
            package_id: package_id.to_string(),
            value: raw.to_string(),
        }
        .into()
    })
}

fn non_blank(name: Option<&String>) -> Option<&str> {
    name.map(|n| n.trim()).filter(|n| !n.is_empty())
}

/// `index-v1.json` with per-version package variants
#[derive(Debug, Clone)]
pub struct IndexV1Format {
    excluded: HashSet<String>,
    locale: String,
}

impl IndexV1Format {
    pub fn new(excluded: impl IntoIterator<Item = String>, locale: impl Into<String>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
            locale: locale.into(),
        }
    }

    fn resolve_name(&self, app: &AppEntry) -> String {
        non_blank(app.name.as_ref())
            .or_else(|| {
                app.localized
                    .get(&self.locale)
                    .and_then(|l| non_blank(l.name.as_ref()))
            })
            .unwrap_or_default()
            .to_string()
    }

    /// Classify exactly the variants that share the app's current version code
    fn release_provenance(
        package_id: &str,
        version_code: u64,
        variants: &[PackageVariant],
    ) -> Result<vercheck_types::Provenance, Error> {
        let mut current = Vec::new();
        for variant in variants {
            if parse_version_code(package_id, &variant.version_code)? == version_code {
                current.push(variant);
            }
        }
        classify(current)
    }
}

impl MetadataFormat for IndexV1Format {
    fn name(&self) -> &'static str {
        "index-v1"
    }

    fn parse(&self, document: &[u8]) -> Result<PackageTable, Error> {
        let doc: IndexV1Document =
            serde_json::from_slice(document).map_err(|e| IndexError::InvalidFormat {
                message: format!("invalid index-v1 JSON: {e}"),
            })?;

        if let Some(published) = doc.repo.as_ref().and_then(|r| r.published_at()) {
            info!(%published, "index-v1 publication time");
        }

        let mut table = PackageTable::new();
        for (position, raw) in doc.apps.into_iter().enumerate() {
            let Some(package_id) = raw.get("packageName").and_then(|v| v.as_str()) else {
                return Err(IndexError::InvalidFormat {
                    message: format!("app entry {position} has no packageName"),
                }
                .into());
            };

            if self.excluded.contains(package_id) {
                debug!(package_id, "skipping excluded package");
                continue;
            }
            let package_id = package_id.to_string();

            let app: AppEntry =
                serde_json::from_value(raw).map_err(|e| IndexError::MalformedEntry {
                    package_id: package_id.clone(),
                    message: e.to_string(),
                })?;

            let version_code = parse_version_code(&package_id, &app.suggested_version_code)?;
            let variants = doc
                .packages
                .get(&package_id)
                .map_or(&[][..], Vec::as_slice);
            let provenance = Self::release_provenance(&package_id, version_code, variants)?;

            let metadata = PackageMetadata::new(
                package_id,
                self.resolve_name(&app),
                app.suggested_version_name,
                version_code,
            )
            .with_provenance(provenance);
            table.insert(metadata);
        }

        info!(packages = table.len(), format = self.name(), "index parsed");
        Ok(table)
    }
}

/// Flat `{id: {name, version, vercode}}` snapshot without variant data
#[derive(Debug, Clone)]
pub struct SnapshotFormat {
    excluded: HashSet<String>,
}

impl SnapshotFormat {
    pub fn new(excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }
}

impl MetadataFormat for SnapshotFormat {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn parse(&self, document: &[u8]) -> Result<PackageTable, Error> {
        // serde_json's preserve_order keeps this map in document order
        let doc: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(document)
            .map_err(|e| IndexError::InvalidFormat {
                message: format!("invalid metadata snapshot JSON: {e}"),
            })?;

        let mut table = PackageTable::new();
        for (package_id, raw) in doc {
            if self.excluded.contains(&package_id) {
                debug!(package_id, "skipping excluded package");
                continue;
            }

            let entry: SnapshotEntry =
                serde_json::from_value(raw).map_err(|e| IndexError::MalformedEntry {
                    package_id: package_id.clone(),
                    message: e.to_string(),
                })?;
            let version_code = parse_version_code(&package_id, &entry.vercode)?;
            let name = non_blank(entry.name.as_ref()).unwrap_or_default().to_string();

            table.insert(PackageMetadata::new(
                package_id,
                name,
                entry.version,
                version_code,
            ));
        }

        info!(packages = table.len(), format = self.name(), "index parsed");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vercheck_types::Provenance;

    fn index_v1() -> IndexV1Format {
        IndexV1Format::new(
            ["org.fdroid.fdroid.privileged.ota".to_string()],
            "en-US",
        )
    }

    #[test]
    fn test_name_resolution_falls_back_to_locale() {
        let doc = br#"{
            "apps": [
                {"packageName": "a.explicit", "name": "  Explicit  ",
                 "localized": {"en-US": {"name": "Localized"}},
                 "suggestedVersionName": "1", "suggestedVersionCode": "1"},
                {"packageName": "b.localized",
                 "localized": {"en-US": {"name": " Localized "}, "de": {"name": "Lokal"}},
                 "suggestedVersionName": "1", "suggestedVersionCode": "1"},
                {"packageName": "c.nameless", "localized": {"de": {"name": "Lokal"}},
                 "suggestedVersionName": "1", "suggestedVersionCode": "1"}
            ],
            "packages": {}
        }"#;

        let table = index_v1().parse(doc).unwrap();
        assert_eq!(table.get("a.explicit").unwrap().name, "Explicit");
        assert_eq!(table.get("b.localized").unwrap().name, "Localized");
        assert_eq!(table.get("c.nameless").unwrap().name, "");
    }

    #[test]
    fn test_excluded_entry_skipped_before_validation() {
        // The OTA entry lacks every version field and must not fail the load
        let doc = br#"{
            "apps": [
                {"packageName": "org.fdroid.fdroid.privileged.ota"},
                {"packageName": "app.one", "name": "One",
                 "suggestedVersionName": "1.0", "suggestedVersionCode": "10"}
            ],
            "packages": {}
        }"#;

        let table = index_v1().parse(doc).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains("app.one"));
    }

    #[test]
    fn test_missing_required_field_is_fatal() {
        let doc = br#"{
            "apps": [{"packageName": "app.one", "name": "One", "suggestedVersionName": "1.0"}],
            "packages": {}
        }"#;

        let err = index_v1().parse(doc).unwrap_err();
        assert!(matches!(
            err,
            Error::Index(IndexError::MalformedEntry { ref package_id, .. }) if package_id == "app.one"
        ));
    }

    #[test]
    fn test_non_numeric_version_code_is_fatal() {
        let doc = br#"{
            "apps": [{"packageName": "app.one", "suggestedVersionName": "1.0",
                      "suggestedVersionCode": "ten"}]
        }"#;

        let err = index_v1().parse(doc).unwrap_err();
        assert!(matches!(
            err,
            Error::Index(IndexError::InvalidVersionCode { .. })
        ));
    }

    #[test]
    fn test_provenance_uses_only_current_version_code() {
        let doc = br#"{
            "apps": [
                {"packageName": "app.mixed", "suggestedVersionName": "2.0", "suggestedVersionCode": "20"},
                {"packageName": "app.old", "suggestedVersionName": "2.0", "suggestedVersionCode": "20"},
                {"packageName": "app.none", "suggestedVersionName": "1.0", "suggestedVersionCode": "1"}
            ],
            "packages": {
                "app.mixed": [
                    {"packageName": "app.mixed", "versionCode": 20, "srcname": "app.mixed_20_src.tar.gz"},
                    {"packageName": "app.mixed", "versionCode": 20},
                    {"packageName": "app.mixed", "versionCode": 19, "srcname": "app.mixed_19_src.tar.gz"}
                ],
                "app.old": [
                    {"packageName": "app.old", "versionCode": 19},
                    {"packageName": "app.old", "versionCode": 20, "srcname": "app.old_20_src.tar.gz"}
                ]
            }
        }"#;

        let table = index_v1().parse(doc).unwrap();
        assert_eq!(
            table.get("app.mixed").unwrap().provenance,
            Some(Provenance::Both)
        );
        assert_eq!(
            table.get("app.old").unwrap().provenance,
            Some(Provenance::Unknown)
        );
        assert_eq!(
            table.get("app.none").unwrap().provenance,
            Some(Provenance::Missing)
        );
    }

    #[test]
    fn test_snapshot_format_keeps_document_order() {
        let doc = br#"{
            "z.app": {"name": "Zed", "version": "3", "vercode": 3},
            "a.app": {"name": null, "version": "1", "vercode": "1"},
            "org.fdroid.fdroid.privileged.ota": {"version": "x", "vercode": 1}
        }"#;

        let format = SnapshotFormat::new(["org.fdroid.fdroid.privileged.ota".to_string()]);
        let table = format.parse(doc).unwrap();

        let ids: Vec<&str> = table.iter().map(|m| m.package_id.as_str()).collect();
        assert_eq!(ids, vec!["z.app", "a.app"]);
        assert_eq!(table.get("a.app").unwrap().name, "");
        assert_eq!(table.get("z.app").unwrap().provenance, None);
    }

    #[test]
    fn test_format_for_config() {
        let mut feeds = FeedConfig::default();
        assert_eq!(format_for(&feeds).name(), "index-v1");

        feeds.index_format = IndexFormatKind::Snapshot;
        assert_eq!(format_for(&feeds).name(), "snapshot");
    }
}
