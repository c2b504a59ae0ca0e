//! Integration tests for index crate

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use tempfile::tempdir;
    use vercheck_index::*;
    use vercheck_types::Provenance;
    use zip::write::SimpleFileOptions;

    const INDEX_V1: &str = r#"{
        "repo": {"name": "F-Droid", "timestamp": 1700000000000, "version": 21},
        "requests": {"install": [], "uninstall": []},
        "apps": [
            {
                "packageName": "org.example.notes",
                "name": "Notes",
                "suggestedVersionName": "2.1",
                "suggestedVersionCode": "21",
                "license": "GPL-3.0-only"
            },
            {
                "packageName": "org.fdroid.fdroid.privileged.ota",
                "name": "Privileged Extension OTA"
            },
            {
                "packageName": "net.example.camera",
                "localized": {"en-US": {"name": "Open Camera", "summary": "Camera"}},
                "suggestedVersionName": "1.50",
                "suggestedVersionCode": "150"
            }
        ],
        "packages": {
            "org.example.notes": [
                {"packageName": "org.example.notes", "versionCode": 21, "versionName": "2.1",
                 "srcname": "org.example.notes_21_src.tar.gz", "signer": "aa"},
                {"packageName": "org.example.notes", "versionCode": 21, "versionName": "2.1",
                 "signer": "bb"}
            ],
            "net.example.camera": [
                {"packageName": "net.example.camera", "versionCode": 150, "versionName": "1.50",
                 "srcname": "net.example.camera_150_src.tar.gz"},
                {"packageName": "net.example.camera", "versionCode": 149, "versionName": "1.49"}
            ]
        }
    }"#;

    fn jar(member: &str, contents: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(member, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_jar_to_table_through_cache() {
        let temp = tempdir().unwrap();
        let cache = SnapshotCache::new(temp.path());

        let archive = jar("index-v1.json", INDEX_V1);
        let json = extract_single_member(&archive, "index-v1.json").unwrap();
        cache.save("index.json", &json).await.unwrap();

        let format = IndexV1Format::new(
            ["org.fdroid.fdroid.privileged.ota".to_string()],
            "en-US",
        );
        let table = format
            .parse(&cache.load("index.json").await.unwrap())
            .unwrap();

        let ids: Vec<&str> = table.iter().map(|m| m.package_id.as_str()).collect();
        assert_eq!(ids, vec!["org.example.notes", "net.example.camera"]);

        let notes = table.get("org.example.notes").unwrap();
        assert_eq!(notes.name, "Notes");
        assert_eq!(notes.current_version_name, "2.1");
        assert_eq!(notes.current_version_code, 21);
        assert_eq!(notes.provenance, Some(Provenance::Both));

        let camera = table.get("net.example.camera").unwrap();
        assert_eq!(camera.name, "Open Camera");
        assert_eq!(camera.provenance, Some(Provenance::Unknown));
    }

    #[test]
    fn test_repo_timestamp() {
        let doc: IndexV1Document = serde_json::from_str(INDEX_V1).unwrap();
        let published = doc.repo.unwrap().published_at().unwrap();
        assert_eq!(published.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_wrong_format_for_document() {
        // A snapshot document handed to the index-v1 parser
        let format = IndexV1Format::new(Vec::new(), "en-US");
        let err = format
            .parse(br#"{"app.one": {"name": "One", "version": "1.0", "vercode": 10}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            vercheck_errors::Error::Index(vercheck_errors::IndexError::InvalidFormat { .. })
        ));
    }
}
