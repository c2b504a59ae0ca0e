#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Reconciliation of index metadata with verification records
//!
//! Pure and deterministic: no I/O, inputs are only borrowed.

use tracing::debug;
use vercheck_types::{
    LastVerified, Ledger, PackageMetadata, PackageTable, QueryMode, Report, VerificationRecord,
    VerificationStatus,
};

/// Select packages by `query` and build one report per selected package
///
/// In [`QueryMode::Search`] every package whose name contains `query`
/// (case-insensitive) is selected; in [`QueryMode::Exact`] only the package
/// whose id equals `query`. Reports come out in table order. An unknown id
/// or a search without hits gives an empty result.
#[must_use]
pub fn reconcile(
    query: &str,
    mode: QueryMode,
    apps: &PackageTable,
    ledger: &Ledger,
) -> Vec<Report> {
    let selected: Vec<&PackageMetadata> = match mode {
        QueryMode::Search => {
            let needle = query.to_lowercase();
            apps.iter().filter(|m| m.name_contains(&needle)).collect()
        }
        QueryMode::Exact => apps.get(query).into_iter().collect(),
    };

    debug!(query, %mode, matches = selected.len(), "packages selected");

    selected
        .into_iter()
        .map(|metadata| report_for(metadata, ledger.records_for(&metadata.package_id)))
        .collect()
}

/// Fold one package's records into its report
#[must_use]
pub fn report_for(metadata: &PackageMetadata, records: &[VerificationRecord]) -> Report {
    let mut status = VerificationStatus::NotVerified;
    let mut last: Option<&VerificationRecord> = None;

    for record in records {
        if record.local_version_code == metadata.current_version_code {
            status = VerificationStatus::SuccessfullyVerified;
        }
        // Strictly greater: the first record seen wins a tie
        if last.is_none_or(|l| record.local_version_code > l.local_version_code) {
            last = Some(record);
        }
    }

    Report {
        package_id: metadata.package_id.clone(),
        name: metadata.name.clone(),
        current_version_name: metadata.current_version_name.clone(),
        current_version_code: metadata.current_version_code,
        provenance: metadata.provenance,
        status,
        total_verified: records.len(),
        last_verified: last.map(|r| LastVerified {
            version_code: r.local_version_code,
            version_name: r.local_version_name.clone(),
        }),
        signing_override: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vercheck_types::Provenance;

    fn record(code: u64, name: &str) -> VerificationRecord {
        VerificationRecord {
            package_id: "app.one".into(),
            verified: true,
            local_version_code: code,
            local_version_name: name.into(),
        }
    }

    fn one() -> PackageMetadata {
        PackageMetadata::new("app.one", "One", "1.0", 10)
    }

    #[test]
    fn test_no_records() {
        let report = report_for(&one(), &[]);
        assert_eq!(report.status, VerificationStatus::NotVerified);
        assert_eq!(report.total_verified, 0);
        assert_eq!(report.last_verified, None);
    }

    #[test]
    fn test_old_records_only() {
        let report = report_for(&one(), &[record(8, "0.8"), record(9, "0.9")]);
        assert_eq!(report.status, VerificationStatus::NotVerified);
        assert_eq!(report.total_verified, 2);
        assert_eq!(
            report.last_verified,
            Some(LastVerified {
                version_code: 9,
                version_name: "0.9".into()
            })
        );
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let records = [record(12, "first"), record(10, "1.0"), record(12, "second")];
        let report = report_for(&one(), &records);
        assert_eq!(report.status, VerificationStatus::SuccessfullyVerified);
        assert_eq!(report.last_verified.unwrap().version_name, "first");
    }

    #[test]
    fn test_version_code_zero_still_counts_as_last() {
        let mut meta = one();
        meta.current_version_code = 0;
        let report = report_for(&meta, &[record(0, "0.0")]);
        assert_eq!(report.status, VerificationStatus::SuccessfullyVerified);
        assert_eq!(report.last_verified.unwrap().version_code, 0);
    }

    #[test]
    fn test_metadata_is_copied() {
        let meta = one().with_provenance(Provenance::Both);
        let report = report_for(&meta, &[]);
        assert_eq!(report.package_id, "app.one");
        assert_eq!(report.name, "One");
        assert_eq!(report.current_version_name, "1.0");
        assert_eq!(report.current_version_code, 10);
        assert_eq!(report.provenance, Some(Provenance::Both));
        assert_eq!(report.signing_override, None);
    }

    #[test]
    fn test_search_order_and_case() {
        let apps: PackageTable = [
            PackageMetadata::new("c.third", "Phone", "1", 1),
            PackageMetadata::new("a.first", "Two", "1", 1),
            PackageMetadata::new("b.second", "ONE", "1", 1),
            PackageMetadata::new("d.fourth", "Money", "1", 1),
        ]
        .into_iter()
        .collect();

        let ids: Vec<String> = reconcile("on", QueryMode::Search, &apps, &Ledger::new())
            .into_iter()
            .map(|r| r.package_id)
            .collect();
        assert_eq!(ids, vec!["c.third", "b.second", "d.fourth"]);
    }

    #[test]
    fn test_exact_ignores_name() {
        let apps: PackageTable = [one()].into_iter().collect();
        assert!(reconcile("One", QueryMode::Exact, &apps, &Ledger::new()).is_empty());
        assert_eq!(
            reconcile("app.one", QueryMode::Exact, &apps, &Ledger::new()).len(),
            1
        );
    }

    fn records_strategy() -> impl Strategy<Value = Vec<(u64, u8)>> {
        prop::collection::vec((0u64..20, any::<u8>()), 0..12)
    }

    proptest! {
        #[test]
        fn prop_report_matches_fold(current in 0u64..20, raw in records_strategy()) {
            let mut meta = one();
            meta.current_version_code = current;
            let records: Vec<VerificationRecord> = raw
                .iter()
                .map(|(code, tag)| record(*code, &format!("{code}-{tag}")))
                .collect();

            let report = report_for(&meta, &records);

            prop_assert_eq!(report.total_verified, records.len());

            let matched = records.iter().any(|r| r.local_version_code == current);
            prop_assert_eq!(
                report.status == VerificationStatus::SuccessfullyVerified,
                matched
            );

            match records.iter().map(|r| r.local_version_code).max() {
                None => prop_assert!(report.last_verified.is_none()),
                Some(max) => {
                    let first = records
                        .iter()
                        .find(|r| r.local_version_code == max)
                        .unwrap();
                    let last = report.last_verified.unwrap();
                    prop_assert_eq!(last.version_code, max);
                    prop_assert_eq!(&last.version_name, &first.local_version_name);
                }
            }
        }

        #[test]
        fn prop_search_is_ordered_subset(
            names in prop::collection::vec("[a-zA-Z]{0,6}", 0..10),
            query in "[a-zA-Z]{0,2}",
        ) {
            let apps: PackageTable = names
                .iter()
                .enumerate()
                .map(|(i, n)| PackageMetadata::new(format!("pkg.{i}"), n.clone(), "1", 1))
                .collect();

            let reports = reconcile(&query, QueryMode::Search, &apps, &Ledger::new());
            let expected: Vec<String> = apps
                .iter()
                .filter(|m| m.name.to_lowercase().contains(&query.to_lowercase()))
                .map(|m| m.package_id.clone())
                .collect();
            let got: Vec<String> = reports.into_iter().map(|r| r.package_id).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
