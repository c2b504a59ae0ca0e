#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Verification ledger loading
//!
//! The ledger lists, per package id, every independent rebuild that matched
//! the published artifact. Only successful runs are ever published, so a
//! record with `verified: false` is treated as upstream corruption and
//! fails the whole load.

mod models;

pub use models::{LedgerDocument, LedgerEntry, LocalBuild};

use tracing::info;
use vercheck_errors::{Error, LedgerError};
use vercheck_types::{Ledger, VerificationRecord};

/// Parse a ledger document and check every record
///
/// # Errors
///
/// Returns `LedgerError::InvalidFormat` for malformed JSON or records,
/// `LedgerError::UnverifiedRecord` for a record with `verified: false`, and
/// `LedgerError::InvalidVersionCode` for a non-numeric version code.
pub fn parse(document: &[u8]) -> Result<Ledger, Error> {
    let doc: LedgerDocument =
        serde_json::from_slice(document).map_err(|e| LedgerError::InvalidFormat {
            message: format!("invalid ledger JSON: {e}"),
        })?;

    let mut ledger = Ledger::new();
    for (package_id, entries) in doc.packages {
        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| into_record(&package_id, index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        ledger.insert(package_id, records);
    }

    info!(
        packages = ledger.package_count(),
        records = ledger.record_count(),
        "ledger parsed"
    );
    Ok(ledger)
}

fn into_record(
    package_id: &str,
    index: usize,
    entry: LedgerEntry,
) -> Result<VerificationRecord, LedgerError> {
    if !entry.verified {
        return Err(LedgerError::UnverifiedRecord {
            package_id: package_id.to_string(),
            index,
        });
    }

    let local_version_code =
        entry
            .local
            .version_code
            .parse()
            .ok_or_else(|| LedgerError::InvalidVersionCode {
                package_id: package_id.to_string(),
                index,
                value: entry.local.version_code.to_string(),
            })?;

    Ok(VerificationRecord {
        package_id: package_id.to_string(),
        verified: entry.verified,
        local_version_code,
        local_version_name: entry.local.version_name,
    })
}
