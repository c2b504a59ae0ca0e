//! The check operation: load feeds, reconcile, optionally inspect signatures

use crate::{sync, OpsCtx};
use tracing::debug;
use vercheck_errors::Error;
use vercheck_types::{Provenance, QueryMode, Report};

/// One invocation's worth of user intent
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub query: String,
    pub mode: QueryMode,
    /// Clear cached snapshots first
    pub refresh: bool,
    /// Inspect artifacts whose provenance is ambiguous
    pub try_harder: bool,
}

/// Produce the reports for `request`
///
/// Both feeds load fully before any report exists, so a contract violation
/// in either one fails the whole check.
///
/// # Errors
///
/// Returns an error if either feed cannot be fetched, cached or parsed.
/// Signing check failures are logged and never returned.
pub async fn check(ctx: &OpsCtx, request: &CheckRequest) -> Result<Vec<Report>, Error> {
    if request.refresh {
        sync::refresh(ctx).await?;
    }

    let apps = sync::sync_index(ctx).await?;
    let ledger = sync::sync_ledger(ctx).await?;

    let mut reports = vercheck_reconcile::reconcile(&request.query, request.mode, &apps, &ledger);

    if request.try_harder {
        for report in &mut reports {
            if !report.provenance.is_some_and(Provenance::is_ambiguous) {
                continue;
            }
            let url = ctx
                .config
                .artifact_url(&report.package_id, report.current_version_code);
            let file_name = format!("{}_{}.apk", report.package_id, report.current_version_code);
            debug!(package_id = %report.package_id, %url, "inspecting artifact signature");
            report.signing_override = ctx.signing.try_probe(&url, &file_name).await;
        }
    }

    Ok(reports)
}
