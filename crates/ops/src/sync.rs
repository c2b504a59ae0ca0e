//! Feed synchronisation through the snapshot cache

use crate::OpsCtx;
use tracing::{debug, info};
use vercheck_config::constants::{INDEX_SNAPSHOT, LEDGER_SNAPSHOT};
use vercheck_errors::Error;
use vercheck_types::{Ledger, PackageTable};

/// Drop both cached snapshots so the next sync fetches fresh copies
///
/// # Errors
///
/// Returns an error if an existing snapshot cannot be removed.
pub async fn refresh(ctx: &OpsCtx) -> Result<(), Error> {
    info!("clearing cached snapshots");
    ctx.cache.clear(&[INDEX_SNAPSHOT, LEDGER_SNAPSHOT]).await
}

/// Load the package table, fetching the index if the snapshot is stale
///
/// # Errors
///
/// Returns an error if the fetch, extraction, cache write or parse fails.
pub async fn sync_index(ctx: &OpsCtx) -> Result<PackageTable, Error> {
    let feeds = &ctx.config.feeds;

    if ctx
        .cache
        .is_stale(INDEX_SNAPSHOT, ctx.config.max_age())
        .await?
    {
        info!(url = %feeds.index_url, "fetching package index");
        let body = vercheck_net::fetch_bytes(&ctx.net, &feeds.index_url).await?;
        let document = if feeds.index_format.is_archived() {
            vercheck_index::extract_single_member(&body, &feeds.index_member)?
        } else {
            body
        };
        ctx.cache.save(INDEX_SNAPSHOT, &document).await?;
    } else {
        debug!("using cached package index");
    }

    let document = ctx.cache.load(INDEX_SNAPSHOT).await?;
    vercheck_index::format_for(feeds).parse(&document)
}

/// Load the verification ledger, fetching it if the snapshot is stale
///
/// # Errors
///
/// Returns an error if the fetch, cache write or parse fails.
pub async fn sync_ledger(ctx: &OpsCtx) -> Result<Ledger, Error> {
    if ctx
        .cache
        .is_stale(LEDGER_SNAPSHOT, ctx.config.max_age())
        .await?
    {
        let url = &ctx.config.feeds.ledger_url;
        info!(%url, "fetching verification ledger");
        let body = vercheck_net::fetch_bytes(&ctx.net, url).await?;
        ctx.cache.save(LEDGER_SNAPSHOT, &body).await?;
    } else {
        debug!("using cached verification ledger");
    }

    let document = ctx.cache.load(LEDGER_SNAPSHOT).await?;
    vercheck_ledger::parse(&document)
}
