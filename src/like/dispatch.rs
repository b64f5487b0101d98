//! Action Dispatcher
//!
//! Fans one like action out across every token available for the resolved
//! region. All calls launch together and all are awaited; one bad token
//! never cancels or aborts the others.

use anyhow::Result;
use futures::future::join_all;
use tracing::{info, warn};

use super::types::DispatchOutcome;
use crate::client::GameApi;
use crate::codec::Codec;
use crate::config::RegionConfig;
use crate::tokens::TokenPool;

/// Send one like per available token, concurrently, and count successes.
///
/// The encrypted payload is built once and the same bytes go to every
/// token. An empty token list short-circuits to a zero outcome without
/// building a payload. Per-call failures are logged and folded into the
/// count; the only error surfaced here is a payload-construction failure.
pub async fn dispatch(
    client: &dyn GameApi,
    pool: &TokenPool,
    codec: &Codec,
    region: &RegionConfig,
    account_id: u64,
) -> Result<DispatchOutcome> {
    let tokens = pool.get(&region.name).await;
    if tokens.is_empty() {
        warn!("No tokens for region {}, nothing dispatched", region.name);
        return Ok(DispatchOutcome::empty());
    }

    let payload = codec.build_like_payload(account_id, &region.name)?;

    let calls = tokens
        .iter()
        .map(|token| client.send_like(region, token, &payload));
    let results = join_all(calls).await;

    let mut succeeded = 0;
    for result in &results {
        match result {
            Ok(()) => succeeded += 1,
            Err(e) => warn!("Like call failed in region {}: {}", region.name, e),
        }
    }

    info!(
        "Dispatched likes in {}: {}/{} succeeded",
        region.name,
        succeeded,
        tokens.len()
    );

    Ok(DispatchOutcome {
        attempted: tokens.len(),
        succeeded,
    })
}
