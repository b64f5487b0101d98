//! Outcome Verifier
//!
//! Best-effort follow-up read after a dispatch round. The dispatch already
//! had its effect; this step only tries to observe the new counter, so
//! every failure here degrades to the pre-dispatch snapshot instead of
//! surfacing as an error.

use tracing::{error, warn};

use super::types::{DispatchOutcome, ProfileSnapshot, Verification};
use crate::client::GameApi;
use crate::config::RegionConfig;
use crate::tokens::TokenPool;

/// Re-read the profile after a dispatch round.
///
/// Skips entirely when nothing was attempted. Otherwise fetches the
/// current token list again (it may have changed since dispatch) and
/// issues one lookup with its first token; a fresh snapshot confirms the
/// counter, anything else falls back to `before`.
pub async fn verify(
    client: &dyn GameApi,
    pool: &TokenPool,
    region: &RegionConfig,
    encoded_uid: &[u8],
    before: ProfileSnapshot,
    outcome: DispatchOutcome,
) -> Verification {
    if outcome.attempted == 0 {
        return Verification::Skipped(before);
    }

    let tokens = pool.get(&region.name).await;
    if tokens.is_empty() {
        error!(
            "No tokens available for {} to verify likes after sending",
            region.name
        );
        return Verification::Fallback(before);
    }

    match client.fetch_profile(region, &tokens[0], encoded_uid).await {
        Ok(after) => Verification::Confirmed(after),
        Err(e) => {
            warn!(
                "Verification read failed in {}: {}; reporting pre-dispatch count",
                region.name, e
            );
            Verification::Fallback(before)
        }
    }
}
