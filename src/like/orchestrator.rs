//! Request Orchestrator
//!
//! Sequences locate -> dispatch -> verify for one uid and shapes the
//! result. This is the single boundary where an unanticipated collaborator
//! fault becomes an internal-error report; everything below it folds its
//! own failures into normal outcomes.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use uuid::Uuid;

use super::types::LikeReport;
use super::{dispatch, locator, verify};
use crate::client::GameApi;
use crate::codec::{self, Codec};
use crate::config::{Config, RegionConfig};
use crate::tokens::TokenPool;

/// Owns the collaborators one like operation needs.
pub struct LikeOrchestrator {
    regions: Vec<RegionConfig>,
    pool: TokenPool,
    client: Arc<dyn GameApi>,
    codec: Codec,
}

impl LikeOrchestrator {
    pub fn new(config: &Config, pool: TokenPool, client: Arc<dyn GameApi>) -> Self {
        Self {
            regions: config.regions.clone(),
            pool,
            client,
            codec: Codec::new(config.payload_key),
        }
    }

    /// Run the full like operation for one uid.
    ///
    /// Always returns a well-formed report: validation failures and
    /// "player not found" are normal terminal reports, and any error that
    /// escapes a stage is caught here and mapped to an internal-error
    /// report.
    pub async fn run(&self, uid: &str) -> LikeReport {
        let Some(account_id) = codec::validate_uid(uid) else {
            info!("Rejected invalid uid {:?}", uid);
            return LikeReport::invalid(uid);
        };

        let op = Uuid::new_v4();
        match self.execute(uid, account_id, op).await {
            Ok(report) => report,
            Err(e) => {
                error!("Like operation {} for uid {} failed: {:#}", op, uid, e);
                LikeReport::internal(uid)
            }
        }
    }

    async fn execute(&self, uid: &str, account_id: u64, op: Uuid) -> Result<LikeReport> {
        let encoded_uid = codec::encode_uid(account_id);

        let located = locator::locate(
            self.client.as_ref(),
            &self.pool,
            &self.regions,
            uid,
            &encoded_uid,
        )
        .await;

        let Some((region, before)) = located else {
            info!("No region hosts uid {} (op {})", uid, op);
            return Ok(LikeReport::not_found(uid));
        };

        let player = before.nickname.clone();
        let likes_before = before.likes;

        let outcome = dispatch::dispatch(
            self.client.as_ref(),
            &self.pool,
            &self.codec,
            &region,
            account_id,
        )
        .await?;

        let after = verify::verify(
            self.client.as_ref(),
            &self.pool,
            &region,
            &encoded_uid,
            before,
            outcome,
        )
        .await
        .into_snapshot();

        let report = LikeReport::completed(uid, region.name, player, likes_before, after.likes);
        info!(
            "Like operation {} for uid {}: {} ({} -> {})",
            op, uid, report.status, report.likes_before, report.likes_after
        );
        Ok(report)
    }

    /// Per-region token availability, in configured region order.
    ///
    /// Feeds the health endpoint: a region with zero tokens means the
    /// service is up but degraded for that region.
    pub async fn readiness(&self) -> Vec<(String, bool)> {
        let mut regions = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let ready = self.pool.count(&region.name).await > 0;
            regions.push((region.name.clone(), ready));
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::super::testing::{region, snapshot, MockApi};
    use super::super::types::LikeStatus;
    use super::*;

    fn config(regions: Vec<RegionConfig>) -> Config {
        Config {
            port: 0,
            regions,
            request_timeout: Duration::from_secs(1),
            tokens_file: String::new(),
            tokens_reload: Duration::from_secs(300),
            payload_key: [0u8; 32],
        }
    }

    fn pool(entries: &[(&str, &[&str])]) -> TokenPool {
        let map: HashMap<String, Vec<String>> = entries
            .iter()
            .map(|(name, tokens)| {
                (
                    name.to_string(),
                    tokens.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        TokenPool::from_map(map)
    }

    fn orchestrator(
        api: Arc<MockApi>,
        regions: Vec<RegionConfig>,
        pool: TokenPool,
    ) -> LikeOrchestrator {
        LikeOrchestrator::new(&config(regions), pool, api)
    }

    #[tokio::test]
    async fn test_invalid_uid_makes_no_network_calls() {
        let api = Arc::new(MockApi::new());
        let orch = orchestrator(
            api.clone(),
            vec![region("ind")],
            pool(&[("ind", &["tok"])]),
        );

        for bad in ["", "12a3", "uid", "9".repeat(21).as_str()] {
            let report = orch.run(bad).await;
            assert_eq!(report.status, LikeStatus::InvalidUid);
        }

        assert_eq!(api.profile_calls(), 0);
        assert_eq!(api.like_calls(), 0);
    }

    #[tokio::test]
    async fn test_no_tokens_anywhere_reports_not_found() {
        let api = Arc::new(MockApi::new());
        let orch = orchestrator(
            api.clone(),
            vec![region("ind"), region("br")],
            pool(&[]),
        );

        let report = orch.run("123").await;

        assert_eq!(report.status, LikeStatus::NotFound);
        assert_eq!(report.region, None);
        assert_eq!(report.player, None);
        assert_eq!(report.likes_added, 0);
        assert_eq!(api.profile_calls(), 0);
        assert_eq!(api.like_calls(), 0);
    }

    #[tokio::test]
    async fn test_liked_when_counter_moves() {
        let api = Arc::new(MockApi::new());
        // First read locates the player, second confirms the new counter
        api.queue_profile("ind", snapshot("NoPe", 100));
        api.queue_profile("ind", snapshot("NoPe", 101));
        let orch = orchestrator(
            api.clone(),
            vec![region("ind"), region("br")],
            pool(&[("ind", &["tok-1", "tok-2"])]),
        );

        let report = orch.run("456").await;

        assert_eq!(report.status, LikeStatus::Liked);
        assert_eq!(report.region.as_deref(), Some("ind"));
        assert_eq!(report.player.as_deref(), Some("NoPe"));
        assert_eq!(report.likes_before, 100);
        assert_eq!(report.likes_after, 101);
        assert_eq!(report.likes_added, 1);
        assert_eq!(api.like_calls(), 2);
        // Locate matched "ind", so "br" was never probed
        assert!(api.probed().iter().all(|r| r == "ind"));
    }

    #[tokio::test]
    async fn test_unchanged_when_dispatch_and_verify_both_fail() {
        let api = Arc::new(MockApi::new());
        // Only the locate read is scripted; the verify read will fail
        api.queue_profile("ind", snapshot("NoPe", 100));
        let orch = orchestrator(
            api.clone(),
            vec![region("ind")],
            pool(&[("ind", &["bad-1", "bad-2", "bad-3"])]),
        );

        let report = orch.run("456").await;

        assert_eq!(report.status, LikeStatus::Unchanged);
        assert_eq!(report.likes_before, 100);
        assert_eq!(report.likes_after, 100);
        assert_eq!(report.likes_added, 0);
        assert_eq!(api.like_calls(), 3);
        // One locate read plus one failed verification read
        assert_eq!(api.profile_calls(), 2);
    }

    #[tokio::test]
    async fn test_readiness_follows_region_order() {
        let api = Arc::new(MockApi::new());
        let orch = orchestrator(
            api,
            vec![region("ind"), region("br"), region("us")],
            pool(&[("ind", &["tok"]), ("us", &[])]),
        );

        let readiness = orch.readiness().await;

        assert_eq!(
            readiness,
            vec![
                ("ind".to_string(), true),
                ("br".to_string(), false),
                ("us".to_string(), false),
            ]
        );
    }
}
