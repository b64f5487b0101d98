//! Region Locator
//!
//! Finds which configured region hosts a given uid by probing clusters in
//! registration order. One lookup per region, no retries; the first region
//! that returns a named profile wins.

use tracing::{debug, info};

use super::types::ProfileSnapshot;
use crate::client::GameApi;
use crate::config::RegionConfig;
use crate::tokens::TokenPool;

/// Probe regions in order until one returns a profile for `uid`.
///
/// Regions without tokens are skipped without spending a network round
/// trip. A failed or empty lookup means "not hosted here" and probing
/// continues; `None` after the last region is a normal outcome, not a
/// fault.
pub async fn locate(
    client: &dyn GameApi,
    pool: &TokenPool,
    regions: &[RegionConfig],
    uid: &str,
    encoded_uid: &[u8],
) -> Option<(RegionConfig, ProfileSnapshot)> {
    for region in regions {
        let tokens = pool.get(&region.name).await;
        if tokens.is_empty() {
            debug!("Skipping region {} (no tokens)", region.name);
            continue;
        }

        match client.fetch_profile(region, &tokens[0], encoded_uid).await {
            Ok(profile) if !profile.nickname.is_empty() => {
                info!("Resolved uid {} to region {}", uid, region.name);
                return Some((region.clone(), profile));
            }
            Ok(_) => {
                debug!("Region {} has no player for uid {}", region.name, uid);
            }
            Err(e) => {
                debug!("Region {} lookup failed for uid {}: {}", region.name, uid, e);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::testing::{region, snapshot, MockApi};
    use super::*;

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

    #[tokio::test]
    async fn test_no_tokens_anywhere_probes_nothing() {
        let api = MockApi::new();
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[]);

        let found = locate(&api, &pool, &regions, "123", b"encoded").await;

        assert!(found.is_none());
        assert_eq!(api.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_first_match_short_circuits() {
        let api = MockApi::new();
        api.queue_profile("ind", snapshot("NoPe", 100));
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[("ind", &["tok-a"]), ("br", &["tok-b"])]);

        let (matched, profile) = locate(&api, &pool, &regions, "456", b"encoded")
            .await
            .unwrap();

        assert_eq!(matched.name, "ind");
        assert_eq!(profile.likes, 100);
        assert_eq!(api.probed(), vec!["ind"]);
    }

    #[tokio::test]
    async fn test_failed_probe_continues_to_next_region() {
        let api = MockApi::new();
        api.queue_profile_failure("ind");
        api.queue_profile("br", snapshot("NoPe", 7));
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[("ind", &["tok-a"]), ("br", &["tok-b"])]);

        let (matched, _) = locate(&api, &pool, &regions, "456", b"encoded")
            .await
            .unwrap();

        assert_eq!(matched.name, "br");
        assert_eq!(api.probed(), vec!["ind", "br"]);
    }

    #[tokio::test]
    async fn test_anonymous_profile_is_not_a_match() {
        let api = MockApi::new();
        api.queue_profile("ind", snapshot("", 50));
        api.queue_profile("br", snapshot("NoPe", 50));
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[("ind", &["tok-a"]), ("br", &["tok-b"])]);

        let (matched, _) = locate(&api, &pool, &regions, "456", b"encoded")
            .await
            .unwrap();

        assert_eq!(matched.name, "br");
    }

    #[tokio::test]
    async fn test_tokenless_region_skipped_without_network() {
        let api = MockApi::new();
        api.queue_profile("br", snapshot("NoPe", 50));
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[("br", &["tok-b"])]);

        let (matched, _) = locate(&api, &pool, &regions, "456", b"encoded")
            .await
            .unwrap();

        assert_eq!(matched.name, "br");
        // "ind" has no tokens, so only "br" cost a round trip
        assert_eq!(api.probed(), vec!["br"]);
    }

    #[tokio::test]
    async fn test_exhausted_table_returns_none() {
        let api = MockApi::new();
        let regions = vec![region("ind"), region("br")];
        let pool = pool(&[("ind", &["tok-a"]), ("br", &["tok-b"])]);

        let found = locate(&api, &pool, &regions, "789", b"encoded").await;

        assert!(found.is_none());
        assert_eq!(api.profile_calls(), 2);
    }
}
