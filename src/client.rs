//! Game-Server Client
//!
//! One remote call = one request with one token against one cluster. The
//! `GameApi` trait is the seam the core engine runs against; the reqwest
//! implementation below is the only production implementation.

use async_trait::async_trait;
use reqwest::Client;

use crate::codec;
use crate::config::RegionConfig;
use crate::error::ClientError;
use crate::like::types::ProfileSnapshot;

/// Remote calls the core engine makes against a regional cluster.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Fetch a player profile. Any failure means "this region did not
    /// produce a profile", nothing more.
    async fn fetch_profile(
        &self,
        region: &RegionConfig,
        token: &str,
        encoded_uid: &[u8],
    ) -> Result<ProfileSnapshot, ClientError>;

    /// Send one like with one token. The response body is not inspected;
    /// a non-failure status is success.
    async fn send_like(
        &self,
        region: &RegionConfig,
        token: &str,
        payload: &[u8],
    ) -> Result<(), ClientError>;
}

/// reqwest-backed implementation of [`GameApi`].
///
/// The shared `Client` carries the per-call timeout from configuration, so
/// a stalled cluster turns into an ordinary call failure.
pub struct HttpGameClient {
    http: Client,
}

impl HttpGameClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl GameApi for HttpGameClient {
    async fn fetch_profile(
        &self,
        region: &RegionConfig,
        token: &str,
        encoded_uid: &[u8],
    ) -> Result<ProfileSnapshot, ClientError> {
        let response = self
            .http
            .post(format!("{}/GetPlayerPersonalShow", region.url))
            .bearer_auth(token)
            .header("Content-Type", "application/octet-stream")
            .body(encoded_uid.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        Ok(codec::decode_profile(&bytes)?)
    }

    async fn send_like(
        &self,
        region: &RegionConfig,
        token: &str,
        payload: &[u8],
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/LikeProfile", region.url))
            .bearer_auth(token)
            .header("Content-Type", "application/octet-stream")
            .body(payload.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(())
    }
}
