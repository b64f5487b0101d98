//! Wire Codec
//!
//! Encoding and decoding for the game-server client API. Requests and
//! responses are small protobuf messages; the like payload is additionally
//! sealed with AES-256-GCM (random nonce prepended) under the key from
//! configuration.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::Aead;
use aes_gcm::aead::KeyInit;
use aes_gcm::Aes256Gcm;
use anyhow::Result;
use prost::Message;
use rand::RngCore;

use crate::like::types::ProfileSnapshot;

/// Profile lookup query sent to `GetPlayerPersonalShow`.
#[derive(Clone, PartialEq, Message)]
pub struct PlayerQuery {
    #[prost(uint64, tag = "1")]
    pub account_id: u64,
    /// Client revision marker; the servers expect a constant 1.
    #[prost(uint64, tag = "2")]
    pub revision: u64,
}

/// Like action body, encrypted before transport.
#[derive(Clone, PartialEq, Message)]
pub struct LikeRequest {
    #[prost(uint64, tag = "1")]
    pub account_id: u64,
    #[prost(string, tag = "2")]
    pub region: String,
}

/// Raw profile response from `GetPlayerPersonalShow`.
#[derive(Clone, PartialEq, Message)]
pub struct ProfileResponse {
    #[prost(message, optional, tag = "1")]
    pub account: Option<AccountInfo>,
}

/// Account section of a profile response.
#[derive(Clone, PartialEq, Message)]
pub struct AccountInfo {
    #[prost(uint64, tag = "1")]
    pub account_id: u64,
    #[prost(string, tag = "3")]
    pub nickname: String,
    #[prost(uint32, tag = "21")]
    pub likes: u32,
}

/// Check and parse a caller-supplied uid.
///
/// Valid means non-empty, ASCII digits only, and in `u64` range (the wire
/// encodes the uid as a varint).
pub fn validate_uid(uid: &str) -> Option<u64> {
    if uid.is_empty() || !uid.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    uid.parse().ok()
}

/// Encode a profile lookup query for transport.
pub fn encode_uid(account_id: u64) -> Vec<u8> {
    PlayerQuery {
        account_id,
        revision: 1,
    }
    .encode_to_vec()
}

/// Decode a raw profile response.
///
/// A response with no account section decodes to an empty-nickname
/// snapshot, which the locator treats as "no player here".
pub fn decode_profile(bytes: &[u8]) -> Result<ProfileSnapshot, prost::DecodeError> {
    let response = ProfileResponse::decode(bytes)?;
    let account = response.account.unwrap_or_default();

    Ok(ProfileSnapshot {
        nickname: account.nickname,
        likes: account.likes,
    })
}

/// Builder for encrypted like payloads.
pub struct Codec {
    key: [u8; 32],
}

impl Codec {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Build the encrypted like payload for one dispatch round.
    ///
    /// The dispatcher builds this once per request and reuses the same
    /// bytes for every token in the fan-out.
    pub fn build_like_payload(&self, account_id: u64, region: &str) -> Result<Vec<u8>> {
        let plaintext = LikeRequest {
            account_id,
            region: region.to_string(),
        }
        .encode_to_vec();

        let cipher = Aes256Gcm::new(GenericArray::from_slice(&self.key));

        let mut nonce = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce);
        let nonce_ga = GenericArray::from_slice(&nonce);

        let ciphertext = cipher
            .encrypt(nonce_ga, plaintext.as_ref())
            .map_err(|e| anyhow::anyhow!("like payload encryption failed: {}", e))?;

        // Nonce travels with the payload
        let mut payload = nonce.to_vec();
        payload.extend_from_slice(&ciphertext);
        Ok(payload)
    }
}
