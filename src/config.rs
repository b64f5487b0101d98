//! Service Configuration
//!
//! Everything is resolved once at startup from environment variables with
//! code defaults; nothing here is mutated after `Config` is built.

use std::env;
use std::time::Duration;

use base64::Engine;
use tracing::warn;

/// Default probe order when `LIKES_REGIONS` is not set.
const DEFAULT_REGIONS: &str = "ind,br,us,sac,na";

/// Development payload key (32 bytes). Override with `LIKES_PAYLOAD_KEY`.
const DEFAULT_PAYLOAD_KEY: &[u8; 32] = b"likes-gateway-dev-payload-key-00";

/// One regional game-server cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionConfig {
    /// Region key, e.g. "ind" or "br"
    pub name: String,
    /// Base URL of the cluster's client API
    pub url: String,
}

impl RegionConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Service configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port
    pub port: u16,
    /// Region table in probe order
    pub regions: Vec<RegionConfig>,
    /// Per-call timeout for outbound requests
    pub request_timeout: Duration,
    /// Path to the JSON token file
    pub tokens_file: String,
    /// Interval between token file re-reads
    pub tokens_reload: Duration,
    /// AES-256 key sealing the like payload
    pub payload_key: [u8; 32],
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Region order in `LIKES_REGIONS` is the order the locator probes in.
    /// Each region's base URL comes from `REGION_<NAME>_URL`, defaulting to
    /// the compose-style service name `http://client-<name>:8080`.
    pub fn from_env() -> Self {
        let regions = env::var("LIKES_REGIONS")
            .unwrap_or_else(|_| DEFAULT_REGIONS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                let var = format!("REGION_{}_URL", name.to_uppercase());
                let url = env::var(&var)
                    .unwrap_or_else(|_| format!("http://client-{}:8080", name));
                RegionConfig::new(name, url)
            })
            .collect();

        Self {
            port: parse_var("LIKES_PORT", 8083),
            regions,
            request_timeout: Duration::from_secs(parse_var("LIKES_TIMEOUT_SECS", 10)),
            tokens_file: env::var("LIKES_TOKENS_FILE")
                .unwrap_or_else(|_| "tokens.json".to_string()),
            tokens_reload: Duration::from_secs(parse_var("LIKES_TOKENS_RELOAD_SECS", 300)),
            payload_key: load_payload_key(),
        }
    }
}

fn parse_var<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn load_payload_key() -> [u8; 32] {
    let raw = match env::var("LIKES_PAYLOAD_KEY") {
        Ok(raw) => raw,
        Err(_) => return *DEFAULT_PAYLOAD_KEY,
    };

    match base64::engine::general_purpose::STANDARD.decode(raw.trim()) {
        Ok(bytes) if bytes.len() == 32 => {
            let mut key = [0u8; 32];
            key.copy_from_slice(&bytes);
            key
        }
        Ok(bytes) => {
            warn!(
                "LIKES_PAYLOAD_KEY must decode to 32 bytes, got {}; using default key",
                bytes.len()
            );
            *DEFAULT_PAYLOAD_KEY
        }
        Err(e) => {
            warn!("LIKES_PAYLOAD_KEY is not valid base64 ({}), using default key", e);
            *DEFAULT_PAYLOAD_KEY
        }
    }
}
