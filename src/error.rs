//! Remote Call Errors
//!
//! One failed call against a game-server cluster. Every variant is an
//! expected negative outcome for the core: the locator reads it as "not
//! hosted here", the dispatcher counts it as a miss, the verifier falls
//! back to the pre-dispatch snapshot.

use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS, or timeout failure before a response arrived
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not decode into a profile
    #[error("undecodable profile response: {0}")]
    Decode(#[from] prost::DecodeError),
}
