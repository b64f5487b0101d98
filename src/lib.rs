//! Likes Gateway Library
//!
//! A proxy service that resolves which regional game-server cluster hosts a
//! player, fans a like action out across every available token for that
//! region, and reports the observed change in the player's like counter.
//!
//! The flow behind `GET /like` is locate -> dispatch -> verify:
//!
//! 1. Probe configured regions in order until one returns a profile for the
//!    requested uid.
//! 2. Send one like per available token for that region, all concurrently.
//! 3. Re-read the profile to confirm the new counter, falling back to the
//!    pre-dispatch value when confirmation is impossible.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod like;
pub mod routes;
pub mod tokens;
