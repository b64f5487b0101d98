//! Like Operation Engine
//!
//! The locate -> dispatch -> verify pipeline behind `GET /like`. Each stage
//! lives in its own module; the orchestrator sequences them and owns the
//! single boundary where unanticipated faults become an internal-error
//! report instead of propagating to the transport layer.

pub mod dispatch;
pub mod locator;
pub mod orchestrator;
pub mod types;
pub mod verify;
