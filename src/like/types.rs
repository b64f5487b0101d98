//! Core Like-Operation Types
//!
//! Value types flowing through locate -> dispatch -> verify. Everything
//! here is created fresh per request and never mutated after construction.

/// Decoded view of a player profile at one moment in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Display name; empty means the region returned no player
    pub nickname: String,
    /// Like counter at the time of the read
    pub likes: u32,
}

/// Aggregate of one dispatch fan-out round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Calls issued, one per token available at dispatch time
    pub attempted: usize,
    /// Calls that returned a non-failure response
    pub succeeded: usize,
}

impl DispatchOutcome {
    /// Outcome of a round with no tokens to act with.
    pub fn empty() -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
        }
    }
}

/// How the post-dispatch counter read went.
///
/// Explicit so callers and tests can tell a confirmed counter from a
/// fallback, instead of inferring it from swallowed errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Fresh snapshot read after dispatch
    Confirmed(ProfileSnapshot),
    /// Nothing was dispatched, so there was nothing to verify
    Skipped(ProfileSnapshot),
    /// Verification failed or had no token; carries the pre-dispatch snapshot
    Fallback(ProfileSnapshot),
}

impl Verification {
    /// The snapshot to report as "after", whichever branch was taken.
    pub fn into_snapshot(self) -> ProfileSnapshot {
        match self {
            Verification::Confirmed(s) | Verification::Skipped(s) | Verification::Fallback(s) => s,
        }
    }
}

/// Caller-facing status codes, kept numerically stable: they are part of
/// the response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    /// No region hosts the uid, or no token was usable to find out
    NotFound,
    /// The like counter increased
    Liked,
    /// Dispatch ran but the counter did not observably move
    Unchanged,
    /// The uid failed validation; no network call was made
    InvalidUid,
    /// An unanticipated collaborator fault, absorbed at the orchestrator
    Internal,
}

impl LikeStatus {
    pub fn code(&self) -> u16 {
        match self {
            LikeStatus::NotFound => 0,
            LikeStatus::Liked => 1,
            LikeStatus::Unchanged => 2,
            LikeStatus::InvalidUid => 400,
            LikeStatus::Internal => 500,
        }
    }
}

impl std::fmt::Display for LikeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikeStatus::NotFound => write!(f, "not_found"),
            LikeStatus::Liked => write!(f, "liked"),
            LikeStatus::Unchanged => write!(f, "unchanged"),
            LikeStatus::InvalidUid => write!(f, "invalid_uid"),
            LikeStatus::Internal => write!(f, "internal_error"),
        }
    }
}

/// Final per-request view returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeReport {
    pub uid: String,
    /// Resolved region, or `None` when no region matched
    pub region: Option<String>,
    /// Player nickname, or `None` when no player was found
    pub player: Option<String>,
    pub likes_before: u32,
    pub likes_after: u32,
    pub likes_added: i64,
    pub status: LikeStatus,
}

impl LikeReport {
    /// Report for a uid that failed validation.
    pub fn invalid(uid: &str) -> Self {
        Self::terminal(uid, LikeStatus::InvalidUid)
    }

    /// Report for a uid no region claimed.
    pub fn not_found(uid: &str) -> Self {
        Self::terminal(uid, LikeStatus::NotFound)
    }

    /// Report for an operation that hit an internal fault.
    pub fn internal(uid: &str) -> Self {
        Self::terminal(uid, LikeStatus::Internal)
    }

    /// Report for a completed locate -> dispatch -> verify run.
    pub fn completed(
        uid: &str,
        region: String,
        player: String,
        before: u32,
        after: u32,
    ) -> Self {
        let likes_added = i64::from(after) - i64::from(before);
        let status = if likes_added > 0 {
            LikeStatus::Liked
        } else {
            LikeStatus::Unchanged
        };

        Self {
            uid: uid.to_string(),
            region: Some(region),
            player: Some(player),
            likes_before: before,
            likes_after: after,
            likes_added,
            status,
        }
    }

    fn terminal(uid: &str, status: LikeStatus) -> Self {
        Self {
            uid: uid.to_string(),
            region: None,
            player: None,
            likes_before: 0,
            likes_after: 0,
            likes_added: 0,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_with_increase_is_liked() {
        let report = LikeReport::completed("456", "ind".into(), "NoPe".into(), 100, 103);

        assert_eq!(report.likes_added, 3);
        assert_eq!(report.status, LikeStatus::Liked);
    }

    #[test]
    fn test_completed_without_increase_is_unchanged() {
        let report = LikeReport::completed("456", "ind".into(), "NoPe".into(), 100, 100);

        assert_eq!(report.likes_added, 0);
        assert_eq!(report.status, LikeStatus::Unchanged);
    }

    #[test]
    fn test_status_codes_are_stable() {
        assert_eq!(LikeStatus::NotFound.code(), 0);
        assert_eq!(LikeStatus::Liked.code(), 1);
        assert_eq!(LikeStatus::Unchanged.code(), 2);
        assert_eq!(LikeStatus::InvalidUid.code(), 400);
        assert_eq!(LikeStatus::Internal.code(), 500);
    }

    #[test]
    fn test_verification_branches_carry_their_snapshot() {
        let before = ProfileSnapshot {
            nickname: "NoPe".to_string(),
            likes: 10,
        };

        assert_eq!(
            Verification::Skipped(before.clone()).into_snapshot(),
            before
        );
        assert_eq!(
            Verification::Fallback(before.clone()).into_snapshot(),
            before
        );
    }
}
