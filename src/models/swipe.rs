use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Direction of a swipe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Like,
    Pass,
}

/// A like or pass from one user to another
///
/// Immutable once created; the only way a swipe disappears is through the
/// undo service deleting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

impl Swipe {
    pub fn new(
        id: Uuid,
        from: Uuid,
        to: Uuid,
        direction: SwipeDirection,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if from == to {
            return Err(DomainError::SelfSwipe);
        }
        Ok(Self {
            id,
            from,
            to,
            direction,
            created_at,
        })
    }

    /// Creates a like with a fresh id
    pub fn like(from: Uuid, to: Uuid, at: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::new(Uuid::new_v4(), from, to, SwipeDirection::Like, at)
    }

    /// Creates a pass with a fresh id
    pub fn pass(from: Uuid, to: Uuid, at: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::new(Uuid::new_v4(), from, to, SwipeDirection::Pass, at)
    }

    pub fn is_like(&self) -> bool {
        self.direction == SwipeDirection::Like
    }
}

/// A mutual match between two users
///
/// The pair is stored in canonical order (smaller id string first) so the
/// same two users always produce the same match id regardless of who
/// liked whom first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub matched_at: DateTime<Utc>,
    pub active: bool,
}

impl Match {
    pub fn new(a: Uuid, b: Uuid, matched_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfMatch);
        }
        let (user_a, user_b) = Self::canonical_order(a, b);
        Ok(Self {
            id: Self::id_for(a, b),
            user_a,
            user_b,
            matched_at,
            active: true,
        })
    }

    /// The canonical match id for a pair of users
    pub fn id_for(a: Uuid, b: Uuid) -> String {
        let (lo, hi) = Self::canonical_order(a, b);
        format!("{}_{}", lo, hi)
    }

    fn canonical_order(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a.to_string() <= b.to_string() {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn involves(&self, user: Uuid) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// The other participant, if `user` is part of this match
    pub fn other_user(&self, user: Uuid) -> Option<Uuid> {
        if self.user_a == user {
            Some(self.user_b)
        } else if self.user_b == user {
            Some(self.user_a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_swipe_rejects_self() {
        let user = Uuid::new_v4();
        assert_eq!(Swipe::like(user, user, at()).unwrap_err(), DomainError::SelfSwipe);
    }

    #[test]
    fn test_swipe_directions() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(Swipe::like(a, b, at()).unwrap().is_like());
        assert!(!Swipe::pass(a, b, at()).unwrap().is_like());
    }

    #[test]
    fn test_match_id_is_order_independent() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(Match::id_for(a, b), Match::id_for(b, a));

        let m1 = Match::new(a, b, at()).unwrap();
        let m2 = Match::new(b, a, at()).unwrap();
        assert_eq!(m1.id, m2.id);
        assert_eq!(m1.user_a, m2.user_a);
    }

    #[test]
    fn test_match_rejects_self() {
        let user = Uuid::new_v4();
        assert_eq!(Match::new(user, user, at()).unwrap_err(), DomainError::SelfMatch);
    }

    #[test]
    fn test_other_user() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let m = Match::new(a, b, at()).unwrap();
        assert_eq!(m.other_user(a), Some(b));
        assert_eq!(m.other_user(b), Some(a));
        assert_eq!(m.other_user(Uuid::new_v4()), None);
    }
}
