//! Storage contracts the core consumes.
//!
//! The core is a library invoked by presentation and session layers; all
//! persistence lives behind these traits. Calls are synchronous and
//! fallible; implementations own connection handling and latency.

pub mod memory;

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{Match, Profile, Swipe};

/// Persisted like/pass records
pub trait InteractionStorage: Send + Sync {
    /// Count likes given by `user` with creation time at or after `since`
    fn count_likes_since(&self, user: Uuid, since: DateTime<Utc>) -> Result<u32, StorageError>;

    /// Count passes given by `user` with creation time at or after `since`
    fn count_passes_since(&self, user: Uuid, since: DateTime<Utc>) -> Result<u32, StorageError>;

    /// Whether a directed record from `from` to `to` exists
    fn exists(&self, from: Uuid, to: Uuid) -> Result<bool, StorageError>;

    /// Everyone `user` has liked or passed on
    fn interacted_targets(&self, user: Uuid) -> Result<HashSet<Uuid>, StorageError>;

    /// The directed record from `from` to `to`, if any
    fn get(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StorageError>;

    /// Delete a swipe by id
    fn delete(&self, swipe_id: Uuid) -> Result<(), StorageError>;
}

/// Persisted mutual matches
pub trait MatchStorage: Send + Sync {
    /// Delete a match by its canonical id
    fn delete(&self, match_id: &str) -> Result<(), StorageError>;

    /// Active matches the user participates in
    fn active_matches_involving(&self, user: Uuid) -> Result<Vec<Match>, StorageError>;
}

/// Persisted profiles (read-only from the core's point of view)
pub trait ProfileStorage: Send + Sync {
    /// All profiles in the active lifecycle state.
    ///
    /// Implementations should return a stable ordering across calls within
    /// a day; the daily pick's same-day determinism relies on it.
    fn all_active(&self) -> Result<Vec<Profile>, StorageError>;

    fn by_id(&self, user: Uuid) -> Result<Option<Profile>, StorageError>;
}

/// Persisted blocks between users
pub trait BlockStorage: Send + Sync {
    /// Whether either user has blocked the other
    fn is_blocked(&self, a: Uuid, b: Uuid) -> Result<bool, StorageError>;
}

/// The single persisted fact behind the daily pick: who viewed theirs when
pub trait DailyPickViewStorage: Send + Sync {
    fn has_viewed(&self, user: Uuid, date: NaiveDate) -> Result<bool, StorageError>;

    fn mark_viewed(&self, user: Uuid, date: NaiveDate) -> Result<(), StorageError>;

    /// Remove view records older than the given date; returns how many
    fn purge_older_than(&self, date: NaiveDate) -> Result<usize, StorageError>;
}
