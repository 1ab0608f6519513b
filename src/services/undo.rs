//! Undo of the last swipe, within a bounded time window.
//!
//! Each user has at most one pending-undo entry, held in an in-process
//! concurrent cache keyed by user id. Recording a new swipe replaces the
//! previous entry, silently forfeiting the older undo. Expiry is checked
//! lazily on every read path; the cache's own TTL is only a memory
//! backstop, never the correctness mechanism.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::Swipe;
use crate::storage::{InteractionStorage, MatchStorage};
use crate::time::Clock;

const NO_SWIPE_MESSAGE: &str = "No swipe to undo";
const WINDOW_EXPIRED_MESSAGE: &str = "Undo window expired";

/// A swipe still eligible for reversal
#[derive(Debug, Clone)]
pub struct PendingUndo {
    pub swipe: Swipe,
    /// Canonical id of the match the swipe created, if any
    pub match_id: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl PendingUndo {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Outcome of an undo request
#[derive(Debug, Clone)]
pub enum UndoOutcome {
    /// The swipe was deleted; `match_removed` reports whether a match
    /// created by it was deleted too
    Undone { swipe: Swipe, match_removed: bool },
    /// Nothing was undone; the message says why
    Failed { message: String },
}

impl UndoOutcome {
    pub fn is_undone(&self) -> bool {
        matches!(self, Self::Undone { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Undone { .. } => None,
        }
    }
}

/// Tracks the last swipe per user and executes reversals
///
/// Reads and writes may race for the same user; the consuming path takes
/// the entry out of the cache atomically, so the delete-and-clear sequence
/// runs at most once even under concurrent undo requests.
pub struct UndoService {
    interactions: Arc<dyn InteractionStorage>,
    matches: Arc<dyn MatchStorage>,
    store: Cache<Uuid, PendingUndo>,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl UndoService {
    pub fn new(
        interactions: Arc<dyn InteractionStorage>,
        matches: Arc<dyn MatchStorage>,
        window: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // TTL backstop well past the window; every read re-checks expiry
        let store = Cache::builder()
            .time_to_live(window + Duration::from_secs(60))
            .build();
        Self {
            interactions,
            matches,
            store,
            window,
            clock,
        }
    }

    /// Records a swipe for potential undo, replacing any previous entry
    ///
    /// Called after every like/pass. The previous swipe, if still pending,
    /// becomes unrecoverable.
    pub fn record_swipe(&self, user: Uuid, swipe: Swipe, match_id: Option<String>) {
        let expires_at = self.clock.now()
            + chrono::Duration::from_std(self.window).unwrap_or_else(|_| chrono::Duration::seconds(30));
        debug!(%user, swipe = %swipe.id, %expires_at, "recording swipe for undo");
        self.store.insert(
            user,
            PendingUndo {
                swipe,
                match_id,
                expires_at,
            },
        );
    }

    /// Whether the user has an unexpired swipe to undo
    ///
    /// Evicts an expired entry as a side effect.
    pub fn can_undo(&self, user: Uuid) -> bool {
        match self.store.get(&user) {
            Some(entry) if entry.is_expired(self.clock.now()) => {
                self.store.invalidate(&user);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Seconds left in the undo window, 0 when none or expired
    pub fn seconds_remaining(&self, user: Uuid) -> u64 {
        match self.store.get(&user) {
            Some(entry) => {
                let remaining = (entry.expires_at - self.clock.now()).num_seconds();
                if remaining <= 0 {
                    self.store.invalidate(&user);
                    0
                } else {
                    remaining as u64
                }
            }
            None => 0,
        }
    }

    /// Reverses the user's last swipe
    ///
    /// Takes the pending entry out of the store atomically, deletes the
    /// swipe record and any match it created, and reports what happened.
    /// On a storage failure the entry is re-armed so the user may retry,
    /// unless a newer swipe was recorded meanwhile, in which case the
    /// newer swipe wins.
    pub fn undo(&self, user: Uuid) -> UndoOutcome {
        // Atomic take: concurrent undo calls see the entry at most once
        let Some(entry) = self.store.remove(&user) else {
            return UndoOutcome::Failed {
                message: NO_SWIPE_MESSAGE.to_string(),
            };
        };

        if entry.is_expired(self.clock.now()) {
            return UndoOutcome::Failed {
                message: WINDOW_EXPIRED_MESSAGE.to_string(),
            };
        }

        match self.delete_records(&entry) {
            Ok(match_removed) => {
                info!(%user, swipe = %entry.swipe.id, match_removed, "swipe undone");
                UndoOutcome::Undone {
                    swipe: entry.swipe,
                    match_removed,
                }
            }
            Err(e) => {
                warn!(%user, error = %e, "undo failed, keeping pending entry");
                // Re-arm for retry without clobbering a newer swipe
                let _ = self.store.entry(user).or_insert(entry);
                UndoOutcome::Failed {
                    message: format!("Failed to undo: {}", e),
                }
            }
        }
    }

    /// Drops the pending entry for a user without executing anything
    pub fn clear(&self, user: Uuid) {
        self.store.invalidate(&user);
    }

    /// Sweeps expired entries; optional, affects memory only
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let expired: Vec<Uuid> = self
            .store
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(user, _)| *user)
            .collect();
        for user in &expired {
            self.store.invalidate(user);
        }
        expired.len()
    }

    fn delete_records(&self, entry: &PendingUndo) -> Result<bool, crate::error::StorageError> {
        self.interactions.delete(entry.swipe.id)?;
        if let Some(match_id) = &entry.match_id {
            self.matches.delete(match_id)?;
            return Ok(true);
        }
        Ok(false)
    }
}
