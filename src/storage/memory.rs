//! In-process storage implementations.
//!
//! Mutex-guarded maps good enough for tests, demos, and embedders that
//! have not wired a real backend yet. The profile store iterates in key
//! order so the daily pick stays deterministic within a day.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{Match, Profile, Swipe, SwipeDirection};

use super::{
    BlockStorage, DailyPickViewStorage, InteractionStorage, MatchStorage, ProfileStorage,
};

fn poisoned() -> StorageError {
    StorageError::Backend("memory store lock poisoned".to_string())
}

/// In-memory swipe records
#[derive(Debug, Default)]
pub struct MemoryInteractionStorage {
    swipes: Mutex<Vec<Swipe>>,
}

impl MemoryInteractionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a swipe record
    pub fn save(&self, swipe: Swipe) -> Result<(), StorageError> {
        self.swipes.lock().map_err(|_| poisoned())?.push(swipe);
        Ok(())
    }
}

impl InteractionStorage for MemoryInteractionStorage {
    fn count_likes_since(&self, user: Uuid, since: DateTime<Utc>) -> Result<u32, StorageError> {
        let swipes = self.swipes.lock().map_err(|_| poisoned())?;
        Ok(swipes
            .iter()
            .filter(|s| s.from == user && s.direction == SwipeDirection::Like && s.created_at >= since)
            .count() as u32)
    }

    fn count_passes_since(&self, user: Uuid, since: DateTime<Utc>) -> Result<u32, StorageError> {
        let swipes = self.swipes.lock().map_err(|_| poisoned())?;
        Ok(swipes
            .iter()
            .filter(|s| s.from == user && s.direction == SwipeDirection::Pass && s.created_at >= since)
            .count() as u32)
    }

    fn exists(&self, from: Uuid, to: Uuid) -> Result<bool, StorageError> {
        let swipes = self.swipes.lock().map_err(|_| poisoned())?;
        Ok(swipes.iter().any(|s| s.from == from && s.to == to))
    }

    fn interacted_targets(&self, user: Uuid) -> Result<HashSet<Uuid>, StorageError> {
        let swipes = self.swipes.lock().map_err(|_| poisoned())?;
        Ok(swipes.iter().filter(|s| s.from == user).map(|s| s.to).collect())
    }

    fn get(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StorageError> {
        let swipes = self.swipes.lock().map_err(|_| poisoned())?;
        Ok(swipes.iter().find(|s| s.from == from && s.to == to).cloned())
    }

    fn delete(&self, swipe_id: Uuid) -> Result<(), StorageError> {
        let mut swipes = self.swipes.lock().map_err(|_| poisoned())?;
        let before = swipes.len();
        swipes.retain(|s| s.id != swipe_id);
        if swipes.len() == before {
            return Err(StorageError::NotFound(format!("swipe {}", swipe_id)));
        }
        Ok(())
    }
}

/// In-memory matches keyed by canonical id
#[derive(Debug, Default)]
pub struct MemoryMatchStorage {
    matches: Mutex<HashMap<String, Match>>,
}

impl MemoryMatchStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, m: Match) -> Result<(), StorageError> {
        self.matches
            .lock()
            .map_err(|_| poisoned())?
            .insert(m.id.clone(), m);
        Ok(())
    }

    pub fn contains(&self, match_id: &str) -> Result<bool, StorageError> {
        Ok(self.matches.lock().map_err(|_| poisoned())?.contains_key(match_id))
    }
}

impl MatchStorage for MemoryMatchStorage {
    fn delete(&self, match_id: &str) -> Result<(), StorageError> {
        let mut matches = self.matches.lock().map_err(|_| poisoned())?;
        if matches.remove(match_id).is_none() {
            return Err(StorageError::NotFound(format!("match {}", match_id)));
        }
        Ok(())
    }

    fn active_matches_involving(&self, user: Uuid) -> Result<Vec<Match>, StorageError> {
        let matches = self.matches.lock().map_err(|_| poisoned())?;
        Ok(matches
            .values()
            .filter(|m| m.active && m.involves(user))
            .cloned()
            .collect())
    }
}

/// In-memory profiles, iterated in id order
#[derive(Debug, Default)]
pub struct MemoryProfileStorage {
    profiles: Mutex<BTreeMap<Uuid, Profile>>,
}

impl MemoryProfileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, profile: Profile) -> Result<(), StorageError> {
        self.profiles
            .lock()
            .map_err(|_| poisoned())?
            .insert(profile.id, profile);
        Ok(())
    }
}

impl ProfileStorage for MemoryProfileStorage {
    fn all_active(&self) -> Result<Vec<Profile>, StorageError> {
        let profiles = self.profiles.lock().map_err(|_| poisoned())?;
        Ok(profiles.values().filter(|p| p.is_active()).cloned().collect())
    }

    fn by_id(&self, user: Uuid) -> Result<Option<Profile>, StorageError> {
        let profiles = self.profiles.lock().map_err(|_| poisoned())?;
        Ok(profiles.get(&user).cloned())
    }
}

/// In-memory blocks
#[derive(Debug, Default)]
pub struct MemoryBlockStorage {
    blocks: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl MemoryBlockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `blocker` blocked `blocked`
    pub fn block(&self, blocker: Uuid, blocked: Uuid) -> Result<(), StorageError> {
        self.blocks
            .lock()
            .map_err(|_| poisoned())?
            .insert((blocker, blocked));
        Ok(())
    }
}

impl BlockStorage for MemoryBlockStorage {
    fn is_blocked(&self, a: Uuid, b: Uuid) -> Result<bool, StorageError> {
        let blocks = self.blocks.lock().map_err(|_| poisoned())?;
        Ok(blocks.contains(&(a, b)) || blocks.contains(&(b, a)))
    }
}

/// In-memory daily-pick view records
#[derive(Debug, Default)]
pub struct MemoryDailyPickViewStorage {
    viewed: Mutex<HashSet<(Uuid, NaiveDate)>>,
}

impl MemoryDailyPickViewStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DailyPickViewStorage for MemoryDailyPickViewStorage {
    fn has_viewed(&self, user: Uuid, date: NaiveDate) -> Result<bool, StorageError> {
        Ok(self.viewed.lock().map_err(|_| poisoned())?.contains(&(user, date)))
    }

    fn mark_viewed(&self, user: Uuid, date: NaiveDate) -> Result<(), StorageError> {
        self.viewed.lock().map_err(|_| poisoned())?.insert((user, date));
        Ok(())
    }

    fn purge_older_than(&self, date: NaiveDate) -> Result<usize, StorageError> {
        let mut viewed = self.viewed.lock().map_err(|_| poisoned())?;
        let before = viewed.len();
        viewed.retain(|(_, d)| *d >= date);
        Ok(before - viewed.len())
    }
}
