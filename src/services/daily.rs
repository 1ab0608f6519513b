//! Daily limits and the deterministic daily pick.
//!
//! Two responsibilities sharing one calendar: enforcing per-day like/pass
//! caps against storage-supplied counters, and surfacing one
//! deterministically chosen candidate per user per local calendar day.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::core::distance::distance_between;
use crate::error::StorageError;
use crate::models::Profile;
use crate::storage::{BlockStorage, DailyPickViewStorage, InteractionStorage, ProfileStorage};
use crate::time::{next_midnight, start_of_day, today_in, Clock};

/// Sentinel for "no limit" in remaining counts
pub const UNLIMITED: i32 = -1;

/// Runtime configuration for the daily service
#[derive(Debug, Clone)]
pub struct DailyConfig {
    pub like_limit: u32,
    pub pass_limit: u32,
    pub unlimited_likes: bool,
    pub unlimited_passes: bool,
    /// "Day" means local midnight-to-midnight in this timezone
    pub timezone: FixedOffset,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            like_limit: 100,
            pass_limit: 100,
            unlimited_likes: false,
            unlimited_passes: false,
            timezone: chrono::Offset::fix(&Utc),
        }
    }
}

/// Snapshot of a user's daily limit usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatus {
    pub likes_used: u32,
    /// Remaining likes, or -1 when unlimited
    pub likes_remaining: i32,
    pub passes_used: u32,
    /// Remaining passes, or -1 when unlimited
    pub passes_remaining: i32,
    pub date: NaiveDate,
    /// Next local midnight, when the counters reset
    pub resets_at: DateTime<Utc>,
}

impl DailyStatus {
    pub fn has_unlimited_likes(&self) -> bool {
        self.likes_remaining < 0
    }

    pub fn has_unlimited_passes(&self) -> bool {
        self.passes_remaining < 0
    }
}

/// Today's deterministic pick for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPick {
    pub profile: Profile,
    pub date: NaiveDate,
    pub reason: String,
    pub already_viewed: bool,
}

/// Daily limit checks and daily pick selection
pub struct DailyService {
    profiles: Arc<dyn ProfileStorage>,
    interactions: Arc<dyn InteractionStorage>,
    blocks: Arc<dyn BlockStorage>,
    views: Arc<dyn DailyPickViewStorage>,
    config: DailyConfig,
    clock: Arc<dyn Clock>,
}

impl DailyService {
    pub fn new(
        profiles: Arc<dyn ProfileStorage>,
        interactions: Arc<dyn InteractionStorage>,
        blocks: Arc<dyn BlockStorage>,
        views: Arc<dyn DailyPickViewStorage>,
        config: DailyConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            interactions,
            blocks,
            views,
            config,
            clock,
        }
    }

    /// Whether the user may like someone today
    pub fn can_like(&self, user: Uuid) -> Result<bool, StorageError> {
        if self.config.unlimited_likes {
            return Ok(true);
        }
        let used = self
            .interactions
            .count_likes_since(user, self.start_of_today())?;
        Ok(used < self.config.like_limit)
    }

    /// Whether the user may pass on someone today
    pub fn can_pass(&self, user: Uuid) -> Result<bool, StorageError> {
        if self.config.unlimited_passes {
            return Ok(true);
        }
        let used = self
            .interactions
            .count_passes_since(user, self.start_of_today())?;
        Ok(used < self.config.pass_limit)
    }

    /// Usage counts and reset time for both directions
    pub fn status(&self, user: Uuid) -> Result<DailyStatus, StorageError> {
        let now = self.clock.now();
        let start = self.start_of_today();

        let likes_used = self.interactions.count_likes_since(user, start)?;
        let passes_used = self.interactions.count_passes_since(user, start)?;

        Ok(DailyStatus {
            likes_used,
            likes_remaining: remaining(self.config.unlimited_likes, self.config.like_limit, likes_used),
            passes_used,
            passes_remaining: remaining(
                self.config.unlimited_passes,
                self.config.pass_limit,
                passes_used,
            ),
            date: today_in(now, self.config.timezone),
            resets_at: next_midnight(now, self.config.timezone),
        })
    }

    /// Time until the counters reset at the next local midnight
    pub fn time_until_reset(&self) -> Duration {
        let now = self.clock.now();
        next_midnight(now, self.config.timezone) - now
    }

    /// Today's pick for the seeker, or `None` when nobody is eligible
    ///
    /// The same seeker gets the same pick and the same reason for the whole
    /// local day: the generator is seeded from the epoch day and the seeker
    /// id, and the reason is drawn from the same stream. Nothing about the
    /// choice is persisted; only the viewed flag comes from storage.
    pub fn daily_pick(&self, seeker: &Profile) -> Result<Option<DailyPick>, StorageError> {
        let today = today_in(self.clock.now(), self.config.timezone);
        let interacted = self.interactions.interacted_targets(seeker.id)?;

        let mut candidates = Vec::new();
        for profile in self.profiles.all_active()? {
            if profile.id == seeker.id || interacted.contains(&profile.id) {
                continue;
            }
            if self.blocks.is_blocked(seeker.id, profile.id)? {
                continue;
            }
            candidates.push(profile);
        }

        if candidates.is_empty() {
            debug!(seeker = %seeker.id, %today, "no daily pick available");
            return Ok(None);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(pick_seed(today, seeker.id));
        let picked = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        let reason = pick_reason(seeker, &picked, today, &mut rng);
        let already_viewed = self.views.has_viewed(seeker.id, today)?;

        debug!(seeker = %seeker.id, picked = %picked.id, %today, "daily pick selected");
        Ok(Some(DailyPick {
            profile: picked,
            date: today,
            reason,
            already_viewed,
        }))
    }

    /// Whether the user has viewed today's pick
    pub fn has_viewed_pick(&self, user: Uuid) -> Result<bool, StorageError> {
        self.views
            .has_viewed(user, today_in(self.clock.now(), self.config.timezone))
    }

    /// Record that the user viewed today's pick
    pub fn mark_pick_viewed(&self, user: Uuid) -> Result<(), StorageError> {
        self.views
            .mark_viewed(user, today_in(self.clock.now(), self.config.timezone))
    }

    fn start_of_today(&self) -> DateTime<Utc> {
        let today = today_in(self.clock.now(), self.config.timezone);
        start_of_day(today, self.config.timezone)
    }
}

/// Formats a countdown like "3h 07m" or "42m"
pub fn format_duration(duration: Duration) -> String {
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn remaining(unlimited: bool, limit: u32, used: u32) -> i32 {
    if unlimited {
        return UNLIMITED;
    }
    limit.saturating_sub(used) as i32
}

/// Seed combining the calendar day with a fold of the seeker's id.
///
/// Reproducible within one build of this crate; not a cross-platform
/// contract.
fn pick_seed(date: NaiveDate, seeker: Uuid) -> u64 {
    use chrono::Datelike;

    let day = i64::from(date.num_days_from_ce()) as u64;
    let bits = seeker.as_u128();
    day.wrapping_add((bits as u64) ^ ((bits >> 64) as u64))
}

/// Draws a reason from situational candidates plus fixed fallbacks,
/// continuing the same generator stream that chose the pick
fn pick_reason(seeker: &Profile, picked: &Profile, today: NaiveDate, rng: &mut ChaCha8Rng) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if let Some(km) = distance_between(seeker, picked) {
        if km < 5.0 {
            reasons.push("Lives nearby!");
        } else if km < 10.0 {
            reasons.push("Close enough for coffee!");
        }
    }

    let seeker_age = seeker.age_on(today);
    let picked_age = picked.age_on(today);
    if seeker_age > 0 && picked_age > 0 {
        let gap = seeker_age.abs_diff(picked_age);
        if gap <= 2 {
            reasons.push("Similar age");
        } else if gap <= 5 {
            reasons.push("Age-appropriate match");
        }
    }

    if both_equal(seeker.looking_for, picked.looking_for) {
        reasons.push("Looking for the same thing");
    }
    if both_equal(seeker.wants_kids, picked.wants_kids) {
        reasons.push("Same stance on kids");
    }
    if both_equal(seeker.drinking, picked.drinking) {
        reasons.push("Compatible drinking habits");
    }
    if both_equal(seeker.smoking, picked.smoking) {
        reasons.push("Compatible smoking habits");
    }

    let shared = seeker.interests.intersection(&picked.interests).count();
    if shared >= 3 {
        reasons.push("Many shared interests!");
    } else if shared >= 1 {
        reasons.push("Some shared interests");
    }

    // Generic fallbacks, always present
    reasons.push("Our algorithm thinks you might click!");
    reasons.push("Something different today!");
    reasons.push("Expand your horizons!");
    reasons.push("Why not give them a chance?");
    reasons.push("Could be a pleasant surprise!");

    reasons[rng.gen_range(0..reasons.len())].to_string()
}

fn both_equal<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}
