//! Match quality scoring.
//!
//! Combines six sub-scores (distance, age, shared interests, lifestyle,
//! pace, response latency) into a single 0-100 compatibility figure with
//! human-readable highlights, computed from one user's perspective.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::core::distance::distance_between;
use crate::core::pace;
use crate::error::{DomainError, StorageError};
use crate::models::{
    Drinking, Interest, Match, MatchQuality, Profile, QualityWeights, Smoking, WantsKids,
};
use crate::storage::{InteractionStorage, ProfileStorage};
use crate::time::{today_in, Clock};

/// Errors from computing match quality
#[derive(Debug, Error)]
pub enum QualityError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of comparing two interest sets
#[derive(Debug, Clone, PartialEq)]
pub struct InterestOverlap {
    /// Interests both users have, in a stable (enum) order
    pub shared: Vec<Interest>,
    /// shared / min(|a|, |b|); rewards having all interests match
    pub overlap_ratio: f64,
    /// shared / union; the standard similarity metric
    pub jaccard_index: f64,
}

impl InterestOverlap {
    pub fn shared_count(&self) -> usize {
        self.shared.len()
    }

    pub fn has_shared(&self) -> bool {
        !self.shared.is_empty()
    }
}

/// Compares two interest sets
///
/// An empty set on either side yields zero overlap.
pub fn compare_interests(a: &HashSet<Interest>, b: &HashSet<Interest>) -> InterestOverlap {
    if a.is_empty() || b.is_empty() {
        return InterestOverlap {
            shared: Vec::new(),
            overlap_ratio: 0.0,
            jaccard_index: 0.0,
        };
    }

    let mut shared: Vec<Interest> = a.intersection(b).copied().collect();
    shared.sort();

    let union_size = a.union(b).count();
    let min_size = a.len().min(b.len());
    let shared_count = shared.len();

    InterestOverlap {
        shared,
        overlap_ratio: shared_count as f64 / min_size as f64,
        jaccard_index: shared_count as f64 / union_size as f64,
    }
}

/// Formats shared interests for display, e.g. "Hiking, Coffee, and 2 more"
pub fn format_shared_interests(shared: &[Interest]) -> String {
    let names: Vec<&str> = shared.iter().take(3).map(|i| i.display_name()).collect();
    let remaining = shared.len().saturating_sub(3);

    match (names.as_slice(), remaining) {
        ([], _) => String::new(),
        (names, r) if r > 0 => format!("{}, and {} more", names.join(", "), r),
        ([only], _) => (*only).to_string(),
        ([first, second], _) => format!("{} and {}", first, second),
        ([first, second, third], _) => format!("{}, {}, and {}", first, second, third),
        _ => names.join(", "),
    }
}

/// Shared interests as sorted display names
pub fn interest_display_list(shared: &[Interest]) -> Vec<String> {
    let mut names: Vec<String> = shared.iter().map(|i| i.display_name().to_string()).collect();
    names.sort();
    names
}

/// Computes match quality from one user's perspective
pub struct QualityScorer {
    profiles: Arc<dyn ProfileStorage>,
    interactions: Arc<dyn InteractionStorage>,
    weights: QualityWeights,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl QualityScorer {
    pub fn new(
        profiles: Arc<dyn ProfileStorage>,
        interactions: Arc<dyn InteractionStorage>,
        weights: QualityWeights,
        clock: Arc<dyn Clock>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            profiles,
            interactions,
            weights,
            clock,
            timezone,
        }
    }

    /// Compute the quality of a match as seen by `perspective_user`
    pub fn compute(&self, m: &Match, perspective_user: Uuid) -> Result<MatchQuality, QualityError> {
        let other_user = m
            .other_user(perspective_user)
            .ok_or_else(|| StorageError::NotFound(format!("user {} in match {}", perspective_user, m.id)))?;

        let me = self
            .profiles
            .by_id(perspective_user)?
            .ok_or_else(|| StorageError::NotFound(format!("profile {}", perspective_user)))?;
        let them = self
            .profiles
            .by_id(other_user)?
            .ok_or_else(|| StorageError::NotFound(format!("profile {}", other_user)))?;

        let today = today_in(self.clock.now(), self.timezone);

        let measured_distance = distance_between(&me, &them);
        let distance_km = measured_distance.unwrap_or(0.0);
        let distance_score = distance_sub_score(distance_km, me.max_distance_km);

        let my_age = me.age_on(today);
        let their_age = them.age_on(today);
        let age_difference = my_age.abs_diff(their_age);
        let age_score = age_sub_score(age_difference, &me, &them);

        let overlap = compare_interests(&me.interests, &them.interests);
        let interest_score = interest_sub_score(&overlap, &me, &them);
        let shared_interests = interest_display_list(&overlap.shared);

        let lifestyle_matches = lifestyle_match_lines(&me, &them);
        let lifestyle_score = lifestyle_sub_score(&me, &them);

        let time_between_likes = self.time_between_likes(perspective_user, other_user)?;
        let response_score = response_sub_score(time_between_likes);

        let pace_score = pace::normalized(me.pace.as_ref(), them.pace.as_ref());
        let pace_sync_level = pace_sync_label(pace_score).to_string();

        let weighted = distance_score * self.weights.distance
            + age_score * self.weights.age
            + interest_score * self.weights.interest
            + lifestyle_score * self.weights.lifestyle
            + pace_score * self.weights.pace
            + response_score * self.weights.response;
        let compatibility_score = (weighted * 100.0).round().clamp(0.0, 100.0) as u8;

        let highlights = build_highlights(HighlightInput {
            measured_distance,
            overlap: &overlap,
            shared_interests: &shared_interests,
            lifestyle_matches: &lifestyle_matches,
            pace_score,
            time_between_likes,
            my_age,
            their_age,
        });

        debug!(
            match_id = %m.id,
            perspective = %perspective_user,
            compatibility = compatibility_score,
            "computed match quality"
        );

        let quality = MatchQuality {
            match_id: m.id.clone(),
            perspective_user,
            other_user,
            computed_at: self.clock.now(),
            distance_score,
            age_score,
            interest_score,
            lifestyle_score,
            pace_score,
            response_score,
            distance_km,
            age_difference,
            shared_interests,
            lifestyle_matches,
            time_between_likes,
            pace_sync_level,
            compatibility_score,
            highlights,
        };
        Ok(quality.validated()?)
    }

    /// Time between the two reciprocal likes, zero when unknown
    fn time_between_likes(&self, a: Uuid, b: Uuid) -> Result<Duration, StorageError> {
        let mine = self.interactions.get(a, b)?;
        let theirs = self.interactions.get(b, a)?;

        match (mine, theirs) {
            (Some(s1), Some(s2)) if s1.is_like() && s2.is_like() => {
                let (first, second) = if s1.created_at <= s2.created_at {
                    (s1.created_at, s2.created_at)
                } else {
                    (s2.created_at, s1.created_at)
                };
                Ok((second - first).to_std().unwrap_or_default())
            }
            _ => Ok(Duration::ZERO),
        }
    }
}

fn distance_sub_score(distance_km: f64, max_distance_km: u32) -> f64 {
    if distance_km <= 1.0 {
        return 1.0;
    }
    let max = f64::from(max_distance_km);
    if distance_km >= max {
        return 0.0;
    }
    1.0 - distance_km / max
}

fn age_sub_score(age_difference: u32, me: &Profile, them: &Profile) -> f64 {
    if age_difference <= 2 {
        return 1.0;
    }
    let my_range = me.max_age.saturating_sub(me.min_age);
    let their_range = them.max_age.saturating_sub(them.min_age);
    let avg_range = (my_range + their_range) / 2;
    if avg_range == 0 {
        return 1.0;
    }
    (1.0 - f64::from(age_difference) / f64::from(avg_range)).max(0.0)
}

fn interest_sub_score(overlap: &InterestOverlap, me: &Profile, them: &Profile) -> f64 {
    if me.interests.is_empty() && them.interests.is_empty() {
        return 0.5; // Unknown, neutral
    }
    if me.interests.is_empty() || them.interests.is_empty() {
        return 0.3;
    }
    overlap.overlap_ratio
}

/// Whether two kids stances are considered compatible
fn kids_compatible(a: WantsKids, b: WantsKids) -> bool {
    if a == b {
        return true;
    }
    if a == WantsKids::Open || b == WantsKids::Open {
        return true;
    }
    matches!(
        (a, b),
        (WantsKids::Someday, WantsKids::HasKids) | (WantsKids::HasKids, WantsKids::Someday)
    )
}

fn lifestyle_sub_score(me: &Profile, them: &Profile) -> f64 {
    let mut comparable = 0u32;
    let mut matched = 0u32;

    if let (Some(a), Some(b)) = (me.smoking, them.smoking) {
        comparable += 1;
        if a == b {
            matched += 1;
        }
    }
    if let (Some(a), Some(b)) = (me.drinking, them.drinking) {
        comparable += 1;
        if a == b {
            matched += 1;
        }
    }
    if let (Some(a), Some(b)) = (me.wants_kids, them.wants_kids) {
        comparable += 1;
        if kids_compatible(a, b) {
            matched += 1;
        }
    }
    if let (Some(a), Some(b)) = (me.looking_for, them.looking_for) {
        comparable += 1;
        if a == b {
            matched += 1;
        }
    }

    if comparable == 0 {
        return 0.5;
    }
    f64::from(matched) / f64::from(comparable)
}

fn lifestyle_match_lines(me: &Profile, them: &Profile) -> Vec<String> {
    let mut lines = Vec::new();

    if let (Some(a), Some(b)) = (me.smoking, them.smoking) {
        if a == b {
            match a {
                Smoking::Never => lines.push("Both non-smokers".to_string()),
                Smoking::Sometimes => lines.push("Both occasional smokers".to_string()),
                Smoking::Regularly => {}
            }
        }
    }

    if let (Some(a), Some(b)) = (me.drinking, them.drinking) {
        if a == b {
            match a {
                Drinking::Never => lines.push("Neither drinks".to_string()),
                Drinking::Socially => lines.push("Both social drinkers".to_string()),
                Drinking::Regularly => {}
            }
        }
    }

    if let (Some(a), Some(b)) = (me.wants_kids, them.wants_kids) {
        if a == b {
            lines.push("Same stance on kids".to_string());
        } else if kids_compatible(a, b) {
            lines.push("Compatible on kids".to_string());
        }
    }

    if let (Some(a), Some(b)) = (me.looking_for, them.looking_for) {
        if a == b {
            lines.push(format!("Both looking for {}", a.display_name().to_lowercase()));
        }
    }

    lines
}

fn response_sub_score(time_between: Duration) -> f64 {
    if time_between.is_zero() {
        return 0.5; // Unknown
    }
    let hours = time_between.as_secs() / 3600;
    match hours {
        0 => 1.0,
        1..=23 => 0.9,
        24..=71 => 0.7,
        72..=167 => 0.5,
        168..=719 => 0.3,
        _ => 0.1,
    }
}

fn pace_sync_label(score: f64) -> &'static str {
    if score >= 0.95 {
        "Perfect Sync"
    } else if score >= 0.8 {
        "Good Sync"
    } else if score >= 0.6 {
        "Fair Sync"
    } else if score >= 0.4 {
        "Pace Lag"
    } else {
        "Mismatched Pace"
    }
}

struct HighlightInput<'a> {
    measured_distance: Option<f64>,
    overlap: &'a InterestOverlap,
    shared_interests: &'a [String],
    lifestyle_matches: &'a [String],
    pace_score: f64,
    time_between_likes: Duration,
    my_age: u32,
    their_age: u32,
}

fn build_highlights(input: HighlightInput<'_>) -> Vec<String> {
    let mut highlights = Vec::new();

    if let Some(km) = input.measured_distance {
        if km < 5.0 {
            highlights.push(format!("Lives nearby ({:.1} km away)", km));
        } else if km < 15.0 {
            highlights.push(format!("{:.0} km away", km));
        }
    }

    match input.shared_interests {
        [] => {}
        [only] => highlights.push(format!("You both enjoy {}", only)),
        many => highlights.push(format!(
            "You share {} interests: {}",
            many.len(),
            format_shared_interests(&input.overlap.shared)
        )),
    }

    highlights.extend(input.lifestyle_matches.iter().cloned());

    if input.pace_score >= 0.95 {
        highlights.push("Total Pace Sync! ⚡".to_string());
    } else if input.pace_score >= 0.8 {
        highlights.push("Great communication sync".to_string());
    }

    if !input.time_between_likes.is_zero() && input.time_between_likes.as_secs() < 24 * 3600 {
        highlights.push("Quick mutual interest!".to_string());
    }

    if input.my_age > 0 && input.their_age > 0 && input.my_age.abs_diff(input.their_age) <= 2 {
        highlights.push("Similar age".to_string());
    }

    highlights.truncate(5);
    highlights
}
