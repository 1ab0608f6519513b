use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Weights for combining quality sub-scores
///
/// The six weights must be non-negative and sum to 1.0 (within a small
/// tolerance), so the aggregate stays on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub distance: f64,
    pub age: f64,
    pub interest: f64,
    pub lifestyle: f64,
    pub pace: f64,
    pub response: f64,
}

impl QualityWeights {
    pub fn new(
        distance: f64,
        age: f64,
        interest: f64,
        lifestyle: f64,
        pace: f64,
        response: f64,
    ) -> Result<Self, DomainError> {
        let weights = [
            ("distance", distance),
            ("age", age),
            ("interest", interest),
            ("lifestyle", lifestyle),
            ("pace", pace),
            ("response", response),
        ];
        for (name, value) in weights {
            if value < 0.0 {
                return Err(DomainError::NegativeWeight { name, value });
            }
        }
        let total = distance + age + interest + lifestyle + pace + response;
        if (total - 1.0).abs() > 0.001 {
            return Err(DomainError::WeightSum(total));
        }
        Ok(Self {
            distance,
            age,
            interest,
            lifestyle,
            pace,
            response,
        })
    }

    /// Weights emphasizing interests and lifestyle
    pub fn proximity_focused() -> Self {
        Self {
            distance: 0.35,
            age: 0.10,
            interest: 0.15,
            lifestyle: 0.20,
            pace: 0.10,
            response: 0.10,
        }
    }

    /// Weights prioritizing lifestyle alignment
    pub fn lifestyle_focused() -> Self {
        Self {
            distance: 0.10,
            age: 0.10,
            interest: 0.20,
            lifestyle: 0.35,
            pace: 0.10,
            response: 0.15,
        }
    }
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            distance: 0.15,
            age: 0.10,
            interest: 0.25,
            lifestyle: 0.25,
            pace: 0.10,
            response: 0.15,
        }
    }
}

/// Computed quality of a match, from one user's perspective
///
/// Scores may differ slightly between the two perspectives (distance and
/// age preferences are directional). Not persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuality {
    pub match_id: String,
    /// Whose perspective the directional metrics use
    pub perspective_user: Uuid,
    pub other_user: Uuid,
    pub computed_at: DateTime<Utc>,

    // Sub-scores, each 0.0-1.0
    pub distance_score: f64,
    pub age_score: f64,
    pub interest_score: f64,
    pub lifestyle_score: f64,
    pub pace_score: f64,
    /// How quickly the mutual like happened
    pub response_score: f64,

    // Raw supporting facts
    pub distance_km: f64,
    pub age_difference: u32,
    pub shared_interests: Vec<String>,
    pub lifestyle_matches: Vec<String>,
    pub time_between_likes: Duration,

    // Aggregates
    pub pace_sync_level: String,
    /// 0-100
    pub compatibility_score: u8,
    pub highlights: Vec<String>,
}

impl MatchQuality {
    /// Validates score bounds, returning the value unchanged when sound
    pub fn validated(self) -> Result<Self, DomainError> {
        let scores = [
            ("distance_score", self.distance_score),
            ("age_score", self.age_score),
            ("interest_score", self.interest_score),
            ("lifestyle_score", self.lifestyle_score),
            ("pace_score", self.pace_score),
            ("response_score", self.response_score),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::ScoreOutOfRange { name, value });
            }
        }
        if self.compatibility_score > 100 {
            return Err(DomainError::CompatibilityOutOfRange(self.compatibility_score));
        }
        Ok(self)
    }

    /// Star rating, 1-5, derived from the compatibility score
    pub fn star_rating(&self) -> u8 {
        match self.compatibility_score {
            90..=100 => 5,
            75..=89 => 4,
            60..=74 => 3,
            40..=59 => 2,
            _ => 1,
        }
    }

    pub fn compatibility_label(&self) -> &'static str {
        match self.compatibility_score {
            90..=100 => "Excellent Match",
            75..=89 => "Great Match",
            60..=74 => "Good Match",
            40..=59 => "Fair Match",
            _ => "Low Compatibility",
        }
    }

    /// Star icons for display
    pub fn star_display(&self) -> String {
        "⭐".repeat(self.star_rating() as usize)
    }

    /// Short line for list views: first highlight, truncated, or the label
    pub fn short_summary(&self) -> String {
        match self.highlights.first() {
            Some(first) if first.chars().count() > 40 => {
                let head: String = first.chars().take(37).collect();
                format!("{}...", head)
            }
            Some(first) => first.clone(),
            None => self.compatibility_label().to_string(),
        }
    }
}
