//! Pace compatibility scoring.
//!
//! Weighted ordinal distance across the four pace dimensions, with
//! wildcard logic on communication style and conversation depth.

use crate::models::PacePreferences;

/// Raw score below which a pair is flagged as low compatibility
pub const LOW_COMPATIBILITY_THRESHOLD: i32 = 50;

/// Flat contribution when either side holds a dimension's wildcard
const WILDCARD_SCORE: i32 = 20;

/// Sentinel for "compatibility unknown"
pub const UNKNOWN: i32 = -1;

/// Advisory shown when two users pace very differently
pub const LOW_COMPATIBILITY_WARNING: &str =
    "Your pacing styles differ significantly. Worth discussing early!";

/// Compatibility score between two pace bundles
///
/// Returns a value in 0-100, or [`UNKNOWN`] (-1) when either side has not
/// configured pace preferences. Each dimension contributes 25 for an exact
/// match, 15 for adjacent positions, and 5 otherwise; a wildcard on
/// communication style or depth contributes a flat 20.
pub fn compatibility(a: Option<&PacePreferences>, b: Option<&PacePreferences>) -> i32 {
    let (Some(a), Some(b)) = (a, b) else {
        return UNKNOWN;
    };

    let mut score = 0;

    score += dimension_score(
        a.messaging_frequency as i32,
        b.messaging_frequency as i32,
        false,
    );
    score += dimension_score(
        a.time_to_first_date as i32,
        b.time_to_first_date as i32,
        false,
    );

    let style_wildcard =
        a.communication_style.is_wildcard() || b.communication_style.is_wildcard();
    score += dimension_score(
        a.communication_style as i32,
        b.communication_style as i32,
        style_wildcard,
    );

    let depth_wildcard = a.depth_preference.is_wildcard() || b.depth_preference.is_wildcard();
    score += dimension_score(
        a.depth_preference as i32,
        b.depth_preference as i32,
        depth_wildcard,
    );

    score
}

/// Compatibility normalized to 0.0-1.0, with 0.5 standing in for unknown
pub fn normalized(a: Option<&PacePreferences>, b: Option<&PacePreferences>) -> f64 {
    let score = compatibility(a, b);
    if score == UNKNOWN {
        return 0.5;
    }
    f64::from(score) / 100.0
}

/// Whether a raw score counts as low compatibility
///
/// The unknown sentinel is not low, it is unknown.
pub fn is_low_compatibility(score: i32) -> bool {
    (0..LOW_COMPATIBILITY_THRESHOLD).contains(&score)
}

fn dimension_score(a: i32, b: i32, wildcard: bool) -> i32 {
    if wildcard {
        return WILDCARD_SCORE;
    }
    match (a - b).abs() {
        0 => 25,
        1 => 15,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommunicationStyle, DepthPreference, MessagingFrequency, TimeToFirstDate};

    fn bundle(
        mf: MessagingFrequency,
        ttfd: TimeToFirstDate,
        cs: CommunicationStyle,
        dp: DepthPreference,
    ) -> PacePreferences {
        PacePreferences::new(mf, ttfd, cs, dp)
    }

    fn baseline() -> PacePreferences {
        bundle(
            MessagingFrequency::Often,
            TimeToFirstDate::FewDays,
            CommunicationStyle::TextOnly,
            DepthPreference::DeepChat,
        )
    }

    #[test]
    fn test_identical_bundles_score_full() {
        let a = baseline();
        assert_eq!(compatibility(Some(&a), Some(&a)), 100);
    }

    #[test]
    fn test_one_ordinal_step_in_one_dimension() {
        let a = baseline();
        let mut b = baseline();
        b.messaging_frequency = MessagingFrequency::Constantly;

        let score = compatibility(Some(&a), Some(&b));
        assert_eq!(score, 90); // 15 + 25 + 25 + 25

        // Lower than identical, higher than maximally different
        let worst = bundle(
            MessagingFrequency::Rarely,
            TimeToFirstDate::Months,
            CommunicationStyle::InPersonOnly,
            DepthPreference::SmallTalk,
        );
        let far = bundle(
            MessagingFrequency::Constantly,
            TimeToFirstDate::Quickly,
            CommunicationStyle::TextOnly,
            DepthPreference::Existential,
        );
        let worst_score = compatibility(Some(&worst), Some(&far));
        assert!(score < 100);
        assert!(score > worst_score);
    }

    #[test]
    fn test_wildcard_flattens_dimension() {
        let mut a = baseline();
        a.communication_style = CommunicationStyle::MixOfEverything;
        let mut b = baseline();
        b.communication_style = CommunicationStyle::InPersonOnly;

        // 25 + 25 + 20 (wildcard) + 25
        assert_eq!(compatibility(Some(&a), Some(&b)), 95);

        // Wildcard on either side has the same effect
        assert_eq!(compatibility(Some(&b), Some(&a)), 95);
    }

    #[test]
    fn test_depth_wildcard() {
        let mut a = baseline();
        a.depth_preference = DepthPreference::DependsOnVibe;
        let b = baseline();

        assert_eq!(compatibility(Some(&a), Some(&b)), 95);
    }

    #[test]
    fn test_unknown_when_either_side_is_unset() {
        let a = baseline();
        assert_eq!(compatibility(Some(&a), None), UNKNOWN);
        assert_eq!(compatibility(None, Some(&a)), UNKNOWN);
        assert_eq!(compatibility(None, None), UNKNOWN);
    }

    #[test]
    fn test_normalized_maps_unknown_to_neutral() {
        let a = baseline();
        assert_eq!(normalized(Some(&a), None), 0.5);
        assert_eq!(normalized(Some(&a), Some(&a)), 1.0);
    }

    #[test]
    fn test_low_compatibility_flag() {
        assert!(is_low_compatibility(0));
        assert!(is_low_compatibility(49));
        assert!(!is_low_compatibility(50));
        assert!(!is_low_compatibility(100));
        assert!(!is_low_compatibility(UNKNOWN));
    }
}
