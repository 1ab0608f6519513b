use std::collections::HashSet;
use std::sync::Arc;

use chrono::FixedOffset;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::dealbreakers;
use crate::core::distance::{
    calculate_bounding_box, distance_between, is_within_bounding_box, BoundingBox,
};
use crate::models::Profile;
use crate::time::{today_in, Clock};

/// Finds candidate profiles for a seeker
///
/// A pure filter/sort pipeline over in-memory profiles: callers fetch the
/// active pool and the exclusion set from storage and pass them in, so the
/// finder itself performs no queries and holds no mutable state. The clock
/// and timezone exist only to derive ages for the age filters.
#[derive(Clone)]
pub struct CandidateFinder {
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl CandidateFinder {
    pub fn new(clock: Arc<dyn Clock>, timezone: FixedOffset) -> Self {
        Self { clock, timezone }
    }

    /// Finds candidates for the seeker from a list of active profiles.
    ///
    /// Filter stages, all of which must pass:
    /// 1. not the seeker themselves
    /// 2. profile state is active
    /// 3. not already interacted with (`excluded`)
    /// 4. mutual gender interest, both ways
    /// 5. mutual age-range fit, both ways
    /// 6. within the seeker's distance preference
    /// 7. passes the seeker's dealbreakers
    ///
    /// Missing gender, interest, or age data fails a pair (stages 4-5 are
    /// fail-closed); a missing location on either side skips stage 6.
    /// Results are sorted by distance, closest first; pairs with no
    /// measurable distance sort last, keeping their input order.
    pub fn find_candidates(
        &self,
        seeker: &Profile,
        all_active: Vec<Profile>,
        excluded: &HashSet<Uuid>,
    ) -> Vec<Profile> {
        let today = today_in(self.clock.now(), self.timezone);
        let pool_size = all_active.len();
        debug!(
            seeker = %seeker.id,
            pool = pool_size,
            excluded = excluded.len(),
            "finding candidates"
        );

        // Cheap geospatial pre-cut before the exact Haversine check
        let bbox = seeker
            .has_location()
            .then(|| calculate_bounding_box(seeker.lat, seeker.lon, f64::from(seeker.max_distance_km)));

        let mut scored: Vec<(Profile, f64)> = all_active
            .into_iter()
            .filter(|c| c.id != seeker.id)
            .filter(|c| {
                let active = c.is_active();
                if !active {
                    debug!(candidate = %c.id, state = ?c.state, "rejected: not active");
                }
                active
            })
            .filter(|c| {
                let fresh = !excluded.contains(&c.id);
                if !fresh {
                    debug!(candidate = %c.id, "rejected: already interacted");
                }
                fresh
            })
            .filter(|c| {
                let ok = mutual_gender_interest(seeker, c);
                if !ok {
                    debug!(candidate = %c.id, "rejected: gender mismatch");
                }
                ok
            })
            .filter(|c| {
                let ok = mutual_age_fit(seeker, c, today);
                if !ok {
                    debug!(candidate = %c.id, "rejected: age mismatch");
                }
                ok
            })
            .filter(|c| within_bbox(c, bbox.as_ref()))
            .filter(|c| {
                let ok = within_distance(seeker, c);
                if !ok {
                    debug!(candidate = %c.id, max_km = seeker.max_distance_km, "rejected: too far");
                }
                ok
            })
            .filter(|c| {
                let ok = dealbreakers::passes(seeker, c, today);
                if !ok {
                    debug!(candidate = %c.id, "rejected: dealbreaker hit");
                }
                ok
            })
            .map(|c| {
                let d = distance_between(seeker, &c).unwrap_or(f64::MAX);
                (c, d)
            })
            .collect();

        // Stable sort keeps input order as the tie-break
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let candidates: Vec<Profile> = scored.into_iter().map(|(c, _)| c).collect();
        info!(
            seeker = %seeker.id,
            found = candidates.len(),
            pool = pool_size,
            "candidate search complete"
        );
        candidates
    }
}

/// Both ways: seeker wants candidate's gender and vice versa.
/// Unset gender or an empty interest set on either side fails the pair.
fn mutual_gender_interest(seeker: &Profile, candidate: &Profile) -> bool {
    let (Some(seeker_gender), Some(candidate_gender)) = (seeker.gender, candidate.gender) else {
        return false;
    };
    if seeker.interested_in.is_empty() || candidate.interested_in.is_empty() {
        return false;
    }
    seeker.interested_in.contains(&candidate_gender)
        && candidate.interested_in.contains(&seeker_gender)
}

/// Both ways: each age within the other's preferred range.
/// An undeterminable age (no birth date) fails the pair.
fn mutual_age_fit(seeker: &Profile, candidate: &Profile, today: chrono::NaiveDate) -> bool {
    let seeker_age = seeker.age_on(today);
    let candidate_age = candidate.age_on(today);
    if seeker_age == 0 || candidate_age == 0 {
        return false;
    }
    candidate_age >= seeker.min_age
        && candidate_age <= seeker.max_age
        && seeker_age >= candidate.min_age
        && seeker_age <= candidate.max_age
}

fn within_bbox(candidate: &Profile, bbox: Option<&BoundingBox>) -> bool {
    match bbox {
        Some(b) if candidate.has_location() => is_within_bounding_box(candidate.lat, candidate.lon, b),
        _ => true,
    }
}

/// Within the seeker's max distance; passes when unmeasurable
fn within_distance(seeker: &Profile, candidate: &Profile) -> bool {
    match distance_between(seeker, candidate) {
        Some(d) => d <= f64::from(seeker.max_distance_km),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, ProfileState};
    use crate::time::ManualClock;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn finder() -> CandidateFinder {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        CandidateFinder::new(Arc::new(clock), chrono::Offset::fix(&Utc))
    }

    fn active_profile(name: &str, gender: Gender, birth_year: i32, lat: f64, lon: f64) -> Profile {
        let mut p = Profile::new(
            Uuid::new_v4(),
            name,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        p.state = ProfileState::Active;
        p.gender = Some(gender);
        p.interested_in = [Gender::Male, Gender::Female, Gender::Other].into_iter().collect();
        p.birth_date = NaiveDate::from_ymd_opt(birth_year, 3, 10);
        p.lat = lat;
        p.lon = lon;
        p
    }

    #[test]
    fn test_excludes_self_and_inactive() {
        let seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);
        let mut paused = active_profile("paused", Gender::Male, 1994, 52.52, 13.41);
        paused.state = ProfileState::Paused;
        let ok = active_profile("ok", Gender::Male, 1994, 52.52, 13.41);

        let pool = vec![seeker.clone(), paused, ok.clone()];
        let result = finder().find_candidates(&seeker, pool, &HashSet::new());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, ok.id);
    }

    #[test]
    fn test_excluded_ids_are_cut() {
        let seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);
        let liked = active_profile("liked", Gender::Male, 1994, 52.52, 13.41);
        let fresh = active_profile("fresh", Gender::Male, 1994, 52.52, 13.42);

        let excluded: HashSet<Uuid> = [liked.id].into_iter().collect();
        let result = finder().find_candidates(&seeker, vec![liked, fresh.clone()], &excluded);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, fresh.id);
    }

    #[test]
    fn test_gender_interest_is_fail_closed() {
        let seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);

        let mut no_gender = active_profile("no-gender", Gender::Male, 1994, 52.52, 13.41);
        no_gender.gender = None;

        let mut no_interests = active_profile("no-interests", Gender::Male, 1994, 52.52, 13.41);
        no_interests.interested_in.clear();

        let mut uninterested = active_profile("uninterested", Gender::Male, 1994, 52.52, 13.41);
        uninterested.interested_in = [Gender::Male].into_iter().collect();

        let pool = vec![no_gender, no_interests, uninterested];
        assert!(finder().find_candidates(&seeker, pool, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_age_fit_is_mutual_and_fail_closed() {
        let mut seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);
        seeker.min_age = 25;
        seeker.max_age = 35;

        // No birth date: pair fails
        let mut unknown_age = active_profile("unknown", Gender::Male, 1994, 52.52, 13.41);
        unknown_age.birth_date = None;

        // 20 years old: outside seeker's range
        let too_young = active_profile("young", Gender::Male, 2004, 52.52, 13.41);

        // In range, but seeker falls outside the candidate's range
        let mut picky = active_profile("picky", Gender::Male, 1994, 52.52, 13.41);
        picky.min_age = 18;
        picky.max_age = 21;

        let fits = active_profile("fits", Gender::Male, 1992, 52.52, 13.41);

        let pool = vec![unknown_age, too_young, picky, fits.clone()];
        let result = finder().find_candidates(&seeker, pool, &HashSet::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, fits.id);
    }

    #[test]
    fn test_results_sorted_by_distance() {
        let seeker = active_profile("seeker", Gender::Female, 1994, 52.5200, 13.4050);
        let far = active_profile("far", Gender::Male, 1994, 52.6500, 13.6000);
        let near = active_profile("near", Gender::Male, 1994, 52.5210, 13.4060);
        let mid = active_profile("mid", Gender::Male, 1994, 52.5500, 13.4500);

        let pool = vec![far.clone(), near.clone(), mid.clone()];
        let result = finder().find_candidates(&seeker, pool, &HashSet::new());

        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_distance_limit_applies() {
        let mut seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);
        seeker.max_distance_km = 10;

        // Roughly 90km away
        let out_of_range = active_profile("out", Gender::Male, 1994, 53.33, 13.40);
        let in_range = active_profile("in", Gender::Male, 1994, 52.53, 13.41);

        let result =
            finder().find_candidates(&seeker, vec![out_of_range, in_range.clone()], &HashSet::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, in_range.id);
    }

    #[test]
    fn test_missing_location_passes_distance_stage() {
        let seeker = active_profile("seeker", Gender::Female, 1994, 52.52, 13.40);
        let nowhere = active_profile("nowhere", Gender::Male, 1994, 0.0, 0.0);
        let near = active_profile("near", Gender::Male, 1994, 52.53, 13.41);

        let result =
            finder().find_candidates(&seeker, vec![nowhere.clone(), near.clone()], &HashSet::new());

        // Both pass; the unmeasurable pair sorts last
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, near.id);
        assert_eq!(result[1].id, nowhere.id);
    }
}
