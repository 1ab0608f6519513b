//! Evaluates a seeker's dealbreakers against a candidate.
//!
//! Missing candidate fields fail the lifestyle checks. This encourages
//! profile completion and is the safer default. Height is the exception:
//! a candidate who never recorded a height still passes a height
//! dealbreaker, and the age-difference check is skipped when either age
//! is undeterminable.

use chrono::NaiveDate;

use crate::models::Profile;

/// Check if a candidate passes all of the seeker's dealbreakers
///
/// A seeker with no active dealbreaker accepts everyone. The check is
/// one-way: the candidate's own dealbreakers are not consulted.
pub fn passes(seeker: &Profile, candidate: &Profile, today: NaiveDate) -> bool {
    let db = &seeker.dealbreakers;

    if !db.has_any() {
        return true;
    }

    passes_smoking(seeker, candidate)
        && passes_drinking(seeker, candidate)
        && passes_kids_stance(seeker, candidate)
        && passes_looking_for(seeker, candidate)
        && passes_education(seeker, candidate)
        && passes_height(seeker, candidate)
        && passes_age_difference(seeker, candidate, today)
}

/// List which dealbreakers a candidate fails, for UI and debugging
///
/// Enumerates every failing dimension, not just the first.
pub fn failed_dealbreakers(seeker: &Profile, candidate: &Profile, today: NaiveDate) -> Vec<String> {
    let db = &seeker.dealbreakers;
    let mut failures = Vec::new();

    if db.has_smoking() {
        match candidate.smoking {
            None => failures.push("Smoking status not specified".to_string()),
            Some(s) if !db.acceptable_smoking().contains(&s) => {
                failures.push(format!("Smoking: {}", s.display_name()));
            }
            Some(_) => {}
        }
    }

    if db.has_drinking() {
        match candidate.drinking {
            None => failures.push("Drinking status not specified".to_string()),
            Some(d) if !db.acceptable_drinking().contains(&d) => {
                failures.push(format!("Drinking: {}", d.display_name()));
            }
            Some(_) => {}
        }
    }

    if db.has_kids_stance() {
        match candidate.wants_kids {
            None => failures.push("Kids stance not specified".to_string()),
            Some(k) if !db.acceptable_kids_stance().contains(&k) => {
                failures.push(format!("Kids: {}", k.display_name()));
            }
            Some(_) => {}
        }
    }

    if db.has_looking_for() {
        match candidate.looking_for {
            None => failures.push("Relationship goal not specified".to_string()),
            Some(lf) if !db.acceptable_looking_for().contains(&lf) => {
                failures.push(format!("Looking for: {}", lf.display_name()));
            }
            Some(_) => {}
        }
    }

    if db.has_education() {
        match candidate.education {
            None => failures.push("Education not specified".to_string()),
            Some(e) if !db.acceptable_education().contains(&e) => {
                failures.push(format!("Education: {}", e.display_name()));
            }
            Some(_) => {}
        }
    }

    // Height: unset candidate height is not a failure
    if db.has_height() {
        if let Some(height) = candidate.height_cm {
            if let Some(min) = db.min_height_cm() {
                if height < min {
                    failures.push(format!("Height too short: {} cm", height));
                }
            }
            if let Some(max) = db.max_height_cm() {
                if height > max {
                    failures.push(format!("Height too tall: {} cm", height));
                }
            }
        }
    }

    if let Some(cap) = db.age_difference_cap() {
        let seeker_age = seeker.age_on(today);
        let candidate_age = candidate.age_on(today);
        if seeker_age > 0 && candidate_age > 0 {
            let gap = seeker_age.abs_diff(candidate_age);
            if gap > u32::from(cap) {
                failures.push(format!("Age difference: {} years (max: {})", gap, cap));
            }
        }
    }

    failures
}

fn passes_smoking(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_smoking() {
        return true;
    }
    candidate
        .smoking
        .is_some_and(|s| db.acceptable_smoking().contains(&s))
}

fn passes_drinking(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_drinking() {
        return true;
    }
    candidate
        .drinking
        .is_some_and(|d| db.acceptable_drinking().contains(&d))
}

fn passes_kids_stance(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_kids_stance() {
        return true;
    }
    candidate
        .wants_kids
        .is_some_and(|k| db.acceptable_kids_stance().contains(&k))
}

fn passes_looking_for(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_looking_for() {
        return true;
    }
    candidate
        .looking_for
        .is_some_and(|lf| db.acceptable_looking_for().contains(&lf))
}

fn passes_education(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_education() {
        return true;
    }
    candidate
        .education
        .is_some_and(|e| db.acceptable_education().contains(&e))
}

fn passes_height(seeker: &Profile, candidate: &Profile) -> bool {
    let db = &seeker.dealbreakers;
    if !db.has_height() {
        return true;
    }
    // Height is optional; don't exclude people who haven't entered it
    let Some(height) = candidate.height_cm else {
        return true;
    };
    if db.min_height_cm().is_some_and(|min| height < min) {
        return false;
    }
    db.max_height_cm().map_or(true, |max| height <= max)
}

fn passes_age_difference(seeker: &Profile, candidate: &Profile, today: NaiveDate) -> bool {
    let db = &seeker.dealbreakers;
    let Some(cap) = db.age_difference_cap() else {
        return true;
    };
    let seeker_age = seeker.age_on(today);
    let candidate_age = candidate.age_on(today);
    // Skipped, not failed, when either age is unknown
    if seeker_age == 0 || candidate_age == 0 {
        return true;
    }
    seeker_age.abs_diff(candidate_age) <= u32::from(cap)
}
