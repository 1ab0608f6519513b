use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::profile::{Drinking, Education, LookingFor, Smoking, WantsKids};

/// Plausible recorded heights; bounds outside this range are input errors
const MIN_PLAUSIBLE_HEIGHT_CM: u16 = 100;
const MAX_PLAUSIBLE_HEIGHT_CM: u16 = 250;

/// A seeker's hard filters
///
/// Dealbreakers are one-way: they control who the seeker sees, never how
/// the seeker appears to others. An empty acceptable-value set means "no
/// constraint" for that dimension. Values are built with the fluent
/// methods; the height setter is the only fallible one, so an invalid
/// range can never be constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dealbreakers {
    acceptable_smoking: HashSet<Smoking>,
    acceptable_drinking: HashSet<Drinking>,
    acceptable_kids_stance: HashSet<WantsKids>,
    acceptable_looking_for: HashSet<LookingFor>,
    acceptable_education: HashSet<Education>,
    min_height_cm: Option<u16>,
    max_height_cm: Option<u16>,
    max_age_difference: Option<u8>,
}

impl Dealbreakers {
    /// No dealbreakers; accepts everyone
    pub fn none() -> Self {
        Self::default()
    }

    pub fn accept_smoking(mut self, values: impl IntoIterator<Item = Smoking>) -> Self {
        self.acceptable_smoking.extend(values);
        self
    }

    pub fn accept_drinking(mut self, values: impl IntoIterator<Item = Drinking>) -> Self {
        self.acceptable_drinking.extend(values);
        self
    }

    pub fn accept_kids_stance(mut self, values: impl IntoIterator<Item = WantsKids>) -> Self {
        self.acceptable_kids_stance.extend(values);
        self
    }

    pub fn accept_looking_for(mut self, values: impl IntoIterator<Item = LookingFor>) -> Self {
        self.acceptable_looking_for.extend(values);
        self
    }

    pub fn require_education(mut self, values: impl IntoIterator<Item = Education>) -> Self {
        self.acceptable_education.extend(values);
        self
    }

    /// Sets the acceptable height range; either bound may be open
    pub fn height_range(
        mut self,
        min_cm: Option<u16>,
        max_cm: Option<u16>,
    ) -> Result<Self, DomainError> {
        if let Some(min) = min_cm {
            if min < MIN_PLAUSIBLE_HEIGHT_CM {
                return Err(DomainError::MinHeightTooLow(min));
            }
        }
        if let Some(max) = max_cm {
            if max > MAX_PLAUSIBLE_HEIGHT_CM {
                return Err(DomainError::MaxHeightTooHigh(max));
            }
        }
        if let (Some(min), Some(max)) = (min_cm, max_cm) {
            if min > max {
                return Err(DomainError::HeightBoundsInverted { min, max });
            }
        }
        self.min_height_cm = min_cm;
        self.max_height_cm = max_cm;
        Ok(self)
    }

    /// Caps the age gap, stricter than the ordinary age-range preference
    pub fn max_age_difference(mut self, years: u8) -> Self {
        self.max_age_difference = Some(years);
        self
    }

    pub fn acceptable_smoking(&self) -> &HashSet<Smoking> {
        &self.acceptable_smoking
    }

    pub fn acceptable_drinking(&self) -> &HashSet<Drinking> {
        &self.acceptable_drinking
    }

    pub fn acceptable_kids_stance(&self) -> &HashSet<WantsKids> {
        &self.acceptable_kids_stance
    }

    pub fn acceptable_looking_for(&self) -> &HashSet<LookingFor> {
        &self.acceptable_looking_for
    }

    pub fn acceptable_education(&self) -> &HashSet<Education> {
        &self.acceptable_education
    }

    pub fn min_height_cm(&self) -> Option<u16> {
        self.min_height_cm
    }

    pub fn max_height_cm(&self) -> Option<u16> {
        self.max_height_cm
    }

    pub fn age_difference_cap(&self) -> Option<u8> {
        self.max_age_difference
    }

    pub fn has_smoking(&self) -> bool {
        !self.acceptable_smoking.is_empty()
    }

    pub fn has_drinking(&self) -> bool {
        !self.acceptable_drinking.is_empty()
    }

    pub fn has_kids_stance(&self) -> bool {
        !self.acceptable_kids_stance.is_empty()
    }

    pub fn has_looking_for(&self) -> bool {
        !self.acceptable_looking_for.is_empty()
    }

    pub fn has_education(&self) -> bool {
        !self.acceptable_education.is_empty()
    }

    pub fn has_height(&self) -> bool {
        self.min_height_cm.is_some() || self.max_height_cm.is_some()
    }

    pub fn has_age_difference(&self) -> bool {
        self.max_age_difference.is_some()
    }

    /// Whether any dealbreaker dimension is active
    pub fn has_any(&self) -> bool {
        self.has_smoking()
            || self.has_drinking()
            || self.has_kids_stance()
            || self.has_looking_for()
            || self.has_education()
            || self.has_height()
            || self.has_age_difference()
    }
}
