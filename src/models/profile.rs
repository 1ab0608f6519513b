use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dealbreakers::Dealbreakers;
use super::pace::PacePreferences;

/// Gender options available for profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Lifecycle state of a profile
///
/// Valid transitions: Incomplete -> Active <-> Paused -> Banned.
/// Only `Active` profiles are matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileState {
    Incomplete,
    Active,
    Paused,
    Banned,
}

/// Smoking habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoking {
    Never,
    Sometimes,
    Regularly,
}

impl Smoking {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Sometimes => "Sometimes",
            Self::Regularly => "Regularly",
        }
    }
}

/// Drinking habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drinking {
    Never,
    Socially,
    Regularly,
}

impl Drinking {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Socially => "Socially",
            Self::Regularly => "Regularly",
        }
    }
}

/// Stance on having kids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WantsKids {
    No,
    Open,
    Someday,
    HasKids,
}

impl WantsKids {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::No => "Don't want",
            Self::Open => "Open to it",
            Self::Someday => "Want someday",
            Self::HasKids => "Have kids",
        }
    }
}

/// Relationship goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookingFor {
    Casual,
    ShortTerm,
    LongTerm,
    Marriage,
    Unsure,
}

impl LookingFor {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Casual => "Something casual",
            Self::ShortTerm => "Short-term dating",
            Self::LongTerm => "Long-term relationship",
            Self::Marriage => "Marriage",
            Self::Unsure => "Not sure yet",
        }
    }
}

/// Education level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    HighSchool,
    SomeCollege,
    Bachelors,
    Masters,
    Phd,
    TradeSchool,
    Other,
}

impl Education {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::HighSchool => "High school",
            Self::SomeCollege => "Some college",
            Self::Bachelors => "Bachelor's degree",
            Self::Masters => "Master's degree",
            Self::Phd => "PhD/Doctorate",
            Self::TradeSchool => "Trade school",
            Self::Other => "Other",
        }
    }
}

/// Profile interests, grouped loosely by theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    // Outdoors
    Hiking,
    Camping,
    Fishing,
    Cycling,
    Running,
    Climbing,
    // Arts & culture
    Movies,
    Music,
    Concerts,
    ArtGalleries,
    Theater,
    Photography,
    Reading,
    Writing,
    // Food & drink
    Cooking,
    Baking,
    Wine,
    CraftBeer,
    Coffee,
    Foodie,
    // Sports & fitness
    Gym,
    Yoga,
    Basketball,
    Soccer,
    Tennis,
    Swimming,
    Golf,
    // Games & tech
    VideoGames,
    BoardGames,
    Coding,
    Tech,
    Podcasts,
    // Social
    Travel,
    Dancing,
    Volunteering,
    Pets,
    Dogs,
    Cats,
    Nightlife,
}

impl Interest {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hiking => "Hiking",
            Self::Camping => "Camping",
            Self::Fishing => "Fishing",
            Self::Cycling => "Cycling",
            Self::Running => "Running",
            Self::Climbing => "Climbing",
            Self::Movies => "Movies",
            Self::Music => "Music",
            Self::Concerts => "Concerts",
            Self::ArtGalleries => "Art Galleries",
            Self::Theater => "Theater",
            Self::Photography => "Photography",
            Self::Reading => "Reading",
            Self::Writing => "Writing",
            Self::Cooking => "Cooking",
            Self::Baking => "Baking",
            Self::Wine => "Wine",
            Self::CraftBeer => "Craft Beer",
            Self::Coffee => "Coffee",
            Self::Foodie => "Foodie",
            Self::Gym => "Gym",
            Self::Yoga => "Yoga",
            Self::Basketball => "Basketball",
            Self::Soccer => "Soccer",
            Self::Tennis => "Tennis",
            Self::Swimming => "Swimming",
            Self::Golf => "Golf",
            Self::VideoGames => "Video Games",
            Self::BoardGames => "Board Games",
            Self::Coding => "Coding",
            Self::Tech => "Tech",
            Self::Podcasts => "Podcasts",
            Self::Travel => "Travel",
            Self::Dancing => "Dancing",
            Self::Volunteering => "Volunteering",
            Self::Pets => "Pets",
            Self::Dogs => "Dogs",
            Self::Cats => "Cats",
            Self::Nightlife => "Nightlife",
        }
    }
}

/// A user profile as the matching core reads it
///
/// Profiles are owned and mutated by the profile-management collaborator;
/// the core treats them as plain values. Edits produce a new value stamped
/// with a new modification time via [`Profile::touched`] rather than
/// mutating a shared object in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: uuid::Uuid,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub interested_in: HashSet<Gender>,
    /// 0.0/0.0 means no recorded location
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    pub max_distance_km: u32,
    pub min_age: u32,
    pub max_age: u32,
    #[serde(default)]
    pub smoking: Option<Smoking>,
    #[serde(default)]
    pub drinking: Option<Drinking>,
    #[serde(default)]
    pub wants_kids: Option<WantsKids>,
    #[serde(default)]
    pub looking_for: Option<LookingFor>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub height_cm: Option<u16>,
    #[serde(default)]
    pub interests: HashSet<Interest>,
    #[serde(default = "Dealbreakers::none")]
    pub dealbreakers: Dealbreakers,
    #[serde(default)]
    pub pace: Option<PacePreferences>,
    pub state: ProfileState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a fresh incomplete profile with default preferences
    pub fn new(id: uuid::Uuid, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            bio: None,
            birth_date: None,
            gender: None,
            interested_in: HashSet::new(),
            lat: 0.0,
            lon: 0.0,
            max_distance_km: 50,
            min_age: 18,
            max_age: 99,
            smoking: None,
            drinking: None,
            wants_kids: None,
            looking_for: None,
            education: None,
            height_cm: None,
            interests: HashSet::new(),
            dealbreakers: Dealbreakers::none(),
            pace: None,
            state: ProfileState::Incomplete,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns a copy stamped with a new modification time
    pub fn touched(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state == ProfileState::Active
    }

    /// Whether the profile has a recorded location
    pub fn has_location(&self) -> bool {
        self.lat != 0.0 || self.lon != 0.0
    }

    /// Age in whole years on the given date, or 0 when the birth date is unset
    ///
    /// Age 0 is the "undeterminable" sentinel; filters treat it as missing
    /// data rather than a valid age.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let Some(birth) = self.birth_date else {
            return 0;
        };
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}
