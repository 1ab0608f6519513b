use serde::{Deserialize, Serialize};

/// Preferred messaging cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingFrequency {
    Rarely,
    Often,
    Constantly,
}

impl MessagingFrequency {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rarely => "Rarely",
            Self::Often => "Often",
            Self::Constantly => "Constantly",
        }
    }
}

/// How soon a user wants to go on a first date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeToFirstDate {
    Quickly,
    FewDays,
    Weeks,
    Months,
}

impl TimeToFirstDate {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Quickly => "Quickly (1-2 days)",
            Self::FewDays => "A few days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
        }
    }
}

/// Preferred communication channel mix
///
/// `MixOfEverything` is the wildcard: it scores a flat moderate
/// compatibility against any value on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    TextOnly,
    VoiceNotes,
    VideoCalls,
    InPersonOnly,
    MixOfEverything,
}

impl CommunicationStyle {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::TextOnly => "Text only",
            Self::VoiceNotes => "Voice notes",
            Self::VideoCalls => "Video calls",
            Self::InPersonOnly => "In person only",
            Self::MixOfEverything => "Mix of everything",
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Self::MixOfEverything
    }
}

/// Preferred conversation depth
///
/// `DependsOnVibe` is this dimension's wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPreference {
    SmallTalk,
    DeepChat,
    Existential,
    DependsOnVibe,
}

impl DepthPreference {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::SmallTalk => "Small talk",
            Self::DeepChat => "Deep chat",
            Self::Existential => "Existential exploration",
            Self::DependsOnVibe => "Depends on the vibe",
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Self::DependsOnVibe
    }
}

/// A user's communication/dating tempo preferences
///
/// The four dimensions are configured together or not at all; a profile
/// carries `Option<PacePreferences>`, so a partially-set bundle cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacePreferences {
    pub messaging_frequency: MessagingFrequency,
    pub time_to_first_date: TimeToFirstDate,
    pub communication_style: CommunicationStyle,
    pub depth_preference: DepthPreference,
}

impl PacePreferences {
    pub fn new(
        messaging_frequency: MessagingFrequency,
        time_to_first_date: TimeToFirstDate,
        communication_style: CommunicationStyle,
        depth_preference: DepthPreference,
    ) -> Self {
        Self {
            messaging_frequency,
            time_to_first_date,
            communication_style,
            depth_preference,
        }
    }
}
