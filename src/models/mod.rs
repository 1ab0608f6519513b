// Model exports
pub mod dealbreakers;
pub mod pace;
pub mod profile;
pub mod quality;
pub mod swipe;

pub use dealbreakers::Dealbreakers;
pub use pace::{CommunicationStyle, DepthPreference, MessagingFrequency, PacePreferences, TimeToFirstDate};
pub use profile::{Drinking, Education, Gender, Interest, LookingFor, Profile, ProfileState, Smoking, WantsKids};
pub use quality::{MatchQuality, QualityWeights};
pub use swipe::{Match, Swipe, SwipeDirection};
