use thiserror::Error;

/// Errors raised when constructing domain values with invalid data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("swipe source and target must differ")]
    SelfSwipe,

    #[error("a match requires two distinct users")]
    SelfMatch,

    #[error("min height {0} cm is implausibly low")]
    MinHeightTooLow(u16),

    #[error("max height {0} cm is implausibly high")]
    MaxHeightTooHigh(u16),

    #[error("min height {min} cm exceeds max height {max} cm")]
    HeightBoundsInverted { min: u16, max: u16 },

    #[error("quality weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("quality weight {name} is negative: {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("{name} must be within 0.0..=1.0, got {value}")]
    ScoreOutOfRange { name: &'static str, value: f64 },

    #[error("compatibility score must be 0-100, got {0}")]
    CompatibilityOutOfRange(u8),
}

/// Errors surfaced by storage collaborators
///
/// The core treats storage as a synchronous, fallible dependency. Backends
/// wrap their own failures in `Backend`; `NotFound` covers lookups that the
/// caller expected to succeed.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
