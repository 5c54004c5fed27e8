//! Errors raised while setting up a layout.
//!
//! The layout pipeline itself never fails: missing or malformed event times
//! degrade into `NaN` styles. Only the inputs describing the visible window
//! are validated up front.

use thiserror::Error;

/// Validation errors for layout inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The visible window has no extent, so percentages are undefined.
    #[error("total minutes must be positive, got {total_minutes}")]
    EmptyWindow { total_minutes: i64 },

    /// The minimum slot granularity was negative.
    #[error("step must not be negative, got {step}")]
    NegativeStep { step: i64 },

    /// A time-of-day string did not match `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day: {value} (expected HH:MM or HH:MM:SS)")]
    InvalidTimeOfDay { value: String },
}
