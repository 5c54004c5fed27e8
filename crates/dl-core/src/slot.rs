//! Projection of event times onto the visible window.
//!
//! A slot is the whole number of minutes between the window start and an
//! event time, clamped to `[0, total_minutes]`. Only the time of day is
//! considered: the event time is first moved onto the window's calendar day.
//! `None` stands in for a time that could not be read and poisons every
//! comparison and percentage it reaches.

use chrono::NaiveDateTime;

use crate::dates::{self, Unit};
use crate::error::LayoutError;

/// The visible part of a day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    min: NaiveDateTime,
    total_minutes: i64,
    step: i64,
}

impl Window {
    /// Creates a window starting at `min` and spanning `total_minutes`.
    ///
    /// `step` is the minimum slot granularity; every event is drawn at least
    /// one step tall.
    pub const fn new(min: NaiveDateTime, total_minutes: i64, step: i64) -> Result<Self, LayoutError> {
        if total_minutes <= 0 {
            return Err(LayoutError::EmptyWindow { total_minutes });
        }
        if step < 0 {
            return Err(LayoutError::NegativeStep { step });
        }
        Ok(Self {
            min,
            total_minutes,
            step,
        })
    }

    /// Datetime whose time of day marks slot zero.
    pub const fn min(&self) -> NaiveDateTime {
        self.min
    }

    pub const fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Projects `date` onto this window.
    pub fn project(&self, date: Option<NaiveDateTime>) -> Option<i64> {
        Some(project_slot(date?, self.min, self.total_minutes))
    }

    /// Vertical placement in percent for an event spanning the given slots.
    ///
    /// The end slot is raised to at least `start + step`, so zero-length and
    /// inverted events still get a visible height.
    #[allow(clippy::cast_precision_loss)]
    pub fn vertical(&self, start: Option<i64>, end: Option<i64>) -> (f64, f64) {
        let Some(start) = start else {
            return (f64::NAN, f64::NAN);
        };
        let total = self.total_minutes as f64;
        let top = start as f64 / total * 100.0;
        let height = end.map_or(f64::NAN, |end| {
            let end = end.max(start.saturating_add(self.step));
            (end - start) as f64 / total * 100.0
        });
        (top, height)
    }
}

/// Projects `date` onto a window starting at `min` and `total_minutes` long.
pub fn project_slot(date: NaiveDateTime, min: NaiveDateTime, total_minutes: i64) -> i64 {
    let merged = dates::merge(min.date(), date.time());
    if dates::lt(merged, min, Unit::Minute) {
        return 0;
    }
    dates::diff(min, merged, Unit::Minute).min(total_minutes)
}
