//! How the layout reads start and end times from caller-owned events.

use chrono::NaiveDateTime;

/// An event that knows its own time span.
///
/// Implement this for event types with typed fields; records that need
/// custom extraction (e.g. JSON objects keyed by a configured field name)
/// can build [`Accessors`] from closures instead.
pub trait TimedEvent {
    /// When the event starts, or `None` if it has no readable start.
    fn start(&self) -> Option<NaiveDateTime>;

    /// When the event ends, or `None` if it has no readable end.
    fn end(&self) -> Option<NaiveDateTime>;
}

type Accessor<'a, E> = Box<dyn Fn(&E) -> Option<NaiveDateTime> + 'a>;

/// Start and end extraction functions for events of type `E`.
pub struct Accessors<'a, E> {
    start: Accessor<'a, E>,
    end: Accessor<'a, E>,
}

impl<'a, E> Accessors<'a, E> {
    /// Builds accessors from two extraction functions.
    pub fn new<S, F>(start: S, end: F) -> Self
    where
        S: Fn(&E) -> Option<NaiveDateTime> + 'a,
        F: Fn(&E) -> Option<NaiveDateTime> + 'a,
    {
        Self {
            start: Box::new(start),
            end: Box::new(end),
        }
    }

    pub fn start(&self, event: &E) -> Option<NaiveDateTime> {
        (self.start)(event)
    }

    pub fn end(&self, event: &E) -> Option<NaiveDateTime> {
        (self.end)(event)
    }
}

impl<'a, E: TimedEvent + 'a> Accessors<'a, E> {
    /// Accessors reading through the [`TimedEvent`] implementation.
    pub fn timed() -> Self {
        Self::new(E::start, E::end)
    }
}

impl<E> std::fmt::Debug for Accessors<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}
