//! Deterministic ordering of events before grouping.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::event::Accessors;

/// Orders present values with `cmp`, missing values after all present ones.
fn present_first(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    cmp: impl FnOnce(NaiveDateTime, NaiveDateTime) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns the indices of `events` in layout order.
///
/// Events are ordered by start time. Among equal starts the event that ends
/// later (the longer one) comes first, so it anchors the sibling run. Events
/// without a readable start or end sort after those with one. Events equal
/// on both keys keep their input order.
pub fn sort_order<E>(events: &[E], accessors: &Accessors<'_, E>) -> Vec<usize> {
    let keys: Vec<_> = events
        .iter()
        .map(|event| (accessors.start(event), accessors.end(event)))
        .collect();

    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| {
        let (start_a, end_a) = keys[a];
        let (start_b, end_b) = keys[b];
        present_first(start_a, start_b, |x, y| x.cmp(&y))
            .then_with(|| present_first(end_a, end_b, |x, y| y.cmp(&x)))
    });
    order
}
