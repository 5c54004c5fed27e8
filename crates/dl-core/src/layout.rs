//! Day-column layout.
//!
//! Computes where each event is drawn inside a single day column. Vertical
//! placement is proportional to the event's time span inside the visible
//! [`Window`]; horizontal placement packs concurrent and nested events side
//! by side.
//!
//! # Algorithm Summary
//!
//! 1. Sort events by start, longer events first on equal starts
//! 2. Project every start and end onto the window as minute slots
//! 3. From a cursor, collect a cluster: the anchor, its sibling run, and the
//!    child groups nested under it
//! 4. Split the column between the anchor and its siblings, then place each
//!    child group under the latest sibling that still contains it
//! 5. Advance the cursor past the cluster and repeat until every event is
//!    placed
//!
//! Events are only read. Layout metadata is returned next to each event
//! instead of being written onto it.

use serde::Serialize;

use crate::event::{Accessors, TimedEvent};
use crate::group::{Cluster, Relations};
use crate::packing::{IndentPacking, PackingStrategy, Placement};
use crate::slot::Window;
use crate::sort::sort_order;

/// Where an event is drawn, in percent of the column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Style {
    pub top: f64,
    pub height: f64,
    pub width: f64,
    pub x_offset: f64,
}

impl Style {
    const fn placement(&self) -> Placement {
        Placement {
            width: self.width,
            x_offset: self.x_offset,
        }
    }
}

/// Grouping information attached to an event by the layout.
///
/// Fields stay `None` when the event is laid out alone or as the single
/// member of a child group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutMeta {
    /// Number of events sharing this event's run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlapping_count: Option<usize>,

    /// First member of its run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_start: Option<bool>,

    /// Last member of its run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_end: Option<bool>,

    /// 1-based position of the child group under its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_number: Option<usize>,
}

impl LayoutMeta {
    fn run(len: usize, position: usize, group_number: Option<usize>) -> Self {
        Self {
            overlapping_count: Some(len),
            group_start: Some(position == 0),
            group_end: Some(position + 1 == len),
            group_number,
        }
    }
}

/// An event together with its computed placement.
#[derive(Debug, PartialEq, Serialize)]
pub struct StyledEvent<'a, E> {
    pub event: &'a E,
    /// Position of the event in the caller's input.
    pub source_index: usize,
    pub style: Style,
    pub meta: LayoutMeta,
}

#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    style: Style,
    meta: LayoutMeta,
}

/// Lays out `events` in a day column.
///
/// The result is in layout order (by start, longer first on ties), one entry
/// per input event. Events whose times cannot be read get `NaN` top and
/// height and are otherwise treated as unrelated to every other event.
pub fn layout_events<'e, E, P>(
    events: &'e [E],
    accessors: &Accessors<'_, E>,
    window: &Window,
    packing: &P,
) -> Vec<StyledEvent<'e, E>>
where
    P: PackingStrategy + ?Sized,
{
    let order = sort_order(events, accessors);
    let relations = Relations::new(order.iter().map(|&i| {
        let event = &events[i];
        (
            window.project(accessors.start(event)),
            window.project(accessors.end(event)),
        )
    }));

    let mut placed = vec![Layout::default(); order.len()];
    let mut cursor = 0;
    let mut clusters = 0;
    while cursor < relations.len() {
        let cluster = relations.cluster(cursor);
        tracing::trace!(
            anchor = cluster.anchor,
            siblings = cluster.siblings.len(),
            child_groups = cluster.child_groups.len(),
            child_columns = cluster.child_columns,
            "placing cluster"
        );
        place_cluster(&relations, &cluster, window, packing, &mut placed);
        cursor += cluster.len();
        clusters += 1;
    }
    tracing::debug!(events = events.len(), clusters, "laid out day column");

    order
        .into_iter()
        .zip(placed)
        .map(|(source_index, layout)| StyledEvent {
            event: &events[source_index],
            source_index,
            style: layout.style,
            meta: layout.meta,
        })
        .collect()
}

/// Lays out events that implement [`TimedEvent`] with the default packing.
pub fn layout_timed<'e, E: TimedEvent>(
    events: &'e [E],
    window: &Window,
) -> Vec<StyledEvent<'e, E>> {
    layout_events(events, &Accessors::timed(), window, &IndentPacking::default())
}

fn style_for(relations: &Relations, window: &Window, idx: usize, placement: Placement) -> Style {
    let (top, height) = window.vertical(relations.start(idx), relations.end(idx));
    Style {
        top,
        height,
        width: placement.width,
        x_offset: placement.x_offset,
    }
}

fn place_cluster<P>(
    relations: &Relations,
    cluster: &Cluster,
    window: &Window,
    packing: &P,
    placed: &mut [Layout],
) where
    P: PackingStrategy + ?Sized,
{
    let run_len = 1 + cluster.siblings.len();
    for (position, idx) in cluster.top_level().enumerate() {
        let meta = if run_len > 1 {
            LayoutMeta::run(run_len, position, None)
        } else {
            LayoutMeta::default()
        };
        placed[idx] = Layout {
            style: style_for(relations, window, idx, packing.top_level(run_len, position)),
            meta,
        };
    }

    for (group_index, group) in cluster.child_groups.iter().enumerate() {
        let Some(&head) = group.first() else {
            continue;
        };

        if let [only] = group.as_slice() {
            placed[*only] = Layout {
                style: style_for(relations, window, *only, packing.lone_child(group_index)),
                meta: LayoutMeta::default(),
            };
            continue;
        }

        let parent = relations.resolve_parent(cluster, head);
        let parent_placement = placed[parent].style.placement();
        for (position, &idx) in group.iter().enumerate() {
            let placement = packing.child(parent_placement, group_index, group.len(), position);
            placed[idx] = Layout {
                style: style_for(relations, window, idx, placement),
                meta: LayoutMeta::run(group.len(), position, Some(group_index + 1)),
            };
        }
    }
}
