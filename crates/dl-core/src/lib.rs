//! Core layout logic for day-column calendar views.
//!
//! This crate contains:
//! - Layout: sibling/child grouping and width packing of concurrent events
//! - Slots: projection of event times onto the visible window
//! - Dates: the calendar arithmetic the layout relies on

pub mod dates;
mod error;
mod event;
pub mod group;
mod layout;
mod packing;
mod slot;
mod sort;

pub use error::LayoutError;
pub use event::{Accessors, TimedEvent};
pub use group::SIBLING_THRESHOLD_MINUTES;
pub use layout::{LayoutMeta, Style, StyledEvent, layout_events, layout_timed};
pub use packing::{IndentPacking, PackingStrategy, Placement};
pub use slot::{Window, project_slot};
pub use sort::sort_order;
