//! Horizontal packing policy.
//!
//! The layout engine decides which events share a row and who nests under
//! whom; a [`PackingStrategy`] turns that structure into widths and offsets.
//! All values are percentages of the column width.

use serde::{Deserialize, Serialize};

/// Horizontal extent of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub width: f64,
    pub x_offset: f64,
}

impl Placement {
    pub const FULL: Self = Self {
        width: 100.0,
        x_offset: 0.0,
    };
}

/// Computes widths and offsets for top-level runs and nested child groups.
pub trait PackingStrategy {
    /// Member `position` of a top-level sibling run of `len` events.
    fn top_level(&self, len: usize, position: usize) -> Placement;

    /// The only member of child group `group_index` (0-based).
    fn lone_child(&self, group_index: usize) -> Placement;

    /// Member `position` of child group `group_index` with `len > 1`
    /// members, nested under an event placed at `parent`.
    fn child(
        &self,
        parent: Placement,
        group_index: usize,
        len: usize,
        position: usize,
    ) -> Placement;
}

/// Fixed-indent packing.
///
/// Top-level runs split the column evenly. Each child group is pushed right
/// by `group_indent` per nesting step and shares what is left of its
/// parent's width, minus `base_indent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndentPacking {
    /// Offset added per child group number. Default: 3.
    pub group_indent: f64,

    /// Margin taken out of a shared child group's width. Default: 3.
    pub base_indent: f64,

    /// How far members of a top-level run grow into their right-hand
    /// neighbour, as a fraction of their own width. Default: 0 (no overlap).
    pub overlap_multiplier: f64,
}

impl Default for IndentPacking {
    fn default() -> Self {
        Self {
            group_indent: 3.0,
            base_indent: 3.0,
            overlap_multiplier: 0.0,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
impl PackingStrategy for IndentPacking {
    fn top_level(&self, len: usize, position: usize) -> Placement {
        if len <= 1 {
            return Placement::FULL;
        }
        let width = 100.0 / len as f64;
        let x_offset = width * position as f64;
        let grown = width + width * self.overlap_multiplier;
        Placement {
            width: grown.min(100.0 - x_offset),
            x_offset,
        }
    }

    fn lone_child(&self, group_index: usize) -> Placement {
        let x_offset = self.group_indent * (group_index + 1) as f64;
        Placement {
            width: 100.0 - x_offset,
            x_offset,
        }
    }

    fn child(
        &self,
        parent: Placement,
        group_index: usize,
        len: usize,
        position: usize,
    ) -> Placement {
        let columns = len as f64;
        let width = (parent.width - self.group_indent * group_index as f64) / columns
            - self.base_indent / columns;
        Placement {
            width,
            x_offset: parent.x_offset
                + width * position as f64
                + self.group_indent * (group_index + 1) as f64,
        }
    }
}
