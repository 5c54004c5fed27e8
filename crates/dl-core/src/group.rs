//! Sibling/child classification and cluster discovery.
//!
//! Works on events already in layout order, addressed by their position in
//! that order. Two events are siblings when their projected starts are less
//! than [`SIBLING_THRESHOLD_MINUTES`] apart. An event is a child of an
//! earlier one when it is not its sibling and starts before the earlier one
//! ends.
//!
//! All scans move a cursor forward and hand back where they stopped, so a
//! caller never shares a loop counter with the helpers.

/// Maximum start distance (exclusive) for two events to count as siblings.
pub const SIBLING_THRESHOLD_MINUTES: i64 = 30;

/// Projected start and end slots of events in layout order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations {
    starts: Vec<Option<i64>>,
    ends: Vec<Option<i64>>,
}

/// Result of a forward scan: the matching indices and the first index past
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub matches: Vec<usize>,
    pub next: usize,
}

/// Child groups found under an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildGroups {
    /// Each group is a run of siblings, in layout order.
    pub groups: Vec<Vec<usize>>,
    /// Size of the largest group.
    pub max_columns: usize,
    /// First index after the last group.
    pub next: usize,
}

/// An anchor, its sibling run, and every group nested under them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub anchor: usize,
    pub siblings: Vec<usize>,
    pub child_groups: Vec<Vec<usize>>,
    pub child_columns: usize,
}

impl Cluster {
    /// The anchor followed by its siblings.
    pub fn top_level(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.anchor).chain(self.siblings.iter().copied())
    }

    /// Number of events the cluster consumes.
    pub fn len(&self) -> usize {
        1 + self.siblings.len() + self.child_groups.iter().map(Vec::len).sum::<usize>()
    }

    /// Always false: a cluster holds at least its anchor.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Relations {
    /// Builds relations from slot pairs in layout order.
    pub fn new(slots: impl IntoIterator<Item = (Option<i64>, Option<i64>)>) -> Self {
        let (starts, ends) = slots.into_iter().unzip();
        Self { starts, ends }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn start(&self, idx: usize) -> Option<i64> {
        self.starts.get(idx).copied().flatten()
    }

    pub fn end(&self, idx: usize) -> Option<i64> {
        self.ends.get(idx).copied().flatten()
    }

    /// True when both events exist and start less than the threshold apart.
    pub fn is_sibling(&self, a: usize, b: usize) -> bool {
        match (self.start(a), self.start(b)) {
            (Some(a), Some(b)) => (a - b).abs() < SIBLING_THRESHOLD_MINUTES,
            _ => false,
        }
    }

    /// True when `child` starts inside `parent` without being its sibling.
    pub fn is_child(&self, parent: usize, child: usize) -> bool {
        if self.is_sibling(parent, child) {
            return false;
        }
        match (self.end(parent), self.start(child)) {
            (Some(end), Some(start)) => end > start,
            _ => false,
        }
    }

    /// The run of consecutive siblings of `anchor` starting at `from`.
    fn sibling_run(&self, anchor: usize, from: usize) -> Scan {
        let mut next = from;
        let mut matches = Vec::new();
        while self.is_sibling(anchor, next) {
            matches.push(next);
            next += 1;
        }
        Scan { matches, next }
    }

    /// Siblings of `anchor` directly following it.
    pub fn siblings(&self, anchor: usize) -> Scan {
        self.sibling_run(anchor, anchor + 1)
    }

    /// Groups nested under `anchor`, scanning from `from`.
    ///
    /// Each group starts with a child of `anchor` and continues with that
    /// child's own sibling run.
    pub fn child_groups(&self, anchor: usize, from: usize) -> ChildGroups {
        let mut cursor = from;
        let mut groups = Vec::new();
        let mut max_columns = 0;
        while self.is_child(anchor, cursor) {
            let run = self.sibling_run(cursor, cursor + 1);
            let mut group = Vec::with_capacity(run.matches.len() + 1);
            group.push(cursor);
            group.extend(run.matches);
            max_columns = max_columns.max(group.len());
            groups.push(group);
            cursor = run.next;
        }
        ChildGroups {
            groups,
            max_columns,
            next: cursor,
        }
    }

    /// The cluster anchored at `anchor`.
    pub fn cluster(&self, anchor: usize) -> Cluster {
        let siblings = self.siblings(anchor);
        let children = self.child_groups(anchor, siblings.next);
        Cluster {
            anchor,
            siblings: siblings.matches,
            child_groups: children.groups,
            child_columns: children.max_columns,
        }
    }

    /// The top-level event a child group hangs from.
    ///
    /// Starts at the anchor and moves along the sibling run for as long as
    /// the next sibling also contains the group head, so the group ends up
    /// under the latest sibling that still contains it.
    pub fn resolve_parent(&self, cluster: &Cluster, group_head: usize) -> usize {
        let mut parent = cluster.anchor;
        for &sibling in &cluster.siblings {
            if !self.is_child(sibling, group_head) {
                break;
            }
            parent = sibling;
        }
        parent
    }
}
