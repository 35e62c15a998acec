// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Chain storage and size aggregation

use super::solver::{self, Item, Placements, Slot};
use super::{ChainId, Error};
use crate::dir::Direction;
use crate::geom::UNLIMITED;
use crate::{WidgetId, Widgets};
use log::{trace, warn};

/// Variant tag of a chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// Fixed bounds, no content
    Spacing,
    /// A single widget
    Widget,
    /// Members laid end-to-end
    Serial,
    /// Members laid on top of each other
    Parallel,
}

/// A member edge: the stretch belongs to the edge, not to the member
#[derive(Clone, Copy, Debug)]
struct Member {
    chain: ChainId,
    stretch: u32,
}

/// A chain overlaying members `from..=to` of a serial chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Branch {
    chain: ChainId,
    from: usize,
    to: usize,
}

/// Cached bounds of a composite chain
#[derive(Clone, Copy, Debug)]
struct Bounds {
    min: i32,
    max: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: 0,
            max: UNLIMITED,
        }
    }
}

#[derive(Clone, Debug)]
enum Node {
    Spacing {
        min: i32,
        max: i32,
    },
    Widget(WidgetId),
    Serial {
        members: Vec<Member>,
        branches: Vec<Branch>,
        bounds: Bounds,
    },
    Parallel {
        members: Vec<Member>,
        bounds: Bounds,
    },
}

#[derive(Clone, Debug)]
struct Entry {
    dir: Direction,
    parent: Option<ChainId>,
    name: Option<String>,
    node: Node,
}

/// Arena of chains
///
/// Chains are created detached and referenced by [`ChainId`]. Composition
/// attaches a chain to exactly one parent (as a member or as a branch).
/// Detached chains are ignored by layout passes.
///
/// Widget leaves query their bounds from [`Widgets`] on every use. Composite
/// chains cache their bounds in [`ChainTree::recalc`], which must run before
/// [`ChainTree::distribute`].
#[derive(Clone, Debug, Default)]
pub struct ChainTree {
    entries: Vec<Entry>,
    warn_on_overflow: bool,
}

fn fail<T>(err: Error) -> Result<T, Error> {
    warn!("layout configuration error: {err}");
    Err(err)
}

impl ChainTree {
    /// Construct an empty tree
    pub fn new() -> Self {
        ChainTree::default()
    }

    /// Whether to log serial chains given less than their minimum size
    pub fn set_warn_on_overflow(&mut self, warn: bool) {
        self.warn_on_overflow = warn;
    }

    fn push(&mut self, dir: Direction, node: Node) -> ChainId {
        let id = ChainId::new(self.entries.len());
        self.entries.push(Entry {
            dir,
            parent: None,
            name: None,
            node,
        });
        id
    }

    /// Create an empty serial chain
    pub fn new_serial(&mut self, dir: Direction) -> ChainId {
        self.push(dir, Node::Serial {
            members: vec![],
            branches: vec![],
            bounds: Bounds::default(),
        })
    }

    /// Create an empty parallel chain
    pub fn new_parallel(&mut self, dir: Direction) -> ChainId {
        self.push(dir, Node::Parallel {
            members: vec![],
            bounds: Bounds::default(),
        })
    }

    /// Create a spacing chain
    ///
    /// `max` is raised to `min` if smaller; negative values are treated as zero.
    pub fn new_spacing(&mut self, dir: Direction, min: i32, max: i32) -> ChainId {
        let min = min.max(0);
        let max = max.max(min);
        self.push(dir, Node::Spacing { min, max })
    }

    /// Create a widget leaf
    pub fn new_widget(&mut self, dir: Direction, w: WidgetId) -> ChainId {
        self.push(dir, Node::Widget(w))
    }

    fn entry(&self, id: ChainId) -> Result<&Entry, Error> {
        match self.entries.get(id.index()) {
            Some(entry) => Ok(entry),
            None => fail(Error::InvalidChain(id)),
        }
    }

    /// Number of chains ever created
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no chain was created
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variant of a chain
    pub fn kind(&self, id: ChainId) -> Option<ChainKind> {
        self.entries.get(id.index()).map(|e| match e.node {
            Node::Spacing { .. } => ChainKind::Spacing,
            Node::Widget(_) => ChainKind::Widget,
            Node::Serial { .. } => ChainKind::Serial,
            Node::Parallel { .. } => ChainKind::Parallel,
        })
    }

    /// Direction of a chain
    pub fn direction(&self, id: ChainId) -> Option<Direction> {
        self.entries.get(id.index()).map(|e| e.dir)
    }

    /// Parent of a chain, if attached
    pub fn parent(&self, id: ChainId) -> Option<ChainId> {
        self.entries.get(id.index()).and_then(|e| e.parent)
    }

    /// Members of a composite chain (empty for leaves and invalid ids)
    pub fn members(&self, id: ChainId) -> impl Iterator<Item = ChainId> + '_ {
        self.member_slice(id).iter().map(|m| m.chain)
    }

    fn member_slice(&self, id: ChainId) -> &[Member] {
        match self.entries.get(id.index()).map(|e| &e.node) {
            Some(Node::Serial { members, .. }) | Some(Node::Parallel { members, .. }) => members,
            _ => &[],
        }
    }

    fn branch_slice(&self, id: ChainId) -> &[Branch] {
        match self.entries.get(id.index()).map(|e| &e.node) {
            Some(Node::Serial { branches, .. }) => branches,
            _ => &[],
        }
    }

    /// Name a chain, for diagnostics
    pub fn set_name(&mut self, id: ChainId, name: impl Into<String>) -> Result<(), Error> {
        match self.entries.get_mut(id.index()) {
            Some(entry) => {
                entry.name = Some(name.into());
                Ok(())
            }
            None => fail(Error::InvalidChain(id)),
        }
    }

    /// Name of a chain, if set
    pub fn name(&self, id: ChainId) -> Option<&str> {
        self.entries.get(id.index()).and_then(|e| e.name.as_deref())
    }

    fn describe(&self, id: ChainId) -> String {
        match self.name(id) {
            Some(name) => format!("{name} ({id})"),
            None => id.to_string(),
        }
    }

    /// True if `id` is `ancestor` or lies below it
    fn is_within(&self, mut id: ChainId, ancestor: ChainId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Check that [`ChainTree::append`] of `member` to `dest` would succeed
    pub(crate) fn check_attach(&self, dest: ChainId, member: ChainId) -> Result<(), Error> {
        let d = self.entry(dest)?;
        let m = self.entry(member)?;
        if !d.dir.same_axis(m.dir) {
            return fail(Error::AxisMismatch {
                dest,
                dest_dir: d.dir,
                member,
                member_dir: m.dir,
            });
        }
        if m.parent.is_some() {
            return fail(Error::AlreadyAttached(member));
        }
        if self.is_within(dest, member) {
            return fail(Error::Cycle { dest, member });
        }
        Ok(())
    }

    /// Append `member` to `dest` with the given `stretch`
    ///
    /// `dest` must be a serial or parallel chain on the same axis as `member`,
    /// and `member` must be detached.
    pub fn append(&mut self, dest: ChainId, member: ChainId, stretch: u32) -> Result<(), Error> {
        self.check_attach(dest, member)?;
        match &mut self.entries[dest.index()].node {
            Node::Serial { members, .. } | Node::Parallel { members, .. } => {
                members.push(Member {
                    chain: member,
                    stretch,
                });
            }
            _ => return fail(Error::NotComposite(dest)),
        }
        self.entries[member.index()].parent = Some(dest);
        Ok(())
    }

    /// Attach `branch` to serial chain `dest`, spanning members `from..=to`
    pub fn add_branch(
        &mut self,
        dest: ChainId,
        branch: ChainId,
        from: usize,
        to: usize,
    ) -> Result<(), Error> {
        self.check_attach(dest, branch)?;
        match &mut self.entries[dest.index()].node {
            Node::Serial {
                members, branches, ..
            } => {
                let len = members.len();
                if from > to || to >= len {
                    return fail(Error::InvalidBranch { from, to, len });
                }
                branches.push(Branch {
                    chain: branch,
                    from,
                    to,
                });
            }
            _ => return fail(Error::NotSerial(dest)),
        }
        self.entries[branch.index()].parent = Some(dest);
        Ok(())
    }

    /// Set the stretch of `id` as a member of its parent
    pub fn set_stretch(&mut self, id: ChainId, stretch: u32) -> Result<(), Error> {
        let parent = match self.entry(id)?.parent {
            Some(p) => p,
            None => return fail(Error::NotInLayout(id)),
        };
        match &mut self.entries[parent.index()].node {
            Node::Serial { members, .. } | Node::Parallel { members, .. } => {
                if let Some(m) = members.iter_mut().find(|m| m.chain == id) {
                    m.stretch = stretch;
                    return Ok(());
                }
            }
            _ => (),
        }
        // attached as a branch
        fail(Error::NotInLayout(id))
    }

    /// Stretch of `id` as a member of its parent
    pub fn stretch(&self, id: ChainId) -> Option<u32> {
        let parent = self.parent(id)?;
        self.member_slice(parent)
            .iter()
            .find(|m| m.chain == id)
            .map(|m| m.stretch)
    }

    /// Detach every widget leaf referring to `w`
    ///
    /// Surrounding spacing is left in place. Branch ranges of serial parents
    /// are shifted to keep referring to the same members; a branch spanning
    /// only the removed member is detached too.
    ///
    /// Returns the number of leaves detached.
    pub fn remove_widget(&mut self, w: WidgetId) -> usize {
        let leaves: Vec<ChainId> = (0..self.entries.len())
            .map(ChainId::new)
            .filter(|id| {
                let e = &self.entries[id.index()];
                e.parent.is_some() && matches!(e.node, Node::Widget(x) if x == w)
            })
            .collect();

        for &leaf in &leaves {
            let Some(parent) = self.entries[leaf.index()].parent.take() else {
                continue;
            };
            let mut dropped = vec![];
            match &mut self.entries[parent.index()].node {
                Node::Serial {
                    members, branches, ..
                } => {
                    if let Some(k) = members.iter().position(|m| m.chain == leaf) {
                        members.remove(k);
                        branches.retain_mut(|b| {
                            if b.from == k && b.to == k {
                                dropped.push(b.chain);
                                return false;
                            }
                            if b.from > k {
                                b.from -= 1;
                            }
                            if b.to >= k {
                                b.to -= 1;
                            }
                            true
                        });
                    } else {
                        branches.retain(|b| b.chain != leaf);
                    }
                }
                Node::Parallel { members, .. } => members.retain(|m| m.chain != leaf),
                _ => (),
            }
            for chain in dropped {
                self.entries[chain.index()].parent = None;
            }
        }
        leaves.len()
    }

    /// Recompute cached bounds of `id` and everything below it
    ///
    /// Children (and branches) are recalculated first. Branches do not
    /// contribute to the bounds of their serial chain.
    pub fn recalc<W: Widgets + ?Sized>(&mut self, id: ChainId, widgets: &W) {
        for i in 0..self.member_slice(id).len() {
            let child = self.member_slice(id)[i].chain;
            self.recalc(child, widgets);
        }
        for i in 0..self.branch_slice(id).len() {
            let branch = self.branch_slice(id)[i].chain;
            self.recalc(branch, widgets);
        }

        let Some(entry) = self.entries.get(id.index()) else {
            return;
        };
        let computed = match &entry.node {
            Node::Serial { members, .. } => {
                let mut b = Bounds { min: 0, max: 0 };
                for m in members {
                    let (min, max) = self.bounds(m.chain, widgets);
                    b.min = b.min.saturating_add(min);
                    b.max = b.max.saturating_add(max);
                }
                b
            }
            Node::Parallel { members, .. } => {
                let mut b = Bounds::default();
                for m in members {
                    let (min, max) = self.bounds(m.chain, widgets);
                    b.min = b.min.max(min);
                    b.max = b.max.min(max);
                }
                // conflicting constraints: the minimum wins
                b.max = b.max.max(b.min);
                b
            }
            _ => return,
        };

        match &mut self.entries[id.index()].node {
            Node::Serial { bounds, .. } | Node::Parallel { bounds, .. } => *bounds = computed,
            _ => (),
        }
    }

    /// Get `(min, max)` of a chain
    ///
    /// Composite chains report the values cached by the last
    /// [`ChainTree::recalc`]. Widget leaves are queried live; a stale widget
    /// reports `(0, UNLIMITED)`.
    pub fn bounds<W: Widgets + ?Sized>(&self, id: ChainId, widgets: &W) -> (i32, i32) {
        let Some(entry) = self.entries.get(id.index()) else {
            return (0, UNLIMITED);
        };
        match entry.node {
            Node::Spacing { min, max } => (min, max),
            Node::Widget(w) => {
                let min = widgets
                    .min_size(w)
                    .map(|s| s.extract(entry.dir).max(0))
                    .unwrap_or(0);
                let max = widgets
                    .max_size(w)
                    .map(|s| s.extract(entry.dir))
                    .unwrap_or(UNLIMITED);
                (min, max.max(min))
            }
            Node::Serial { bounds, .. } | Node::Parallel { bounds, .. } => (bounds.min, bounds.max),
        }
    }

    /// Get the minimum size of a chain (see [`ChainTree::bounds`])
    #[inline]
    pub fn min_size<W: Widgets + ?Sized>(&self, id: ChainId, widgets: &W) -> i32 {
        self.bounds(id, widgets).0
    }

    /// Get the maximum size of a chain (see [`ChainTree::bounds`])
    #[inline]
    pub fn max_size<W: Widgets + ?Sized>(&self, id: ChainId, widgets: &W) -> i32 {
        self.bounds(id, widgets).1
    }

    /// Assign `(origin, space)` to `id`, recursively placing all widget leaves
    ///
    /// Results are written to `out`, keyed by widget, on this chain's axis.
    pub fn distribute<W: Widgets + ?Sized>(
        &self,
        id: ChainId,
        origin: i32,
        space: i32,
        widgets: &W,
        out: &mut Placements,
    ) {
        let Some(entry) = self.entries.get(id.index()) else {
            return;
        };
        match &entry.node {
            Node::Spacing { .. } => (),
            Node::Widget(w) => out.set(*w, entry.dir, origin, space),
            Node::Parallel { members, .. } => {
                for m in members {
                    self.distribute(m.chain, origin, space, widgets, out);
                }
            }
            Node::Serial {
                members,
                branches,
                bounds,
            } => {
                if space < bounds.min && self.warn_on_overflow {
                    warn!(
                        "serial chain {}: need {} but only {} available",
                        self.describe(id),
                        bounds.min,
                        space
                    );
                }

                let items: Vec<Item> = members
                    .iter()
                    .map(|m| {
                        let (min, max) = self.bounds(m.chain, widgets);
                        Item::new(min, max, m.stretch)
                    })
                    .collect();
                let mut slots = solver::solve_serial(&items, origin, space);
                if entry.dir.is_reversed() {
                    for slot in &mut slots {
                        *slot = slot.mirrored(origin, space);
                    }
                }
                trace!("distribute {}: {:?}", self.describe(id), slots);

                for (m, slot) in members.iter().zip(slots.iter()) {
                    self.distribute(m.chain, slot.pos, slot.len, widgets, out);
                }

                for b in branches {
                    if b.from > b.to || b.to >= slots.len() {
                        warn!(
                            "serial chain {}: skipping branch {} with range {}..={}",
                            self.describe(id),
                            b.chain,
                            b.from,
                            b.to
                        );
                        continue;
                    }
                    let (first, last) = (slots[b.from], slots[b.to]);
                    // after mirroring `last` may lie before `first`
                    let pos = first.pos.min(last.pos);
                    let end = first.end().max(last.end());
                    let span = Slot { pos, len: end - pos };
                    self.distribute(b.chain, span.pos, span.len, widgets, out);
                }
            }
        }
    }
}
