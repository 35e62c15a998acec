// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry manager

use log::{debug, trace};

use super::{ChainId, ChainTree, Error, Placements};
use crate::config::Config;
use crate::dir::Direction;
use crate::geom::{Rect, Size, UNLIMITED};
use crate::{Action, Container, Event, WidgetId};

/// Geometry manager of one container
///
/// Owns every chain created through it, including two parallel roots: the
/// X chain ([`Manager::x_chain`]) and the Y chain ([`Manager::y_chain`]).
/// Chains must be attached (directly or indirectly) to a root to take part in
/// layout.
///
/// Typical use:
///
/// 1.  Build chains (usually via [`super::BoxLayout`] or
///     [`super::GridLayout`]) and attach them to the roots
/// 2.  Call [`Manager::activate`] to compute the container's bounds and place
///     widgets
/// 3.  Forward container notifications to [`Manager::handle_event`] and call
///     [`Manager::flush`] when the event queue is empty
#[derive(Clone, Debug)]
pub struct Manager {
    tree: ChainTree,
    x_root: ChainId,
    y_root: ChainId,
    border: i32,
    menu_bar: Option<WidgetId>,
    menu_bar_height: i32,
    frozen: bool,
    pending: Action,
    config: Config,
}

impl Default for Manager {
    fn default() -> Self {
        Manager::new()
    }
}

impl Manager {
    /// Construct with default [`Config`]
    pub fn new() -> Self {
        Manager::with_config(Config::default())
    }

    /// Construct
    pub fn with_config(config: Config) -> Self {
        let mut tree = ChainTree::new();
        tree.set_warn_on_overflow(config.warn_on_overflow);
        let x_root = tree.new_parallel(Direction::LeftToRight);
        let y_root = tree.new_parallel(Direction::Down);
        Manager {
            tree,
            x_root,
            y_root,
            border: config.default_border.max(0),
            menu_bar: None,
            menu_bar_height: 0,
            frozen: false,
            pending: Action::empty(),
            config,
        }
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the chains
    #[inline]
    pub fn tree(&self) -> &ChainTree {
        &self.tree
    }

    /// The horizontal root chain
    #[inline]
    pub fn x_chain(&self) -> ChainId {
        self.x_root
    }

    /// The vertical root chain
    #[inline]
    pub fn y_chain(&self) -> ChainId {
        self.y_root
    }

    /// Create an empty serial chain
    pub fn new_serial_chain(&mut self, dir: Direction) -> ChainId {
        self.tree.new_serial(dir)
    }

    /// Create an empty parallel chain
    pub fn new_parallel_chain(&mut self, dir: Direction) -> ChainId {
        self.tree.new_parallel(dir)
    }

    /// Append chain `member` to `dest`
    ///
    /// `dest` must be serial or parallel and on the same axis as `member`.
    /// `stretch` applies to `member` within `dest`.
    #[inline]
    pub fn add_chain_to_chain(
        &mut self,
        dest: ChainId,
        member: ChainId,
        stretch: u32,
    ) -> Result<(), Error> {
        self.tree.append(dest, member, stretch)
    }

    /// Append a leaf for widget `w` to `chain`
    ///
    /// The leaf takes the direction of `chain`. Returns the new leaf.
    pub fn add_widget(
        &mut self,
        chain: ChainId,
        w: WidgetId,
        stretch: u32,
    ) -> Result<ChainId, Error> {
        let dir = self.direction_of(chain)?;
        let leaf = self.tree.new_widget(dir, w);
        self.tree.append(chain, leaf, stretch)?;
        Ok(leaf)
    }

    /// Append spacing of bounds `(min, max)` to `chain`
    ///
    /// Use [`UNLIMITED`] for an unbounded maximum. Returns the new chain.
    pub fn add_spacing(
        &mut self,
        chain: ChainId,
        min: i32,
        stretch: u32,
        max: i32,
    ) -> Result<ChainId, Error> {
        let dir = self.direction_of(chain)?;
        let spacing = self.tree.new_spacing(dir, min, max);
        self.tree.append(chain, spacing, stretch)?;
        Ok(spacing)
    }

    /// Attach `branch` to the serial chain `dest` over members `from..=to`
    #[inline]
    pub fn add_branch(
        &mut self,
        dest: ChainId,
        branch: ChainId,
        from: usize,
        to: usize,
    ) -> Result<(), Error> {
        self.tree.add_branch(dest, branch, from, to)
    }

    /// Set the stretch of `chain` within its parent
    #[inline]
    pub fn set_stretch(&mut self, chain: ChainId, stretch: u32) -> Result<(), Error> {
        self.tree.set_stretch(chain, stretch)
    }

    /// Name a chain, for diagnostics
    #[inline]
    pub fn set_name(&mut self, chain: ChainId, name: impl Into<String>) -> Result<(), Error> {
        self.tree.set_name(chain, name)
    }

    fn direction_of(&self, chain: ChainId) -> Result<Direction, Error> {
        self.tree.direction(chain).ok_or_else(|| {
            let err = Error::InvalidChain(chain);
            log::warn!("layout configuration error: {err}");
            err
        })
    }

    /// Get `(min, max)` of `chain`, as of the last recalculation
    #[inline]
    pub fn bounds<C: Container + ?Sized>(&self, chain: ChainId, host: &C) -> (i32, i32) {
        self.tree.bounds(chain, host)
    }

    /// Get the minimum size of `chain`
    #[inline]
    pub fn min_size<C: Container + ?Sized>(&self, chain: ChainId, host: &C) -> i32 {
        self.tree.min_size(chain, host)
    }

    /// Get the maximum size of `chain`
    #[inline]
    pub fn max_size<C: Container + ?Sized>(&self, chain: ChainId, host: &C) -> i32 {
        self.tree.max_size(chain, host)
    }

    /// Set the inset applied on all edges of the container
    ///
    /// Schedules [`Action::ACTIVATE`].
    pub fn set_border(&mut self, border: i32) {
        self.border = border.max(0);
        self.pending |= Action::ACTIVATE;
    }

    /// Get the border
    #[inline]
    pub fn border(&self) -> i32 {
        self.border
    }

    /// Set a menu bar widget
    ///
    /// The menu bar is placed across the top of the container and its height
    /// is subtracted from the vertical content area. Schedules
    /// [`Action::ACTIVATE`].
    pub fn set_menu_bar(&mut self, w: Option<WidgetId>) {
        self.menu_bar = w;
        self.pending |= Action::ACTIVATE;
    }

    /// Get the menu bar widget
    #[inline]
    pub fn menu_bar(&self) -> Option<WidgetId> {
        self.menu_bar
    }

    /// True if frozen (see [`Manager::freeze`])
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Work scheduled for the next [`Manager::flush`]
    #[inline]
    pub fn pending(&self) -> Action {
        self.pending
    }

    /// Schedule work for the next [`Manager::flush`]
    #[inline]
    pub fn schedule(&mut self, action: Action) {
        self.pending |= action;
    }

    /// Recalculate bounds and lay out
    ///
    /// Sets the container's minimum and maximum sizes from the root chains
    /// (plus border and menu bar), then calls [`Manager::resize_all`].
    ///
    /// Does nothing and returns `false` if frozen.
    pub fn activate<C: Container + ?Sized>(&mut self, host: &mut C) -> bool {
        if self.frozen {
            debug!("activate: frozen; ignoring");
            return false;
        }
        self.pending.remove(Action::ACTIVATE);
        self.update_menu_bar_height(&*host);

        self.tree.recalc(self.y_root, &*host);
        self.tree.recalc(self.x_root, &*host);
        let (x_min, x_max) = self.tree.bounds(self.x_root, &*host);
        let (y_min, y_max) = self.tree.bounds(self.y_root, &*host);

        let b2 = self.border.saturating_mul(2);
        let extra = Size(b2, b2.saturating_add(self.menu_bar_height));
        let clamp = |v: i32| v.clamp(1, UNLIMITED);
        let min = Size(
            clamp(x_min.saturating_add(extra.0)),
            clamp(y_min.saturating_add(extra.1)),
        );
        let max = Size(
            clamp(x_max.saturating_add(extra.0)),
            clamp(y_max.saturating_add(extra.1)),
        );
        debug!("activate: min={min:?}, max={max:?}");
        host.set_minimum_size(min);
        host.set_maximum_size(max);

        self.resize_all(host);
        true
    }

    /// Lay out within the container's current size
    ///
    /// The container is first resized into its bounds if necessary. Every
    /// placed widget receives exactly one geometry commit.
    pub fn resize_all<C: Container + ?Sized>(&mut self, host: &mut C) {
        let start = std::time::Instant::now();
        self.pending.remove(Action::RESIZE);

        let dh = self.update_menu_bar_height(&*host);
        if dh != 0 {
            let mut min = host.minimum_size();
            min.1 = min.1.saturating_add(dh).max(1);
            host.set_minimum_size(min);
            let mut max = host.maximum_size();
            if max.1 < UNLIMITED {
                max.1 = max.1.saturating_add(dh).max(min.1);
                host.set_maximum_size(max);
            }
        }

        let size = host.size().clamp(host.minimum_size(), host.maximum_size());
        if size != host.size() {
            host.resize(size);
        }

        let b = self.border;
        let b2 = b.saturating_mul(2);
        let mbh = self.menu_bar_height;
        let mut placements = Placements::default();
        self.tree.distribute(
            self.x_root,
            b,
            size.0.saturating_sub(b2).max(0),
            &*host,
            &mut placements,
        );
        self.tree.distribute(
            self.y_root,
            mbh.saturating_add(b),
            size.1.saturating_sub(b2).saturating_sub(mbh).max(0),
            &*host,
            &mut placements,
        );

        if let Some(bar) = self.menu_bar {
            host.set_geometry(bar, Rect::from_xywh(0, 0, size.0, mbh));
        }
        for (w, placement) in placements.iter() {
            if Some(w) == self.menu_bar {
                continue;
            }
            // stale widgets are skipped
            if let Some(rect) = host.geometry(w) {
                let rect = placement.apply(rect);
                trace!("resize_all: {w} -> {rect:?}");
                host.set_geometry(w, rect);
            }
        }

        trace!(target: "geomgr_perf", "layout::resize_all: {}μs", start.elapsed().as_micros());
    }

    /// Re-measure the menu bar at the current width
    ///
    /// The height is zero without a menu bar. Returns the change in height.
    fn update_menu_bar_height<C: Container + ?Sized>(&mut self, host: &C) -> i32 {
        let h = match self.menu_bar {
            Some(bar) => host.height_for_width(bar, host.size().0).unwrap_or(0).max(0),
            None => 0,
        };
        let dh = h - self.menu_bar_height;
        self.menu_bar_height = h;
        dh
    }

    /// Fix the container at `size`
    ///
    /// Bounds are recalculated, `size` is clamped into them and the container
    /// bounds are then set to exactly this size. Later calls to
    /// [`Manager::activate`] do nothing until [`Manager::unfreeze`].
    pub fn freeze<C: Container + ?Sized>(&mut self, host: &mut C, size: Size) {
        self.frozen = false;
        self.activate(host);
        let size = size.clamp(host.minimum_size(), host.maximum_size());
        debug!("freeze: size={size:?}");
        host.set_minimum_size(size);
        host.set_maximum_size(size);
        host.resize(size);
        self.resize_all(host);
        self.frozen = true;
    }

    /// Fix the container at its minimum size
    #[inline]
    pub fn freeze_at_minimum<C: Container + ?Sized>(&mut self, host: &mut C) {
        self.freeze(host, Size::ZERO);
    }

    /// Undo [`Manager::freeze`]
    ///
    /// Schedules [`Action::ACTIVATE`].
    pub fn unfreeze(&mut self) {
        debug!("unfreeze");
        self.frozen = false;
        self.pending |= Action::ACTIVATE;
    }

    /// Remove all leaves referring to `w` from both axes
    ///
    /// Spacing around the widget is kept. Returns true if anything was
    /// removed.
    pub fn remove(&mut self, w: WidgetId) -> bool {
        if self.menu_bar == Some(w) {
            self.menu_bar = None;
        }
        let n = self.tree.remove_widget(w);
        debug!("remove: {w}: {n} leaves");
        n > 0
    }

    /// React to a container notification
    ///
    /// A resize is handled immediately. Removal and layout hints only
    /// schedule [`Action::ACTIVATE`]; call [`Manager::flush`] once the burst
    /// of notifications is over.
    pub fn handle_event<C: Container + ?Sized>(&mut self, host: &mut C, event: Event) {
        match event {
            Event::Resized(_) => self.resize_all(host),
            Event::ChildRemoved(w) => {
                self.remove(w);
                self.pending |= Action::ACTIVATE;
            }
            Event::LayoutHint => self.pending |= Action::ACTIVATE,
        }
    }

    /// Perform scheduled work
    ///
    /// When frozen, a scheduled activation degrades to a resize.
    /// Returns true if a layout pass ran.
    pub fn flush<C: Container + ?Sized>(&mut self, host: &mut C) -> bool {
        let pending = std::mem::take(&mut self.pending);
        if pending.contains(Action::ACTIVATE) && self.activate(host) {
            return true;
        }
        if pending.intersects(Action::ACTIVATE | Action::RESIZE) {
            self.resize_all(host);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::headless::HeadlessContainer;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn row(gm: &mut Manager, host: &mut HeadlessContainer, widgets: &[(Size, Size, u32)]) -> Vec<WidgetId> {
        let ser = gm.new_serial_chain(Direction::LeftToRight);
        let par = gm.new_parallel_chain(Direction::Down);
        gm.add_chain_to_chain(gm.x_chain(), ser, 0).unwrap();
        gm.add_chain_to_chain(gm.y_chain(), par, 0).unwrap();
        widgets
            .iter()
            .map(|&(min, max, stretch)| {
                let w = host.add_child(min, max);
                gm.add_widget(ser, w, stretch).unwrap();
                gm.add_widget(par, w, 0).unwrap();
                w
            })
            .collect()
    }

    #[test]
    fn activate_sets_bounds_and_places() {
        let mut host = HeadlessContainer::new(Size(100, 50));
        let mut gm = Manager::new();
        gm.set_border(2);
        let ws = row(&mut gm, &mut host, &[
            (Size(10, 5), Size(100, 100), 1),
            (Size(20, 10), Size(100, 30), 1),
        ]);
        assert!(gm.activate(&mut host));
        assert_eq!(host.minimum_size(), Size(34, 14));
        assert_eq!(host.maximum_size(), Size(204, 34));
        // clamped into max height
        assert_eq!(host.size(), Size(100, 34));
        assert_eq!(host.rect(ws[0]), Rect::from_xywh(2, 2, 43, 30));
        assert_eq!(host.rect(ws[1]), Rect::from_xywh(45, 2, 53, 30));
        assert_eq!(host.commit_count(ws[0]), 1);
        assert_eq!(host.take_events(), vec![Event::Resized(Size(100, 34))]);
    }

    #[test]
    fn empty_manager_bounds() {
        let mut host = HeadlessContainer::new(Size(10, 10));
        let mut gm = Manager::new();
        assert!(gm.activate(&mut host));
        assert_eq!(host.minimum_size(), Size(1, 1));
        assert_eq!(host.maximum_size(), Size::UNLIMITED);
    }

    #[test]
    fn freeze_blocks_activate() {
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        row(&mut gm, &mut host, &[(Size(30, 20), Size::UNLIMITED, 0)]);
        gm.freeze(&mut host, Size(10, 60));
        assert!(gm.is_frozen());
        assert_eq!(host.size(), Size(30, 60));
        assert_eq!(host.minimum_size(), Size(30, 60));
        assert_eq!(host.maximum_size(), Size(30, 60));
        assert!(!gm.activate(&mut host));
        gm.unfreeze();
        assert_eq!(gm.pending(), Action::ACTIVATE);
        assert!(gm.flush(&mut host));
        assert_eq!(host.maximum_size(), Size::UNLIMITED);
    }

    #[test]
    fn menu_bar_takes_top() {
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        let ws = row(&mut gm, &mut host, &[(Size(10, 10), Size::UNLIMITED, 0)]);
        let bar = host.add_child(Size(0, 12), Size(UNLIMITED, 12));
        gm.set_menu_bar(Some(bar));
        assert!(gm.flush(&mut host));
        assert_eq!(host.rect(bar), Rect::from_xywh(0, 0, 100, 12));
        assert_eq!(host.rect(ws[0]), Rect::from_xywh(0, 12, 100, 88));
        assert_eq!(host.minimum_size(), Size(10, 22));
        // the menu bar height is already accounted for when re-activating
        gm.activate(&mut host);
        assert_eq!(host.minimum_size(), Size(10, 22));
    }

    #[test]
    fn menu_bar_detach_restores_bounds() {
        init();
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        let ws = row(&mut gm, &mut host, &[(Size(10, 10), Size::UNLIMITED, 0)]);
        let bar = host.add_child(Size(0, 12), Size(UNLIMITED, 12));
        gm.set_menu_bar(Some(bar));
        gm.flush(&mut host);
        assert_eq!(host.minimum_size(), Size(10, 22));

        gm.set_menu_bar(None);
        assert!(gm.flush(&mut host));
        assert_eq!(host.minimum_size(), Size(10, 10));
        assert_eq!(host.rect(ws[0]), Rect::from_xywh(0, 0, 100, 100));
    }

    #[test]
    fn destroyed_menu_bar_is_forgotten() {
        init();
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        let ws = row(&mut gm, &mut host, &[(Size(10, 10), Size::UNLIMITED, 0)]);
        let bar = host.add_child(Size(0, 12), Size(UNLIMITED, 12));
        gm.set_menu_bar(Some(bar));
        gm.flush(&mut host);
        host.take_events();

        host.destroy_child(bar);
        for event in host.take_events() {
            gm.handle_event(&mut host, event);
        }
        assert!(gm.flush(&mut host));
        assert_eq!(gm.menu_bar(), None);
        assert_eq!(host.minimum_size(), Size(10, 10));
        assert_eq!(host.rect(ws[0]), Rect::from_xywh(0, 0, 100, 100));
    }

    #[test]
    fn frozen_menu_bar_detach_adjusts_bounds() {
        init();
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        row(&mut gm, &mut host, &[(Size(10, 10), Size::UNLIMITED, 0)]);
        let bar = host.add_child(Size(0, 12), Size(UNLIMITED, 12));
        gm.set_menu_bar(Some(bar));
        gm.freeze_at_minimum(&mut host);
        assert_eq!(host.minimum_size(), Size(10, 22));

        gm.set_menu_bar(None);
        assert!(gm.flush(&mut host));
        assert_eq!(host.minimum_size(), Size(10, 10));
        assert_eq!(host.maximum_size(), Size(10, 10));
    }

    #[test]
    fn huge_border_saturates() {
        init();
        let mut host = HeadlessContainer::new(Size(100, 100));
        let mut gm = Manager::new();
        row(&mut gm, &mut host, &[(Size(10, 10), Size::UNLIMITED, 0)]);
        gm.set_border(UNLIMITED - 1);
        assert!(gm.flush(&mut host));
        assert_eq!(host.minimum_size(), Size(UNLIMITED, UNLIMITED));
        assert_eq!(host.size(), Size(UNLIMITED, UNLIMITED));
    }

    #[test]
    fn names_appear_in_tree() {
        init();
        let mut gm = Manager::new();
        let toolbar = gm.new_serial_chain(Direction::LeftToRight);
        gm.set_name(toolbar, "toolbar").unwrap();
        assert_eq!(gm.tree().name(toolbar), Some("toolbar"));
        assert_eq!(gm.tree().name(gm.x_chain()), None);
        let bogus = ChainId::new(1000);
        assert_eq!(gm.set_name(bogus, "x"), Err(Error::InvalidChain(bogus)));
    }

    #[test]
    fn child_removal_is_deferred() {
        let mut host = HeadlessContainer::new(Size(100, 20));
        let mut gm = Manager::new();
        let ws = row(&mut gm, &mut host, &[
            (Size(10, 10), Size::UNLIMITED, 1),
            (Size(10, 10), Size::UNLIMITED, 1),
        ]);
        gm.activate(&mut host);
        host.take_events();
        host.destroy_child(ws[0]);
        for event in host.take_events() {
            gm.handle_event(&mut host, event);
        }
        assert_eq!(gm.pending(), Action::ACTIVATE);
        assert_eq!(host.rect(ws[1]), Rect::from_xywh(50, 0, 50, 20));
        assert!(gm.flush(&mut host));
        assert_eq!(host.rect(ws[1]), Rect::from_xywh(0, 0, 100, 20));
        assert!(!gm.flush(&mut host));
    }

    #[test]
    fn invalid_chain_is_reported() {
        init();
        let mut gm = Manager::new();
        let bogus = ChainId::new(1000);
        assert_eq!(
            gm.add_widget(bogus, WidgetId::new(0), 0),
            Err(Error::InvalidChain(bogus))
        );
        assert_eq!(
            gm.add_spacing(bogus, 1, 0, 1),
            Err(Error::InvalidChain(bogus))
        );
    }
}
