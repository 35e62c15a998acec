// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Row / column builder

use super::align::add_aligned_widget;
use super::{Align, ChainId, Error, Layout, Manager};
use crate::dir::Direction;
use crate::geom::UNLIMITED;
use crate::WidgetId;

/// A row or column of items
///
/// Holds a serial chain along `direction` and a parallel chain across it.
/// Items are appended to the serial chain; each item's cross-axis chain joins
/// the parallel chain, so the box is as thick as its thickest item.
///
/// Unless the spacing is zero, a fixed spacing element is inserted before
/// each widget or nested layout other than the first.
#[derive(Clone, Debug)]
pub struct BoxLayout {
    direction: Direction,
    serial: ChainId,
    parallel: ChainId,
    spacing: i32,
    pristine: bool,
}

impl BoxLayout {
    /// Construct, with spacing from the manager's config
    ///
    /// The new layout is detached; use [`Layout::bind`] to make it the
    /// top-level layout or add it to another layout.
    pub fn new(gm: &mut Manager, direction: Direction) -> Self {
        let spacing = gm.config().default_spacing;
        BoxLayout::with_spacing(gm, direction, spacing)
    }

    /// Construct with explicit spacing between items
    pub fn with_spacing(gm: &mut Manager, direction: Direction, spacing: i32) -> Self {
        let serial = gm.new_serial_chain(direction);
        let parallel = gm.new_parallel_chain(perpendicular(direction));
        BoxLayout {
            direction,
            serial,
            parallel,
            spacing: spacing.max(0),
            pristine: true,
        }
    }

    /// Construct and bind as the top-level layout of `gm`
    pub fn top_level(gm: &mut Manager, direction: Direction) -> Result<Self, Error> {
        let layout = BoxLayout::new(gm, direction);
        layout.bind(gm)?;
        Ok(layout)
    }

    /// Direction of the main axis
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The serial chain along the main axis
    #[inline]
    pub fn serial_chain(&self) -> ChainId {
        self.serial
    }

    /// The parallel chain across the main axis
    #[inline]
    pub fn parallel_chain(&self) -> ChainId {
        self.parallel
    }

    fn separate(&mut self, gm: &mut Manager) -> Result<(), Error> {
        if !self.pristine && self.spacing > 0 {
            gm.add_spacing(self.serial, self.spacing, 0, self.spacing)?;
        }
        self.pristine = false;
        Ok(())
    }

    /// Append a widget
    ///
    /// `stretch` applies along the main axis; `align` across it.
    pub fn add_widget(
        &mut self,
        gm: &mut Manager,
        w: WidgetId,
        stretch: u32,
        align: Align,
    ) -> Result<(), Error> {
        self.separate(gm)?;
        add_aligned_widget(gm, self.parallel, w, align, 0)?;
        gm.add_widget(self.serial, w, stretch).map(|_| ())
    }

    /// Append a nested layout
    ///
    /// `layout` must be detached and must not contain this box. On error
    /// nothing is changed.
    pub fn add_layout(
        &mut self,
        gm: &mut Manager,
        layout: &dyn Layout,
        stretch: u32,
    ) -> Result<(), Error> {
        let main = layout.chain_along(self.direction);
        let cross = layout.chain_along(perpendicular(self.direction));
        gm.tree().check_attach(self.serial, main)?;
        gm.tree().check_attach(self.parallel, cross)?;
        self.separate(gm)?;
        gm.add_chain_to_chain(self.serial, main, stretch)?;
        gm.add_chain_to_chain(self.parallel, cross, 0)
    }

    /// Append fixed spacing along the main axis
    pub fn add_spacing(&mut self, gm: &mut Manager, size: i32) -> Result<(), Error> {
        gm.add_spacing(self.serial, size, 0, size).map(|_| ())
    }

    /// Append stretchable empty space along the main axis
    pub fn add_stretch(&mut self, gm: &mut Manager, stretch: u32) -> Result<(), Error> {
        gm.add_spacing(self.serial, 0, stretch, UNLIMITED).map(|_| ())
    }

    /// Require at least `size` across the main axis
    pub fn add_strut(&mut self, gm: &mut Manager, size: i32) -> Result<(), Error> {
        gm.add_spacing(self.parallel, size, 0, UNLIMITED).map(|_| ())
    }
}

/// The cross axis, always in forward direction
fn perpendicular(dir: Direction) -> Direction {
    match dir.is_horizontal() {
        true => Direction::Down,
        false => Direction::LeftToRight,
    }
}

impl Layout for BoxLayout {
    fn horizontal_chain(&self) -> ChainId {
        match self.direction.is_horizontal() {
            true => self.serial,
            false => self.parallel,
        }
    }

    fn vertical_chain(&self) -> ChainId {
        match self.direction.is_vertical() {
            true => self.serial,
            false => self.parallel,
        }
    }
}
