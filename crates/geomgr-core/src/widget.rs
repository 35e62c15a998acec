// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Interface to the widget hierarchy
//!
//! The layout engine never owns widgets. It refers to them by [`WidgetId`]
//! and reaches them through the [`Widgets`] and [`Container`] traits, which
//! the host (a window system binding, or [`crate::headless`]) implements.

use crate::geom::{Rect, Size};
use std::fmt;

/// Non-owning handle to a widget
///
/// The meaning of the index is up to the host; typically it indexes an arena
/// owned by the widget hierarchy. A handle may go stale when its widget is
/// destroyed. The engine treats stale handles as unconstrained placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u32);

impl WidgetId {
    /// Construct from a raw index
    #[inline]
    pub const fn new(index: u32) -> Self {
        WidgetId(index)
    }

    /// Get the raw index
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Access to managed widgets
///
/// Size bounds are queried live on every recalculation; nothing is cached by
/// the engine between passes.
pub trait Widgets {
    /// Minimum size of a widget, or `None` if `w` is stale
    fn min_size(&self, w: WidgetId) -> Option<Size>;

    /// Maximum size of a widget, or `None` if `w` is stale
    fn max_size(&self, w: WidgetId) -> Option<Size>;

    /// Current geometry of a widget, or `None` if `w` is stale
    fn geometry(&self, w: WidgetId) -> Option<Rect>;

    /// Commit a new geometry
    ///
    /// Called at most once per widget per layout pass. Implementations must
    /// not trigger a layout pass from within this call; post an [`Event`]
    /// instead.
    fn set_geometry(&mut self, w: WidgetId, rect: Rect);

    /// Height required by a widget given `width`
    ///
    /// Used for menu bars. The default implementation returns the widget's
    /// minimum height.
    fn height_for_width(&self, w: WidgetId, width: i32) -> Option<i32> {
        let _ = width;
        self.min_size(w).map(|size| size.1)
    }
}

/// A widget whose children are placed by a [`crate::layout::Manager`]
pub trait Container: Widgets {
    /// Current size of the container
    fn size(&self) -> Size;

    /// Resize the container
    ///
    /// Hosts typically respond by posting [`Event::Resized`].
    fn resize(&mut self, size: Size);

    /// Current minimum size of the container
    fn minimum_size(&self) -> Size;

    /// Current maximum size of the container
    fn maximum_size(&self) -> Size;

    /// Set the minimum size of the container
    fn set_minimum_size(&mut self, size: Size);

    /// Set the maximum size of the container
    fn set_maximum_size(&mut self, size: Size);
}

/// Notification from a [`Container`] to its manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The container was resized
    Resized(Size),
    /// A child widget was removed (or destroyed)
    ChildRemoved(WidgetId),
    /// A child changed its own size bounds
    LayoutHint,
}
