// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Headless container
//!
//! [`HeadlessContainer`] implements [`Container`] over an in-memory widget
//! arena without any window system. It records the notifications a real
//! container would deliver; the owner forwards them to the manager:
//!
//! ```
//! # use geomgr_core::headless::HeadlessContainer;
//! # use geomgr_core::layout::Manager;
//! # use geomgr_core::geom::Size;
//! let mut host = HeadlessContainer::new(Size(200, 100));
//! let mut gm = Manager::new();
//! host.resize_container(Size(300, 100));
//! for event in host.take_events() {
//!     gm.handle_event(&mut host, event);
//! }
//! gm.flush(&mut host);
//! ```

use crate::geom::{Rect, Size};
use crate::{Container, Event, WidgetId, Widgets};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
struct Child {
    min: Size,
    max: Size,
    rect: Rect,
    commits: u32,
}

/// An arena-backed [`Container`]
#[derive(Clone, Debug)]
pub struct HeadlessContainer {
    children: Vec<Option<Child>>,
    size: Size,
    min: Size,
    max: Size,
    events: VecDeque<Event>,
}

impl HeadlessContainer {
    /// Construct an empty container of the given size
    pub fn new(size: Size) -> Self {
        HeadlessContainer {
            children: Vec::new(),
            size,
            min: Size::ZERO,
            max: Size::UNLIMITED,
            events: VecDeque::new(),
        }
    }

    /// Add a child with size bounds
    ///
    /// `max` is raised to `min` where smaller.
    pub fn add_child(&mut self, min: Size, max: Size) -> WidgetId {
        let id = WidgetId::new(u32::try_from(self.children.len()).unwrap_or(u32::MAX));
        self.children.push(Some(Child {
            min,
            max: max.max(min),
            rect: Rect::ZERO,
            commits: 0,
        }));
        id
    }

    /// Add an unconstrained child
    #[inline]
    pub fn add_flexible_child(&mut self) -> WidgetId {
        self.add_child(Size::ZERO, Size::UNLIMITED)
    }

    /// Add a child of fixed size
    #[inline]
    pub fn add_fixed_child(&mut self, size: Size) -> WidgetId {
        self.add_child(size, size)
    }

    /// Destroy a child
    ///
    /// The handle becomes stale and [`Event::ChildRemoved`] is posted.
    pub fn destroy_child(&mut self, w: WidgetId) {
        if let Some(slot) = self.children.get_mut(w.index() as usize) {
            if slot.take().is_some() {
                self.events.push_back(Event::ChildRemoved(w));
            }
        }
    }

    /// Change the size bounds of a child
    ///
    /// Posts [`Event::LayoutHint`].
    pub fn set_child_bounds(&mut self, w: WidgetId, min: Size, max: Size) {
        if let Some(child) = self.child_mut(w) {
            child.min = min;
            child.max = max.max(min);
            self.events.push_back(Event::LayoutHint);
        }
    }

    /// Resize the container, as a user dragging the window edge would
    ///
    /// The size is not clamped; that is the manager's job.
    pub fn resize_container(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.events.push_back(Event::Resized(size));
        }
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Number of geometry commits received by `w`
    pub fn commit_count(&self, w: WidgetId) -> u32 {
        self.child(w).map(|c| c.commits).unwrap_or(0)
    }

    /// Committed geometry of `w`, or [`Rect::ZERO`] if stale
    pub fn rect(&self, w: WidgetId) -> Rect {
        self.child(w).map(|c| c.rect).unwrap_or(Rect::ZERO)
    }

    fn child(&self, w: WidgetId) -> Option<&Child> {
        self.children.get(w.index() as usize).and_then(Option::as_ref)
    }

    fn child_mut(&mut self, w: WidgetId) -> Option<&mut Child> {
        self.children
            .get_mut(w.index() as usize)
            .and_then(Option::as_mut)
    }
}

impl Widgets for HeadlessContainer {
    fn min_size(&self, w: WidgetId) -> Option<Size> {
        self.child(w).map(|c| c.min)
    }

    fn max_size(&self, w: WidgetId) -> Option<Size> {
        self.child(w).map(|c| c.max)
    }

    fn geometry(&self, w: WidgetId) -> Option<Rect> {
        self.child(w).map(|c| c.rect)
    }

    fn set_geometry(&mut self, w: WidgetId, rect: Rect) {
        if let Some(child) = self.child_mut(w) {
            child.rect = rect;
            child.commits += 1;
        }
    }
}

impl Container for HeadlessContainer {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.resize_container(size);
    }

    fn minimum_size(&self) -> Size {
        self.min
    }

    fn maximum_size(&self) -> Size {
        self.max
    }

    fn set_minimum_size(&mut self, size: Size) {
        self.min = size;
    }

    fn set_maximum_size(&mut self, size: Size) {
        self.max = size;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stale_handles() {
        let mut host = HeadlessContainer::new(Size(10, 10));
        let a = host.add_child(Size(5, 5), Size(2, 2));
        assert_eq!(host.max_size(a), Some(Size(5, 5)));
        host.destroy_child(a);
        assert_eq!(host.min_size(a), None);
        host.destroy_child(a);
        assert_eq!(host.take_events(), vec![Event::ChildRemoved(a)]);
        host.set_geometry(a, Rect::from_xywh(1, 1, 1, 1));
        assert_eq!(host.rect(a), Rect::ZERO);
    }

    #[test]
    fn resize_posts_once() {
        let mut host = HeadlessContainer::new(Size(10, 10));
        host.resize_container(Size(10, 10));
        host.resize_container(Size(20, 10));
        assert_eq!(host.take_events(), vec![Event::Resized(Size(20, 10))]);
        assert!(host.take_events().is_empty());
    }
}
