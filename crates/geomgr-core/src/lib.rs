// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! geomgr core
//!
//! A one-dimensional, chain-based geometry manager. Layouts are described as
//! trees of [`layout`] chains (serial, parallel, spacing and widget leaves),
//! one tree per axis. A [`layout::Manager`] solves both trees against the
//! size of a [`widget::Container`] and commits the resulting rectangles.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate bitflags;

pub extern crate easy_cast as cast;

mod action;
pub mod config;
pub mod dir;
pub mod geom;
pub mod headless;
pub mod layout;
pub mod widget;

pub use action::Action;
pub use dir::Direction;
pub use widget::{Container, Event, WidgetId, Widgets};
