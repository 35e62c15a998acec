// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Prelude
//!
//! This module allows convenient importation of common unambiguous items:
//! ```
//! use geomgr::prelude::*;
//! ```

#[doc(no_inline)]
pub use geomgr_core::geom::{Coord, Rect, Size, UNLIMITED};
#[doc(no_inline)]
pub use geomgr_core::headless::HeadlessContainer;
#[doc(no_inline)]
pub use geomgr_core::layout::{Align, AlignHints, BoxLayout, GridLayout, Layout, Manager};
#[doc(no_inline)]
pub use geomgr_core::{Action, Container, Direction, Event, WidgetId, Widgets};
