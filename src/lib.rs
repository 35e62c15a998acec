// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Chain-based geometry management
//!
//! This, the main crate, is merely a wrapper over [`geomgr_core`]. All items
//! are directly re-exported from this crate
//! (e.g. [`geomgr::geom::Size`](crate::geom::Size)).
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is
//! re-exported as `geomgr::cast`.
//!
//! ## Example
//!
//! ```
//! use geomgr::prelude::*;
//!
//! let mut host = HeadlessContainer::new(Size(200, 100));
//! let mut gm = Manager::new();
//! let mut row = BoxLayout::top_level(&mut gm, Direction::LeftToRight).unwrap();
//! let ok = host.add_child(Size(40, 20), Size::UNLIMITED);
//! let cancel = host.add_child(Size(40, 20), Size::UNLIMITED);
//! row.add_stretch(&mut gm, 1).unwrap();
//! row.add_widget(&mut gm, ok, 0, Align::Center).unwrap();
//! row.add_widget(&mut gm, cancel, 0, Align::Center).unwrap();
//! gm.activate(&mut host);
//! assert_eq!(host.rect(cancel), Rect::from_xywh(160, 40, 40, 20));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod prelude;

pub use geomgr_core::*;
