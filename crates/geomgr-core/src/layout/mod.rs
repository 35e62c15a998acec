// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry management
//!
//! Size units are pixels. Each axis is solved independently.
//!
//! ## Chains
//!
//! A layout is a pair of trees of *chains*, one per axis, stored in a
//! [`ChainTree`]:
//!
//! -   *spacing* chains: fixed `(min, max)` bounds and no content
//! -   *widget* chains: a leaf referring to a widget, whose bounds are
//!     queried live from the [`crate::Widgets`] host
//! -   *serial* chains set their members out end-to-end, sharing space beyond
//!     the sum of minimums according to each member's *stretch*. A serial
//!     chain may additionally carry *branches*: chains overlaying a range of
//!     its members without affecting its bounds (used for cell spans).
//! -   *parallel* chains lay their members on top of each other
//!
//! Chains with direction [`RightToLeft`] or [`Up`] mirror member positions.
//!
//! [`solve_serial`] is the "muscle" of the engine.
//!
//! ## Manager
//!
//! [`Manager`] owns the chains of one container, with an X root and a Y root.
//! It derives the container's bounds from the roots ([`Manager::activate`])
//! and places widgets within its current size ([`Manager::resize_all`]).
//!
//! ## Builders
//!
//! [`BoxLayout`] and [`GridLayout`] construct the common chain shapes.
//!
//! [`RightToLeft`]: crate::Direction::RightToLeft
//! [`Up`]: crate::Direction::Up

mod align;
mod box_layout;
mod chain;
mod grid_layout;
mod manager;
mod solver;

use crate::dir::Direction;
use std::fmt;
use thiserror::Error;

pub use align::{Align, AlignHints};
pub use box_layout::BoxLayout;
pub use chain::{ChainKind, ChainTree};
pub use grid_layout::GridLayout;
pub use manager::Manager;
pub use solver::{solve_serial, Item, Placement, Placements, Slot};

/// Handle to a chain within a [`ChainTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u32);

impl ChainId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        ChainId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "chain#{}", self.0)
    }
}

/// Layout configuration errors
///
/// These are logged where they occur; the failed operation leaves the
/// layout unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0} does not exist")]
    InvalidChain(ChainId),
    #[error("{0} cannot hold members")]
    NotComposite(ChainId),
    #[error("{0} is not a serial chain")]
    NotSerial(ChainId),
    #[error("{member} ({member_dir}) does not lie on the axis of {dest} ({dest_dir})")]
    AxisMismatch {
        dest: ChainId,
        dest_dir: Direction,
        member: ChainId,
        member_dir: Direction,
    },
    #[error("{0} is already attached to a chain")]
    AlreadyAttached(ChainId),
    #[error("attaching {member} to {dest} would create a cycle")]
    Cycle { dest: ChainId, member: ChainId },
    #[error("invalid branch range {from}..={to} over {len} members")]
    InvalidBranch { from: usize, to: usize, len: usize },
    #[error("cell ({row}, {col}) lies outside a grid of {rows} rows and {cols} columns")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("{0} is not a member of any chain")]
    NotInLayout(ChainId),
}

/// A layout builder
///
/// Exposes the chain of each axis, allowing layouts to nest and to be
/// attached to a [`Manager`] as the top-level layout.
pub trait Layout {
    /// The chain placing this layout horizontally
    fn horizontal_chain(&self) -> ChainId;

    /// The chain placing this layout vertically
    fn vertical_chain(&self) -> ChainId;

    /// The chain along `dir`'s axis
    #[inline]
    fn chain_along(&self, dir: Direction) -> ChainId {
        match dir.is_vertical() {
            false => self.horizontal_chain(),
            true => self.vertical_chain(),
        }
    }

    /// Attach as the top-level layout of `gm`
    ///
    /// The horizontal chain joins the X root and the vertical chain joins the
    /// Y root.
    fn bind(&self, gm: &mut Manager) -> Result<(), Error> {
        gm.add_chain_to_chain(gm.x_chain(), self.horizontal_chain(), 0)?;
        gm.add_chain_to_chain(gm.y_chain(), self.vertical_chain(), 0)
    }
}
