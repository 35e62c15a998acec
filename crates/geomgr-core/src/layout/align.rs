// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Alignment types

use super::{ChainId, Error, Manager};
use crate::dir::Direction;
use crate::geom::UNLIMITED;
use crate::WidgetId;

/// Alignment of a widget within the space offered along one axis
///
/// Non-stretch alignments keep the widget at its minimum size on that axis.
/// "Start" and "End" are relative to the direction of the chain holding the
/// widget, thus `Start` is the right edge within a `RightToLeft` chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Fill the available space (subject to the widget's maximum)
    #[default]
    Stretch,
    /// Align to the start
    Start,
    /// Align to the centre
    Center,
    /// Align to the end
    End,
}

/// Partial alignment information
///
/// Missing components default to [`Align::Stretch`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AlignHints {
    pub horiz: Option<Align>,
    pub vert: Option<Align>,
}

impl AlignHints {
    /// No hints
    pub const NONE: AlignHints = AlignHints::new(None, None);

    /// Center on both axes
    pub const CENTER: AlignHints = AlignHints::new(Some(Align::Center), Some(Align::Center));
    /// Top, left
    pub const TOP_LEFT: AlignHints = AlignHints::new(Some(Align::Start), Some(Align::Start));
    /// Bottom, right
    pub const BOTTOM_RIGHT: AlignHints = AlignHints::new(Some(Align::End), Some(Align::End));

    /// Construct with optional horiz. and vert. alignment
    pub const fn new(horiz: Option<Align>, vert: Option<Align>) -> Self {
        Self { horiz, vert }
    }

    /// Take horizontal/vertical component
    #[inline]
    pub fn extract(self, dir: Direction) -> Align {
        match dir.is_vertical() {
            false => self.horiz,
            true => self.vert,
        }
        .unwrap_or_default()
    }
}

/// Append widget `w` to `chain` with alignment `align`
///
/// For [`Align::Stretch`] this is a plain widget leaf. Otherwise the leaf is
/// wrapped in a serial chain padded with stretchable spacing.
pub(crate) fn add_aligned_widget(
    gm: &mut Manager,
    chain: ChainId,
    w: WidgetId,
    align: Align,
    stretch: u32,
) -> Result<(), Error> {
    let dir = match gm.tree().direction(chain) {
        Some(dir) if align != Align::Stretch => dir,
        _ => return gm.add_widget(chain, w, stretch).map(|_| ()),
    };

    let wrapper = gm.new_serial_chain(dir);
    if matches!(align, Align::Center | Align::End) {
        gm.add_spacing(wrapper, 0, 1, UNLIMITED)?;
    }
    gm.add_widget(wrapper, w, 0)?;
    if matches!(align, Align::Start | Align::Center) {
        gm.add_spacing(wrapper, 0, 1, UNLIMITED)?;
    }
    gm.add_chain_to_chain(chain, wrapper, stretch)
}
