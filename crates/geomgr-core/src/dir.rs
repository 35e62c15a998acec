// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Direction types

use std::fmt;

/// Axis-aligned layout directions
///
/// A chain lays out its members along its direction. Horizontal chains only
/// compose with horizontal chains and vertical with vertical.
///
/// The discriminants encode the axis in bit 0 and reversal in bit 1.
///
/// A default direction is provided, though somewhat arbitrary: `LeftToRight`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    LeftToRight = 0,
    /// Top to bottom
    Down = 1,
    RightToLeft = 2,
    /// Bottom to top
    Up = 3,
}

impl Direction {
    /// Up or Down
    #[inline]
    pub fn is_vertical(self) -> bool {
        ((self as u32) & 1) == 1
    }

    /// LeftToRight or RightToLeft
    #[inline]
    pub fn is_horizontal(self) -> bool {
        ((self as u32) & 1) == 0
    }

    /// RightToLeft or Up
    ///
    /// Chains in reversed directions mirror the positions of their members.
    #[inline]
    pub fn is_reversed(self) -> bool {
        ((self as u32) & 2) == 2
    }

    /// True if `self` and `other` lie on the same axis
    #[inline]
    pub fn same_axis(self, other: Direction) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    /// Flip over diagonal (i.e. Down ↔ LeftToRight)
    #[must_use = "method does not modify self but returns a new value"]
    pub fn flipped(self) -> Self {
        use Direction::*;
        match self {
            LeftToRight => Down,
            Down => LeftToRight,
            RightToLeft => Up,
            Up => RightToLeft,
        }
    }

    /// Reverse along axis (i.e. RightToLeft ↔ LeftToRight)
    #[must_use = "method does not modify self but returns a new value"]
    pub fn reversed(self) -> Self {
        use Direction::*;
        match self {
            LeftToRight => RightToLeft,
            Down => Up,
            RightToLeft => LeftToRight,
            Up => Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", match self {
            Direction::LeftToRight => "LeftToRight",
            Direction::Down => "Down",
            Direction::RightToLeft => "RightToLeft",
            Direction::Up => "Up",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn size() {
        assert_eq!(size_of::<Direction>(), 1);
    }

    #[test]
    fn axes() {
        use Direction::*;
        assert!(LeftToRight.is_horizontal() && RightToLeft.is_horizontal());
        assert!(Down.is_vertical() && Up.is_vertical());
        assert!(RightToLeft.is_reversed() && Up.is_reversed());
        assert!(!LeftToRight.is_reversed() && !Down.is_reversed());
        assert!(LeftToRight.same_axis(RightToLeft));
        assert!(!Down.same_axis(RightToLeft));
        assert_eq!(Up.flipped(), RightToLeft);
        assert_eq!(Up.reversed(), Down);
    }
}
