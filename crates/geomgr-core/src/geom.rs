// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Coord`] and [`Size`] are 2D integer (`i32`) types representing positions
//! and sizes respectively. [`Rect`] combines the two.
//!
//! Sizes are bounded above by [`UNLIMITED`], which doubles as the "no maximum"
//! sentinel. Sums of sizes saturate at this value.

use crate::dir::Direction;

/// The largest representable length; used as "no maximum"
pub const UNLIMITED: i32 = i32::MAX;

macro_rules! impl_common {
    ($T:ty) => {
        impl $T {
            /// The constant `(0, 0)`
            pub const ZERO: Self = Self(0, 0);

            /// Return the minimum, componentwise
            #[inline]
            #[must_use = "method does not modify self but returns a new value"]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0), self.1.min(other.1))
            }

            /// Return the maximum, componentwise
            #[inline]
            #[must_use = "method does not modify self but returns a new value"]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0), self.1.max(other.1))
            }

            /// Extract one component, based on a direction
            ///
            /// This merely extracts the horizontal or vertical component.
            /// It never negates it, even if the axis is reversed.
            #[inline]
            pub fn extract(self, dir: Direction) -> i32 {
                match dir.is_vertical() {
                    false => self.0,
                    true => self.1,
                }
            }

            /// Set one component of self, based on a direction
            ///
            /// This does not negate components when the direction is reversed.
            #[inline]
            pub fn set_component(&mut self, dir: Direction, value: i32) {
                match dir.is_vertical() {
                    false => self.0 = value,
                    true => self.1 = value,
                }
            }
        }

        impl From<(i32, i32)> for $T {
            #[inline]
            fn from(v: (i32, i32)) -> Self {
                Self(v.0, v.1)
            }
        }

        impl From<$T> for (i32, i32) {
            #[inline]
            fn from(v: $T) -> Self {
                (v.0, v.1)
            }
        }
    };
}

/// A 2D coordinate, also known as a point
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord(pub i32, pub i32);

/// A 2D size, also known as an extent
///
/// This is both a size and a relative position. It is not expected to be
/// negative.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub i32, pub i32);

impl_common!(Coord);
impl_common!(Size);

impl Size {
    /// The "no maximum" size
    pub const UNLIMITED: Self = Size(UNLIMITED, UNLIMITED);

    /// Construct
    #[inline]
    pub const fn new(w: i32, h: i32) -> Self {
        Size(w, h)
    }

    /// Restrict a value to the specified interval, componentwise
    ///
    /// Unlike [`Ord::clamp`] this does not panic when `min > max`; the
    /// minimum wins.
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.min(max).max(min)
    }
}

/// An axis-aligned rectangular region
///
/// The region is defined by a point `pos` and an extent `size`, allowing
/// easy translations. It is empty unless `size` is positive on both axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: Coord,
    pub size: Size,
}

impl Rect {
    /// The empty rect (all fields zero)
    pub const ZERO: Self = Self::new(Coord::ZERO, Size::ZERO);

    /// Construct from a [`Coord`] and [`Size`]
    #[inline]
    pub const fn new(pos: Coord, size: Size) -> Self {
        Rect { pos, size }
    }

    /// Construct from components
    #[inline]
    pub const fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect::new(Coord(x, y), Size(w, h))
    }

    /// Get the second point (pos + size)
    #[inline]
    pub fn pos2(&self) -> Coord {
        Coord(self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    /// Set the `(position, length)` of one axis
    #[inline]
    pub fn set_span(&mut self, dir: Direction, pos: i32, len: i32) {
        self.pos.set_component(dir, pos);
        self.size.set_component(dir, len);
    }
}
