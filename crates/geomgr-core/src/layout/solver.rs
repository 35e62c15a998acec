// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Serial distribution and the placement table

use crate::cast::Conv;
use crate::dir::Direction;
use crate::geom::{Rect, UNLIMITED};
use crate::WidgetId;
use rustc_hash::FxHashMap;

// Fixed-point representation: 8 fractional bits
const SHIFT: u32 = 8;
const HALF: i64 = 1 << (SHIFT - 1);

#[inline]
fn to_fixed(x: i32) -> i64 {
    i64::from(x) << SHIFT
}

/// Round half up back to integer
#[inline]
fn from_fixed(x: i64) -> i32 {
    i32::try_from((x + HALF) >> SHIFT).unwrap_or(if x < 0 { i32::MIN } else { UNLIMITED })
}

/// Bounds and stretch of one member of a serial chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Item {
    pub min: i32,
    pub max: i32,
    pub stretch: u32,
}

impl Item {
    /// Construct
    ///
    /// Required: `max >= min` (if not, max is raised to min).
    #[inline]
    pub fn new(min: i32, max: i32, stretch: u32) -> Self {
        Item {
            min,
            max: max.max(min),
            stretch,
        }
    }
}

/// A `(position, length)` pair along one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pub pos: i32,
    pub len: i32,
}

impl Slot {
    /// One past the last position
    #[inline]
    pub fn end(self) -> i32 {
        self.pos.saturating_add(self.len)
    }

    /// Mirror within the span `origin..origin + space`
    #[must_use = "method does not modify self but returns a new value"]
    pub fn mirrored(self, origin: i32, space: i32) -> Slot {
        let pos = 2 * i64::from(origin) + i64::from(space) - i64::from(self.pos) - i64::from(self.len);
        let pos = i32::try_from(pos).unwrap_or(if pos < 0 { i32::MIN } else { UNLIMITED });
        Slot { pos, len: self.len }
    }
}

/// Share of `avail` claimed by a member with `stretch`
///
/// Members split by stretch while any unresolved member has a stretch;
/// otherwise evenly.
fn share(avail: i64, stretch: u32, total_stretch: i64, unresolved: usize) -> i64 {
    if total_stretch > 0 {
        let x = i128::from(avail) * i128::from(stretch) / i128::from(total_stretch);
        i64::try_from(x).unwrap_or(avail)
    } else if unresolved > 0 {
        avail / i64::conv(unresolved)
    } else {
        0
    }
}

/// Solve a serial chain
///
/// Given the `items` of a serial chain, find a slot for each within
/// `origin..origin + space`, in logical (unmirrored) order.
///
/// Space beyond the sum of minimums is shared according to stretch. Members
/// which would exceed their maximum are pinned there and the remaining space
/// is shared again among the others, until no further member is pinned.
///
/// If `space` is less than the sum of minimums every member receives its
/// minimum (and the result overflows the span). Each member receives at least
/// its minimum and at most its maximum. If `space` lies between the sum of
/// minimums and the sum of maximums, the slots exactly tile the span.
pub fn solve_serial(items: &[Item], origin: i32, space: i32) -> Vec<Slot> {
    let n = items.len();
    if n == 0 {
        return vec![];
    }

    let min_sum = items.iter().fold(0i32, |sum, item| sum.saturating_add(item.min));
    let mut avail = (to_fixed(space) - to_fixed(min_sum)).max(0);
    let mut total_stretch: i64 = items.iter().map(|item| i64::from(item.stretch)).sum();
    let mut unresolved = n;
    let mut pinned = vec![false; n];

    // Each pass pins at most one member; the final pass pins none.
    for _ in 0..=n {
        let mut pinned_any = false;
        for (i, item) in items.iter().enumerate() {
            if pinned[i] {
                continue;
            }
            let size = to_fixed(item.min) + share(avail, item.stretch, total_stretch, unresolved);
            if size >= to_fixed(item.max) {
                pinned[i] = true;
                avail -= to_fixed(item.max) - to_fixed(item.min);
                total_stretch -= i64::from(item.stretch);
                unresolved -= 1;
                pinned_any = true;
                break;
            }
        }
        if !pinned_any {
            break;
        }
    }
    debug_assert!(avail >= 0);

    // Shares are taken cumulatively so that rounding never loses space.
    let denom = if total_stretch > 0 {
        total_stretch
    } else {
        i64::conv(unresolved)
    };
    let mut slots = Vec::with_capacity(n);
    let mut fixed_sum = to_fixed(origin);
    let mut weight_sum: i64 = 0;
    let mut start = origin;
    for (i, item) in items.iter().enumerate() {
        if pinned[i] {
            fixed_sum += to_fixed(item.max);
        } else {
            fixed_sum += to_fixed(item.min);
            weight_sum += if total_stretch > 0 {
                i64::from(item.stretch)
            } else {
                1
            };
        }
        let shared = match denom {
            0 => 0,
            _ => {
                let x = i128::from(avail) * i128::from(weight_sum) / i128::from(denom);
                i64::try_from(x).unwrap_or(avail)
            }
        };
        let end = from_fixed(fixed_sum + shared).max(origin);
        slots.push(Slot {
            pos: start,
            len: end - start,
        });
        start = end;
    }
    slots
}

/// Placement of one widget, per axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal `(position, length)`, if placed
    pub horiz: Option<(i32, i32)>,
    /// Vertical `(position, length)`, if placed
    pub vert: Option<(i32, i32)>,
}

impl Placement {
    /// Overwrite the placed axes of `rect`
    pub fn apply(self, mut rect: Rect) -> Rect {
        if let Some((pos, len)) = self.horiz {
            rect.set_span(Direction::LeftToRight, pos, len);
        }
        if let Some((pos, len)) = self.vert {
            rect.set_span(Direction::Down, pos, len);
        }
        rect
    }
}

/// Results of a distribute pass, keyed by widget
///
/// The two axes are written independently; a widget placed by both the X and
/// Y trees ends up with a complete rectangle.
#[derive(Clone, Debug, Default)]
pub struct Placements(FxHashMap<WidgetId, Placement>);

impl Placements {
    /// Record `(pos, len)` of `w` on the axis of `dir`
    pub fn set(&mut self, w: WidgetId, dir: Direction, pos: i32, len: i32) {
        let entry = self.0.entry(w).or_default();
        match dir.is_vertical() {
            false => entry.horiz = Some((pos, len)),
            true => entry.vert = Some((pos, len)),
        }
    }

    /// Get the placement of `w`
    pub fn get(&self, w: WidgetId) -> Option<Placement> {
        self.0.get(&w).copied()
    }

    /// Number of widgets placed
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing was placed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over placed widgets in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, Placement)> + '_ {
        self.0.iter().map(|(w, p)| (*w, *p))
    }
}
