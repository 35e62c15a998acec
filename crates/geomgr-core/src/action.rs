// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Action flags

bitflags! {
    /// Layout work scheduled for later
    ///
    /// Notifications received by a [`crate::layout::Manager`] do not trigger
    /// layout passes inline; they record an `Action` which is performed by
    /// [`crate::layout::Manager::flush`]. Several notifications in a burst
    /// therefore cost a single pass.
    ///
    /// Two `Action` values may be combined via bit-or (`a | b`).
    #[must_use]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Action: u32 {
        /// Re-distribute space without recalculating bounds
        const RESIZE = 1 << 0;
        /// Recalculate bounds, then re-distribute
        ///
        /// Implies [`Action::RESIZE`].
        const ACTIVATE = 1 << 1;
    }
}
