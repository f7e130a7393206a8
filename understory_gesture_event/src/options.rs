// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::coords::DeltaSource;

/// Global fallback configuration used when an interaction has no target.
///
/// Held by [`crate::EventConstructor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Defaults {
    /// Coordinate space for deltas and velocities.
    pub delta_source: DeltaSource,
}

/// Per-target options of an [`Interactable`](crate::interaction::Interactable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InteractableOptions {
    /// Coordinate space for deltas and velocities.
    pub delta_source: DeltaSource,
}

impl InteractableOptions {
    /// Options anchored to the given coordinate space.
    pub const fn with_delta_source(delta_source: DeltaSource) -> Self {
        Self { delta_source }
    }
}
