// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction session state read by the event constructor.
//!
//! ## Usage
//!
//! 1) On pointer down, call [`Interaction::pointer_down`] with the pressed element and sample.
//! 2) On each pointer move, call [`Interaction::pointer_move`] to advance the coordinates and
//!    refresh [`Interaction::pointer_delta`].
//! 3) After building an event, hand it back with [`Interaction::push_event`] so the next event can
//!    compute deltas and swipes from it.
//! 4) Call [`Interaction::end`] once the gesture is over.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture_event::coords::PointerCoords;
//! use understory_gesture_event::interaction::{Interaction, InteractionId};
//!
//! let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
//! interaction.pointer_down(Some(3), PointerCoords::new(Point::ZERO, Point::ZERO, 1000.0));
//! interaction.pointer_move(PointerCoords::new(
//!     Point::new(8.0, 6.0),
//!     Point::new(8.0, 6.0),
//!     1500.0,
//! ));
//!
//! assert_eq!(interaction.element, Some(3));
//! assert_eq!(interaction.down_times, vec![1000.0]);
//! assert_eq!(interaction.pointer_delta.page.speed, 20.0);
//! ```

use alloc::vec::Vec;

use crate::coords::{DeltaSource, PointerCoords, PointerDelta};
use crate::event::GestureEvent;
use crate::options::{Defaults, InteractableOptions};

/// Identifier of an interaction session.
///
/// Events refer back to their interaction through this handle rather than
/// holding the interaction itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionId(pub u64);

/// Identifier of an interactable target configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractableId(pub u64);

/// A target configuration that an interaction can engage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interactable {
    /// Identity of this configuration.
    pub id: InteractableId,
    /// Options that affect event construction.
    pub options: InteractableOptions,
}

impl Interactable {
    /// Create an interactable with default options.
    pub fn new(id: InteractableId) -> Self {
        Self {
            id,
            options: InteractableOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: InteractableOptions) -> Self {
        self.options = options;
        self
    }
}

/// One ongoing gesture session.
///
/// The interaction owns the most recent event it produced in
/// [`prev_event`](Self::prev_event). All fields are public so hosts with their
/// own pointer bookkeeping can fill them directly.
#[derive(Clone, Debug)]
pub struct Interaction<K> {
    /// Identity of the session.
    pub id: InteractionId,
    /// Engaged target configuration, if any.
    pub target: Option<Interactable>,
    /// Element the gesture acts on.
    pub element: Option<K>,
    /// Coordinates at gesture start.
    pub start_coords: PointerCoords,
    /// Coordinates of the sample before [`cur_coords`](Self::cur_coords).
    pub prev_coords: PointerCoords,
    /// Latest coordinates.
    pub cur_coords: PointerCoords,
    /// Press times since gesture start; first is the initial press, last the most recent.
    pub down_times: Vec<f64>,
    /// Motion between `prev_coords` and `cur_coords`.
    pub pointer_delta: PointerDelta,
    /// Last event built for this interaction.
    pub prev_event: Option<GestureEvent<K>>,
}

impl<K: Copy> Interaction<K> {
    /// Create an idle interaction without a target.
    pub fn new(id: InteractionId) -> Self {
        Self {
            id,
            target: None,
            element: None,
            start_coords: PointerCoords::default(),
            prev_coords: PointerCoords::default(),
            cur_coords: PointerCoords::default(),
            down_times: Vec::new(),
            pointer_delta: PointerDelta::default(),
            prev_event: None,
        }
    }

    /// Engage a target configuration.
    pub fn with_target(mut self, target: Interactable) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns `true` while at least one press is recorded.
    pub fn is_active(&self) -> bool {
        !self.down_times.is_empty()
    }

    /// Coordinate space used for deltas, from the target or the given defaults.
    pub fn delta_source(&self, defaults: &Defaults) -> DeltaSource {
        self.target
            .map_or(defaults.delta_source, |target| target.options.delta_source)
    }

    /// Record a press.
    ///
    /// All coordinate snapshots restart at `coords`. The first press of a
    /// gesture also forgets the previous gesture's last event.
    pub fn pointer_down(&mut self, element: Option<K>, coords: PointerCoords) {
        if self.down_times.is_empty() {
            self.prev_event = None;
        }
        if element.is_some() {
            self.element = element;
        }
        self.down_times.push(coords.time_stamp);
        self.start_coords = coords;
        self.prev_coords = coords;
        self.cur_coords = coords;
        self.pointer_delta = PointerDelta::default();
    }

    /// Record a new pointer position and refresh [`pointer_delta`](Self::pointer_delta).
    pub fn pointer_move(&mut self, coords: PointerCoords) {
        self.prev_coords = self.cur_coords;
        self.cur_coords = coords;
        self.pointer_delta = PointerDelta::between(&self.prev_coords, &self.cur_coords);
    }

    /// Keep `event` as the previous event, returning the one it supersedes.
    pub fn push_event(&mut self, event: GestureEvent<K>) -> Option<GestureEvent<K>> {
        self.prev_event.replace(event)
    }

    /// Finish the gesture and reset per-gesture state.
    pub fn end(&mut self) {
        self.down_times.clear();
        self.prev_event = None;
        self.element = None;
        self.pointer_delta = PointerDelta::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Phase;
    use alloc::vec;
    use kurbo::Point;

    fn at(x: f64, y: f64, t: f64) -> PointerCoords {
        PointerCoords::new(Point::new(x, y), Point::new(x, y), t)
    }

    #[test]
    fn new_interaction_is_idle() {
        let interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        assert!(!interaction.is_active());
        assert!(interaction.prev_event.is_none());
        assert!(interaction.target.is_none());
    }

    #[test]
    fn delta_source_prefers_target_options() {
        let defaults = Defaults {
            delta_source: DeltaSource::Page,
        };
        let interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        assert_eq!(interaction.delta_source(&defaults), DeltaSource::Page);

        let target = Interactable::new(InteractableId(2))
            .with_options(InteractableOptions::with_delta_source(DeltaSource::Client));
        let interaction = interaction.with_target(target);
        assert_eq!(interaction.delta_source(&defaults), DeltaSource::Client);
    }

    #[test]
    fn pointer_down_resets_snapshots_and_records_time() {
        let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        interaction.pointer_down(Some(4), at(10.0, 20.0, 1000.0));

        assert!(interaction.is_active());
        assert_eq!(interaction.element, Some(4));
        assert_eq!(interaction.down_times, vec![1000.0]);
        assert_eq!(interaction.start_coords, at(10.0, 20.0, 1000.0));
        assert_eq!(interaction.cur_coords, interaction.start_coords);
        assert_eq!(interaction.pointer_delta, PointerDelta::default());
    }

    #[test]
    fn second_press_keeps_first_down_time() {
        let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        interaction.pointer_down(Some(4), at(0.0, 0.0, 1000.0));
        interaction.push_event(GestureEvent::blank(InteractionId(1), "gesture", Phase::Start));
        interaction.pointer_down(None, at(5.0, 5.0, 1200.0));

        assert_eq!(interaction.down_times, vec![1000.0, 1200.0]);
        // Element is kept when the new press does not name one.
        assert_eq!(interaction.element, Some(4));
        // Only the first press of a gesture forgets the previous event.
        assert!(interaction.prev_event.is_some());
    }

    #[test]
    fn pointer_move_advances_coordinates() {
        let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        interaction.pointer_down(None, at(0.0, 0.0, 0.0));
        interaction.pointer_move(at(3.0, 4.0, 500.0));
        interaction.pointer_move(at(6.0, 8.0, 1000.0));

        assert_eq!(interaction.prev_coords, at(3.0, 4.0, 500.0));
        assert_eq!(interaction.cur_coords, at(6.0, 8.0, 1000.0));
        assert_eq!(interaction.pointer_delta.time_stamp, 500.0);
        assert_eq!(interaction.pointer_delta.page.speed, 10.0);
        assert_eq!(interaction.pointer_delta.page.vx, 6.0);
    }

    #[test]
    fn push_event_returns_superseded_event() {
        let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        let first = GestureEvent::blank(InteractionId(1), "drag", Phase::Start);
        let second = GestureEvent::blank(InteractionId(1), "drag", Phase::Move);

        assert!(interaction.push_event(first).is_none());
        let superseded = interaction.push_event(second);
        assert_eq!(superseded.map(|e| e.phase), Some(Phase::Start));
        assert_eq!(interaction.prev_event.as_ref().map(|e| e.phase), Some(Phase::Move));
    }

    #[test]
    fn end_clears_gesture_state() {
        let mut interaction: Interaction<u32> = Interaction::new(InteractionId(1));
        interaction.pointer_down(Some(1), at(0.0, 0.0, 0.0));
        interaction.push_event(GestureEvent::blank(InteractionId(1), "drag", Phase::Start));

        interaction.end();

        assert!(!interaction.is_active());
        assert!(interaction.prev_event.is_none());
        assert!(interaction.element.is_none());
    }
}
