// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture event record and the raw input it is built from.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use kurbo::{Point, Vec2};
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{PointerButton, PointerButtons};

use crate::coords::DeltaSource;
use crate::interaction::{InteractableId, InteractionId};
use crate::swipe::Swipe;

/// Stage of a gesture session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The gesture began.
    Start,
    /// The pointer moved while the gesture is active.
    Move,
    /// The pointer was released.
    End,
    /// Momentum continuation after release.
    InertiaStart,
}

impl Phase {
    /// Suffix appended to the action name to form the event type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
            Self::InertiaStart => "inertiastart",
        }
    }

    /// Whether events of this phase carry a swipe classification.
    pub const fn classifies_swipe(self) -> bool {
        matches!(self, Self::End | Self::InertiaStart)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier and button state of the raw input that triggered an event.
///
/// Positions are not part of the sample; they come from the interaction's
/// coordinate snapshots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputSample {
    /// Keyboard modifiers held during the sample.
    pub modifiers: Modifiers,
    /// Button whose state changed, if any.
    pub button: Option<PointerButton>,
    /// All buttons held during the sample.
    pub buttons: PointerButtons,
}

impl Default for InputSample {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::empty(),
            button: None,
            buttons: PointerButtons::default(),
        }
    }
}

/// One phase of a gesture, normalized to an origin-relative frame.
///
/// Built by [`EventConstructor::construct`](crate::EventConstructor::construct).
/// Hooks may overwrite declared fields during construction; fields that
/// extensions invent live in [`extensions`](Self::extensions).
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent<K> {
    /// Keyboard modifiers, copied from the input sample.
    pub modifiers: Modifiers,
    /// Button whose state changed, copied from the input sample.
    pub button: Option<PointerButton>,
    /// Buttons held, copied from the input sample.
    pub buttons: PointerButtons,
    /// Element the event is dispatched to.
    pub target: Option<K>,
    /// Same as `target`.
    pub current_target: Option<K>,
    /// Secondary element involved in the event, if any.
    pub related_target: Option<K>,
    /// Time of the most recent press, in milliseconds.
    pub t0: f64,
    /// Action name of the interaction, e.g. `"drag"`.
    pub action: &'static str,
    /// Phase this event was built for.
    pub phase: Phase,
    /// Action name followed by the phase name, e.g. `"dragmove"`.
    pub event_type: String,
    /// Interaction the event belongs to.
    pub interaction: InteractionId,
    /// Target configuration engaged by the interaction.
    pub interactable: Option<InteractableId>,
    /// Origin-relative position in page coordinates.
    pub page: Point,
    /// Origin-relative position in client coordinates.
    pub client: Point,
    /// Origin-relative gesture start in page coordinates.
    pub page0: Point,
    /// Origin-relative gesture start in client coordinates.
    pub client0: Point,
    /// Displacement reported by this event.
    ///
    /// Zero on start, the total displacement on end, and the motion since the
    /// previous event otherwise.
    pub delta: Vec2,
    /// Time of the coordinate sample, in milliseconds.
    pub time_stamp: f64,
    /// Milliseconds between the two latest pointer samples.
    pub dt: f64,
    /// Milliseconds since the gesture's first press.
    pub duration: f64,
    /// Pointer speed in pixels per second.
    pub speed: f64,
    /// Pointer velocity in pixels per second.
    pub velocity: Vec2,
    /// Swipe classification, only ever present on end and inertia-start events.
    pub swipe: Option<Swipe>,
    /// Set by [`stop_propagation`](Self::stop_propagation).
    pub propagation_stopped: bool,
    /// Set by [`stop_immediate_propagation`](Self::stop_immediate_propagation).
    pub immediate_propagation_stopped: bool,
    /// Numeric fields attached by hooks.
    pub extensions: BTreeMap<&'static str, f64>,
}

impl<K> GestureEvent<K> {
    pub(crate) fn blank(interaction: InteractionId, action: &'static str, phase: Phase) -> Self {
        let mut event_type = String::with_capacity(action.len() + phase.name().len());
        event_type.push_str(action);
        event_type.push_str(phase.name());

        Self {
            modifiers: Modifiers::empty(),
            button: None,
            buttons: PointerButtons::default(),
            target: None,
            current_target: None,
            related_target: None,
            t0: 0.0,
            action,
            phase,
            event_type,
            interaction,
            interactable: None,
            page: Point::ZERO,
            client: Point::ZERO,
            page0: Point::ZERO,
            client0: Point::ZERO,
            delta: Vec2::ZERO,
            time_stamp: 0.0,
            dt: 0.0,
            duration: 0.0,
            speed: 0.0,
            velocity: Vec2::ZERO,
            swipe: None,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            extensions: BTreeMap::new(),
        }
    }

    /// Whether Control was held.
    pub fn ctrl_key(&self) -> bool {
        self.modifiers.contains(Modifiers::CONTROL)
    }

    /// Whether Alt was held.
    pub fn alt_key(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Whether Shift was held.
    pub fn shift_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether Meta was held.
    pub fn meta_key(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }

    /// Position in the given coordinate space.
    pub fn position(&self, source: DeltaSource) -> Point {
        match source {
            DeltaSource::Page => self.page,
            DeltaSource::Client => self.client,
        }
    }

    /// Gesture start in the given coordinate space.
    pub fn start_position(&self, source: DeltaSource) -> Point {
        match source {
            DeltaSource::Page => self.page0,
            DeltaSource::Client => self.client0,
        }
    }

    /// Does nothing; gesture events have no default action.
    pub fn prevent_default(&mut self) {}

    /// Ask consumers not to pass the event further along.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Like [`stop_propagation`](Self::stop_propagation), and also skip the
    /// remaining listeners on the current target.
    pub fn stop_immediate_propagation(&mut self) {
        self.immediate_propagation_stopped = true;
        self.propagation_stopped = true;
    }

    /// Value of an extension-defined field.
    pub fn extension(&self, name: &str) -> Option<f64> {
        self.extensions.get(name).copied()
    }

    /// Set an extension-defined field, returning the previous value.
    pub fn set_extension(&mut self, name: &'static str, value: f64) -> Option<f64> {
        self.extensions.insert(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(phase: Phase) -> GestureEvent<u32> {
        GestureEvent::blank(InteractionId(7), "drag", phase)
    }

    #[test]
    fn event_type_joins_action_and_phase() {
        assert_eq!(event(Phase::Start).event_type, "dragstart");
        assert_eq!(event(Phase::Move).event_type, "dragmove");
        assert_eq!(event(Phase::End).event_type, "dragend");
        assert_eq!(event(Phase::InertiaStart).event_type, "draginertiastart");
    }

    #[test]
    fn only_terminal_phases_classify_swipes() {
        assert!(!Phase::Start.classifies_swipe());
        assert!(!Phase::Move.classifies_swipe());
        assert!(Phase::End.classifies_swipe());
        assert!(Phase::InertiaStart.classifies_swipe());
    }

    #[test]
    fn stop_propagation_sets_only_its_flag() {
        let mut e = event(Phase::Move);
        e.prevent_default();
        e.stop_propagation();
        assert!(e.propagation_stopped);
        assert!(!e.immediate_propagation_stopped);
    }

    #[test]
    fn stop_immediate_propagation_sets_both_flags() {
        let mut e = event(Phase::Move);
        e.stop_immediate_propagation();
        assert!(e.propagation_stopped);
        assert!(e.immediate_propagation_stopped);
    }

    #[test]
    fn modifier_accessors_read_sample_state() {
        let mut e = event(Phase::Move);
        e.modifiers = Modifiers::CONTROL | Modifiers::SHIFT;
        assert!(e.ctrl_key());
        assert!(e.shift_key());
        assert!(!e.alt_key());
        assert!(!e.meta_key());
    }

    #[test]
    fn positions_follow_coordinate_space() {
        let mut e = event(Phase::Move);
        e.page = Point::new(5.0, 6.0);
        e.client = Point::new(7.0, 8.0);
        e.page0 = Point::new(1.0, 2.0);
        e.client0 = Point::new(3.0, 4.0);

        assert_eq!(e.position(DeltaSource::Page), Point::new(5.0, 6.0));
        assert_eq!(e.position(DeltaSource::Client), Point::new(7.0, 8.0));
        assert_eq!(e.start_position(DeltaSource::Page), Point::new(1.0, 2.0));
        assert_eq!(e.start_position(DeltaSource::Client), Point::new(3.0, 4.0));
    }

    #[test]
    fn extensions_overwrite_and_report_previous() {
        let mut e = event(Phase::Move);
        assert_eq!(e.extension("scale"), None);
        assert_eq!(e.set_extension("scale", 1.5), None);
        assert_eq!(e.set_extension("scale", 2.0), Some(1.5));
        assert_eq!(e.extension("scale"), Some(2.0));
    }
}
