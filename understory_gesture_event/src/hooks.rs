// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hook bus: named extension points run while an event is being built.
//!
//! The event constructor fires three [`Signal`]s, in order:
//!
//! - [`Signal::SetXy`]: after the origin-relative coordinates are computed and
//!   before they are written to the event. Handlers may rewrite
//!   [`SignalArg::page`] and [`SignalArg::client`].
//! - [`Signal::SetDelta`]: after positions are written. The default delta
//!   handler registered by [`EventConstructor::new`](crate::EventConstructor::new)
//!   fills [`GestureEvent::delta`] here.
//! - [`Signal::New`]: once the event is complete.
//!
//! Handlers of one signal run in registration order and all finish before
//! construction continues, so when two handlers write the same field the later
//! registration wins.
//!
//! ## Minimal example
//!
//! ```
//! use understory_gesture_event::hooks::{HookBus, Signal};
//!
//! let mut bus: HookBus<u32> = HookBus::new();
//! let id = bus.on(Signal::New, |arg| {
//!     let speed = arg.event.speed;
//!     arg.event.set_extension("speed_squared", speed * speed);
//! });
//! assert_eq!(bus.len(Signal::New), 1);
//!
//! assert!(bus.off(Signal::New, id));
//! assert!(bus.is_empty());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::Point;

use crate::coords::{DeltaSource, PointerCoords};
use crate::event::{GestureEvent, InputSample, Phase};
use crate::interaction::Interaction;

/// Extension point fired during event construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Coordinates are translated but not yet committed.
    SetXy,
    /// Positions are committed; the delta is due.
    SetDelta,
    /// The event is complete.
    New,
}

impl Signal {
    /// All signals in firing order.
    pub const ALL: [Self; 3] = [Self::SetXy, Self::SetDelta, Self::New];

    /// Conventional name of the signal.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetXy => "set-xy",
            Self::SetDelta => "set-delta",
            Self::New => "new",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::SetXy => 0,
            Self::SetDelta => 1,
            Self::New => 2,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`Signal`] name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownSignal;

impl fmt::Display for UnknownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown signal, expected \"set-xy\", \"set-delta\" or \"new\"")
    }
}

impl core::error::Error for UnknownSignal {}

impl FromStr for Signal {
    type Err = UnknownSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.name() == s)
            .ok_or(UnknownSignal)
    }
}

/// Shared argument bag passed to every handler of every signal for one event.
#[derive(Debug)]
pub struct SignalArg<'a, K> {
    /// Interaction the event is built for.
    pub interaction: &'a Interaction<K>,
    /// Raw input that triggered the event.
    pub sample: &'a InputSample,
    /// Action name, e.g. `"drag"`.
    pub action: &'static str,
    /// Phase being built.
    pub phase: Phase,
    /// Resolved element.
    pub element: Option<K>,
    /// Related element, if any.
    pub related: Option<K>,
    /// Origin-relative page position; may be rewritten during [`Signal::SetXy`].
    pub page: Point,
    /// Origin-relative client position; may be rewritten during [`Signal::SetXy`].
    pub client: Point,
    /// Raw coordinate snapshot the event is built from.
    pub coords: PointerCoords,
    /// Phase is [`Phase::Start`].
    pub starting: bool,
    /// Phase is [`Phase::End`].
    pub ending: bool,
    /// Coordinate space used for deltas and velocity.
    pub delta_source: DeltaSource,
    /// The event under construction.
    pub event: &'a mut GestureEvent<K>,
}

/// Handle returned by [`HookBus::on`], used to remove the handler again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Handler<K> = Box<dyn FnMut(&mut SignalArg<'_, K>)>;

/// Ordered handler registry keyed by [`Signal`].
pub struct HookBus<K> {
    next_id: u64,
    handlers: [Vec<(HookId, Handler<K>)>; 3],
}

impl<K> fmt::Debug for HookBus<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for signal in Signal::ALL {
            map.entry(&signal.name(), &self.len(signal));
        }
        map.finish()
    }
}

impl<K> Default for HookBus<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HookBus<K> {
    /// Create a bus with no handlers.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Append a handler for `signal`.
    pub fn on(
        &mut self,
        signal: Signal,
        handler: impl FnMut(&mut SignalArg<'_, K>) + 'static,
    ) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.handlers[signal.index()].push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered for `signal`.
    pub fn off(&mut self, signal: Signal, id: HookId) -> bool {
        let handlers = &mut self.handlers[signal.index()];
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Remove every handler of `signal`, including the default ones.
    pub fn clear(&mut self, signal: Signal) {
        self.handlers[signal.index()].clear();
    }

    /// Number of handlers registered for `signal`.
    pub fn len(&self, signal: Signal) -> usize {
        self.handlers[signal.index()].len()
    }

    /// Returns `true` if no signal has a handler.
    pub fn is_empty(&self) -> bool {
        self.handlers.iter().all(Vec::is_empty)
    }

    /// Run the handlers of `signal` in registration order.
    pub fn fire(&mut self, signal: Signal, arg: &mut SignalArg<'_, K>) {
        for (_, handler) in &mut self.handlers[signal.index()] {
            handler(arg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionId;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Vec2;

    fn fire_with(bus: &mut HookBus<u32>, signal: Signal) -> GestureEvent<u32> {
        let interaction = Interaction::new(InteractionId(1));
        let sample = InputSample::default();
        let mut event = GestureEvent::blank(InteractionId(1), "drag", Phase::Move);
        let mut arg = SignalArg {
            interaction: &interaction,
            sample: &sample,
            action: "drag",
            phase: Phase::Move,
            element: None,
            related: None,
            page: Point::ZERO,
            client: Point::ZERO,
            coords: PointerCoords::default(),
            starting: false,
            ending: false,
            delta_source: DeltaSource::Page,
            event: &mut event,
        };
        bus.fire(signal, &mut arg);
        event
    }

    #[test]
    fn signal_names_round_trip() {
        for signal in Signal::ALL {
            assert_eq!(signal.name().parse::<Signal>(), Ok(signal));
        }
        assert_eq!("set-xy".parse::<Signal>(), Ok(Signal::SetXy));
        assert_eq!("move".parse::<Signal>(), Err(UnknownSignal));
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = HookBus::new();
        for n in 0..3 {
            let seen = Rc::clone(&seen);
            bus.on(Signal::New, move |_| seen.borrow_mut().push(n));
        }

        fire_with(&mut bus, Signal::New);

        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn later_handler_overwrites_same_field() {
        let mut bus = HookBus::new();
        bus.on(Signal::SetDelta, |arg| arg.event.delta = Vec2::new(1.0, 1.0));
        bus.on(Signal::SetDelta, |arg| arg.event.delta.x = 2.0);

        let event = fire_with(&mut bus, Signal::SetDelta);

        assert_eq!(event.delta, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn only_handlers_of_fired_signal_run() {
        let mut bus = HookBus::new();
        bus.on(Signal::SetXy, |arg| arg.event.speed = 1.0);
        bus.on(Signal::New, |arg| arg.event.speed = 2.0);

        let event = fire_with(&mut bus, Signal::SetXy);

        assert_eq!(event.speed, 1.0);
    }

    #[test]
    fn off_removes_only_the_given_handler() {
        let mut bus = HookBus::new();
        let a = bus.on(Signal::New, |arg| arg.event.dt = 1.0);
        let b = bus.on(Signal::New, |arg| arg.event.duration = 1.0);

        assert!(!bus.off(Signal::SetXy, a));
        assert!(bus.off(Signal::New, a));
        assert!(!bus.off(Signal::New, a));
        assert_eq!(bus.len(Signal::New), 1);

        let event = fire_with(&mut bus, Signal::New);
        assert_eq!(event.dt, 0.0);
        assert_eq!(event.duration, 1.0);

        assert!(bus.off(Signal::New, b));
        assert!(bus.is_empty());
    }

    #[test]
    fn clear_drops_all_handlers_of_a_signal() {
        let mut bus: HookBus<u32> = HookBus::new();
        bus.on(Signal::SetDelta, |_| {});
        bus.on(Signal::SetDelta, |_| {});
        bus.on(Signal::New, |_| {});

        bus.clear(Signal::SetDelta);

        assert_eq!(bus.len(Signal::SetDelta), 0);
        assert_eq!(bus.len(Signal::New), 1);
    }
}
