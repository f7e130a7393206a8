// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event construction from interaction state.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Vec2;

use crate::error::GestureEventError;
use crate::event::{GestureEvent, InputSample, Phase};
use crate::hooks::{HookBus, Signal, SignalArg};
use crate::interaction::{Interactable, Interaction};
use crate::options::Defaults;
use crate::swipe::Swipe;

/// Resolves the reference frame that event coordinates are made relative to.
///
/// Implemented for closures taking the interaction's target and the resolved
/// element.
pub trait OriginResolver<K> {
    /// Offset to subtract from absolute page and client coordinates.
    fn origin(&self, target: Option<&Interactable>, element: Option<K>) -> Vec2;
}

impl<K, F> OriginResolver<K> for F
where
    F: Fn(Option<&Interactable>, Option<K>) -> Vec2,
{
    fn origin(&self, target: Option<&Interactable>, element: Option<K>) -> Vec2 {
        self(target, element)
    }
}

/// Origin resolver that leaves coordinates untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ZeroOrigin;

impl<K> OriginResolver<K> for ZeroOrigin {
    fn origin(&self, _target: Option<&Interactable>, _element: Option<K>) -> Vec2 {
        Vec2::ZERO
    }
}

/// Default [`Signal::SetDelta`] handler.
///
/// - Start events report no motion.
/// - End events report the displacement since the raw gesture start.
/// - Other events report the motion since the previous event.
///
/// Uses the coordinate pair selected by [`SignalArg::delta_source`].
pub fn default_delta<K>(arg: &mut SignalArg<'_, K>) {
    let source = arg.delta_source;
    let position = arg.event.position(source);

    arg.event.delta = if arg.starting {
        Vec2::ZERO
    } else if arg.ending {
        position - arg.interaction.start_coords.get(source)
    } else {
        arg.interaction
            .prev_event
            .as_ref()
            .map_or(Vec2::ZERO, |prev| position - prev.position(source))
    };
}

/// Builds [`GestureEvent`]s and owns the hooks that extend them.
///
/// ## Minimal example
///
/// ```
/// use kurbo::{Point, Vec2};
/// use understory_gesture_event::coords::PointerCoords;
/// use understory_gesture_event::interaction::{Interaction, InteractionId};
/// use understory_gesture_event::{EventConstructor, InputSample, Phase};
///
/// let mut events: EventConstructor<u32> = EventConstructor::new();
/// let mut interaction = Interaction::new(InteractionId(1));
/// let sample = InputSample::default();
///
/// let at = |x: f64, y: f64, t: f64| PointerCoords::new(Point::new(x, y), Point::new(x, y), t);
///
/// interaction.pointer_down(Some(9), at(10.0, 10.0, 1000.0));
/// let start = events.construct(&interaction, &sample, "drag", Phase::Start, None, None).unwrap();
/// assert_eq!(start.event_type, "dragstart");
/// assert_eq!(start.delta, Vec2::ZERO);
/// interaction.push_event(start);
///
/// interaction.pointer_move(at(50.0, 20.0, 1200.0));
/// let moved = events.construct(&interaction, &sample, "drag", Phase::Move, None, None).unwrap();
/// assert_eq!(moved.page, Point::new(50.0, 20.0));
/// assert_eq!(moved.delta, Vec2::new(40.0, 10.0));
/// assert_eq!(moved.duration, 200.0);
/// ```
pub struct EventConstructor<K> {
    hooks: HookBus<K>,
    defaults: Defaults,
    origin: Box<dyn OriginResolver<K>>,
}

impl<K> fmt::Debug for EventConstructor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventConstructor")
            .field("hooks", &self.hooks)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + 'static> Default for EventConstructor<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + 'static> EventConstructor<K> {
    /// Create a constructor with default options, no origin offset, and the
    /// default delta handler registered.
    pub fn new() -> Self {
        Self::with_origin(ZeroOrigin)
    }

    /// Create a constructor that resolves origins with `origin`.
    pub fn with_origin(origin: impl OriginResolver<K> + 'static) -> Self {
        let mut hooks = HookBus::new();
        hooks.on(Signal::SetDelta, default_delta::<K>);
        Self {
            hooks,
            defaults: Defaults::default(),
            origin: Box::new(origin),
        }
    }

    /// Replace the fallback configuration used for interactions without a target.
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Fallback configuration.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Hooks fired during construction.
    pub fn hooks(&self) -> &HookBus<K> {
        &self.hooks
    }

    /// Hooks fired during construction, for registering extensions.
    pub fn hooks_mut(&mut self) -> &mut HookBus<K> {
        &mut self.hooks
    }

    /// Build the event for `phase` of `action` from the interaction's state.
    ///
    /// `element` defaults to [`Interaction::element`]. Start events read
    /// [`Interaction::start_coords`]; every other phase reads
    /// [`Interaction::cur_coords`]. End events keep the position of the
    /// previous event so a release never jumps.
    ///
    /// ## Errors
    ///
    /// - [`GestureEventError::NoPointerDown`] if no press was recorded.
    /// - [`GestureEventError::InvalidPhaseSequence`] for any phase but
    ///   [`Phase::Start`] when [`Interaction::prev_event`] is empty.
    pub fn construct(
        &mut self,
        interaction: &Interaction<K>,
        sample: &InputSample,
        action: &'static str,
        phase: Phase,
        element: Option<K>,
        related: Option<K>,
    ) -> Result<GestureEvent<K>, GestureEventError> {
        let (Some(&first_down), Some(&last_down)) =
            (interaction.down_times.first(), interaction.down_times.last())
        else {
            log::warn!("{action}{phase} requested for an interaction without a press");
            return Err(GestureEventError::NoPointerDown);
        };

        let starting = phase == Phase::Start;
        let ending = phase == Phase::End;
        if !starting && interaction.prev_event.is_none() {
            log::warn!("{action}{phase} requested before any event of the gesture");
            return Err(GestureEventError::InvalidPhaseSequence { phase });
        }

        let element = element.or(interaction.element);
        let delta_source = interaction.delta_source(&self.defaults);
        let origin = self.origin.origin(interaction.target.as_ref(), element);
        let coords = if starting {
            interaction.start_coords
        } else {
            interaction.cur_coords
        };

        let mut event = GestureEvent::blank(interaction.id, action, phase);
        event.modifiers = sample.modifiers;
        event.button = sample.button;
        event.buttons = sample.buttons;
        event.target = element;
        event.current_target = element;
        event.related_target = related;
        event.t0 = last_down;
        event.interactable = interaction.target.map(|target| target.id);

        let mut arg = SignalArg {
            interaction,
            sample,
            action,
            phase,
            element,
            related,
            page: coords.page - origin,
            client: coords.client - origin,
            coords,
            starting,
            ending,
            delta_source,
            event: &mut event,
        };

        self.hooks.fire(Signal::SetXy, &mut arg);

        match interaction.prev_event.as_ref().filter(|_| ending) {
            Some(prev) => {
                arg.event.page = prev.page;
                arg.event.client = prev.client;
            }
            None => {
                arg.event.page = arg.page;
                arg.event.client = arg.client;
            }
        }

        let start = interaction.start_coords;
        arg.event.page0 = start.page - origin;
        arg.event.client0 = start.client - origin;

        self.hooks.fire(Signal::SetDelta, &mut arg);

        let time_stamp = coords.time_stamp;
        arg.event.time_stamp = time_stamp;
        arg.event.dt = interaction.pointer_delta.time_stamp;
        arg.event.duration = time_stamp - first_down;

        let velocity = interaction.pointer_delta.get(delta_source);
        arg.event.speed = velocity.speed;
        arg.event.velocity = velocity.as_vec2();

        arg.event.swipe = if phase.classifies_swipe() {
            interaction
                .prev_event
                .as_ref()
                .and_then(|prev| Swipe::classify(prev, time_stamp))
        } else {
            None
        };
        if let Some(swipe) = &arg.event.swipe {
            log::debug!(
                "{action}{phase} swipe at {:.1}° ({:.0}px/s)",
                swipe.angle,
                swipe.speed
            );
        }

        self.hooks.fire(Signal::New, &mut arg);

        log::trace!(
            "built {} at page {:?} with delta {:?}",
            event.event_type,
            event.page,
            event.delta
        );
        Ok(event)
    }
}
