// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_event --heading-base-level=0

//! Understory Gesture Event: phase-aware gesture events for UI interactions.
//!
//! This crate turns the state of an ongoing pointer interaction into one
//! normalized [`GestureEvent`] per phase (start, move, end, inertia start). Each
//! event carries:
//!
//! - page and client positions relative to an origin (for example the position
//!   of the element being dragged),
//! - the delta since the previous event, or the total displacement on end,
//! - timing (`t0`, `dt`, `duration`) and velocity in the configured
//!   [`DeltaSource`](coords::DeltaSource),
//! - a [`Swipe`](swipe::Swipe) classification on release when the pointer was
//!   moving fast enough.
//!
//! ## Modules
//!
//! - [`coords`]: coordinate snapshots and per-sample velocity.
//! - [`interaction`]: the session state an event is built from.
//! - [`event`]: the event record, phases, and input samples.
//! - [`hooks`]: the extension points fired during construction.
//! - [`swipe`]: release classification.
//!
//! ## Workflow
//!
//! 1) Record pointer input on an [`Interaction`](interaction::Interaction)
//!    (`pointer_down`, `pointer_move`).
//! 2) Call [`EventConstructor::construct`] for the phase being entered.
//! 3) Dispatch the event, then store it with
//!    [`Interaction::push_event`](interaction::Interaction::push_event) so the
//!    next event can measure against it.
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_gesture_event::coords::PointerCoords;
//! use understory_gesture_event::interaction::{Interaction, InteractionId};
//! use understory_gesture_event::{EventConstructor, InputSample, Phase};
//!
//! let at = |x: f64, y: f64, t: f64| PointerCoords::new(Point::new(x, y), Point::new(x, y), t);
//! let mut events: EventConstructor<u32> = EventConstructor::new();
//! let mut interaction = Interaction::new(InteractionId(1));
//! let sample = InputSample::default();
//!
//! interaction.pointer_down(Some(1), at(0.0, 0.0, 0.0));
//! let start = events.construct(&interaction, &sample, "drag", Phase::Start, None, None).unwrap();
//! interaction.push_event(start);
//!
//! // A quick flick to the right.
//! interaction.pointer_move(at(40.0, 0.0, 16.0));
//! let moved = events.construct(&interaction, &sample, "drag", Phase::Move, None, None).unwrap();
//! assert_eq!(moved.delta, Vec2::new(40.0, 0.0));
//! interaction.push_event(moved);
//!
//! let end = events.construct(&interaction, &sample, "drag", Phase::End, None, None).unwrap();
//! let swipe = end.swipe.unwrap();
//! assert!(swipe.right);
//! ```
//!
//! ## Extending construction
//!
//! Features that need extra fields or a different delta register handlers on
//! [`EventConstructor::hooks_mut`]. See the [`hooks`] module for the signals and
//! the order they fire in.
//!
//! ## Integration with Understory
//!
//! - Use `understory_responder` to route the built events along a responder chain.
//! - The element key type `K` is typically the same node id used for routing.
//!
//! ## Features
//!
//! - `std` (default): use the standard library for floating point math.
//! - `libm`: use `libm` instead, for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod constructor;
mod error;
mod options;

pub mod coords;
pub mod event;
pub mod hooks;
pub mod interaction;
pub mod swipe;

pub use constructor::{EventConstructor, OriginResolver, ZeroOrigin, default_delta};
pub use error::GestureEventError;
pub use event::{GestureEvent, InputSample, Phase};
pub use options::{Defaults, InteractableOptions};
