// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate snapshots and per-sample pointer velocity.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture_event::coords::{DeltaSource, PointerCoords, PointerDelta};
//!
//! let prev = PointerCoords::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0), 1000.0);
//! let cur = PointerCoords::new(Point::new(30.0, 40.0), Point::new(30.0, 40.0), 1500.0);
//!
//! let delta = PointerDelta::between(&prev, &cur);
//! assert_eq!(delta.time_stamp, 500.0);
//! // 50px in half a second
//! assert_eq!(delta.get(DeltaSource::Page).speed, 100.0);
//! ```

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};

/// Smallest time step, in seconds, used when deriving velocities.
///
/// Two samples with the same time stamp would otherwise produce an infinite
/// velocity.
pub const MIN_VELOCITY_DT: f64 = 0.001;

/// Coordinate space that deltas and velocities are anchored to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DeltaSource {
    /// Document coordinates (scroll-independent).
    #[default]
    Page,
    /// Viewport coordinates.
    Client,
}

impl DeltaSource {
    /// The configuration name of this delta source.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for DeltaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`DeltaSource`] name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownDeltaSource;

impl fmt::Display for UnknownDeltaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown delta source, expected \"page\" or \"client\"")
    }
}

impl core::error::Error for UnknownDeltaSource {}

impl FromStr for DeltaSource {
    type Err = UnknownDeltaSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "client" => Ok(Self::Client),
            _ => Err(UnknownDeltaSource),
        }
    }
}

/// Raw, origin-independent pointer position at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerCoords {
    /// Position in page coordinates.
    pub page: Point,
    /// Position in client coordinates.
    pub client: Point,
    /// Time of the sample in milliseconds.
    pub time_stamp: f64,
}

impl PointerCoords {
    /// Create a snapshot from page and client positions.
    pub const fn new(page: Point, client: Point, time_stamp: f64) -> Self {
        Self {
            page,
            client,
            time_stamp,
        }
    }

    /// Position in the given coordinate space.
    pub const fn get(&self, source: DeltaSource) -> Point {
        match source {
            DeltaSource::Page => self.page,
            DeltaSource::Client => self.client,
        }
    }
}

/// Speed and velocity in one coordinate space, in pixels per second.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Magnitude of the velocity.
    pub speed: f64,
    /// Horizontal component.
    pub vx: f64,
    /// Vertical component.
    pub vy: f64,
}

impl Velocity {
    /// Derive a velocity from a displacement over `dt` seconds.
    pub fn from_displacement(displacement: Vec2, dt: f64) -> Self {
        Self {
            speed: displacement.hypot() / dt,
            vx: displacement.x / dt,
            vy: displacement.y / dt,
        }
    }

    /// The velocity as a vector.
    pub const fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }
}

/// Latest per-sample motion record of an interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerDelta {
    /// Velocity in page coordinates.
    pub page: Velocity,
    /// Velocity in client coordinates.
    pub client: Velocity,
    /// Milliseconds between the two samples the record was computed from.
    pub time_stamp: f64,
}

impl PointerDelta {
    /// Compute the motion between two consecutive samples.
    ///
    /// The elapsed time is clamped to [`MIN_VELOCITY_DT`] before dividing.
    pub fn between(prev: &PointerCoords, cur: &PointerCoords) -> Self {
        let time_stamp = cur.time_stamp - prev.time_stamp;
        let dt = (time_stamp / 1000.0).max(MIN_VELOCITY_DT);

        Self {
            page: Velocity::from_displacement(cur.page - prev.page, dt),
            client: Velocity::from_displacement(cur.client - prev.client, dt),
            time_stamp,
        }
    }

    /// Velocity record for the given coordinate space.
    pub const fn get(&self, source: DeltaSource) -> Velocity {
        match source {
            DeltaSource::Page => self.page,
            DeltaSource::Client => self.client,
        }
    }
}
