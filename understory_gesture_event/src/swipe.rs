// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe classification from the velocity at release.
//!
//! A swipe is recognized when the last live event was fast enough and the
//! terminal event follows it closely. The direction is found by bucketing the
//! velocity angle into four overlapping 135° sectors centered on the cardinal
//! directions. Angles are measured in page orientation, so `+y` points down and
//! a straight-up flick has an angle of 270°.
//!
//! Sectors are evaluated as an ordered rule list: `left` and `up` first, then
//! `right` and `down`, each skipped when its opposite-axis neighbour (`left` for
//! `right`, `up` for `down`) already matched. Near the diagonals two flags can
//! be set at once.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_gesture_event::swipe::Swipe;
//!
//! // Fast flick to the upper left, released 16ms after the last move.
//! let swipe = Swipe::from_release(800.0, Vec2::new(-500.0, -500.0), 1000.0, 1016.0).unwrap();
//! assert!((swipe.angle - 225.0).abs() < 1e-9);
//! assert!(swipe.left && swipe.up);
//! assert!(!swipe.right && !swipe.down);
//! ```

use kurbo::Vec2;

use crate::event::GestureEvent;

/// Minimum speed of the last live event, in pixels per second.
pub const SWIPE_MIN_SPEED: f64 = 600.0;

/// Maximum delay between the last live event and release, in milliseconds.
pub const SWIPE_MAX_RELEASE_DELAY: f64 = 150.0;

/// Degrees each sector extends past its 90° quadrant on either side.
pub const SWIPE_OVERLAP: f64 = 22.5;

/// Cardinal direction of a swipe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Towards negative `x`.
    Left,
    /// Towards negative `y`.
    Up,
    /// Towards positive `x`.
    Right,
    /// Towards positive `y`.
    Down,
}

struct Rule {
    direction: SwipeDirection,
    /// Center of the sector in degrees.
    center: f64,
    excluded_by: Option<SwipeDirection>,
}

const RULES: [Rule; 4] = [
    Rule {
        direction: SwipeDirection::Left,
        center: 180.0,
        excluded_by: None,
    },
    Rule {
        direction: SwipeDirection::Up,
        center: 270.0,
        excluded_by: None,
    },
    Rule {
        direction: SwipeDirection::Right,
        center: 0.0,
        excluded_by: Some(SwipeDirection::Left),
    },
    Rule {
        direction: SwipeDirection::Down,
        center: 90.0,
        excluded_by: Some(SwipeDirection::Up),
    },
];

impl Rule {
    /// Whether `angle` (in `[0, 360)`) lies in `[center - 45 - overlap, center + 45 + overlap)`.
    fn contains(&self, angle: f64) -> bool {
        let start = self.center - 45.0 - SWIPE_OVERLAP;
        let mut offset = angle - start;
        if offset < 0.0 {
            offset += 360.0;
        } else if offset >= 360.0 {
            offset -= 360.0;
        }
        offset < 90.0 + 2.0 * SWIPE_OVERLAP
    }
}

/// A classified swipe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Swipe {
    /// Upward component matched.
    pub up: bool,
    /// Downward component matched.
    pub down: bool,
    /// Leftward component matched.
    pub left: bool,
    /// Rightward component matched.
    pub right: bool,
    /// Velocity angle in degrees, in `[0, 360)`.
    pub angle: f64,
    /// Speed of the last live event, in pixels per second.
    pub speed: f64,
    /// Velocity of the last live event, in pixels per second.
    pub velocity: Vec2,
}

impl Swipe {
    /// Classify the release that follows `prev`.
    ///
    /// `time_stamp` is the time of the terminal event being built. Returns
    /// `None` when the gesture was too slow or had already stopped.
    pub fn classify<K>(prev: &GestureEvent<K>, time_stamp: f64) -> Option<Self> {
        Self::from_release(prev.speed, prev.velocity, prev.time_stamp, time_stamp)
    }

    /// Classify a release from the raw motion of the last live event.
    pub fn from_release(
        speed: f64,
        velocity: Vec2,
        last_time_stamp: f64,
        release_time_stamp: f64,
    ) -> Option<Self> {
        if speed < SWIPE_MIN_SPEED || release_time_stamp - last_time_stamp > SWIPE_MAX_RELEASE_DELAY
        {
            return None;
        }

        let mut angle = velocity.atan2().to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }

        let mut swipe = Self {
            up: false,
            down: false,
            left: false,
            right: false,
            angle,
            speed,
            velocity,
        };
        for rule in &RULES {
            let excluded = rule.excluded_by.is_some_and(|other| swipe.is(other));
            if !excluded && rule.contains(angle) {
                swipe.set(rule.direction);
            }
        }
        Some(swipe)
    }

    /// Whether the given direction matched.
    pub fn is(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Up => self.up,
            SwipeDirection::Right => self.right,
            SwipeDirection::Down => self.down,
        }
    }

    /// Returns `true` when two directions matched.
    pub fn is_diagonal(&self) -> bool {
        (self.left || self.right) && (self.up || self.down)
    }

    fn set(&mut self, direction: SwipeDirection) {
        match direction {
            SwipeDirection::Left => self.left = true,
            SwipeDirection::Up => self.up = true,
            SwipeDirection::Right => self.right = true,
            SwipeDirection::Down => self.down = true,
        }
    }
}
