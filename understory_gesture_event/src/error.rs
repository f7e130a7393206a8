// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::event::Phase;

/// Error returned when an interaction cannot produce the requested event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureEventError {
    /// A phase other than [`Phase::Start`] was requested before any event of
    /// the gesture was recorded as the previous event.
    InvalidPhaseSequence {
        /// The requested phase.
        phase: Phase,
    },
    /// The interaction has no recorded press.
    NoPointerDown,
}

impl fmt::Display for GestureEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhaseSequence { phase } => {
                write!(f, "`{phase}` event requested without a previous event")
            }
            Self::NoPointerDown => f.write_str("interaction has no recorded pointer down"),
        }
    }
}

impl core::error::Error for GestureEventError {}
