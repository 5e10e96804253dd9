//! Go-Home Urgency
//!
//! Urgency is 0.0 until the ramp starts, then grows linearly, reaching 1.0
//! at the final agenda time and continuing past it. The band it falls in
//! picks the end line's styling; past 1.0 it also picks the message.

use chrono::NaiveTime;

use crate::canvas::Style;
use crate::config::{minutes_of_day, UrgencyWindow};
use crate::theme::{BRIGHT_WHITE, NEUTRAL, PULSE_ORANGE, WARNING_RED, WARNING_SALMON};

/// Messages advance this many times per unit of urgency past 1.0
const MESSAGES_PER_UNIT: f64 = 5.0;

/// Dimensionless closeness to the end of the event
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct UrgencyLevel(f64);

impl UrgencyLevel {
    pub fn new(value: f64) -> Self {
        Self(value.max(0.0))
    }

    /// Urgency at a wall-clock time of day
    pub fn at(window: &UrgencyWindow, now: NaiveTime) -> Self {
        let now_minutes = minutes_of_day(now);
        if now_minutes < window.start_minutes {
            return Self(0.0);
        }
        Self::new((now_minutes - window.start_minutes) / window.ramp_minutes)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn band(self) -> UrgencyBand {
        match self.0 {
            u if u < 0.2 => UrgencyBand::Calm,
            u if u < 0.5 => UrgencyBand::Pulse,
            u if u < 0.8 => UrgencyBand::Warning,
            u if u < 1.0 => UrgencyBand::Flash,
            _ => UrgencyBand::Overtime,
        }
    }

    /// Which go-home message to show, once past the end time
    ///
    /// `None` before 1.0 or when there are no messages.
    pub fn message_index(self, message_count: usize) -> Option<usize> {
        if self.0 < 1.0 || message_count == 0 {
            return None;
        }
        let step = ((self.0 - 1.0) * MESSAGES_PER_UNIT).floor() as usize;
        Some(step.min(message_count - 1))
    }
}

/// Styling intensity of the end line
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyBand {
    /// [0, 0.2): plain neutral text
    Calm,
    /// [0.2, 0.5): slow pulse between white and orange
    Pulse,
    /// [0.5, 0.8): faster pulse in warning reds
    Warning,
    /// [0.8, 1.0): hard flash between red and white
    Flash,
    /// [1.0, ∞): flashing, and the label is replaced by a go-home message
    Overtime,
}

impl UrgencyBand {
    /// End-line style at elapsed time `t` (seconds)
    pub fn style(self, t: f64) -> Style {
        match self {
            UrgencyBand::Calm => Style::new(i32::from(NEUTRAL)),
            UrgencyBand::Pulse => {
                let pulse = ((t * 1.5).sin() + 1.0) / 2.0;
                let color = if pulse < 0.5 { NEUTRAL } else { PULSE_ORANGE };
                Style::new(i32::from(color)).bold()
            }
            UrgencyBand::Warning => {
                let pulse = ((t * 3.0).sin() + 1.0) / 2.0;
                let color = if pulse > 0.3 { WARNING_RED } else { WARNING_SALMON };
                Style::new(i32::from(color)).bold()
            }
            UrgencyBand::Flash | UrgencyBand::Overtime => {
                let on = (t * 4.0) as i64 % 2 == 1;
                let color = if on { WARNING_RED } else { BRIGHT_WHITE };
                Style::new(i32::from(color)).bold()
            }
        }
    }
}
