//! Swimming Squid
//!
//! The mascot crosses the screen horizontally while a two-phase propulsion
//! cycle moves it vertically: a slow sink (`Drifting`) followed by a short
//! upward burst (`Zipping`), like a jellyfish pulse.

use rand::Rng;

use crate::canvas::{Canvas, Style};
use crate::theme::SQUID_PEACH;

/// Body rows; eyes are the missing quadrants in the corner blocks
const SQUID_BODY: [&str; 2] = [
    " \u{2590}\u{259b}\u{2588}\u{2588}\u{2588}\u{259c}\u{258c} ",
    "\u{259d}\u{259c}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{259b}\u{2598}",
];

/// Two leg frames, swapped for the walk cycle
const SQUID_LEGS: [&str; 2] = [
    "  \u{2598}\u{2598} \u{259d}\u{259d}  ",
    "  \u{259d}\u{259d} \u{2598}\u{2598}  ",
];

/// Sprite width in columns
pub const SQUID_WIDTH: i32 = 9;

/// Downward acceleration per tick while drifting
const DRIFT_ACCEL: f64 = 0.01;
/// Terminal sink speed
const MAX_SINK: f64 = 0.15;
/// Upward speed during a zip
const ZIP_VELOCITY: f64 = -0.55;
/// Small upward carry-over when a zip ends
const POST_ZIP_NUDGE: f64 = -0.1;

/// Horizontal speed range (columns per tick)
const SPEED_RANGE: (f64, f64) = (0.2, 0.4);
/// Ticks spent drifting before the next zip
const DRIFT_TICKS: (u32, u32) = (15, 35);
/// Ticks a zip lasts
const ZIP_TICKS: (u32, u32) = (10, 18);

/// Leg frame period while zipping / drifting
const ZIP_LEG_PERIOD: u64 = 3;
const DRIFT_LEG_PERIOD: u64 = 10;

/// Propulsion phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propulsion {
    /// Sinking gently
    Drifting,
    /// Shooting upward
    Zipping,
}

/// Which way the squid crosses the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Right,
    Left,
}

/// Vertical band the squid is kept in: below the verb line, above the agenda
pub fn swim_band(screen_height: u16) -> (f64, f64) {
    let h = i32::from(screen_height);
    (f64::from(h / 2 + 3), f64::from(h - 8))
}

/// A swimming mascot
#[derive(Clone, Debug)]
pub struct Squid {
    x: f64,
    y: f64,
    dx: f64,
    vy: f64,
    heading: Heading,
    propulsion: Propulsion,
    /// Ticks left in the current propulsion phase
    countdown: u32,
    /// Ticks lived; drives the leg animation
    frame: u64,
    finished: bool,
}

impl Squid {
    /// Spawn just off a random edge, somewhere in the swim band
    pub fn spawn<R: Rng>(rng: &mut R, screen: (u16, u16)) -> Self {
        let (width, height) = screen;
        let heading = if rng.gen_bool(0.5) {
            Heading::Right
        } else {
            Heading::Left
        };
        let x = match heading {
            Heading::Right => f64::from(-SQUID_WIDTH),
            Heading::Left => f64::from(width),
        };
        let (top, bottom) = swim_band(height);
        let y = rng.gen_range(top as i32..=(bottom as i32).max(top as i32));
        let speed = rng.gen_range(SPEED_RANGE.0..SPEED_RANGE.1);
        let drift = rng.gen_range(DRIFT_TICKS.0..=DRIFT_TICKS.1);

        tracing::debug!(?heading, y, speed, "Squid spawned");
        Self::placed(x, f64::from(y), heading, speed, drift)
    }

    /// A drifting squid at an exact position
    pub fn placed(x: f64, y: f64, heading: Heading, speed: f64, drift_ticks: u32) -> Self {
        let dx = match heading {
            Heading::Right => speed.abs(),
            Heading::Left => -speed.abs(),
        };
        Self {
            x,
            y,
            dx,
            vy: 0.0,
            heading,
            propulsion: Propulsion::Drifting,
            countdown: drift_ticks.max(1),
            frame: 0,
            finished: false,
        }
    }

    /// Advance one tick of motion; no-op once finished
    pub fn step<R: Rng>(&mut self, rng: &mut R, screen: (u16, u16)) {
        if self.finished {
            return;
        }
        self.frame += 1;

        match self.propulsion {
            Propulsion::Drifting => {
                self.countdown = self.countdown.saturating_sub(1);
                self.vy = (self.vy + DRIFT_ACCEL).min(MAX_SINK);
                if self.countdown == 0 {
                    self.propulsion = Propulsion::Zipping;
                    self.countdown = rng.gen_range(ZIP_TICKS.0..=ZIP_TICKS.1);
                }
            }
            Propulsion::Zipping => {
                self.vy = ZIP_VELOCITY;
                self.countdown = self.countdown.saturating_sub(1);
                if self.countdown == 0 {
                    self.propulsion = Propulsion::Drifting;
                    self.vy = POST_ZIP_NUDGE;
                    self.countdown = rng.gen_range(DRIFT_TICKS.0..=DRIFT_TICKS.1);
                }
            }
        }

        let (width, height) = screen;
        let (top, bottom) = swim_band(height);
        self.x += self.dx;
        // Bottom first, so a band squeezed by a short screen pins to the top.
        self.y = (self.y + self.vy).min(bottom).max(top);

        let gone = match self.heading {
            Heading::Right => self.x > f64::from(width) + f64::from(SQUID_WIDTH),
            Heading::Left => self.x < -f64::from(SQUID_WIDTH),
        };
        if gone {
            tracing::debug!(frame = self.frame, "Squid swam off screen");
            self.finished = true;
        }
    }

    /// Draw body and current legs at the squid's position
    pub fn draw(&self, canvas: &mut Canvas) {
        let style = Style::new(i32::from(SQUID_PEACH)).bold();
        let (col, row) = (self.x as i32, self.y as i32);
        for (i, line) in SQUID_BODY.iter().enumerate() {
            canvas.write(row + i as i32, col, line, style);
        }
        canvas.write(row + SQUID_BODY.len() as i32, col, self.legs(), style);
    }

    /// Leg frame for the current tick; flaps faster while zipping
    pub fn legs(&self) -> &'static str {
        let period = match self.propulsion {
            Propulsion::Zipping => ZIP_LEG_PERIOD,
            Propulsion::Drifting => DRIFT_LEG_PERIOD,
        };
        SQUID_LEGS[((self.frame / period) % 2) as usize]
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn vy(&self) -> f64 {
        self.vy
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn propulsion(&self) -> Propulsion {
        self.propulsion
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
