//! Floating Heart
//!
//! Pops out when two squids meet, floats upward and fades out over a fixed
//! lifetime.

use rand::Rng;

use crate::canvas::{Canvas, Style};
use crate::theme::{HEART_PINK, HEART_RED};

/// Lifetime in ticks
pub const HEART_LIFETIME: u32 = 40;

const RISE_SPEED: f64 = -0.12;
const MAX_DRIFT: f64 = 0.1;

#[derive(Clone, Debug)]
pub struct Heart {
    x: f64,
    y: f64,
    dx: f64,
    life: u32,
    finished: bool,
}

impl Heart {
    /// A heart with a random sideways drift
    pub fn spawn<R: Rng>(rng: &mut R, x: f64, y: f64) -> Self {
        Self::new(x, y, rng.gen_range(-MAX_DRIFT..=MAX_DRIFT))
    }

    pub fn new(x: f64, y: f64, dx: f64) -> Self {
        Self {
            x,
            y,
            dx,
            life: HEART_LIFETIME,
            finished: false,
        }
    }

    /// Float one step and draw
    ///
    /// The tick that exhausts the lifetime still draws its faintest frame.
    pub fn tick_and_draw(&mut self, canvas: &mut Canvas) {
        if self.finished {
            return;
        }
        self.y += RISE_SPEED;
        self.x += self.dx;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.finished = true;
        }

        canvas.write(self.y as i32, self.x as i32, "♥", self.style());
    }

    /// Bold pink while fresh, then normal and finally dim red
    pub fn style(&self) -> Style {
        if self.life > 20 {
            Style::new(i32::from(HEART_PINK)).bold()
        } else if self.life > 10 {
            Style::new(i32::from(HEART_RED))
        } else {
            Style::new(i32::from(HEART_RED)).dim()
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
