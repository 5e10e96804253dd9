//! Floating Particle
//!
//! A speck that rises from the bottom of the screen and brightens as it climbs.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::canvas::{Canvas, Style, Weight};
use crate::theme::WARM;

const GLYPHS: [char; 3] = ['·', '.', '·'];

/// Fraction of the screen climbed after which the particle turns bold
const BOLD_ABOVE: f64 = 0.7;
/// Fraction of the screen climbed after which it rises from dim to normal
const NORMAL_ABOVE: f64 = 0.3;

#[derive(Clone, Debug)]
pub struct Particle {
    x: f64,
    y: f64,
    dx: f64,
    speed: f64,
    glyph: char,
    color: u8,
    finished: bool,
}

impl Particle {
    /// Spawn on the bottom row at a random column
    pub fn spawn<R: Rng>(rng: &mut R, screen: (u16, u16)) -> Self {
        let (width, height) = screen;
        let right = (i32::from(width) - 3).max(2);
        let x = rng.gen_range(2..=right);
        let dx = rng.gen_range(-0.3..=0.3);
        let speed = rng.gen_range(0.05..=0.15);
        let glyph = *GLYPHS.choose(rng).unwrap_or(&'.');
        let color = *WARM.choose(rng).unwrap_or(&WARM[0]);
        Self::new(
            f64::from(x),
            f64::from(height) - 1.0,
            dx,
            speed,
            glyph,
            color,
        )
    }

    pub fn new(x: f64, y: f64, dx: f64, speed: f64, glyph: char, color: u8) -> Self {
        Self {
            x,
            y,
            dx,
            speed,
            glyph,
            color,
            finished: false,
        }
    }

    /// Rise one step and draw; a particle that has left the top draws nothing
    pub fn tick_and_draw(&mut self, canvas: &mut Canvas) {
        if self.finished {
            return;
        }
        self.y -= self.speed;
        self.x += self.dx;
        if self.y < 0.0 {
            self.finished = true;
            return;
        }

        let weight = weight_for_climb(self.y, canvas.height());
        let mut buf = [0u8; 4];
        canvas.write(
            self.y as i32,
            self.x as i32,
            self.glyph.encode_utf8(&mut buf),
            Style::new(i32::from(self.color)).with_weight(weight),
        );
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Weight by how far up the screen the particle has climbed: dim near the
/// bottom, bold near the top
pub fn weight_for_climb(y: f64, screen_height: u16) -> Weight {
    let climbed = 1.0 - y / f64::from(screen_height.max(1));
    if climbed > BOLD_ABOVE {
        Weight::Bold
    } else if climbed > NORMAL_ABOVE {
        Weight::Normal
    } else {
        Weight::Dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_on_bottom_row() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..30 {
            let p = Particle::spawn(&mut rng, (60, 20));
            assert_eq!(p.y(), 19.0);
            assert!(p.x() >= 2.0 && p.x() <= 57.0);
            assert!(p.speed >= 0.05 && p.speed <= 0.15);
            assert!(WARM.contains(&p.color));
        }
    }

    #[test]
    fn test_spawn_on_narrow_screen() {
        let mut rng = StdRng::seed_from_u64(12);
        let p = Particle::spawn(&mut rng, (3, 5));
        assert_eq!(p.x(), 2.0);
    }

    #[test]
    fn test_brightens_toward_top() {
        assert_eq!(weight_for_climb(38.0, 40), Weight::Dim);
        assert_eq!(weight_for_climb(20.0, 40), Weight::Normal);
        assert_eq!(weight_for_climb(2.0, 40), Weight::Bold);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(weight_for_climb(29.0, 40), Weight::Dim);
        assert_eq!(weight_for_climb(27.0, 40), Weight::Normal);
        assert_eq!(weight_for_climb(13.0, 40), Weight::Normal);
        assert_eq!(weight_for_climb(11.0, 40), Weight::Bold);
    }

    #[test]
    fn test_drawn_bold_near_top() {
        let mut canvas = Canvas::fixed(40, 40);
        let mut p = Particle::new(10.0, 2.0, 0.0, 0.1, '.', 180);
        canvas.erase();
        p.tick_and_draw(&mut canvas);
        assert!(canvas.pending().contains("\x1b[2;11H\x1b[1m\x1b[38;5;180m."));
    }

    #[test]
    fn test_finishes_above_top_without_drawing() {
        let mut canvas = Canvas::fixed(40, 40);
        let mut p = Particle::new(10.0, 0.05, 0.0, 0.1, '.', 180);
        canvas.erase();
        let before = canvas.pending().len();
        p.tick_and_draw(&mut canvas);
        assert!(p.is_finished());
        assert_eq!(canvas.pending().len(), before);
    }
}
