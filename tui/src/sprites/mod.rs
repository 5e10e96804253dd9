//! Easter Egg Sprites
//!
//! Small decorations drawn on top of the logo:
//! - Swimming squids with jellyfish-style propulsion
//! - Floating particles drifting up from the bottom edge
//! - Hearts that pop out when two squids meet
//!
//! Every sprite advances and draws itself once per tick and reports when it
//! is finished; the [`SpriteManager`] owns them and prunes finished ones.

mod heart;
pub mod manager;
mod particle;
mod squid;

use rand::Rng;

use crate::canvas::Canvas;

pub use heart::{Heart, HEART_LIFETIME};
pub use manager::SpriteManager;
pub use particle::{weight_for_climb, Particle};
pub use squid::{swim_band, Heading, Propulsion, Squid, SQUID_WIDTH};

/// One animated decoration
#[derive(Clone, Debug)]
pub enum AnimatedObject {
    Squid(Squid),
    Particle(Particle),
    Heart(Heart),
}

impl AnimatedObject {
    /// Advance one tick and queue this frame's drawing
    ///
    /// Squids and hearts still draw on the tick they finish (a squid that
    /// far off screen clips to nothing); particles stop drawing once they
    /// pass the top row.
    pub fn tick_and_draw<R: Rng>(&mut self, canvas: &mut Canvas, rng: &mut R) {
        match self {
            AnimatedObject::Squid(squid) => {
                if squid.is_finished() {
                    return;
                }
                squid.step(rng, canvas.size());
                squid.draw(canvas);
            }
            AnimatedObject::Particle(particle) => particle.tick_and_draw(canvas),
            AnimatedObject::Heart(heart) => heart.tick_and_draw(canvas),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            AnimatedObject::Squid(squid) => squid.is_finished(),
            AnimatedObject::Particle(particle) => particle.is_finished(),
            AnimatedObject::Heart(heart) => heart.is_finished(),
        }
    }

    /// The squid inside, if this is one
    pub fn as_squid(&self) -> Option<&Squid> {
        match self {
            AnimatedObject::Squid(squid) => Some(squid),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnimatedObject::Squid(_) => "squid",
            AnimatedObject::Particle(_) => "particle",
            AnimatedObject::Heart(_) => "heart",
        }
    }
}

impl From<Squid> for AnimatedObject {
    fn from(squid: Squid) -> Self {
        AnimatedObject::Squid(squid)
    }
}

impl From<Particle> for AnimatedObject {
    fn from(particle: Particle) -> Self {
        AnimatedObject::Particle(particle)
    }
}

impl From<Heart> for AnimatedObject {
    fn from(heart: Heart) -> Self {
        AnimatedObject::Heart(heart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_finished_flag_is_sticky() {
        let mut canvas = Canvas::fixed(40, 30);
        let mut rng = StdRng::seed_from_u64(0);
        let mut objects: Vec<AnimatedObject> = vec![
            Squid::placed(48.9, 20.0, Heading::Right, 0.4, 30).into(),
            Particle::new(5.0, 0.1, 0.0, 0.15, '.', 180).into(),
            Heart::new(5.0, 5.0, 0.0).into(),
        ];

        for _ in 0..HEART_LIFETIME {
            canvas.erase();
            for object in &mut objects {
                object.tick_and_draw(&mut canvas, &mut rng);
            }
        }
        assert!(objects.iter().all(AnimatedObject::is_finished));

        for _ in 0..10 {
            canvas.erase();
            let blank = canvas.pending().len();
            for object in &mut objects {
                object.tick_and_draw(&mut canvas, &mut rng);
                assert!(object.is_finished());
            }
            assert_eq!(canvas.pending().len(), blank);
        }
    }

    #[test]
    fn test_as_squid_filters_by_variant() {
        let squid: AnimatedObject = Squid::placed(0.0, 0.0, Heading::Left, 0.2, 20).into();
        let heart: AnimatedObject = Heart::new(0.0, 0.0, 0.0).into();
        assert!(squid.as_squid().is_some());
        assert!(heart.as_squid().is_none());
        assert_eq!(heart.kind(), "heart");
    }
}
