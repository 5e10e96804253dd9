//! Sprite Lifecycle
//!
//! Owns the active decorations. Per tick, in order:
//! 1. [`SpriteManager::maybe_spawn`] on a randomized timer
//! 2. [`SpriteManager::draw_all`] in stable insertion order
//! 3. [`SpriteManager::collide`] spawns hearts where squids meet
//! 4. [`SpriteManager::prune`] drops whatever finished this tick

use std::ops::RangeInclusive;

use rand::Rng;

use super::{AnimatedObject, Heart, Particle, Squid, SQUID_WIDTH};
use crate::canvas::Canvas;

/// Delay before the first timed spawn (seconds)
pub const FIRST_SPAWN_DELAY: RangeInclusive<f64> = 15.0..=35.0;

/// Delay between later spawns (seconds)
pub const SPAWN_INTERVAL: RangeInclusive<f64> = 10.0..=25.0;

/// Chance a timed spawn is a squid rather than particles
pub const SQUID_CHANCE: f64 = 0.65;

/// Particles per particle spawn
const PARTICLE_BURST: RangeInclusive<usize> = 1..=3;

/// Squids closer than this many rows (and one sprite width) are touching
pub const COLLISION_ROWS: f64 = 3.0;

/// Hearts only spawn when the first squid's frame is a multiple of this,
/// so a long encounter yields a heart now and then rather than every tick
pub const HEART_GATE_FRAMES: u64 = 20;

/// The active set of decorations plus the spawn timer
#[derive(Debug)]
pub struct SpriteManager {
    objects: Vec<AnimatedObject>,
    next_spawn_at: f64,
}

impl SpriteManager {
    /// Empty set with the first timed spawn 15-35s after `now`
    pub fn new<R: Rng>(rng: &mut R, now: f64) -> Self {
        Self::with_next_spawn(now + rng.gen_range(FIRST_SPAWN_DELAY))
    }

    /// Empty set with an explicit first spawn time
    pub fn with_next_spawn(next_spawn_at: f64) -> Self {
        Self {
            objects: Vec::new(),
            next_spawn_at,
        }
    }

    pub fn push(&mut self, object: impl Into<AnimatedObject>) {
        self.objects.push(object.into());
    }

    /// Add a squid just off a random edge
    pub fn spawn_squid<R: Rng>(&mut self, rng: &mut R, screen: (u16, u16)) {
        self.push(Squid::spawn(rng, screen));
    }

    /// Spawn a squid or a burst of particles once the timer has passed
    ///
    /// Returns `true` if something spawned.
    pub fn maybe_spawn<R: Rng>(&mut self, rng: &mut R, now: f64, screen: (u16, u16)) -> bool {
        if now <= self.next_spawn_at {
            return false;
        }

        if rng.gen_bool(SQUID_CHANCE) {
            self.spawn_squid(rng, screen);
        } else {
            let count = rng.gen_range(PARTICLE_BURST);
            tracing::debug!(count, "Particles spawned");
            for _ in 0..count {
                self.push(Particle::spawn(rng, screen));
            }
        }

        self.next_spawn_at = now + rng.gen_range(SPAWN_INTERVAL);
        true
    }

    /// Advance and draw every object, finished or not
    pub fn draw_all<R: Rng>(&mut self, canvas: &mut Canvas, rng: &mut R) {
        for object in &mut self.objects {
            object.tick_and_draw(canvas, rng);
        }
    }

    /// Spawn a heart above each pair of active squids that are touching
    ///
    /// Returns the number of hearts spawned.
    pub fn collide<R: Rng>(&mut self, rng: &mut R) -> usize {
        let hearts: Vec<Heart> = {
            let squids: Vec<&Squid> = self.squids().collect();
            let mut hearts = Vec::new();
            for (i, a) in squids.iter().enumerate() {
                for b in &squids[i + 1..] {
                    if touching(a, b) && a.frame() % HEART_GATE_FRAMES == 0 {
                        let (x, y) = heart_origin(a, b);
                        hearts.push(Heart::spawn(rng, x, y));
                    }
                }
            }
            hearts
        };

        let count = hearts.len();
        if count > 0 {
            tracing::debug!(count, "Squids met, hearts spawned");
        }
        self.objects.extend(hearts.into_iter().map(AnimatedObject::Heart));
        count
    }

    /// Drop every finished object
    pub fn prune(&mut self) {
        self.objects.retain(|object| !object.is_finished());
    }

    /// Active (unfinished) squids in stable order
    pub fn squids(&self) -> impl Iterator<Item = &Squid> {
        self.objects
            .iter()
            .filter_map(AnimatedObject::as_squid)
            .filter(|squid| !squid.is_finished())
    }

    pub fn objects(&self) -> &[AnimatedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn next_spawn_at(&self) -> f64 {
        self.next_spawn_at
    }
}

/// Within one sprite width horizontally and a few rows vertically
pub fn touching(a: &Squid, b: &Squid) -> bool {
    (a.x() - b.x()).abs() < f64::from(SQUID_WIDTH) && (a.y() - b.y()).abs() < COLLISION_ROWS
}

/// Midpoint of the pair, centred on the sprite and one row above the higher squid
fn heart_origin(a: &Squid, b: &Squid) -> (f64, f64) {
    let x = ((a.x() + b.x()) / 2.0).trunc() + f64::from(SQUID_WIDTH / 2);
    let y = a.y().min(b.y()).trunc() - 1.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::Heading;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Two squids side by side, stepped until the first one's frame is `frames`
    fn meeting_pair(frames: u64) -> SpriteManager {
        let mut rng = StdRng::seed_from_u64(9);
        let mut a = Squid::placed(30.0, 25.0, Heading::Right, 0.2, 35);
        let mut b = Squid::placed(34.0, 25.0, Heading::Left, 0.2, 35);
        for _ in 0..frames {
            a.step(&mut rng, (80, 40));
            b.step(&mut rng, (80, 40));
        }
        let mut manager = SpriteManager::with_next_spawn(f64::MAX);
        manager.push(a);
        manager.push(b);
        manager
    }

    #[test]
    fn test_collision_spawns_one_heart_on_gate_frame() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = meeting_pair(20);
        assert_eq!(manager.collide(&mut rng), 1);
        assert_eq!(manager.len(), 3);

        let heart = match &manager.objects()[2] {
            AnimatedObject::Heart(heart) => heart.clone(),
            other => panic!("expected heart, got {}", other.kind()),
        };
        let squids: Vec<&Squid> = manager.squids().collect();
        let expected_x = ((squids[0].x() + squids[1].x()) / 2.0).trunc() + 4.0;
        assert_eq!(heart.x(), expected_x);
        assert_eq!(heart.y(), squids[0].y().min(squids[1].y()).trunc() - 1.0);
    }

    #[test]
    fn test_collision_gated_off_frame() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = meeting_pair(19);
        assert_eq!(manager.collide(&mut rng), 0);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_far_apart_squids_do_not_collide() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = SpriteManager::with_next_spawn(f64::MAX);
        manager.push(Squid::placed(10.0, 25.0, Heading::Right, 0.2, 35));
        manager.push(Squid::placed(19.0, 25.0, Heading::Left, 0.2, 35));
        manager.push(Squid::placed(10.0, 28.0, Heading::Left, 0.2, 35));
        // Frame 0 passes the gate, so only distance decides
        assert_eq!(manager.collide(&mut rng), 0);
    }

    #[test]
    fn test_timer_spawns_and_resamples() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut manager = SpriteManager::with_next_spawn(10.0);

        assert!(!manager.maybe_spawn(&mut rng, 10.0, (80, 40)));
        assert!(manager.is_empty());

        assert!(manager.maybe_spawn(&mut rng, 10.5, (80, 40)));
        assert!(!manager.is_empty() && manager.len() <= 3);
        let next = manager.next_spawn_at();
        assert!(next >= 20.5 && next <= 35.5);
    }

    #[test]
    fn test_spawn_mix_roughly_matches_odds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut squid_spawns = 0;
        for _ in 0..1000 {
            let mut manager = SpriteManager::with_next_spawn(0.0);
            manager.maybe_spawn(&mut rng, 1.0, (80, 40));
            if manager.squids().count() == 1 {
                squid_spawns += 1;
            }
        }
        assert!((600..=700).contains(&squid_spawns), "{squid_spawns}");
    }

    #[test]
    fn test_first_spawn_delay() {
        let mut rng = StdRng::seed_from_u64(5);
        let manager = SpriteManager::new(&mut rng, 100.0);
        assert!(manager.next_spawn_at() >= 115.0 && manager.next_spawn_at() <= 135.0);
    }

    #[test]
    fn test_prune_keeps_active() {
        let mut manager = SpriteManager::with_next_spawn(f64::MAX);
        let mut canvas = Canvas::fixed(80, 40);
        let mut rng = StdRng::seed_from_u64(6);
        manager.push(Particle::new(5.0, 0.05, 0.0, 0.1, '.', 180));
        manager.push(Particle::new(5.0, 30.0, 0.0, 0.1, '.', 180));

        manager.draw_all(&mut canvas, &mut rng);
        assert_eq!(manager.len(), 2, "finished objects survive until pruned");
        manager.prune();
        assert_eq!(manager.len(), 1);
    }
}
