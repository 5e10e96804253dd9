//! Main Application
//!
//! The App drives the fixed-rate loop. One tick:
//! 1. Rotate the status verb when its interval has passed
//! 2. Erase the canvas (requerying its size), maybe spawn new sprites
//! 3. Compose the static scene
//! 4. Advance and draw every sprite on top of it
//! 5. Spawn hearts for touching squids, prune finished sprites
//!
//! `run` then flushes the frame, sleeps for the tick interval and checks
//! the interrupt flag and the keyboard for a shutdown request.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveTime;
use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::config::ScreensaverConfig;
use crate::scene::{Scene, UrgencyLevel};
use crate::sprites::SpriteManager;
use crate::terminal::{KeySource, Shutdown};

/// Main application state
pub struct App {
    /// Resolved event configuration
    config: ScreensaverConfig,
    /// Frame being built
    canvas: Canvas,
    /// Active decorations
    sprites: SpriteManager,
    /// The one random source for spawns, propulsion and drift
    rng: StdRng,
    /// Current status verb
    verb_index: usize,
    /// Elapsed seconds at the last verb switch
    last_verb_switch: f64,
    /// Loop start; elapsed time is measured from here
    started: Instant,
    /// Raised from outside (signal handlers) to stop at the next boundary
    interrupted: Arc<AtomicBool>,
}

impl App {
    /// Create the app with one squid already on its way in
    pub fn new(config: ScreensaverConfig, canvas: Canvas, mut rng: StdRng) -> Self {
        let mut sprites = SpriteManager::new(&mut rng, 0.0);
        sprites.spawn_squid(&mut rng, canvas.size());

        Self {
            config,
            canvas,
            sprites,
            rng,
            verb_index: 0,
            last_verb_switch: 0.0,
            started: Instant::now(),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that ends [`App::run`] with [`Shutdown::Interrupt`] once set
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Loop until `keys` reports a shutdown or the interrupt flag is set
    ///
    /// # Errors
    ///
    /// Fails if a frame cannot be written or input cannot be read.
    pub fn run<W: Write, K: KeySource>(
        &mut self,
        out: &mut W,
        keys: &mut K,
    ) -> anyhow::Result<Shutdown> {
        tracing::info!(
            tick_ms = self.config.tick.as_millis() as u64,
            agenda = self.config.schedule.len(),
            "Screensaver running"
        );
        self.started = Instant::now();

        loop {
            let t = self.started.elapsed().as_secs_f64();
            let wall = chrono::Local::now().time();
            self.tick(t, wall);

            self.canvas
                .flush(out)
                .context("Failed to write frame to terminal")?;

            std::thread::sleep(self.config.tick);

            if self.interrupted.load(Ordering::SeqCst) {
                tracing::info!("Interrupt signal received");
                return Ok(Shutdown::Interrupt);
            }
            if let Some(reason) = keys
                .poll_shutdown()
                .context("Failed to read keyboard input")?
            {
                tracing::info!(?reason, "Shutdown requested");
                return Ok(reason);
            }
        }
    }

    /// Build one frame for elapsed time `t` (seconds) and wall clock `wall`
    ///
    /// The frame is left in the canvas for the caller to flush.
    pub fn tick(&mut self, t: f64, wall: NaiveTime) {
        self.rotate_verb(t);

        // Erase first so spawns see this frame's size; spawning draws nothing
        self.canvas.erase();
        self.sprites
            .maybe_spawn(&mut self.rng, t, self.canvas.size());

        let urgency = UrgencyLevel::at(&self.config.urgency, wall);
        Scene::new(&self.config).compose(&mut self.canvas, t, self.verb_index, urgency);

        self.sprites.draw_all(&mut self.canvas, &mut self.rng);
        self.sprites.collide(&mut self.rng);
        self.sprites.prune();
    }

    fn rotate_verb(&mut self, t: f64) {
        if t - self.last_verb_switch > self.config.verb_interval.as_secs_f64() {
            self.verb_index = (self.verb_index + 1) % self.config.verbs.len().max(1);
            self.last_verb_switch = t;
            tracing::trace!(verb_index = self.verb_index, "Verb rotated");
        }
    }

    pub fn config(&self) -> &ScreensaverConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn sprites(&self) -> &SpriteManager {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut SpriteManager {
        &mut self.sprites
    }

    pub fn verb_index(&self) -> usize {
        self.verb_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SizeSource;
    use crate::sprites::Heading;
    use rand::SeedableRng;

    fn app() -> App {
        App::new(
            ScreensaverConfig::default(),
            Canvas::fixed(140, 50),
            StdRng::seed_from_u64(21),
        )
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_starts_with_one_squid() {
        let app = app();
        assert_eq!(app.sprites().squids().count(), 1);
        let next = app.sprites().next_spawn_at();
        assert!((15.0..=35.0).contains(&next));
    }

    #[test]
    fn test_verb_rotates_after_interval() {
        let mut app = app();
        app.tick(0.0, noon());
        assert_eq!(app.verb_index(), 0);
        app.tick(8.0, noon());
        assert_eq!(app.verb_index(), 0, "needs strictly more than the interval");
        app.tick(8.1, noon());
        assert_eq!(app.verb_index(), 1);
        app.tick(12.0, noon());
        assert_eq!(app.verb_index(), 1);
        app.tick(16.2, noon());
        assert_eq!(app.verb_index(), 2);
    }

    #[test]
    fn test_verb_wraps() {
        let mut app = App::new(
            ScreensaverConfig::from_json_str(r#"{"verbs": ["a", "b"]}"#).unwrap(),
            Canvas::fixed(80, 30),
            StdRng::seed_from_u64(1),
        );
        app.tick(9.0, noon());
        app.tick(18.0, noon());
        assert_eq!(app.verb_index(), 0);
    }

    #[test]
    fn test_tick_leaves_frame_in_canvas() {
        let mut app = app();
        app.tick(1.0, noon());
        assert!(app.canvas().pending().contains("Reticulating splines..."));
    }

    #[test]
    fn test_spawns_use_resized_width() {
        let mut spawned = 0;
        for seed in 0..40 {
            let mut app = App::new(
                ScreensaverConfig::default(),
                Canvas::fixed(80, 40),
                StdRng::seed_from_u64(seed),
            );
            *app.sprites_mut() = SpriteManager::with_next_spawn(0.0);
            app.canvas_mut().set_source(SizeSource::Fixed {
                width: 200,
                height: 40,
            });

            app.tick(1.0, noon());
            for squid in app.sprites().squids() {
                spawned += 1;
                match squid.heading() {
                    Heading::Left => assert!(squid.x() > 195.0, "x = {}", squid.x()),
                    Heading::Right => assert!(squid.x() < 0.0, "x = {}", squid.x()),
                }
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn test_interrupt_flag_ends_run() {
        struct NeverQuit;
        impl KeySource for NeverQuit {
            fn poll_shutdown(&mut self) -> std::io::Result<Option<Shutdown>> {
                Ok(None)
            }
        }

        let mut app = App::new(
            ScreensaverConfig::from_json_str(r#"{"tick_ms": 1}"#).unwrap(),
            Canvas::fixed(80, 24),
            StdRng::seed_from_u64(2),
        );
        app.interrupt_flag().store(true, Ordering::SeqCst);

        let mut out = Vec::new();
        assert_eq!(app.run(&mut out, &mut NeverQuit).unwrap(), Shutdown::Interrupt);
        assert!(!out.is_empty(), "the current frame is still flushed");
    }
}
