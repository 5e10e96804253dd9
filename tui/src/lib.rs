//! Squid Screensaver - ambient terminal display for events
//!
//! Fills the terminal with a shimmering block logo, a rotating status verb
//! and the evening's agenda, whose final entry grows more insistent as the
//! end time approaches. Squids swim across now and then, particles drift
//! up from the floor, and hearts appear wherever two squids meet.
//!
//! # Architecture
//!
//! - **Canvas**: per-frame buffer of bounds-checked styled writes, flushed at once
//! - **Scene**: the static layer, a pure function of time, size and config
//! - **Sprites**: squids, particles and hearts plus their lifecycle manager
//! - **App**: the fixed-rate loop tying them together
//! - **Terminal**: raw mode guard and key polling

pub mod app;
pub mod canvas;
pub mod config;
pub mod scene;
pub mod sprites;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use canvas::{Canvas, Style, Weight};
pub use config::{ConfigError, ScreensaverConfig};
pub use scene::{Scene, UrgencyBand, UrgencyLevel};
pub use sprites::{AnimatedObject, SpriteManager};
pub use terminal::{KeySource, Shutdown};
