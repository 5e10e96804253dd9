//! Theme and Colors
//!
//! 256-color palette indices. The warm band is the shimmer gradient used by
//! the logo, subtitle and particles; the rest are single-purpose accents.

// ============================================================================
// Shimmer Palette
// ============================================================================

/// Warm peach/sand/cream band the shimmer wave travels through
pub const WARM: [u8; 15] = [
    173, 179, 180, 186, 187, 216, 217, 223, 224, 230, 209, 215, 174, 138, 144,
];

/// Pick a warm color for a shimmer phase (radians)
///
/// `sin(phase)` is mapped from -1..1 onto the palette.
pub fn shimmer(phase: f64) -> u8 {
    let len = WARM.len();
    let idx = ((phase.sin() + 1.0) / 2.0 * len as f64) as usize % len;
    WARM[idx]
}

// ============================================================================
// Text Colors
// ============================================================================

/// Plain agenda text and the calm end line
pub const NEUTRAL: u8 = 252;

/// Date / venue line
pub const SOFT_GRAY: u8 = 245;

/// Brightest white (flash partner)
pub const BRIGHT_WHITE: u8 = 255;

/// Status verb glow, dim to bright
pub const GLOW_RAMP: [u8; 4] = [240, 245, 250, 255];

// ============================================================================
// Urgency Colors
// ============================================================================

/// Warm orange used by the gentle pulse
pub const PULSE_ORANGE: u8 = 216;

/// Alarm red
pub const WARNING_RED: u8 = 196;

/// Salmon partner of the warning pulse
pub const WARNING_SALMON: u8 = 209;

// ============================================================================
// Sprite Colors
// ============================================================================

/// Squid mascot - peach
pub const SQUID_PEACH: u8 = 216;

/// Fresh heart - pink
pub const HEART_PINK: u8 = 204;

/// Fading heart - red-shifted
pub const HEART_RED: u8 = 210;

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_shimmer_extremes() {
        assert_eq!(shimmer(-FRAC_PI_2), WARM[0]);
        // sin = 1 maps to len, which wraps back to the start
        assert_eq!(shimmer(FRAC_PI_2), WARM[0]);
        assert_eq!(shimmer(0.0), WARM[7]);
    }

    #[test]
    fn test_shimmer_always_in_palette() {
        for step in 0..200 {
            let c = shimmer(step as f64 * 0.37);
            assert!(WARM.contains(&c));
        }
    }
}
