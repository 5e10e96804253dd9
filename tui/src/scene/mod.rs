//! Scene Composer
//!
//! Draws the static part of each frame: the shimmering logo, the
//! letter-spaced subtitle, the pulsing status verb, the agenda with its
//! escalating end line, and the date / WiFi footer.
//!
//! Composition is a pure function of elapsed time, screen size, config,
//! urgency and verb index. The same inputs always produce the same bytes.

mod logo;
pub mod urgency;

use unicode_width::UnicodeWidthStr;

use crate::canvas::{Canvas, Style};
use crate::config::ScreensaverConfig;
use crate::theme::{shimmer, GLOW_RAMP, NEUTRAL, SOFT_GRAY};

pub use logo::{logo_width, LOGO_LINES};
pub use urgency::{UrgencyBand, UrgencyLevel};

/// Rows reserved at the bottom: date line, WiFi line, one spare
const FOOTER_ROWS: i32 = 3;

/// Column for content `content_width` wide, centred on a screen `screen_width` wide
pub fn centered_col(screen_width: u16, content_width: usize) -> i32 {
    let content = i32::try_from(content_width).unwrap_or(i32::MAX);
    ((i32::from(screen_width) - content) / 2).max(0)
}

/// Vertical anchors for the upper block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub logo_top: i32,
    pub subtitle_row: i32,
    pub verb_row: i32,
    pub agenda_top: i32,
    pub date_row: i32,
    pub wifi_row: i32,
}

impl Layout {
    /// Anchors for a screen `height` rows tall with `agenda_len` entries
    pub fn new(height: u16, agenda_len: usize) -> Self {
        let h = i32::from(height);
        let logo_lines = LOGO_LINES.len() as i32;
        let logo_top = (h / 2 - logo_lines - 3).max(1);
        let subtitle_row = logo_top + logo_lines + 1;
        Self {
            logo_top,
            subtitle_row,
            verb_row: subtitle_row + 2,
            agenda_top: h - FOOTER_ROWS - agenda_len as i32 - 1,
            date_row: h - FOOTER_ROWS,
            wifi_row: h - 2,
        }
    }
}

/// Composes the static scene for one frame
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    config: &'a ScreensaverConfig,
}

impl<'a> Scene<'a> {
    pub fn new(config: &'a ScreensaverConfig) -> Self {
        Self { config }
    }

    /// Queue the whole static scene; call after [`Canvas::erase`]
    pub fn compose(&self, canvas: &mut Canvas, t: f64, verb_index: usize, urgency: UrgencyLevel) {
        let layout = Layout::new(canvas.height(), self.config.schedule.len());
        self.draw_logo(canvas, &layout, t);
        self.draw_subtitle(canvas, &layout, t);
        self.draw_verb(canvas, &layout, t, verb_index);
        self.draw_agenda(canvas, &layout, t, urgency);
        self.draw_footer(canvas, &layout);
    }

    /// Block logo; the shimmer wave's phase shifts per doubled row
    fn draw_logo(&self, canvas: &mut Canvas, layout: &Layout, t: f64) {
        let left = centered_col(canvas.width(), logo_width());
        for (i, line) in LOGO_LINES.iter().enumerate() {
            let row = layout.logo_top + i as i32;
            for (j, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let color = logo_glyph_color(i, j, t);
                let mut buf = [0u8; 4];
                canvas.write(
                    row,
                    left + j as i32,
                    ch.encode_utf8(&mut buf),
                    Style::new(i32::from(color)).bold(),
                );
            }
        }
    }

    fn draw_subtitle(&self, canvas: &mut Canvas, layout: &Layout, t: f64) {
        let subtitle = &self.config.subtitle;
        let left = centered_col(canvas.width(), subtitle.width());
        for (j, ch) in subtitle.chars().enumerate() {
            let color = shimmer(j as f64 * 0.4 + t * 0.3);
            let mut buf = [0u8; 4];
            canvas.write(
                layout.subtitle_row,
                left + j as i32,
                ch.encode_utf8(&mut buf),
                Style::new(i32::from(color)).bold(),
            );
        }
    }

    /// Status verb glowing through a four-step brightness ramp
    fn draw_verb(&self, canvas: &mut Canvas, layout: &Layout, t: f64, verb_index: usize) {
        let verbs = &self.config.verbs;
        let Some(verb) = verbs.get(verb_index % verbs.len().max(1)) else {
            return;
        };
        let glow = glow_step(t);
        canvas.write(
            layout.verb_row,
            centered_col(canvas.width(), verb.width()),
            verb,
            Style::new(i32::from(GLOW_RAMP[glow])),
        );
    }

    /// Agenda lines; the last one escalates with urgency
    fn draw_agenda(&self, canvas: &mut Canvas, layout: &Layout, t: f64, urgency: UrgencyLevel) {
        let entries = self.config.schedule.entries();
        let Some((end, rest)) = entries.split_last() else {
            return;
        };

        let neutral = Style::new(i32::from(NEUTRAL));
        for (i, entry) in rest.iter().enumerate() {
            let line = entry.line();
            canvas.write(
                layout.agenda_top + i as i32,
                centered_col(canvas.width(), line.width()),
                &line,
                neutral,
            );
        }

        let line = match urgency.message_index(self.config.go_home_messages.len()) {
            Some(idx) => end.line_with_label(&self.config.go_home_messages[idx]),
            None => end.line(),
        };
        canvas.write(
            layout.agenda_top + rest.len() as i32,
            centered_col(canvas.width(), line.width()),
            &line,
            urgency.band().style(t),
        );
    }

    fn draw_footer(&self, canvas: &mut Canvas, layout: &Layout) {
        let date = &self.config.date_line;
        if !date.is_empty() {
            canvas.write(
                layout.date_row,
                centered_col(canvas.width(), date.width()),
                date,
                Style::new(i32::from(SOFT_GRAY)),
            );
        }

        let wifi = &self.config.wifi_line;
        if !wifi.is_empty() {
            canvas.write(
                layout.wifi_row,
                centered_col(canvas.width(), wifi.width()),
                wifi,
                Style::new(i32::from(NEUTRAL)).bold(),
            );
        }
    }
}

/// Shimmer color of the logo glyph at (`line`, `column`)
///
/// The logo is drawn in doubled rows, so both rows of a pair share a phase.
pub fn logo_glyph_color(line: usize, column: usize, t: f64) -> u8 {
    let row_phase = (line / 2) as f64 * 0.5;
    shimmer(column as f64 * 0.3 + t * 0.4 + row_phase)
}

/// Index into [`GLOW_RAMP`] for elapsed time `t`
pub fn glow_step(t: f64) -> usize {
    let step = (((t * 0.5).sin() + 1.0) / 2.0 * 3.0) as usize;
    step.min(GLOW_RAMP.len() - 1)
}
