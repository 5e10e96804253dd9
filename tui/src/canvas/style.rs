//! Styled Writes
//!
//! A style is a 256-color foreground index plus at most one weight flag.
//! [`write_styled`] clips text to the screen and appends one
//! position + style + text + reset sequence.

use std::fmt;

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::Command;
use unicode_width::UnicodeWidthChar;

/// Text weight; the terminal only gets one of these per write
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

impl Weight {
    fn attribute(self) -> Attribute {
        match self {
            Weight::Normal => Attribute::Reset,
            Weight::Bold => Attribute::Bold,
            Weight::Dim => Attribute::Dim,
        }
    }
}

/// Foreground color index (1-255) and weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    color: u8,
    weight: Weight,
}

impl Style {
    /// Normal-weight style; the index is clamped into 1..=255
    pub fn new(color: i32) -> Self {
        Self {
            color: clamp_color(color),
            weight: Weight::Normal,
        }
    }

    pub fn bold(self) -> Self {
        self.with_weight(Weight::Bold)
    }

    pub fn dim(self) -> Self {
        self.with_weight(Weight::Dim)
    }

    pub fn with_weight(self, weight: Weight) -> Self {
        Self { weight, ..self }
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// Clamp any integer into the valid 256-color foreground range
pub fn clamp_color(color: i32) -> u8 {
    color.clamp(1, 255) as u8
}

/// Fit `text` starting at `col` into a line `width` cells wide
///
/// Returns the first visible column and the visible text, or `None` when
/// nothing would be shown. Cells left of column 0 are cut off, as is
/// anything past the right edge.
pub fn clip_horizontal(text: &str, col: i32, width: u16) -> Option<(u16, String)> {
    let width = i32::from(width);
    if col >= width {
        return None;
    }

    let mut x = col;
    let mut first = None;
    let mut visible = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as i32;
        if x + w > width {
            break;
        }
        if x >= 0 {
            first.get_or_insert(x);
            visible.push(ch);
        }
        x += w;
    }

    match first {
        Some(start) if !visible.is_empty() => Some((start as u16, visible)),
        _ => None,
    }
}

/// Append one styled write to `out`, dropping it when out of bounds
///
/// Rows outside `0..height` and columns at or past `width` draw nothing.
pub fn write_styled(
    out: &mut String,
    (width, height): (u16, u16),
    row: i32,
    col: i32,
    text: &str,
    style: Style,
) {
    if row < 0 || row >= i32::from(height) {
        return;
    }
    let Some((start, visible)) = clip_horizontal(text, col, width) else {
        return;
    };
    // Writing ANSI into a String cannot fail.
    let _ = emit(out, row as u16, start, &visible, style);
}

fn emit(out: &mut String, row: u16, col: u16, text: &str, style: Style) -> fmt::Result {
    MoveTo(col, row).write_ansi(out)?;
    SetAttribute(style.weight.attribute()).write_ansi(out)?;
    SetForegroundColor(Color::AnsiValue(style.color)).write_ansi(out)?;
    Print(text).write_ansi(out)?;
    SetAttribute(Attribute::Reset).write_ansi(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_clamping() {
        assert_eq!(Style::new(0).color(), 1);
        assert_eq!(Style::new(-40).color(), 1);
        assert_eq!(Style::new(300).color(), 255);
        assert_eq!(Style::new(216).color(), 216);
    }

    #[test]
    fn test_single_weight() {
        let style = Style::new(10).bold().dim();
        assert_eq!(style.weight(), Weight::Dim);
    }

    #[test]
    fn test_write_sequence() {
        let mut out = String::new();
        write_styled(&mut out, (80, 24), 2, 5, "hi", Style::new(216).bold());
        assert_eq!(out, "\x1b[3;6H\x1b[1m\x1b[38;5;216mhi\x1b[0m");
    }

    #[test]
    fn test_normal_and_dim_codes() {
        let mut out = String::new();
        write_styled(&mut out, (80, 24), 0, 0, "a", Style::new(252));
        write_styled(&mut out, (80, 24), 0, 0, "b", Style::new(252).dim());
        assert!(out.contains("\x1b[0m\x1b[38;5;252ma"));
        assert!(out.contains("\x1b[2m\x1b[38;5;252mb"));
    }

    #[test]
    fn test_out_of_bounds_rows_draw_nothing() {
        let mut out = String::new();
        for row in [-5, -1, 24, 25, 1000] {
            write_styled(&mut out, (80, 24), row, 3, "text", Style::new(7));
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_out_of_bounds_cols_draw_nothing() {
        let mut out = String::new();
        write_styled(&mut out, (80, 24), 3, 80, "text", Style::new(7));
        write_styled(&mut out, (80, 24), 3, 500, "text", Style::new(7));
        write_styled(&mut out, (80, 24), 3, -4, "text", Style::new(7));
        write_styled(&mut out, (80, 24), 3, 0, "", Style::new(7));
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncates_right_edge() {
        assert_eq!(clip_horizontal("abcdef", 76, 80), Some((76, "abcd".to_string())));
        assert_eq!(clip_horizontal("abcdef", 79, 80), Some((79, "a".to_string())));
    }

    #[test]
    fn test_clips_left_edge() {
        assert_eq!(clip_horizontal("abcdef", -2, 80), Some((0, "cdef".to_string())));
    }

    #[test]
    fn test_wide_glyph_not_split() {
        // U+4E2D is two cells wide
        assert_eq!(clip_horizontal("a\u{4e2d}", 78, 80), Some((78, "a".to_string())));
    }
}
