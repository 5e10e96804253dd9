//! Frame Canvas
//!
//! Accumulates a whole frame of styled writes in memory and hands it to the
//! terminal in a single write, so the screen never shows half a frame.
//!
//! The canvas requeries the terminal size on every [`Canvas::erase`]; the
//! terminal may have been resized since the previous frame.

mod style;

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use crossterm::Command;

pub use style::{clamp_color, clip_horizontal, write_styled, Style, Weight};

/// Size assumed when the terminal cannot report one (columns, rows)
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Where the canvas gets its dimensions from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
    /// Ask the controlling terminal
    Terminal,
    /// Fixed dimensions (headless rendering and tests)
    Fixed { width: u16, height: u16 },
}

impl SizeSource {
    fn query(self) -> (u16, u16) {
        match self {
            SizeSource::Terminal => size_or_fallback(crossterm::terminal::size()),
            SizeSource::Fixed { width, height } => (width, height),
        }
    }
}

/// Resolve a terminal size query, substituting [`FALLBACK_SIZE`] on failure
///
/// A zero-sized answer counts as a failure.
pub fn size_or_fallback(result: io::Result<(u16, u16)>) -> (u16, u16) {
    match result {
        Ok((width, height)) if width > 0 && height > 0 => (width, height),
        Ok(size) => {
            tracing::debug!(?size, "Terminal reported an empty size, using fallback");
            FALLBACK_SIZE
        }
        Err(e) => {
            tracing::debug!(error = %e, "Terminal size query failed, using fallback");
            FALLBACK_SIZE
        }
    }
}

/// Double-buffered frame: pending writes plus current dimensions
#[derive(Debug)]
pub struct Canvas {
    pending: String,
    width: u16,
    height: u16,
    source: SizeSource,
}

impl Canvas {
    /// Canvas sized by the real terminal
    pub fn new() -> Self {
        Self::with_source(SizeSource::Terminal)
    }

    /// Canvas with fixed dimensions
    pub fn fixed(width: u16, height: u16) -> Self {
        Self::with_source(SizeSource::Fixed { width, height })
    }

    pub fn with_source(source: SizeSource) -> Self {
        let (width, height) = source.query();
        Self {
            pending: String::new(),
            width,
            height,
            source,
        }
    }

    /// Switch where dimensions come from; takes effect on the next erase
    pub fn set_source(&mut self, source: SizeSource) {
        self.source = source;
    }

    /// Start a new frame: drop pending writes, clear screen, home cursor
    ///
    /// Dimensions are requeried here, so layout must read [`Canvas::size`]
    /// after calling this.
    pub fn erase(&mut self) {
        self.pending.clear();
        let (width, height) = self.source.query();
        self.width = width;
        self.height = height;
        // Writing ANSI into a String cannot fail.
        let _ = BeginSynchronizedUpdate.write_ansi(&mut self.pending);
        let _ = MoveTo(0, 0).write_ansi(&mut self.pending);
        let _ = Clear(ClearType::All).write_ansi(&mut self.pending);
    }

    /// Queue `text` at (`row`, `col`); out-of-bounds writes are dropped
    pub fn write(&mut self, row: i32, col: i32, text: &str, style: Style) {
        write_styled(
            &mut self.pending,
            (self.width, self.height),
            row,
            col,
            text,
            style,
        );
    }

    /// Send the whole frame in one write, then start empty
    pub fn flush(&mut self, out: &mut impl Write) -> io::Result<()> {
        let _ = EndSynchronizedUpdate.write_ansi(&mut self.pending);
        let result = out
            .write_all(self.pending.as_bytes())
            .and_then(|()| out.flush());
        self.pending.clear();
        result
    }

    /// Current (columns, rows)
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Instructions queued since the last erase/flush
    pub fn pending(&self) -> &str {
        &self.pending
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_erase_clears_and_homes() {
        let mut canvas = Canvas::fixed(40, 10);
        canvas.write(1, 1, "left over", Style::new(3));
        canvas.erase();
        assert!(!canvas.pending().contains("left over"));
        assert!(canvas.pending().contains("\x1b[1;1H\x1b[2J"));
    }

    #[test]
    fn test_flush_is_one_write_and_resets() {
        struct CountingWriter {
            writes: usize,
            bytes: Vec<u8>,
        }
        impl Write for CountingWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.writes += 1;
                self.bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut canvas = Canvas::fixed(40, 10);
        canvas.erase();
        canvas.write(2, 2, "frame", Style::new(9));
        let mut out = CountingWriter {
            writes: 0,
            bytes: Vec::new(),
        };
        canvas.flush(&mut out).unwrap();

        assert_eq!(out.writes, 1);
        assert!(String::from_utf8(out.bytes).unwrap().contains("frame"));
        assert!(canvas.pending().is_empty());
    }

    #[test]
    fn test_size_fallback() {
        let failed = Err(io::Error::new(io::ErrorKind::Other, "not a tty"));
        assert_eq!(size_or_fallback(failed), FALLBACK_SIZE);
        assert_eq!(size_or_fallback(Ok((0, 0))), FALLBACK_SIZE);
        assert_eq!(size_or_fallback(Ok((120, 40))), (120, 40));
    }

    #[test]
    fn test_writes_respect_current_size() {
        let mut canvas = Canvas::fixed(10, 5);
        canvas.erase();
        let before = canvas.pending().len();
        canvas.write(5, 0, "below", Style::new(1));
        canvas.write(0, 10, "right", Style::new(1));
        assert_eq!(canvas.pending().len(), before);
    }
}
