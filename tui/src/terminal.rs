//! Terminal Session
//!
//! Raw mode + alternate screen for the lifetime of a [`TerminalGuard`],
//! non-blocking key polling, and the interrupt flag raised by SIGINT and
//! SIGTERM. The guard restores the terminal when dropped, so every exit
//! path (quit, Ctrl+C, signal, error) leaves the shell usable. A panic hook
//! covers the abort case.

use std::fmt;
use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, Command};
use crossterm::style::{Attribute, ResetColor, SetAttribute};
use crossterm::terminal::{
    self, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use signal_hook::consts::{SIGINT, SIGTERM};

/// Why the main loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shutdown {
    /// The quit key was pressed
    Quit,
    /// Ctrl+C (arrives as a key event while in raw mode)
    Interrupt,
}

/// Source of shutdown requests, polled once per tick
pub trait KeySource {
    /// Drain pending input without blocking
    fn poll_shutdown(&mut self) -> io::Result<Option<Shutdown>>;
}

/// Keyboard input from the controlling terminal
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn poll_shutdown(&mut self) -> io::Result<Option<Shutdown>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(reason) = shutdown_for_key(&key) {
                    return Ok(Some(reason));
                }
            }
        }
        Ok(None)
    }
}

/// Map a key press to a shutdown request; everything else is ignored
pub fn shutdown_for_key(key: &KeyEvent) -> Option<Shutdown> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Shutdown::Interrupt),
        KeyCode::Char('q') if !ctrl => Some(Shutdown::Quit),
        _ => None,
    }
}

/// Raise `flag` on SIGINT or SIGTERM
///
/// The main loop checks the flag at each tick boundary, so a signal ends
/// the run through the normal shutdown path.
pub fn register_interrupt_signals(flag: &Arc<AtomicBool>) -> io::Result<()> {
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(flag))?;
    }
    tracing::debug!("Interrupt signal handlers registered");
    Ok(())
}

/// Hide the terminal's scrollbar (xterm private mode 30)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideScrollbar;

impl Command for HideScrollbar {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?30l")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Show the terminal's scrollbar again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowScrollbar;

impl Command for ShowScrollbar {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?30h")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Holds the terminal in screensaver mode until dropped
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    /// Enable raw mode, switch to the alternate screen, hide the cursor
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(
            out,
            EnterAlternateScreen,
            HideScrollbar,
            DisableLineWrap,
            cursor::Hide
        ) {
            let _ = restore(&mut out);
            return Err(e);
        }
        tracing::debug!("Terminal entered screensaver mode");
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore(&mut self.out) {
            tracing::warn!(error = %e, "Failed to fully restore terminal");
        }
    }
}

fn restore(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        EndSynchronizedUpdate,
        ResetColor,
        SetAttribute(Attribute::Reset),
        cursor::Show,
        EnableLineWrap,
        ShowScrollbar,
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}

/// Restore the terminal before the default panic message is printed
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore(&mut io::stdout());
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_q_quits() {
        let press = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(shutdown_for_key(&press), Some(Shutdown::Quit));
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let press = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(shutdown_for_key(&press), Some(Shutdown::Interrupt));
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in [KeyCode::Char('Q'), KeyCode::Char('c'), KeyCode::Esc, KeyCode::Enter] {
            let press = key(code, KeyModifiers::NONE, KeyEventKind::Press);
            assert_eq!(shutdown_for_key(&press), None, "{code:?}");
        }
        let ctrl_q = key(KeyCode::Char('q'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(shutdown_for_key(&ctrl_q), None);
    }

    #[test]
    fn test_scrollbar_sequences() {
        let mut hide = String::new();
        HideScrollbar.write_ansi(&mut hide).unwrap();
        assert_eq!(hide, "\x1b[?30l");

        let mut show = String::new();
        ShowScrollbar.write_ansi(&mut show).unwrap();
        assert_eq!(show, "\x1b[?30h");
    }

    #[cfg(unix)]
    #[test]
    fn test_sigterm_raises_flag() {
        use std::sync::atomic::Ordering;

        let flag = Arc::new(AtomicBool::new(false));
        register_interrupt_signals(&flag).unwrap();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_release_ignored() {
        let release = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(shutdown_for_key(&release), None);
    }
}
