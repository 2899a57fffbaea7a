//! Terminal renderer using crossterm
//!
//! `RawTerminal` owns the raw-mode lifecycle; `Renderer` draws the hint line
//! and the marker glyph onto any writer.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use crate::core::cursor::{Bounds, Position};

/// Raw-mode terminal handle
///
/// Restores the terminal once, either through `restore` or on drop.
pub struct RawTerminal {
    /// Whether raw mode is currently on
    active: bool,
}

impl RawTerminal {
    /// Enter raw mode: no echo, no line buffering, cursor hidden
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, drop restores even if the setup below fails
        let term = Self { active: true };

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        debug!("raw mode enabled");
        Ok(term)
    }

    /// Current display size
    pub fn size() -> io::Result<Bounds> {
        terminal::size().map(Bounds::from)
    }

    /// Leave raw mode. Later calls are no-ops.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(stdout, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = stdout.flush();

        // Disable raw mode - this is the part that matters for the shell
        terminal::disable_raw_mode()?;
        debug!("raw mode disabled");
        Ok(())
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Draws the session onto a writer
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print the usage line at the top-left, cut to the display width
    pub fn draw_hint(&mut self, hint: &str, bounds: Bounds) -> io::Result<()> {
        let line = truncate_to_width(hint, bounds.cols as usize);
        queue!(self.out, MoveTo(0, 0), Print(line))?;
        self.out.flush()
    }

    /// Draw the marker glyph
    pub fn draw_marker(&mut self, pos: Position, glyph: char) -> io::Result<()> {
        queue!(self.out, MoveTo(pos.col, pos.row), Print(glyph))
    }

    /// Blank the cell at `pos`
    pub fn erase(&mut self, pos: Position) -> io::Result<()> {
        queue!(self.out, MoveTo(pos.col, pos.row), Print(' '))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Longest prefix of `text` that fits in `max_width` display cells
fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            return &text[..idx];
        }
        width += w;
    }
    text
}
