//! Session management
//!
//! The terminal session controller: takes over the terminal, moves the
//! marker in response to keys, and hands the terminal back on exit.
//!
//! Only one session may be active per process. The SIGINT hook has no way to
//! carry context, so it is bound to the active session's quit flag while the
//! session runs and unbound on teardown.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{self, Event};
use signal_hook::consts::SIGINT;
use signal_hook::SigId;
use thiserror::Error;
use tracing::{debug, info, trace};

use super::cursor::{Bounds, Position};
use crate::config::Config;
use crate::ui::{Action, KeyMapper, RawTerminal, Renderer};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Another session is already active in this process")]
    AlreadyActive,

    #[error("Failed to register interrupt handler: {0}")]
    Signal(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Process-wide "a session is running" slot
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Whether a session currently owns the terminal
#[cfg(test)]
fn is_active() -> bool {
    ACTIVE.load(Ordering::SeqCst)
}

/// Source of input events for the run loop
pub trait EventSource {
    /// Block until one event is available
    fn read(&mut self) -> io::Result<Event>;
}

/// Events from the real terminal
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Claim on the active slot plus the SIGINT registration.
///
/// Dropping it unregisters the hook and frees the slot.
struct ActiveSession {
    sig_id: SigId,
}

impl ActiveSession {
    fn claim(quit: &Arc<AtomicBool>) -> Result<Self> {
        if ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::AlreadyActive);
        }

        // The hook only stores `true` into the flag
        match signal_hook::flag::register(SIGINT, Arc::clone(quit)) {
            Ok(sig_id) => {
                debug!("Session activated");
                Ok(Self { sig_id })
            }
            Err(e) => {
                ACTIVE.store(false, Ordering::SeqCst);
                Err(SessionError::Signal(e))
            }
        }
    }
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.sig_id);
        ACTIVE.store(false, Ordering::SeqCst);
        debug!("Session deactivated");
    }
}

/// A single interactive session
pub struct Session {
    /// Marker position
    pos: Position,
    /// Display size, fixed for the lifetime of the session
    bounds: Bounds,
    /// Termination flag, shared with the SIGINT hook
    quit: Arc<AtomicBool>,
    /// Marker glyph
    glyph: char,
    /// Usage line printed on row 0
    hint: String,
}

impl Session {
    /// Create a session with the marker centered in `bounds`
    pub fn new(bounds: Bounds, config: &Config) -> Self {
        Self {
            pos: Position::centered(bounds),
            bounds,
            quit: Arc::new(AtomicBool::new(false)),
            glyph: config.glyph,
            hint: config.hint.clone(),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    /// Take over the terminal, run until quit, then restore it
    pub fn run(mut self) -> Result<()> {
        let (terminal, active) = self.bootstrap()?;
        info!(
            "Session started: {}x{}, marker at {:?}",
            self.bounds.cols,
            self.bounds.rows,
            self.position()
        );

        let mut renderer = Renderer::new(io::stdout());
        let result = self.run_loop(&mut TerminalEvents, &mut renderer);

        let restored = Self::teardown(terminal, active);
        info!("Session ended at {:?}", self.position());
        result?;
        restored
    }

    /// Claim the active slot, then switch the terminal to raw mode
    fn bootstrap(&self) -> Result<(RawTerminal, ActiveSession)> {
        let active = ActiveSession::claim(&self.quit)?;
        let terminal = RawTerminal::enter()?;
        Ok((terminal, active))
    }

    fn teardown(mut terminal: RawTerminal, active: ActiveSession) -> Result<()> {
        drop(active);
        terminal.restore()?;
        Ok(())
    }

    /// Render, read one event, update; until the quit flag is set
    fn run_loop<E, W>(&mut self, events: &mut E, renderer: &mut Renderer<W>) -> Result<()>
    where
        E: EventSource,
        W: Write,
    {
        renderer.draw_hint(&self.hint, self.bounds)?;

        while !self.is_quitting() {
            renderer.draw_marker(self.pos, self.glyph)?;
            renderer.flush()?;

            let event = events.read()?;

            // Interrupted while blocked: leave without touching the position
            if self.is_quitting() {
                info!("Interrupt received");
                break;
            }

            renderer.erase(self.pos)?;
            self.update(KeyMapper::map_event(&event));
        }

        Ok(())
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Move(dir) => self.pos.step(dir),
            Action::Quit => {
                info!("Quit key pressed");
                self.quit.store(true, Ordering::SeqCst);
            }
            Action::Interrupt => {
                info!("Ctrl+C pressed");
                self.quit.store(true, Ordering::SeqCst);
            }
            Action::Ignore => {}
        }
        self.pos.clamp(self.bounds);
        trace!("{:?} -> {:?}", action, self.pos);
    }
}
