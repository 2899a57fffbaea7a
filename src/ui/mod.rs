//! User interface rendering and input handling.
//!
//! - **renderer**: raw-mode lifecycle and drawing of the hint line and marker
//! - **keymapper**: keyboard input to session action mapping

pub mod keymapper;
pub mod renderer;

pub use keymapper::{Action, KeyMapper};
pub use renderer::{RawTerminal, Renderer};
