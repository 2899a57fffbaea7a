//! Core session components.
//!
//! - **cursor**: marker position, display bounds and the move/clamp rules
//! - **session**: terminal session controller (bootstrap, run loop, teardown)
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── Position (row, col) clamped to Bounds
//! ├── quit flag (Arc<AtomicBool>, also written by the SIGINT hook)
//! └── ActiveSession (process-wide slot + signal registration)
//! ```

pub mod cursor;
pub mod session;
