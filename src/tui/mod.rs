//! The configurator TUI — ratatui presentation of the selection controller.
//!
//! Three screens: recloser inventory, firmware versions, and the
//! configurator (service sidebar plus rendered layout). Read-only: the TUI
//! shows settings and their constraints, it never writes them back.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (`handle_key`, `apply_event`) + View (`draw`).
//! Immediate mode: each frame re-renders the current layout in the current
//! language, so switching language never refetches.

pub mod app;
pub mod box_drawing;
pub mod controls;
pub mod input;
pub mod layout;
pub mod runner;
