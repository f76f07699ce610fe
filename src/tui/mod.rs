//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the snippet core builds without terminal crates
//! (`--no-default-features`).

pub mod app;
pub mod crossterm;
pub mod render;
pub mod terminal_guard;

pub use app::{App, EventResult};
