//! Terminal UI layer for Cloud Wars.
//!
//! Provides themes, the per-provider percentage bars, the dashboard header,
//! the tally view, and the main application event loop built on top of
//! [`ratatui`] for rendering the live tally in the terminal.

pub mod app;
pub mod components;
pub mod tally_view;
pub mod themes;

pub use tally_core as core;
