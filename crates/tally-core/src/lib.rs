//! Pure domain logic for Cloud Wars.
//!
//! Holds the category/count/percentage data model, the percentage allocator
//! that drives the display bars, display formatting helpers, the error
//! taxonomy, and CLI/persisted settings. Nothing in this crate performs I/O
//! apart from the settings persistence helpers.

pub mod allocator;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
