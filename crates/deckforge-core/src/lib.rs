//! deckforge-core
//!
//! Pure domain types for slide decks: slide records, text styling, and the
//! editable per-template state. No network or file I/O lives here.

pub mod editor;
pub mod error;
pub mod models;
