//! deckforge-gemini
//!
//! Prompt composition, Gemini `generateContent` calls, and extraction of
//! slide records from free-form model output.

pub mod client;
pub mod error;
pub mod extract;
pub mod generate;
pub mod prompt;
