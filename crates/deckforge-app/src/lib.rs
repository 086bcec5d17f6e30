//! deckforge-app library root.
//!
//! The session, its commands and the shell live here so integration tests
//! can drive them with in-memory generators and image sources; `main.rs`
//! only wires them to the terminal.

pub mod cli;
pub mod commands;
pub mod config;
pub mod shell;
pub mod state;
