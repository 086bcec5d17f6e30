//! deckforge-export
//!
//! Terminal previews of slide templates and PPTX generation.

pub mod error;
pub mod images;
pub mod layout;
pub mod package;
pub mod pptx;
pub mod render;
pub mod styles;
