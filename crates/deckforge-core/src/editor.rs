//! Editable state behind each slide template.
//!
//! Mirrors what a template component keeps locally: the record being
//! edited, elements dropped onto it, and the image frames it can resize.

pub mod drag;
pub mod image;
pub mod template;
