pub mod slide;
pub mod style;
