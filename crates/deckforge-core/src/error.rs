use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("slide index {index} out of range (deck has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("column {index} out of range (slide has {len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("card {index} out of range (slide has {len} cards)")]
    CardOutOfRange { index: usize, len: usize },

    #[error("image slot {0} does not exist on this slide")]
    NoImageSlot(usize),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
