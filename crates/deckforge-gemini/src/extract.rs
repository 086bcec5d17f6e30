//! Slide extraction from free-form model output.
//!
//! The model is asked for a bare JSON array but routinely wraps it in
//! prose or code fences. Extraction takes everything from the first `[` to
//! the last `]` inclusive and parses that. Any other bracketed text before
//! the array will be swept into the slice and fail to parse.

use serde_json::Value;
use tracing::debug;

use deckforge_core::models::slide::SlideRecord;

use crate::error::GeminiError;

/// Find and parse the JSON array embedded in `text`.
///
/// Fails with [`GeminiError::NoJsonFound`] when either bracket is missing,
/// and [`GeminiError::InvalidStructure`] when the bracketed slice is not a
/// JSON array. Element shapes are not checked.
pub fn extract_json_array(text: &str) -> Result<Vec<Value>, GeminiError> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Err(GeminiError::NoJsonFound);
    };

    if start > end {
        return Err(GeminiError::InvalidStructure);
    }

    let slice = &text[start..=end];
    match serde_json::from_str::<Value>(slice) {
        Ok(Value::Array(items)) => {
            debug!(items = items.len(), slice_len = slice.len(), "extracted JSON array");
            Ok(items)
        }
        Ok(_) | Err(_) => Err(GeminiError::InvalidStructure),
    }
}

/// Extract slide records from model output, decoding each element leniently.
pub fn extract_slides(text: &str) -> Result<Vec<SlideRecord>, GeminiError> {
    Ok(extract_json_array(text)?
        .iter()
        .map(SlideRecord::from_value)
        .collect())
}
