use tracing::{info, warn};
use uuid::Uuid;

use deckforge_core::models::slide::SlideRecord;

use crate::client::TextGenerator;
use crate::error::GeminiError;
use crate::extract::extract_slides;
use crate::prompt::compose_prompt;

/// Run one generation: compose the prompt, call the model, extract slides.
pub fn generate_slides(
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<Vec<SlideRecord>, GeminiError> {
    let generation_id = Uuid::new_v4();
    let prompt = compose_prompt(topic);
    info!(generation_id = %generation_id, prompt_len = prompt.len(), "starting slide generation");

    let text = generator.generate_text(&prompt)?;

    let slides = extract_slides(&text).inspect_err(|e| {
        warn!(generation_id = %generation_id, error = %e, "could not extract slides");
    })?;

    info!(generation_id = %generation_id, slides = slides.len(), "slide generation complete");
    Ok(slides)
}
