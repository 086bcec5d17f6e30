//! User-facing commands over a [`DeckSession`].
//!
//! Every command reports failure as a display string. Failures that the
//! user needs to see after the fact also land in the session's error
//! banner; none of them touch the slides already in the session.

use std::path::Path;

use tracing::{error, info};

use deckforge_core::editor::drag::{DraggedElement, DropOutcome};
use deckforge_core::editor::image::FrameSize;
use deckforge_core::editor::template::SlideEdit;
use deckforge_core::models::slide::{SlideRecord, SlideType};
use deckforge_export::images::ImageSource;
use deckforge_export::pptx::{write_pptx, ExportReport};
use deckforge_export::render::SlideRenderer;
use deckforge_export::styles::DeckTheme;
use deckforge_gemini::client::TextGenerator;
use deckforge_gemini::generate::generate_slides;

use crate::state::DeckSession;

/// Banner shown when writing the presentation fails.
pub const EXPORT_FAILED: &str = "Failed to generate PowerPoint presentation. Please try again.";

/// Generate a new deck for `topic`, replacing the current one on success.
/// Returns the number of slides.
pub fn generate(
    session: &mut DeckSession,
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<usize, String> {
    if session.is_loading() {
        return Err("a generation is already in progress".to_string());
    }
    if !session.can_generate(topic) {
        return Err("enter a topic to generate slides".to_string());
    }

    session.loading = true;
    session.error = None;
    session.topic = topic.trim().to_string();

    let result = generate_slides(generator, topic.trim());
    session.loading = false;

    match result {
        Ok(slides) => {
            let count = slides.len();
            session.replace_slides(slides);
            info!(slides = count, "deck generated");
            Ok(count)
        }
        Err(e) => {
            let message = e.to_string();
            error!(error = %message, "generation failed");
            session.error = Some(message.clone());
            Err(message)
        }
    }
}

/// Apply an inline edit and write the updated record back at `index`.
pub fn edit(session: &mut DeckSession, index: usize, edit: SlideEdit) -> Result<(), String> {
    let updated = session
        .template_mut(index)?
        .apply(edit)
        .map_err(|e| e.to_string())?;
    session.editable[index] = updated;
    Ok(())
}

pub fn drop_element(
    session: &mut DeckSession,
    index: usize,
    element: &DraggedElement,
) -> Result<DropOutcome, String> {
    Ok(session.template_mut(index)?.drop_element(element))
}

/// Remove a dropped item from a slide. Returns whether it existed.
pub fn remove_dropped(session: &mut DeckSession, index: usize, id: i64) -> Result<bool, String> {
    Ok(session.template_mut(index)?.remove_dropped(id))
}

/// Resize an image frame by dragging its corner by `(dx, dy)`.
pub fn resize(
    session: &mut DeckSession,
    index: usize,
    slot: usize,
    dx: f64,
    dy: f64,
) -> Result<FrameSize, String> {
    let frame = session
        .template_mut(index)?
        .frame_mut(slot)
        .map_err(|e| e.to_string())?;
    frame.mouse_down(0.0, 0.0);
    frame.mouse_move(dx, dy);
    frame.mouse_up();
    Ok(frame.size())
}

/// Use a local image file for an image slot. The file is inlined as a
/// `data:` URL, which also becomes the record's image so export embeds it.
pub fn attach_image(
    session: &mut DeckSession,
    index: usize,
    slot: usize,
    bytes: &[u8],
    mime: &str,
) -> Result<(), String> {
    let template = session.template_mut(index)?;
    let url = template
        .frame_mut(slot)
        .map_err(|e| e.to_string())?
        .preview_file(bytes, mime)
        .to_string();

    let image_edit = if template.slide_type() == SlideType::ThreeImgCard {
        SlideEdit::CardImage {
            index: slot,
            image: url,
        }
    } else {
        SlideEdit::Image(url)
    };
    edit(session, index, image_edit)
}

/// Render the whole deck for the terminal.
pub fn preview(session: &DeckSession, renderer: &SlideRenderer) -> Result<String, String> {
    renderer
        .render_deck(session.templates())
        .map_err(|e| e.to_string())
}

/// Export the edited deck to `path`.
///
/// Images that fail to load are left out without failing the export. Any
/// other failure sets the error banner; the slides stay editable and the
/// export can be retried.
pub fn export(
    session: &mut DeckSession,
    path: &Path,
    theme: &DeckTheme,
    images: &dyn ImageSource,
) -> Result<ExportReport, String> {
    if session.editable().is_empty() {
        return Err("no slides to export; generate a deck first".to_string());
    }

    match write_pptx(path, session.editable(), theme, images) {
        Ok(report) => {
            session.error = None;
            Ok(report)
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "export failed");
            session.error = Some(EXPORT_FAILED.to_string());
            Err(EXPORT_FAILED.to_string())
        }
    }
}

/// Dump the edited deck as pretty-printed JSON.
pub fn save_json(session: &DeckSession, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(session.editable()).map_err(|e| e.to_string())?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    info!(path = %path.display(), slides = session.editable().len(), "deck saved");
    Ok(())
}

/// Read a deck saved with [`save_json`]. Records are decoded leniently.
pub fn load_json(path: &Path) -> Result<Vec<SlideRecord>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| e.to_string())?;
    let items = value
        .as_array()
        .ok_or_else(|| format!("{} does not contain a JSON array", path.display()))?;
    Ok(items.iter().map(SlideRecord::from_value).collect())
}
