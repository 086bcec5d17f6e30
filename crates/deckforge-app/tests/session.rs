//! Session commands driven by an in-memory generator.

use deckforge_app::commands::{self, EXPORT_FAILED};
use deckforge_app::state::DeckSession;
use deckforge_core::editor::drag::{DraggedElement, DropOutcome, CARD_TEMPLATE};
use deckforge_core::editor::template::SlideEdit;
use deckforge_core::models::slide::SlideType;
use deckforge_export::error::ExportError;
use deckforge_export::images::ImageSource;
use deckforge_export::render::SlideRenderer;
use deckforge_export::styles::DeckTheme;
use deckforge_gemini::client::TextGenerator;
use deckforge_gemini::error::GeminiError;

struct Canned(&'static str);

impl TextGenerator for Canned {
    fn generate_text(&self, _prompt: &str) -> Result<String, GeminiError> {
        Ok(self.0.to_string())
    }
}

struct Offline;

impl TextGenerator for Offline {
    fn generate_text(&self, _prompt: &str) -> Result<String, GeminiError> {
        Err(GeminiError::Request("connection refused".to_string()))
    }
}

/// Every image fails to load.
struct NoImages;

impl ImageSource for NoImages {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::ImageFetch {
            url: url.to_string(),
            reason: "offline".to_string(),
        })
    }
}

const DECK: &str = r#"Sure! [
  {"type": "twoColumn", "title": "Compare", "columns": [{"content": "Solar"}, {"content": "Wind"}]},
  {"type": "threeImgCard", "title": "Cards", "cards": [
    {"heading": "A", "description": "a", "image": "https://example.com/a.png"},
    {"heading": "B", "description": "b", "image": "https://example.com/b.png"},
    {"heading": "C", "description": "c", "image": "https://example.com/c.png"}
  ]},
  {"type": "accentImage", "title": "Accent", "description": "text", "image": "https://example.com/x.jpg"}
]"#;

fn generated() -> DeckSession {
    let mut session = DeckSession::new();
    commands::generate(&mut session, &Canned(DECK), "Energy").unwrap();
    session
}

#[test]
fn solar_energy_example_yields_one_default_slide() {
    let mut session = DeckSession::new();
    let reply = Canned(r#"Here you go: [{"type":"default","title":"Intro","description":"..."}]"#);

    let count = commands::generate(&mut session, &reply, "Solar Energy").unwrap();

    assert_eq!(count, 1);
    assert_eq!(session.slides()[0].slide_type, SlideType::Default);
    assert_eq!(session.slides()[0].title, "Intro");
    assert_eq!(session.editable(), session.slides());
    assert_eq!(session.topic(), "Solar Energy");
    assert!(!session.is_loading());
    assert!(session.error().is_none());
}

#[test]
fn failed_generation_keeps_prior_slides() {
    let mut session = generated();
    let before = session.slides().to_vec();

    let err = commands::generate(&mut session, &Canned("no array here"), "Again").unwrap_err();
    assert_eq!(err, "No valid JSON found in the response.");
    assert_eq!(session.slides(), before.as_slice());
    assert_eq!(session.error(), Some("No valid JSON found in the response."));

    let err = commands::generate(&mut session, &Canned("[not json]"), "Again").unwrap_err();
    assert_eq!(err, "Invalid JSON structure or missing required fields.");
    assert_eq!(session.slides(), before.as_slice());

    commands::generate(&mut session, &Offline, "Again").unwrap_err();
    assert_eq!(session.slides(), before.as_slice());
    assert!(!session.is_loading());
}

#[test]
fn successful_generation_clears_the_banner() {
    let mut session = DeckSession::new();
    commands::generate(&mut session, &Offline, "Energy").unwrap_err();
    assert!(session.error().is_some());

    commands::generate(&mut session, &Canned(DECK), "Energy").unwrap();
    assert!(session.error().is_none());
    assert_eq!(session.slides().len(), 3);
}

#[test]
fn blank_topic_cannot_generate() {
    let mut session = DeckSession::new();
    assert!(!session.can_generate("   "));
    assert!(session.can_generate("Rust"));
    assert!(commands::generate(&mut session, &Canned(DECK), "  ").is_err());
    assert!(session.slides().is_empty());
}

#[test]
fn column_edit_is_written_back_to_the_editable_deck() {
    let mut session = generated();

    commands::edit(
        &mut session,
        0,
        SlideEdit::Column {
            index: 0,
            content: "Geothermal".to_string(),
        },
    )
    .unwrap();

    assert_eq!(session.editable()[0].columns[0].content, "Geothermal");
    assert_eq!(session.editable()[0].columns[1].content, "Wind");
    // The generated deck itself is untouched.
    assert_eq!(session.slides()[0].columns[0].content, "Solar");
}

#[test]
fn edit_on_missing_slide_is_an_error() {
    let mut session = generated();
    let err = commands::edit(&mut session, 9, SlideEdit::Title("x".to_string())).unwrap_err();
    assert_eq!(err, "slide index 9 out of range (deck has 3 slides)");
}

#[test]
fn drops_are_tracked_per_slide() {
    let mut session = generated();

    let outcome =
        commands::drop_element(&mut session, 2, &DraggedElement::new("Text", "note")).unwrap();
    let DropOutcome::Appended(id) = outcome else {
        panic!("expected append, got {outcome:?}");
    };
    assert_eq!(session.templates()[2].dropped().len(), 1);
    assert!(session.templates()[0].dropped().is_empty());

    assert!(commands::remove_dropped(&mut session, 2, id).unwrap());
    assert!(!commands::remove_dropped(&mut session, 2, id).unwrap());

    let outcome = commands::drop_element(
        &mut session,
        0,
        &DraggedElement::new(CARD_TEMPLATE, "replacement"),
    )
    .unwrap();
    assert_eq!(outcome, DropOutcome::Replaced);
    assert_eq!(session.templates()[0].replaced(), Some("replacement"));
}

#[test]
fn resize_is_clamped_to_the_minimum() {
    let mut session = generated();

    let size = commands::resize(&mut session, 1, 2, -1000.0, 40.0).unwrap();
    assert_eq!(size.width, 100.0);
    assert_eq!(size.height, 250.0);

    assert!(commands::resize(&mut session, 0, 0, 10.0, 10.0).is_err());
}

#[test]
fn attached_file_becomes_a_data_url_image() {
    let mut session = generated();

    commands::attach_image(&mut session, 1, 1, b"fake-bytes", "image/png").unwrap();

    let image = session.editable()[1].cards[1].image.as_deref().unwrap();
    assert!(image.starts_with("data:image/png;base64,"));
    assert_eq!(session.templates()[1].frames()[1].preview(), Some(image));
}

#[test]
fn preview_renders_every_slide() {
    let session = generated();
    let out = commands::preview(&session, &SlideRenderer::new().unwrap()).unwrap();
    assert!(out.contains("Slide 1 · twoColumn"));
    assert!(out.contains("Slide 3 · accentImage"));
}

#[test]
fn export_skips_unreachable_images() {
    let mut session = generated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");

    let report = commands::export(&mut session, &path, &DeckTheme::default(), &NoImages).unwrap();

    assert_eq!(report.slides, 3);
    assert_eq!(report.images_embedded, 0);
    assert_eq!(report.images_skipped.len(), 4);
    assert!(path.exists());
}

#[test]
fn failed_export_sets_banner_and_keeps_slides() {
    let mut session = generated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("deck.pptx");
    let before = session.editable().to_vec();

    let err = commands::export(&mut session, &path, &DeckTheme::default(), &NoImages).unwrap_err();

    assert_eq!(err, EXPORT_FAILED);
    assert_eq!(session.error(), Some(EXPORT_FAILED));
    assert_eq!(session.editable(), before.as_slice());

    // Retry to a writable location succeeds and clears the banner.
    let retry = dir.path().join("deck.pptx");
    commands::export(&mut session, &retry, &DeckTheme::default(), &NoImages).unwrap();
    assert!(session.error().is_none());
}

#[test]
fn saved_deck_loads_back() {
    let mut session = generated();
    commands::edit(&mut session, 2, SlideEdit::Title("Renamed".to_string())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.json");
    commands::save_json(&session, &path).unwrap();

    let loaded = commands::load_json(&path).unwrap();
    assert_eq!(loaded, session.editable());
}
