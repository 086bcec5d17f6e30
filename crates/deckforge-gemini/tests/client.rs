//! Tests for the Gemini wire format and the generation pipeline.
//!
//! `live_generate_content` calls the real endpoint and needs
//! `GEMINI_API_KEY` in the environment.
//!
//! Run with: `cargo test -p deckforge-gemini --test client -- --ignored`

use std::cell::RefCell;

use deckforge_core::models::slide::SlideType;
use deckforge_gemini::client::{
    parse_response_text, request_body, GeminiClient, GeminiSettings, TextGenerator,
};
use deckforge_gemini::error::GeminiError;
use deckforge_gemini::generate::generate_slides;

struct CannedGenerator {
    reply: Result<String, String>,
    prompts: RefCell<Vec<String>>,
}

impl CannedGenerator {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for CannedGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone().map_err(GeminiError::Request)
    }
}

#[test]
fn request_body_matches_generate_content_shape() {
    let body: serde_json::Value = serde_json::from_str(&request_body("hello").unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
}

#[test]
fn response_text_comes_from_first_candidate_part() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}},{"content":{"parts":[{"text":"other"}]}}]}"#;
    assert_eq!(parse_response_text(body).unwrap(), "first");
}

#[test]
fn response_without_candidates_is_a_parse_error() {
    let err = parse_response_text(r#"{"candidates":[]}"#).unwrap_err();
    assert!(matches!(err, GeminiError::ResponseParse(_)));

    let err = parse_response_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
    assert!(matches!(err, GeminiError::ResponseParse(_)));
}

#[test]
fn malformed_body_is_a_parse_error() {
    let err = parse_response_text("<html>502</html>").unwrap_err();
    assert!(matches!(err, GeminiError::ResponseParse(_)));
}

#[test]
fn empty_api_key_is_rejected() {
    let err = GeminiClient::new(GeminiSettings::new("  ")).err().unwrap();
    assert!(matches!(err, GeminiError::Config(_)));
}

#[test]
fn url_targets_configured_model() {
    let mut settings = GeminiSettings::new("key");
    settings.endpoint = "https://example.test/v1beta/".to_string();
    settings.model = "gemini-2.0-flash".to_string();
    let client = GeminiClient::new(settings).unwrap();
    assert_eq!(
        client.url(),
        "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
    );
}

#[test]
fn generate_slides_sends_composed_prompt_and_extracts() {
    let generator = CannedGenerator::replying(
        r#"Here you go: [{"type":"default","title":"Intro","description":"..."}]"#,
    );

    let slides = generate_slides(&generator, "Solar Energy").unwrap();

    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].slide_type, SlideType::Default);
    let prompts = generator.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate a JSON response for Solar Energy"));
}

#[test]
fn generate_slides_propagates_generator_failure() {
    let generator = CannedGenerator::failing("connection refused");
    let err = generate_slides(&generator, "Solar Energy").unwrap_err();
    assert!(matches!(err, GeminiError::Request(_)));
}

#[test]
fn generate_slides_propagates_extraction_failure() {
    let generator = CannedGenerator::replying("I cannot help with that.");
    let err = generate_slides(&generator, "Solar Energy").unwrap_err();
    assert!(matches!(err, GeminiError::NoJsonFound));
}

#[test]
#[ignore]
fn live_generate_content() {
    let api_key = std::env::var("GEMINI_API_KEY").expect("set GEMINI_API_KEY");
    let client = GeminiClient::new(GeminiSettings::new(api_key)).unwrap();

    let slides = generate_slides(&client, "Solar Energy").unwrap();
    println!("generated {} slides", slides.len());
    for slide in &slides {
        println!("  [{}] {}", slide.slide_type, slide.title);
    }
    assert!(!slides.is_empty());
}
