use deckforge_core::editor::template::TemplateState;
use deckforge_core::error::CoreError;
use deckforge_core::models::slide::SlideRecord;

/// Everything one session knows. Nothing here outlives the process.
///
/// `slides` is the deck as generated; `editable` is the copy edits are
/// written back to and the one that gets exported. `templates` holds the
/// per-slide template state (drops, image frames).
#[derive(Debug, Default)]
pub struct DeckSession {
    pub(crate) slides: Vec<SlideRecord>,
    pub(crate) editable: Vec<SlideRecord>,
    pub(crate) templates: Vec<TemplateState>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) topic: String,
}

impl DeckSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with an existing deck, e.g. one loaded from JSON.
    pub fn from_slides(slides: Vec<SlideRecord>) -> Self {
        let mut session = Self::default();
        session.replace_slides(slides);
        session
    }

    /// Replace the whole deck. Template state is rebuilt from scratch.
    pub(crate) fn replace_slides(&mut self, slides: Vec<SlideRecord>) {
        self.templates = slides.iter().cloned().map(TemplateState::new).collect();
        self.editable = slides.clone();
        self.slides = slides;
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn editable(&self) -> &[SlideRecord] {
        &self.editable
    }

    pub fn templates(&self) -> &[TemplateState] {
        &self.templates
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current error banner, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Whether a generation may be started for `topic`.
    pub fn can_generate(&self, topic: &str) -> bool {
        !self.loading && !topic.trim().is_empty()
    }

    pub(crate) fn template_mut(&mut self, index: usize) -> Result<&mut TemplateState, String> {
        let len = self.templates.len();
        self.templates
            .get_mut(index)
            .ok_or_else(|| CoreError::SlideOutOfRange { index, len }.to_string())
    }
}
