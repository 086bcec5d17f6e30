use serde::{Deserialize, Serialize};

use deckforge_core::models::style::{ElementRole, TextAlign, TextStyle};

/// Slide background used when none is configured.
pub const DEFAULT_BACKGROUND: &str = "342C4E";

/// Deck-wide styling applied beneath each record's explicit styles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckTheme {
    /// Slide background as `RRGGBB`.
    pub background_color: String,

    /// Font used when an element names none.
    pub font_face: String,

    /// Text colour used when an element names none, as `RRGGBB`.
    pub text_color: String,

    /// Slide title size in points.
    pub title_size: f64,

    /// Body text (descriptions, columns) size in points.
    pub body_size: f64,

    /// Card heading size in points.
    pub heading_size: f64,
}

impl Default for DeckTheme {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND.to_string(),
            font_face: "Arial".to_string(),
            text_color: "FFFFFF".to_string(),
            title_size: 28.0,
            body_size: 14.0,
            heading_size: 16.0,
        }
    }
}

impl DeckTheme {
    /// The fully-populated base style for an element role.
    pub fn base_style(&self, role: ElementRole) -> TextStyle {
        let (size, bold) = match role {
            ElementRole::Title => (self.title_size, true),
            ElementRole::CardHeading(_) => (self.heading_size, true),
            ElementRole::Description
            | ElementRole::Column(_)
            | ElementRole::CardDescription(_) => (self.body_size, false),
        };

        TextStyle {
            font_size: Some(size),
            color: Some(self.text_color.clone()),
            bold: Some(bold),
            italic: Some(false),
            underline: Some(false),
            align: Some(TextAlign::Left),
            font_face: Some(self.font_face.clone()),
        }
    }

    /// Resolve an element's explicit style against this theme.
    pub fn resolve(&self, role: ElementRole, explicit: &TextStyle) -> TextStyle {
        explicit.merged_over(&self.base_style(role))
    }
}
