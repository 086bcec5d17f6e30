use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::style::SlideStyle;

/// The five slide templates a record can target.
///
/// Unknown or missing tags deserialize to [`SlideType::Default`], so any
/// record the model returns still has a template to land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideType {
    AccentImage,
    TwoColumn,
    ImageCardText,
    ThreeImgCard,
    #[default]
    #[serde(other)]
    Default,
}

impl SlideType {
    pub const ALL: [SlideType; 5] = [
        SlideType::AccentImage,
        SlideType::TwoColumn,
        SlideType::ImageCardText,
        SlideType::ThreeImgCard,
        SlideType::Default,
    ];

    /// Map a raw `type` tag to a template. Anything unrecognised is `Default`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "accentImage" => SlideType::AccentImage,
            "twoColumn" => SlideType::TwoColumn,
            "imageCardText" => SlideType::ImageCardText,
            "threeImgCard" => SlideType::ThreeImgCard,
            _ => SlideType::Default,
        }
    }

    /// The wire tag for this template.
    pub fn as_str(self) -> &'static str {
        match self {
            SlideType::AccentImage => "accentImage",
            SlideType::TwoColumn => "twoColumn",
            SlideType::ImageCardText => "imageCardText",
            SlideType::ThreeImgCard => "threeImgCard",
            SlideType::Default => "default",
        }
    }

    /// Whether the template carries a single slide-level image.
    pub fn has_slide_image(self) -> bool {
        matches!(self, SlideType::AccentImage | SlideType::ImageCardText)
    }
}

impl std::fmt::Display for SlideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a `twoColumn` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub content: String,
}

/// One card of a `threeImgCard` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub description: String,
}

/// A single slide as produced by generation and edited in a session.
///
/// Which fields are meaningful depends on `slide_type`; nothing checks
/// that, and every template tolerates missing fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideRecord {
    #[serde(rename = "type", default)]
    pub slide_type: SlideType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "SlideStyle::is_empty")]
    pub style: SlideStyle,
}

impl SlideRecord {
    /// Build a record from an arbitrary JSON value without failing.
    ///
    /// Fields with the wrong JSON type are treated as absent. A value that
    /// is not an object yields an empty `default` slide.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let slide_type = obj
            .get("type")
            .and_then(Value::as_str)
            .map(SlideType::from_tag)
            .unwrap_or_default();

        let columns = obj
            .get("columns")
            .and_then(Value::as_array)
            .map(|cols| cols.iter().map(Column::from_value).collect())
            .unwrap_or_default();

        let cards = obj
            .get("cards")
            .and_then(Value::as_array)
            .map(|cards| cards.iter().map(Card::from_value).collect())
            .unwrap_or_default();

        let style = obj
            .get("style")
            .map(SlideStyle::from_value)
            .unwrap_or_default();

        Self {
            slide_type,
            title: string_field(value, "title").unwrap_or_default(),
            description: string_field(value, "description"),
            image: string_field(value, "image"),
            columns,
            cards,
            style,
        }
    }

    /// Description text, or an empty string when the record has none.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl Column {
    fn from_value(value: &Value) -> Self {
        Self {
            content: string_field(value, "content").unwrap_or_default(),
        }
    }
}

impl Card {
    fn from_value(value: &Value) -> Self {
        Self {
            image: string_field(value, "image"),
            heading: string_field(value, "heading").unwrap_or_default(),
            description: string_field(value, "description").unwrap_or_default(),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
