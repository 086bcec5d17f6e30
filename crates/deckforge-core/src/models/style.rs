use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Parse a CSS `text-align` value. `start`/`end` map to left/right.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" | "end" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }
}

/// Styling for one text element. Every field is optional; unset fields
/// inherit from whatever base style the element is merged over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,
}

impl TextStyle {
    /// Decode a style field by field. A wrong-typed field is left unset.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let flag = |key: &str| value.get(key).and_then(Value::as_bool);
        Self {
            font_size: value.get("fontSize").and_then(Value::as_f64),
            color: text("color"),
            bold: flag("bold"),
            italic: flag("italic"),
            underline: flag("underline"),
            align: value
                .get("align")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            font_face: text("fontFace"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TextStyle::default()
    }

    /// Overlay `self` on `base`: fields set here win.
    pub fn merged_over(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_size: self.font_size.or(base.font_size),
            color: self.color.clone().or_else(|| base.color.clone()),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            underline: self.underline.or(base.underline),
            align: self.align.or(base.align),
            font_face: self.font_face.clone().or_else(|| base.font_face.clone()),
        }
    }
}

/// Addresses one text element on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Title,
    Description,
    Column(usize),
    CardHeading(usize),
    CardDescription(usize),
}

/// Explicit per-element styling carried on a slide record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideStyle {
    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub title: TextStyle,
    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub description: TextStyle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<TextStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_headings: Vec<TextStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_descriptions: Vec<TextStyle>,
}

impl SlideStyle {
    /// Decode each element's style on its own, so one malformed entry
    /// does not discard the rest.
    pub fn from_value(value: &Value) -> Self {
        let single = |key: &str| value.get(key).map(TextStyle::from_value).unwrap_or_default();
        let list = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().map(TextStyle::from_value).collect())
                .unwrap_or_default()
        };
        Self {
            title: single("title"),
            description: single("description"),
            columns: list("columns"),
            card_headings: list("cardHeadings"),
            card_descriptions: list("cardDescriptions"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.columns.iter().all(TextStyle::is_empty)
            && self.card_headings.iter().all(TextStyle::is_empty)
            && self.card_descriptions.iter().all(TextStyle::is_empty)
    }

    /// The explicit style for an element, or an empty style if none is set.
    pub fn get(&self, role: ElementRole) -> TextStyle {
        let found = match role {
            ElementRole::Title => Some(&self.title),
            ElementRole::Description => Some(&self.description),
            ElementRole::Column(i) => self.columns.get(i),
            ElementRole::CardHeading(i) => self.card_headings.get(i),
            ElementRole::CardDescription(i) => self.card_descriptions.get(i),
        };
        found.cloned().unwrap_or_default()
    }

    pub fn set(&mut self, role: ElementRole, style: TextStyle) {
        match role {
            ElementRole::Title => self.title = style,
            ElementRole::Description => self.description = style,
            ElementRole::Column(i) => set_indexed(&mut self.columns, i, style),
            ElementRole::CardHeading(i) => set_indexed(&mut self.card_headings, i, style),
            ElementRole::CardDescription(i) => set_indexed(&mut self.card_descriptions, i, style),
        }
    }
}

fn set_indexed(styles: &mut Vec<TextStyle>, index: usize, style: TextStyle) {
    if styles.len() <= index {
        styles.resize(index + 1, TextStyle::default());
    }
    styles[index] = style;
}

/// Normalise a CSS colour to an uppercase `RRGGBB` hex string.
///
/// Accepts `#RGB`, `#RRGGBB`, bare hex, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)` (alpha is dropped).
pub fn normalize_color(css: &str) -> Result<String, CoreError> {
    let value = css.trim();
    let invalid = || CoreError::InvalidColor(css.to_string());

    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        let args = args.strip_suffix(')').ok_or_else(invalid)?;
        let channels: Vec<u8> = args
            .split(',')
            .take(3)
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        if channels.len() != 3 {
            return Err(invalid());
        }
        return Ok(format!(
            "{:02X}{:02X}{:02X}",
            channels[0], channels[1], channels[2]
        ));
    }

    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    match hex.len() {
        6 => Ok(hex.to_ascii_uppercase()),
        3 => Ok(hex
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>()
            .to_ascii_uppercase()),
        _ => Err(invalid()),
    }
}
