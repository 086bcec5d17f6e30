//! Terminal previews of slide templates.
//!
//! Each slide type has its own Tera template. Unknown types already decode
//! to `SlideType::Default`, so dispatch never falls through.

use serde::Serialize;
use tera::{Context, Tera};

use deckforge_core::editor::drag::DroppedItem;
use deckforge_core::editor::image::{DEFAULT_FRAME_SIZE, FrameSize, ImageFrame};
use deckforge_core::editor::template::TemplateState;
use deckforge_core::models::slide::SlideType;

use crate::error::ExportError;

/// Shown in place of an empty slide title.
pub const UNTITLED: &str = "Untitled Card";

const HEADER: &str = "── Slide {{ number }} · {{ slide_type }} ──\n# {{ title }}\n";

const DROPPED: &str = "{% for item in dropped %}  + [{{ item.id }}] {{ item.content }}\n{% endfor %}";

const ACCENT_IMAGE: &str = r#"{% include "header" %}{{ description }}
[image {{ image_size }}] {% if image %}{{ image }}{% else %}(none){% endif %}
{% include "dropped" %}"#;

const TWO_COLUMN: &str = r#"{% include "header" %}{% for column in columns %}  | {{ column.number }}: {{ column.content }}
{% endfor %}{% include "dropped" %}"#;

const IMAGE_CARD_TEXT: &str = r#"[image {{ image_size }}] {% if image %}{{ image }}{% else %}(none){% endif %}
{% include "header" %}{{ description }}
{% include "dropped" %}"#;

const THREE_IMG_CARD: &str = r#"{% include "header" %}{% for card in cards %}  [{{ card.number }}] {{ card.heading }}
      {{ card.description }}
      [image {{ card.image_size }}] {% if card.image %}{{ card.image }}{% else %}(none){% endif %}
{% endfor %}{% include "dropped" %}"#;

const DEFAULT: &str = r#"{% include "header" %}{{ description }}
{% include "dropped" %}"#;

const REPLACED: &str = "── Slide {{ number }} · replaced ──\n{{ replaced }}\n";

/// Template name for a slide type.
pub fn template_name(slide_type: SlideType) -> &'static str {
    match slide_type {
        SlideType::AccentImage => "accent_image",
        SlideType::TwoColumn => "two_column",
        SlideType::ImageCardText => "image_card_text",
        SlideType::ThreeImgCard => "three_img_card",
        SlideType::Default => "default",
    }
}

#[derive(Serialize)]
struct ColumnView<'a> {
    number: usize,
    content: &'a str,
}

#[derive(Serialize)]
struct CardView<'a> {
    number: usize,
    heading: &'a str,
    description: &'a str,
    image: &'a str,
    image_size: String,
}

#[derive(Serialize)]
struct SlideView<'a> {
    number: usize,
    slide_type: &'static str,
    title: &'a str,
    description: &'a str,
    image: &'a str,
    image_size: String,
    columns: Vec<ColumnView<'a>>,
    cards: Vec<CardView<'a>>,
    dropped: &'a [DroppedItem],
    replaced: Option<&'a str>,
}

fn size_label(frame: Option<&ImageFrame>) -> String {
    let FrameSize { width, height } = frame.map(ImageFrame::size).unwrap_or(DEFAULT_FRAME_SIZE);
    format!("{width:.0}×{height:.0}")
}

/// Renders slide previews from template state.
pub struct SlideRenderer {
    tera: Tera,
}

impl SlideRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("header", HEADER),
            ("dropped", DROPPED),
            ("accent_image", ACCENT_IMAGE),
            ("two_column", TWO_COLUMN),
            ("image_card_text", IMAGE_CARD_TEXT),
            ("three_img_card", THREE_IMG_CARD),
            ("default", DEFAULT),
            ("replaced", REPLACED),
        ])
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Render the slide at `index` (zero-based).
    ///
    /// A template replaced by a dropped card template renders only the
    /// replacement content.
    pub fn render(&self, index: usize, state: &TemplateState) -> Result<String, ExportError> {
        let record = state.record();
        let frames = state.frames();

        let view = SlideView {
            number: index + 1,
            slide_type: record.slide_type.as_str(),
            title: if record.title.is_empty() {
                UNTITLED
            } else {
                &record.title
            },
            description: record.description_text(),
            image: record.image.as_deref().unwrap_or(""),
            image_size: size_label(frames.first()),
            columns: record
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| ColumnView {
                    number: i + 1,
                    content: &column.content,
                })
                .collect(),
            cards: record
                .cards
                .iter()
                .enumerate()
                .map(|(i, card)| CardView {
                    number: i + 1,
                    heading: &card.heading,
                    description: &card.description,
                    image: card.image.as_deref().unwrap_or(""),
                    image_size: size_label(frames.get(i)),
                })
                .collect(),
            dropped: state.dropped(),
            replaced: state.replaced(),
        };

        let name = if view.replaced.is_some() {
            "replaced"
        } else {
            template_name(record.slide_type)
        };

        let context = Context::from_serialize(&view)
            .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
        Ok(self.tera.render(name, &context)?)
    }

    /// Render every slide, separated by blank lines.
    pub fn render_deck(&self, states: &[TemplateState]) -> Result<String, ExportError> {
        let mut out = String::new();
        for (i, state) in states.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.render(i, state)?);
        }
        Ok(out)
    }
}
