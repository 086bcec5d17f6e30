//! Prompt composition for slide generation.
//!
//! The prompt embeds the user's topic, a description of every slide
//! template the renderer knows, and the formatting rules the model must
//! follow. The topic itself is passed through untouched.

use deckforge_core::models::slide::SlideType;

/// Inclusive range of slides the model is asked for.
pub const SLIDE_COUNT: (usize, usize) = (8, 10);

/// Inclusive range of sentences per description.
pub const DESCRIPTION_SENTENCES: (usize, usize) = (6, 8);

/// How one template is described to the model.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSchema {
    pub slide_type: SlideType,
    pub name: &'static str,
    pub purpose: &'static str,
    /// `(field, description)` pairs. Nested fields are indented with two
    /// spaces per level.
    pub fields: &'static [(&'static str, &'static str)],
}

pub const TEMPLATE_SCHEMAS: [TemplateSchema; 5] = [
    TemplateSchema {
        slide_type: SlideType::AccentImage,
        name: "AccentImage",
        purpose: "Emphasizes an image with a supporting description.",
        fields: &[
            ("title", "Slide title."),
            ("description", "Text supporting the image."),
            ("image", "Direct URL of the image."),
        ],
    },
    TemplateSchema {
        slide_type: SlideType::TwoColumn,
        name: "CardTemplateTwoColumn",
        purpose: "Displays two columns of content; also use it to compare two types or options.",
        fields: &[
            ("title", "Slide title."),
            ("columns", "Array of two objects, each containing:"),
            ("  content", "Column content."),
        ],
    },
    TemplateSchema {
        slide_type: SlideType::ImageCardText,
        name: "ImageCardText",
        purpose: "Shows an image first, then the title and description, to explain content with an image.",
        fields: &[
            ("title", "Slide title."),
            ("description", "Text content for the slide."),
            ("image", "Direct URL of the image."),
        ],
    },
    TemplateSchema {
        slide_type: SlideType::ThreeImgCard,
        name: "CardTemplateImgHeadingThree",
        purpose: "Highlights three images with headings and descriptions.",
        fields: &[
            ("title", "Slide title."),
            ("cards", "Array of three objects, each containing:"),
            ("  image", "Direct URL of the image."),
            ("  heading", "Card heading."),
            ("  description", "Supporting text for the card."),
        ],
    },
    TemplateSchema {
        slide_type: SlideType::Default,
        name: "Default",
        purpose: "General content for unmatched structures.",
        fields: &[
            ("title", "Slide title."),
            ("description", "Slide description."),
        ],
    },
];

/// Build the full generation prompt for `topic`.
pub fn compose_prompt(topic: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(topic);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Generate a JSON response for {topic} for a presentation using the following \
         predefined templates. Each template has specific requirements:\n\n"
    ));

    for (n, schema) in TEMPLATE_SCHEMAS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}:\n", n + 1, schema.name));
        prompt.push_str(&format!("   - Purpose: {}\n", schema.purpose));
        prompt.push_str("   - Fields:\n");
        prompt.push_str(&format!(
            "     - type: \"{}\".\n",
            schema.slide_type.as_str()
        ));
        for (field, description) in schema.fields {
            let depth = field.len() - field.trim_start().len();
            let indent = " ".repeat(5 + depth);
            prompt.push_str(&format!("{indent}- {}: {description}\n", field.trim_start()));
        }
        prompt.push('\n');
    }

    let (min_slides, max_slides) = SLIDE_COUNT;
    let (min_sentences, max_sentences) = DESCRIPTION_SENTENCES;
    prompt.push_str(&format!(
        "Return {min_slides}-{max_slides} slides as a JSON array, ensuring each slide adheres \
         to one of these templates. Do not include extra explanations or non-JSON text. \
         Each description must be {min_sentences} to {max_sentences} sentences long. \
         Do not bold any text; give plain text for every title and description.\n"
    ));
    prompt.push_str(
        "Note: every image URL must be publicly accessible, relevant to the topic, and \
         high quality. If a URL is not available, replace it with one that is.\n",
    );

    prompt
}
