//! Fixed element placement for each slide template.
//!
//! Coordinates are in inches on a 10 × 5.625 in (16:9) slide. Widths may
//! be a share of the slide width instead of an absolute length.

use deckforge_core::models::slide::{SlideRecord, SlideType};
use deckforge_core::models::style::ElementRole;

pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 5.625;
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Horizontal distance between the left edges of consecutive cards.
pub const CARD_STRIDE_IN: f64 = 3.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Inches(f64),
    /// Percentage of the slide width.
    Percent(f64),
}

impl Length {
    pub fn to_inches(self) -> f64 {
        match self {
            Length::Inches(v) => v,
            Length::Percent(p) => SLIDE_WIDTH_IN * p / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub w: Length,
    pub h: f64,
}

impl Placement {
    const fn new(x: f64, y: f64, w: Length, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// `(x, y, cx, cy)` in EMUs.
    pub fn to_emu(self) -> (i64, i64, i64, i64) {
        let emu = |inches: f64| (inches * EMU_PER_INCH).round() as i64;
        (emu(self.x), emu(self.y), emu(self.w.to_inches()), emu(self.h))
    }
}

/// One element to place on an exported slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideElement {
    Text {
        role: ElementRole,
        text: String,
        placement: Placement,
    },
    Image {
        url: String,
        placement: Placement,
    },
}

/// Lay out a record's elements in drawing order.
///
/// Empty text and absent images produce no element.
pub fn plan_slide(record: &SlideRecord) -> Vec<SlideElement> {
    let mut plan = Plan::default();
    let description = record.description_text();

    match record.slide_type {
        SlideType::AccentImage => {
            plan.text(ElementRole::Title, &record.title, 0.5, 0.5, Length::Percent(50.0), 1.0);
            plan.text(ElementRole::Description, description, 0.5, 1.5, Length::Percent(50.0), 3.0);
            plan.image(record.image.as_deref(), 5.5, 1.5, 4.0, 3.0);
        }
        SlideType::TwoColumn => {
            plan.text(ElementRole::Title, &record.title, 0.5, 0.5, Length::Percent(90.0), 1.0);
            let xs = [0.5, 5.5];
            for (i, (column, x)) in record.columns.iter().zip(xs).enumerate() {
                plan.text(ElementRole::Column(i), &column.content, x, 1.5, Length::Percent(45.0), 3.0);
            }
        }
        SlideType::ImageCardText => {
            plan.image(record.image.as_deref(), 0.5, 0.5, 4.0, 3.0);
            plan.text(ElementRole::Title, &record.title, 5.5, 0.5, Length::Percent(45.0), 1.0);
            plan.text(ElementRole::Description, description, 5.5, 1.5, Length::Percent(45.0), 3.0);
        }
        SlideType::ThreeImgCard => {
            plan.text(ElementRole::Title, &record.title, 0.5, 0.5, Length::Percent(90.0), 1.0);
            for (i, card) in record.cards.iter().enumerate() {
                let x = 0.5 + i as f64 * CARD_STRIDE_IN;
                plan.image(card.image.as_deref(), x, 1.5, 3.0, 2.0);
                plan.text(ElementRole::CardHeading(i), &card.heading, x, 3.5, Length::Inches(3.0), 0.5);
                plan.text(ElementRole::CardDescription(i), &card.description, x, 4.0, Length::Inches(3.0), 1.0);
            }
        }
        SlideType::Default => {
            plan.text(ElementRole::Title, &record.title, 0.5, 0.5, Length::Percent(90.0), 1.0);
            plan.text(ElementRole::Description, description, 0.5, 1.5, Length::Percent(90.0), 4.0);
        }
    }

    plan.elements
}

#[derive(Default)]
struct Plan {
    elements: Vec<SlideElement>,
}

impl Plan {
    fn text(&mut self, role: ElementRole, text: &str, x: f64, y: f64, w: Length, h: f64) {
        if text.is_empty() {
            return;
        }
        self.elements.push(SlideElement::Text {
            role,
            text: text.to_string(),
            placement: Placement::new(x, y, w, h),
        });
    }

    fn image(&mut self, url: Option<&str>, x: f64, y: f64, w: f64, h: f64) {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return;
        };
        self.elements.push(SlideElement::Image {
            url: url.to_string(),
            placement: Placement::new(x, y, Length::Inches(w), h),
        });
    }
}
