use tracing::debug;

use crate::editor::drag::{DraggedElement, DropOutcome, DroppedItem, DroppedItems};
use crate::editor::image::ImageFrame;
use crate::error::CoreError;
use crate::models::slide::{Card, Column, SlideRecord, SlideType};
use crate::models::style::{ElementRole, TextStyle};

/// A single inline edit made through a template.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideEdit {
    Title(String),
    Description(String),
    Image(String),
    Column { index: usize, content: String },
    CardHeading { index: usize, heading: String },
    CardDescription { index: usize, description: String },
    CardImage { index: usize, image: String },
    Style { role: ElementRole, style: TextStyle },
}

/// Local state of one rendered slide template.
///
/// Seeded from a record; every edit updates the local copy and hands the
/// whole updated record back so the owner can store it at the slide's
/// index.
#[derive(Debug, Clone)]
pub struct TemplateState {
    record: SlideRecord,
    replaced: Option<String>,
    dropped: DroppedItems,
    frames: Vec<ImageFrame>,
}

impl TemplateState {
    pub fn new(mut record: SlideRecord) -> Self {
        // A two-column template always shows two editable columns.
        if record.slide_type == SlideType::TwoColumn && record.columns.is_empty() {
            record.columns = vec![Column::default(), Column::default()];
        }

        let frames = match record.slide_type {
            t if t.has_slide_image() => vec![ImageFrame::seeded(record.image.as_deref())],
            SlideType::ThreeImgCard => record
                .cards
                .iter()
                .map(|card| ImageFrame::seeded(card.image.as_deref()))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            record,
            replaced: None,
            dropped: DroppedItems::default(),
            frames,
        }
    }

    pub fn record(&self) -> &SlideRecord {
        &self.record
    }

    pub fn slide_type(&self) -> SlideType {
        self.record.slide_type
    }

    /// Apply an inline edit and return the updated record.
    pub fn apply(&mut self, edit: SlideEdit) -> Result<SlideRecord, CoreError> {
        let record = &mut self.record;
        match edit {
            SlideEdit::Title(title) => record.title = title,
            SlideEdit::Description(description) => record.description = Some(description),
            SlideEdit::Image(image) => {
                if !record.slide_type.has_slide_image() {
                    return Err(CoreError::NoImageSlot(0));
                }
                let frame = self.frames.first_mut().ok_or(CoreError::NoImageSlot(0))?;
                frame.set_preview_url(&image);
                record.image = Some(image);
            }
            SlideEdit::Column { index, content } => {
                let len = record.columns.len();
                let column = record
                    .columns
                    .get_mut(index)
                    .ok_or(CoreError::ColumnOutOfRange { index, len })?;
                column.content = content;
            }
            SlideEdit::CardHeading { index, heading } => {
                card_mut(record, index)?.heading = heading;
            }
            SlideEdit::CardDescription { index, description } => {
                card_mut(record, index)?.description = description;
            }
            SlideEdit::CardImage { index, image } => {
                if record.slide_type != SlideType::ThreeImgCard {
                    return Err(CoreError::NoImageSlot(index));
                }
                let card = card_mut(record, index)?;
                let frame = self
                    .frames
                    .get_mut(index)
                    .ok_or(CoreError::NoImageSlot(index))?;
                frame.set_preview_url(&image);
                card.image = Some(image);
            }
            SlideEdit::Style { role, style } => record.style.set(role, style),
        }
        Ok(self.record.clone())
    }

    /// Handle an element dropped onto this template.
    pub fn drop_element(&mut self, element: &DraggedElement) -> DropOutcome {
        let Some(template) = &element.template else {
            return DropOutcome::Ignored;
        };

        if element.is_card_template() {
            debug!(slide_type = %self.record.slide_type, "template replaced by drop");
            self.replaced = Some(template.clone());
            DropOutcome::Replaced
        } else {
            let id = self.dropped.push(template.clone());
            debug!(id, element_type = %element.element_type, "element dropped");
            DropOutcome::Appended(id)
        }
    }

    /// Delete a dropped item by id. Returns whether it existed.
    pub fn remove_dropped(&mut self, id: i64) -> bool {
        self.dropped.remove(id)
    }

    pub fn dropped(&self) -> &[DroppedItem] {
        self.dropped.items()
    }

    /// Content that replaced the template, if a card template was dropped.
    pub fn replaced(&self) -> Option<&str> {
        self.replaced.as_deref()
    }

    pub fn frames(&self) -> &[ImageFrame] {
        &self.frames
    }

    pub fn frame_mut(&mut self, slot: usize) -> Result<&mut ImageFrame, CoreError> {
        self.frames.get_mut(slot).ok_or(CoreError::NoImageSlot(slot))
    }
}

fn card_mut(record: &mut SlideRecord, index: usize) -> Result<&mut Card, CoreError> {
    let len = record.cards.len();
    record
        .cards
        .get_mut(index)
        .ok_or(CoreError::CardOutOfRange { index, len })
}
