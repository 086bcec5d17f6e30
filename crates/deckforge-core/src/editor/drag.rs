use serde::{Deserialize, Serialize};

/// Element kind that swaps out a whole template when dropped.
pub const CARD_TEMPLATE: &str = "CardTemplate";

/// What is currently being dragged from the element palette.
///
/// `template` is the opaque content the element would render; an element
/// without one is inert when dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggedElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl DraggedElement {
    pub fn new(element_type: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            template: Some(template.into()),
        }
    }

    pub fn is_card_template(&self) -> bool {
        self.element_type == CARD_TEMPLATE
    }
}

/// An element dropped onto a template, kept for the session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedItem {
    pub id: i64,
    pub content: String,
}

/// Result of dropping an element onto a template.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The template's whole output was replaced.
    Replaced,
    /// A new dropped item was appended with this id.
    Appended(i64),
    /// The element carried no template.
    Ignored,
}

/// Ordered dropped items with timestamp-derived ids.
///
/// Ids come from the wall clock in milliseconds but are bumped past the
/// last issued id, so two drops in the same millisecond stay distinct.
#[derive(Debug, Clone, Default)]
pub struct DroppedItems {
    items: Vec<DroppedItem>,
    last_id: i64,
}

impl DroppedItems {
    pub fn push(&mut self, content: String) -> i64 {
        self.push_at(content, jiff::Timestamp::now().as_millisecond())
    }

    /// Append with an explicit clock reading.
    pub fn push_at(&mut self, content: String, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.items.push(DroppedItem { id, content });
        id
    }

    /// Remove the item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[DroppedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
