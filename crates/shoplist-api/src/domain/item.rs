//! Item Entity
//!
//! A single line on a shopping list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

pub type ItemId = Uuid;

/// A shopping-list item
///
/// Items carry a stable id generated on the client, so toggles and deletes
/// never depend on the item's current position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Missing in legacy payloads; a fresh id is generated on decode.
    #[serde(default = "Uuid::new_v4")]
    pub id: ItemId,
    #[serde(rename = "nazev")]
    pub name: String,
    #[serde(rename = "splneno", default)]
    pub completed: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            completed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
