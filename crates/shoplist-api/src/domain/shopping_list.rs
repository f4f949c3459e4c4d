//! Shopping List Entity
//!
//! A named, shareable list of items. The mutation methods here are the single
//! place the list rules live: the in-memory backend and the optimistic client
//! state both go through them.

use serde::{Deserialize, Serialize};

use super::entity::{position_of, Entity};
use super::item::{Item, ItemId};
use super::member::Member;
use crate::error::{ApiError, ApiResult, ConflictReason, Denial, Resource};

pub type ListId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ListId,
    #[serde(rename = "nazev")]
    pub name: String,
    #[serde(rename = "polozky", default)]
    pub items: Vec<Item>,
    #[serde(rename = "archivovano", default)]
    pub archived: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Partial update for [`ShoppingList`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatch {
    #[serde(rename = "nazev", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "archivovano", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl ListPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Default::default()
        }
    }
}

impl ShoppingList {
    /// New empty list owned by `owner`
    pub fn new(id: ListId, name: impl Into<String>, owner: Member) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
            archived: false,
            members: vec![owner],
        }
    }

    pub fn member_by_email(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.has_email(email))
    }

    pub fn is_member(&self, email: &str) -> bool {
        self.member_by_email(email).is_some()
    }

    pub fn is_owner(&self, email: &str) -> bool {
        self.member_by_email(email).is_some_and(|m| m.is_owner)
    }

    pub fn owner_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_owner).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn ensure_owner(&self, email: &str) -> ApiResult<()> {
        if self.is_owner(email) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(Denial::NotOwner))
        }
    }

    fn ensure_editable(&self) -> ApiResult<()> {
        if self.archived {
            return Err(ApiError::Forbidden(Denial::ListArchived));
        }
        Ok(())
    }

    fn item_index(&self, item_id: ItemId) -> ApiResult<usize> {
        position_of(&self.items, &item_id).ok_or(ApiError::NotFound(Resource::Item(item_id)))
    }

    fn member_index(&self, member_id: &str) -> ApiResult<usize> {
        position_of(&self.members, &member_id.to_string())
            .ok_or_else(|| ApiError::NotFound(Resource::Member(member_id.to_string())))
    }

    /// Append `item`. Re-sending an item whose id is already present is a
    /// no-op, reported as `false`.
    pub fn push_item(&mut self, item: Item) -> ApiResult<bool> {
        self.ensure_editable()?;
        if self.item(item.id).is_some() {
            return Ok(false);
        }
        self.items.push(item);
        Ok(true)
    }

    /// Flip the completed flag, returning the new value
    pub fn toggle_item(&mut self, item_id: ItemId) -> ApiResult<bool> {
        self.ensure_editable()?;
        let index = self.item_index(item_id)?;
        let item = &mut self.items[index];
        item.toggle();
        Ok(item.completed)
    }

    pub fn remove_item(&mut self, item_id: ItemId) -> ApiResult<Item> {
        self.ensure_editable()?;
        let index = self.item_index(item_id)?;
        Ok(self.items.remove(index))
    }

    pub fn add_member(&mut self, member: Member) -> ApiResult<()> {
        if self.is_member(&member.email) {
            return Err(ApiError::Conflict(ConflictReason::DuplicateMember(member.email)));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn remove_member(&mut self, member_id: &str) -> ApiResult<Member> {
        let index = self.member_index(member_id)?;
        if self.members[index].is_owner {
            return Err(ApiError::Forbidden(Denial::OwnerRemoval));
        }
        Ok(self.members.remove(index))
    }

    pub fn set_member_role(&mut self, member_id: &str, is_owner: bool) -> ApiResult<()> {
        let index = self.member_index(member_id)?;
        let member = &self.members[index];
        if member.is_owner && !is_owner && self.owner_count() == 1 {
            return Err(ApiError::Forbidden(Denial::LastOwner));
        }
        self.members[index].is_owner = is_owner;
        Ok(())
    }

    /// Flip the archived flag, returning the new value
    pub fn toggle_archived(&mut self) -> bool {
        self.archived = !self.archived;
        self.archived
    }

    pub fn apply(&mut self, patch: &ListPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(archived) = patch.archived {
            self.archived = archived;
        }
    }
}

impl Entity for ShoppingList {
    type Id = ListId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
