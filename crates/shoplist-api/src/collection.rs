//! Client-side list state
//!
//! [`ListCollection`] is the single owner of the lists a view shows. Changes
//! are applied locally through the same domain rules the backends use, before
//! the remote call resolves; each change yields an [`Undo`] that reverts just
//! that change if the call fails.

use crate::domain::{Item, ItemId, ListId, Member, ShoppingList};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCollection {
    lists: Vec<ShoppingList>,
}

/// The inverse of one optimistic change.
///
/// Reverting touches only what that change touched, so other changes to the
/// same list that are still in flight (or already confirmed) survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undo {
    /// Put a removed list back, or drop one that was added
    List {
        id: ListId,
        previous: Option<(usize, ShoppingList)>,
    },
    Rename { id: ListId, name: String },
    ToggleArchive { id: ListId },
    ToggleItem { id: ListId, item_id: ItemId },
    RemoveItem { id: ListId, item_id: ItemId },
    InsertItem { id: ListId, at: usize, item: Item },
    RemoveMember { id: ListId, member_id: String },
    InsertMember { id: ListId, at: usize, member: Member },
    Role { id: ListId, member_id: String, is_owner: bool },
}

impl Undo {
    pub fn list_id(&self) -> ListId {
        match self {
            Undo::List { id, .. }
            | Undo::Rename { id, .. }
            | Undo::ToggleArchive { id }
            | Undo::ToggleItem { id, .. }
            | Undo::RemoveItem { id, .. }
            | Undo::InsertItem { id, .. }
            | Undo::RemoveMember { id, .. }
            | Undo::InsertMember { id, .. }
            | Undo::Role { id, .. } => *id,
        }
    }

    /// Revert inside one list. Bypasses the edit rules: the list may have been
    /// archived since the change was made.
    fn revert(self, list: &mut ShoppingList) {
        match self {
            Undo::List { .. } => {}
            Undo::Rename { name, .. } => list.name = name,
            Undo::ToggleArchive { .. } => {
                list.toggle_archived();
            }
            Undo::ToggleItem { item_id, .. } => {
                if let Some(item) = list.items.iter_mut().find(|i| i.id == item_id) {
                    item.toggle();
                }
            }
            Undo::RemoveItem { item_id, .. } => list.items.retain(|i| i.id != item_id),
            Undo::InsertItem { at, item, .. } => {
                if list.item(item.id).is_none() {
                    let at = at.min(list.items.len());
                    list.items.insert(at, item);
                }
            }
            Undo::RemoveMember { member_id, .. } => list.members.retain(|m| m.id != member_id),
            Undo::InsertMember { at, member, .. } => {
                if !list.members.iter().any(|m| m.id == member.id) {
                    let at = at.min(list.members.len());
                    list.members.insert(at, member);
                }
            }
            Undo::Role { member_id, is_owner, .. } => {
                if let Some(member) = list.members.iter_mut().find(|m| m.id == member_id) {
                    member.is_owner = is_owner;
                }
            }
        }
    }
}

impl ListCollection {
    pub fn new(lists: Vec<ShoppingList>) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &[ShoppingList] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, id: ListId) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| l.id == id)
    }

    fn index(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    /// Replace everything with a fresh server copy
    pub fn replace_all(&mut self, lists: Vec<ShoppingList>) {
        self.lists = lists;
    }

    fn whole_list(&self, id: ListId) -> Undo {
        Undo::List {
            id,
            previous: self.index(id).map(|i| (i, self.lists[i].clone())),
        }
    }

    /// Insert a list, or replace the one with the same id
    pub fn upsert(&mut self, list: ShoppingList) -> Undo {
        let undo = self.whole_list(list.id);
        match self.index(list.id) {
            Some(i) => self.lists[i] = list,
            None => self.lists.push(list),
        }
        undo
    }

    pub fn remove(&mut self, id: ListId) -> ApiResult<Undo> {
        let undo = self.whole_list(id);
        let index = self.index(id).ok_or(ApiError::list_not_found(id))?;
        self.lists.remove(index);
        Ok(undo)
    }

    /// Apply `f` to one list; on error the list is left as it was
    pub fn update<T>(
        &mut self,
        id: ListId,
        f: impl FnOnce(&mut ShoppingList) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let index = self.index(id).ok_or(ApiError::list_not_found(id))?;
        let mut draft = self.lists[index].clone();
        let value = f(&mut draft)?;
        self.lists[index] = draft;
        Ok(value)
    }

    /// Take back one change. Other changes and other lists are untouched.
    pub fn undo(&mut self, undo: Undo) {
        let current = self.index(undo.list_id());
        match undo {
            Undo::List { previous, .. } => match (previous, current) {
                (Some((_, list)), Some(i)) => self.lists[i] = list,
                (Some((at, list)), None) => {
                    let at = at.min(self.lists.len());
                    self.lists.insert(at, list);
                }
                (None, Some(i)) => {
                    self.lists.remove(i);
                }
                (None, None) => {}
            },
            undo => {
                if let Some(i) = current {
                    undo.revert(&mut self.lists[i]);
                }
            }
        }
    }

    /// Lists matching `filter`, in collection order
    pub fn filtered(&self, filter: &ListFilter) -> Vec<ShoppingList> {
        self.lists.iter().filter(|l| filter.matches(l)).cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.lists.iter().filter(|l| !l.archived).count()
    }

    pub fn archived_count(&self) -> usize {
        self.lists.iter().filter(|l| l.archived).count()
    }
}

/// Overview filter: archive switch plus name search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub query: String,
    /// Show archived lists instead of active ones
    pub archived: bool,
}

impl ListFilter {
    pub fn matches(&self, list: &ShoppingList) -> bool {
        if list.archived != self.archived {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty() || list.name.to_lowercase().contains(&query)
    }
}

/// Items to render, optionally hiding completed ones
pub fn visible_items(list: &ShoppingList, show_completed: bool) -> Vec<Item> {
    list.items
        .iter()
        .filter(|i| show_completed || !i.completed)
        .cloned()
        .collect()
}

/// What a list card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub completed: usize,
    pub total: usize,
    pub members: usize,
    pub is_owner: bool,
    pub is_member: bool,
}

impl ListSummary {
    pub fn of(list: &ShoppingList, user_email: &str) -> Self {
        Self {
            completed: list.completed_count(),
            total: list.items.len(),
            members: list.members.len(),
            is_owner: list.is_owner(user_email),
            is_member: list.is_member(user_email),
        }
    }

    /// Completion in percent, 0 for an empty list
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}
