//! User intents
//!
//! Every change a view can request is an [`Action`]. Dispatching one is three
//! steps: [`Action::apply`] updates the local collection right away,
//! [`Action::send`] performs the backend call, and [`reconcile`] either adopts
//! the server's answer or rolls the local change back. Failed actions are kept
//! so the user can retry them unchanged.

use crate::collection::{ListCollection, Undo};
use crate::domain::{Item, ItemId, ListId, ListPatch, Member, ShoppingList};
use crate::error::{ApiError, ApiResult, Resource};
use crate::service::ApiService;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load,
    CreateList { name: String },
    Rename { list_id: ListId, name: String },
    DeleteList { list_id: ListId },
    ToggleArchive { list_id: ListId },
    AddItem { list_id: ListId, item: Item },
    ToggleItem { list_id: ListId, item_id: ItemId },
    DeleteItem { list_id: ListId, item_id: ItemId },
    AddMember { list_id: ListId, member: Member },
    RemoveMember { list_id: ListId, member_id: String },
    SetRole { list_id: ListId, member_id: String, is_owner: bool },
    /// Carries the list as it was when the user left it
    Leave { list: ShoppingList },
}

/// What the backend answered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Lists(Vec<ShoppingList>),
    List(ShoppingList),
    Done,
}

impl Action {
    pub fn create_list(name: &str) -> ApiResult<Self> {
        Ok(Action::CreateList {
            name: validation::list_name(name)?,
        })
    }

    pub fn rename(list_id: ListId, name: &str) -> ApiResult<Self> {
        Ok(Action::Rename {
            list_id,
            name: validation::list_name(name)?,
        })
    }

    /// The item id is fixed here, so a retry re-sends the same item
    pub fn add_item(list_id: ListId, name: &str) -> ApiResult<Self> {
        Ok(Action::AddItem {
            list_id,
            item: Item::new(validation::item_name(name)?),
        })
    }

    pub fn add_member(list_id: ListId, email: &str) -> ApiResult<Self> {
        Ok(Action::AddMember {
            list_id,
            member: Member::invite(validation::email(email)?),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Load => "load",
            Action::CreateList { .. } => "create_list",
            Action::Rename { .. } => "rename",
            Action::DeleteList { .. } => "delete_list",
            Action::ToggleArchive { .. } => "toggle_archive",
            Action::AddItem { .. } => "add_item",
            Action::ToggleItem { .. } => "toggle_item",
            Action::DeleteItem { .. } => "delete_item",
            Action::AddMember { .. } => "add_member",
            Action::RemoveMember { .. } => "remove_member",
            Action::SetRole { .. } => "set_role",
            Action::Leave { .. } => "leave",
        }
    }

    /// Optimistic local change. `None` means nothing was changed locally
    /// (loads, creates that wait for a server-assigned id, re-sent items).
    pub fn apply(&self, lists: &mut ListCollection, user: &str) -> ApiResult<Option<Undo>> {
        match self {
            Action::Load | Action::CreateList { .. } => Ok(None),
            Action::Rename { list_id, name } => lists.update(*list_id, |l| {
                l.ensure_owner(user)?;
                let previous = l.name.clone();
                l.apply(&ListPatch::rename(name.clone()));
                Ok(Some(Undo::Rename { id: l.id, name: previous }))
            }),
            Action::DeleteList { list_id } => {
                lists.get(*list_id).map(|l| l.ensure_owner(user)).transpose()?;
                lists.remove(*list_id).map(Some)
            }
            Action::ToggleArchive { list_id } => lists.update(*list_id, |l| {
                l.ensure_owner(user)?;
                l.toggle_archived();
                Ok(Some(Undo::ToggleArchive { id: l.id }))
            }),
            Action::AddItem { list_id, item } => lists.update(*list_id, |l| {
                let added = l.push_item(item.clone())?;
                Ok(added.then(|| Undo::RemoveItem { id: l.id, item_id: item.id }))
            }),
            Action::ToggleItem { list_id, item_id } => lists.update(*list_id, |l| {
                l.toggle_item(*item_id)?;
                Ok(Some(Undo::ToggleItem { id: l.id, item_id: *item_id }))
            }),
            Action::DeleteItem { list_id, item_id } => lists.update(*list_id, |l| {
                let at = l.items.iter().position(|i| i.id == *item_id).unwrap_or_default();
                let item = l.remove_item(*item_id)?;
                Ok(Some(Undo::InsertItem { id: l.id, at, item }))
            }),
            Action::AddMember { list_id, member } => lists.update(*list_id, |l| {
                l.ensure_owner(user)?;
                l.add_member(member.clone())?;
                Ok(Some(Undo::RemoveMember { id: l.id, member_id: member.id.clone() }))
            }),
            Action::RemoveMember { list_id, member_id } => lists.update(*list_id, |l| {
                l.ensure_owner(user)?;
                take_member(l, member_id)
            }),
            Action::SetRole { list_id, member_id, is_owner } => lists.update(*list_id, |l| {
                l.ensure_owner(user)?;
                let previous = l.members.iter().find(|m| &m.id == member_id).map(|m| m.is_owner);
                l.set_member_role(member_id, *is_owner)?;
                Ok(previous.map(|was_owner| Undo::Role {
                    id: l.id,
                    member_id: member_id.clone(),
                    is_owner: was_owner,
                }))
            }),
            Action::Leave { list } => lists.update(list.id, |l| {
                let member_id = l
                    .member_by_email(user)
                    .map(|m| m.id.clone())
                    .ok_or_else(|| ApiError::NotFound(Resource::Member(user.to_string())))?;
                take_member(l, &member_id)
            }),
        }
    }

    pub async fn send(self, service: &ApiService) -> ApiResult<Outcome> {
        match self {
            Action::Load => service.fetch_lists().await.map(Outcome::Lists),
            Action::CreateList { name } => service.create_list(&name).await.map(Outcome::List),
            Action::Rename { list_id, name } => service
                .update_list(list_id, ListPatch::rename(name))
                .await
                .map(Outcome::List),
            Action::DeleteList { list_id } => service.delete_list(list_id).await.map(done),
            Action::ToggleArchive { list_id } => service.toggle_archive(list_id).await.map(done),
            Action::AddItem { list_id, item } => {
                service.add_prepared_item(list_id, item).await.map(done)
            }
            Action::ToggleItem { list_id, item_id } => {
                service.toggle_item(list_id, item_id).await.map(done)
            }
            Action::DeleteItem { list_id, item_id } => {
                service.delete_item(list_id, item_id).await.map(done)
            }
            Action::AddMember { list_id, member } => {
                service.add_prepared_member(list_id, member).await.map(done)
            }
            Action::RemoveMember { list_id, member_id } => {
                service.remove_member(list_id, &member_id).await.map(done)
            }
            Action::SetRole { list_id, member_id, is_owner } => service
                .set_member_role(list_id, &member_id, is_owner)
                .await
                .map(done),
            Action::Leave { list } => service.leave_list(&list).await.map(done),
        }
    }
}

fn done<T>(_: T) -> Outcome {
    Outcome::Done
}

fn take_member(list: &mut ShoppingList, member_id: &str) -> ApiResult<Option<Undo>> {
    let at = list.members.iter().position(|m| m.id == member_id).unwrap_or_default();
    let member = list.remove_member(member_id)?;
    Ok(Some(Undo::InsertMember { id: list.id, at, member }))
}

/// Adopt the backend's answer, or undo the optimistic change on failure
pub fn reconcile(
    lists: &mut ListCollection,
    undo: Option<Undo>,
    result: ApiResult<Outcome>,
) -> ApiResult<()> {
    match result {
        Ok(Outcome::Lists(all)) => lists.replace_all(all),
        Ok(Outcome::List(list)) => {
            lists.upsert(list);
        }
        Ok(Outcome::Done) => {}
        Err(err) => {
            if let Some(undo) = undo {
                lists.undo(undo);
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Apply, send and reconcile in one go
pub async fn perform(action: Action, lists: &mut ListCollection, service: &ApiService) -> ApiResult<()> {
    let undo = action.apply(lists, service.current_user())?;
    let result = action.send(service).await;
    reconcile(lists, undo, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::error::{Denial, ErrorKind};
    use crate::repository::{HttpRepository, InMemoryRepository, ShoppingListRepository};
    use crate::service::BackendMode;
    use std::sync::Arc;

    async fn loaded() -> (ListCollection, ApiService) {
        let service = ApiService::from_config(&ApiConfig::mock());
        let mut lists = ListCollection::default();
        perform(Action::Load, &mut lists, &service).await.unwrap();
        (lists, service)
    }

    #[tokio::test]
    async fn test_local_and_remote_stay_in_step() {
        let (mut lists, service) = loaded().await;

        perform(Action::create_list("Test List").unwrap(), &mut lists, &service)
            .await
            .unwrap();
        let id = lists.lists().last().unwrap().id;

        let add = Action::add_item(id, "Test Item").unwrap();
        perform(add, &mut lists, &service).await.unwrap();
        let item_id = lists.get(id).unwrap().items[0].id;
        perform(Action::ToggleItem { list_id: id, item_id }, &mut lists, &service)
            .await
            .unwrap();

        let local = lists.get(id).unwrap().clone();
        assert!(local.items[0].completed);

        let mut fresh = ListCollection::default();
        perform(Action::Load, &mut fresh, &service).await.unwrap();
        assert_eq!(fresh.get(id), Some(&local));
    }

    #[tokio::test]
    async fn test_rejected_change_is_rolled_back() {
        let store = Arc::new(InMemoryRepository::with_fixtures("user@example.com"));
        let service = ApiService::with_backend(store.clone(), BackendMode::Mock, "user@example.com");
        let mut lists = ListCollection::default();
        perform(Action::Load, &mut lists, &service).await.unwrap();

        // Someone archived list 1 behind our back
        store.toggle_archive(1).await.unwrap();
        let before = lists.clone();
        let item_id = lists.get(1).unwrap().items[0].id;

        let action = Action::ToggleItem { list_id: 1, item_id };
        let undo = action.apply(&mut lists, "user@example.com").unwrap();
        assert!(lists.get(1).unwrap().items[0].completed);

        let result = action.send(&service).await;
        let err = reconcile(&mut lists, undo, result).unwrap_err();
        assert_eq!(err, ApiError::Forbidden(Denial::ListArchived));
        assert_eq!(lists, before);
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_concurrent_toggle() {
        let (mut lists, service) = loaded().await;
        let items = lists.get(1).unwrap().items.clone();
        let (a, b) = (items[0].id, items[1].id);

        let first = Action::ToggleItem { list_id: 1, item_id: a };
        let second = Action::ToggleItem { list_id: 1, item_id: b };
        let first_undo = first.apply(&mut lists, "user@example.com").unwrap();
        let second_undo = second.apply(&mut lists, "user@example.com").unwrap();

        // Second call lands, first one never reaches the server
        let result = second.send(&service).await;
        reconcile(&mut lists, second_undo, result).unwrap();
        let lost = Err(ApiError::Network("offline".into()));
        assert!(reconcile(&mut lists, first_undo, lost).is_err());

        let server = service.fetch_lists().await.unwrap();
        let server_list = server.iter().find(|l| l.id == 1).unwrap();
        assert!(server_list.item(b).unwrap().completed);
        assert!(!server_list.item(a).unwrap().completed);
        assert_eq!(lists.get(1), Some(server_list));
    }

    #[tokio::test]
    async fn test_resent_item_changes_nothing_locally() {
        let (mut lists, service) = loaded().await;
        let add = Action::add_item(1, "Chleba").unwrap();
        perform(add.clone(), &mut lists, &service).await.unwrap();

        assert_eq!(add.apply(&mut lists, "user@example.com").unwrap(), None);
        perform(add, &mut lists, &service).await.unwrap();
        assert_eq!(lists.get(1).unwrap().items.len(), 6);
    }

    #[tokio::test]
    async fn test_network_failure_rolls_back() {
        let service = ApiService::with_backend(
            Arc::new(HttpRepository::new("http://127.0.0.1:9")),
            BackendMode::Remote,
            "user@example.com",
        );
        let mut lists = ListCollection::new(crate::repository::fixtures::seed_lists());
        let before = lists.clone();

        let err = perform(Action::DeleteList { list_id: 2 }, &mut lists, &service)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(lists, before);
    }

    #[tokio::test]
    async fn test_local_rules_stop_before_the_network() {
        let (mut lists, service) = loaded().await;
        let archived_item = lists.get(5).unwrap().items[0].id;

        let err = perform(
            Action::DeleteItem { list_id: 5, item_id: archived_item },
            &mut lists,
            &service,
        )
        .await
        .unwrap_err();
        assert_eq!(err, ApiError::Forbidden(Denial::ListArchived));

        assert_eq!(
            Action::add_member(1, "bad").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(Action::create_list(" ").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_members_and_leave() {
        let (mut lists, service) = loaded().await;
        perform(Action::add_member(1, "novy@example.com").unwrap(), &mut lists, &service)
            .await
            .unwrap();
        let member_id = lists
            .get(1)
            .unwrap()
            .member_by_email("novy@example.com")
            .unwrap()
            .id
            .clone();

        let err = perform(Action::add_member(1, "NOVY@example.com").unwrap(), &mut lists, &service)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        perform(
            Action::SetRole { list_id: 1, member_id: member_id.clone(), is_owner: true },
            &mut lists,
            &service,
        )
        .await
        .unwrap();
        assert_eq!(lists.get(1).unwrap().owner_count(), 2);

        let list = lists.get(1).unwrap().clone();
        let err = perform(Action::Leave { list }, &mut lists, &service).await.unwrap_err();
        assert_eq!(err, ApiError::Forbidden(Denial::OwnerRemoval));

        let err = perform(
            Action::RemoveMember { list_id: 1, member_id: "nobody".into() },
            &mut lists,
            &service,
        )
        .await
        .unwrap_err();
        assert_eq!(err, ApiError::NotFound(Resource::Member("nobody".into())));
    }

    #[tokio::test]
    async fn test_rename_adopts_server_copy() {
        let (mut lists, service) = loaded().await;
        perform(Action::rename(2, "  Knihy  ").unwrap(), &mut lists, &service)
            .await
            .unwrap();
        assert_eq!(lists.get(2).unwrap().name, "Knihy");
    }
}
