//! In-memory Repository
//!
//! Mock-mode backend. Each instance owns its lists, so tests and sessions get
//! their own store. The lock is held across every read-modify-write, which
//! makes each operation atomic with respect to concurrent callers.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::fixtures;
use super::traits::ShoppingListRepository;
use crate::domain::{Item, ItemId, ListId, ListPatch, Member, ShoppingList};
use crate::error::{ApiError, ApiResult};
use crate::validation;

pub struct InMemoryRepository {
    lists: Mutex<Vec<ShoppingList>>,
    current_user: String,
    delay: Duration,
}

impl InMemoryRepository {
    pub fn new(lists: Vec<ShoppingList>, current_user: impl Into<String>) -> Self {
        Self {
            lists: Mutex::new(lists),
            current_user: current_user.into(),
            delay: Duration::ZERO,
        }
    }

    /// Store seeded with the mock fixtures
    pub fn with_fixtures(current_user: impl Into<String>) -> Self {
        Self::new(fixtures::seed_lists(), current_user)
    }

    /// Artificial latency applied before every operation
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> Vec<ShoppingList> {
        self.lists.lock().await.clone()
    }

    async fn simulate_latency(&self) {
        if self.delay.is_zero() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(self.delay).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(self.delay).await;
    }

    /// Run `f` against one list under the lock
    async fn with_list<T>(
        &self,
        id: ListId,
        f: impl FnOnce(&mut ShoppingList) -> ApiResult<T>,
    ) -> ApiResult<T> {
        self.simulate_latency().await;
        let mut lists = self.lists.lock().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(ApiError::list_not_found(id))?;
        f(list)
    }

    /// Member id the current user already has elsewhere, or a fresh one
    fn current_member_id(&self, lists: &[ShoppingList]) -> String {
        lists
            .iter()
            .find_map(|l| l.member_by_email(&self.current_user))
            .map(|m| m.id.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ShoppingListRepository for InMemoryRepository {
    async fn list_all(&self) -> ApiResult<Vec<ShoppingList>> {
        self.simulate_latency().await;
        Ok(self.lists.lock().await.clone())
    }

    async fn create(&self, name: &str) -> ApiResult<ShoppingList> {
        let name = validation::list_name(name)?;
        self.simulate_latency().await;

        let mut lists = self.lists.lock().await;
        let id = lists.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        let owner = Member::owner(self.current_member_id(&lists), self.current_user.clone());
        let list = ShoppingList::new(id, name, owner);
        lists.push(list.clone());
        log::debug!("mock: created list {} ({})", list.id, list.name);
        Ok(list)
    }

    async fn update(&self, id: ListId, patch: &ListPatch) -> ApiResult<ShoppingList> {
        let mut patch = patch.clone();
        if let Some(name) = &patch.name {
            patch.name = Some(validation::list_name(name)?);
        }
        let user = self.current_user.as_str();
        self.with_list(id, |list| {
            list.ensure_owner(user)?;
            list.apply(&patch);
            Ok(list.clone())
        })
        .await
    }

    async fn delete(&self, id: ListId) -> ApiResult<()> {
        self.simulate_latency().await;
        let mut lists = self.lists.lock().await;
        let index = lists
            .iter()
            .position(|l| l.id == id)
            .ok_or(ApiError::list_not_found(id))?;
        lists[index].ensure_owner(&self.current_user)?;
        lists.remove(index);
        log::debug!("mock: deleted list {}", id);
        Ok(())
    }

    async fn add_item(&self, list_id: ListId, item: &Item) -> ApiResult<()> {
        let item = Item {
            name: validation::item_name(&item.name)?,
            ..item.clone()
        };
        self.with_list(list_id, |list| list.push_item(item).map(|_| ()))
            .await
    }

    async fn toggle_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        self.with_list(list_id, |list| list.toggle_item(item_id).map(|_| ()))
            .await
    }

    async fn delete_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        self.with_list(list_id, |list| list.remove_item(item_id).map(|_| ()))
            .await
    }

    async fn add_member(&self, list_id: ListId, member: &Member) -> ApiResult<()> {
        let member = Member {
            email: validation::email(&member.email)?,
            ..member.clone()
        };
        let user = self.current_user.as_str();
        self.with_list(list_id, |list| {
            list.ensure_owner(user)?;
            list.add_member(member)
        })
        .await
    }

    async fn remove_member(&self, list_id: ListId, member_id: &str) -> ApiResult<()> {
        let user = self.current_user.as_str();
        self.with_list(list_id, |list| {
            // Anyone may remove themselves (leave); everyone else needs an owner
            let leaving = list
                .member_by_email(user)
                .is_some_and(|m| m.id == member_id);
            if !leaving {
                list.ensure_owner(user)?;
            }
            list.remove_member(member_id).map(|_| ())
        })
        .await
    }

    async fn set_member_role(&self, list_id: ListId, member_id: &str, is_owner: bool) -> ApiResult<()> {
        let user = self.current_user.as_str();
        self.with_list(list_id, |list| {
            list.ensure_owner(user)?;
            list.set_member_role(member_id, is_owner)
        })
        .await
    }

    async fn toggle_archive(&self, list_id: ListId) -> ApiResult<()> {
        let user = self.current_user.as_str();
        self.with_list(list_id, |list| {
            list.ensure_owner(user)?;
            list.toggle_archived();
            Ok(())
        })
        .await
    }
}
