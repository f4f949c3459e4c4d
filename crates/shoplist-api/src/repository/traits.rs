//! Repository Layer - Core Trait
//!
//! One method per data-service operation. Implementations: in-memory, HTTP.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, ListId, ListPatch, Member, ShoppingList};
use crate::error::ApiResult;

/// Backend for shopping lists, their items and members
///
/// Browser futures are not `Send`, so on wasm32 the trait is declared with
/// `?Send`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ShoppingListRepository: Send + Sync {
    /// All lists visible to the current user
    async fn list_all(&self) -> ApiResult<Vec<ShoppingList>>;

    /// Create a list owned by the current user
    async fn create(&self, name: &str) -> ApiResult<ShoppingList>;

    async fn update(&self, id: ListId, patch: &ListPatch) -> ApiResult<ShoppingList>;

    async fn delete(&self, id: ListId) -> ApiResult<()>;

    /// Append an item; the id is generated by the caller
    async fn add_item(&self, list_id: ListId, item: &Item) -> ApiResult<()>;

    async fn toggle_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()>;

    async fn delete_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()>;

    /// Share the list; the member id is generated by the caller
    async fn add_member(&self, list_id: ListId, member: &Member) -> ApiResult<()>;

    async fn remove_member(&self, list_id: ListId, member_id: &str) -> ApiResult<()>;

    /// Grant or revoke owner rights
    async fn set_member_role(&self, list_id: ListId, member_id: &str, is_owner: bool) -> ApiResult<()>;

    async fn toggle_archive(&self, list_id: ListId) -> ApiResult<()>;
}
