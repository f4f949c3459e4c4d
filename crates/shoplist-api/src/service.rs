//! Data Service
//!
//! The one entry point views use for lists, items and members. Validates input
//! on the client, dispatches to the configured backend and logs failures.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::domain::{Item, ItemId, ListId, ListPatch, Member, ShoppingList};
use crate::error::{ApiError, ApiResult, Denial, Resource};
use crate::messages::Locale;
use crate::repository::{HttpRepository, InMemoryRepository, ShoppingListRepository};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Mock,
    Remote,
}

#[derive(Clone)]
pub struct ApiService {
    backend: Arc<dyn ShoppingListRepository>,
    mode: BackendMode,
    current_user: String,
    locale: Locale,
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("mode", &self.mode)
            .field("current_user", &self.current_user)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl ApiService {
    /// Build the backend `config` selects; mock mode starts from the fixtures
    pub fn from_config(config: &ApiConfig) -> Self {
        let user = config.current_user_email.clone();
        let service = if config.use_mocks {
            let store = InMemoryRepository::with_fixtures(user.clone()).with_delay(config.mock_delay());
            Self::with_backend(Arc::new(store), BackendMode::Mock, user)
        } else {
            let client = HttpRepository::new(config.base_url.clone());
            Self::with_backend(Arc::new(client), BackendMode::Remote, user)
        };
        log::info!("data service using {:?} backend", service.mode);
        service.with_locale(config.locale)
    }

    /// Inject a backend directly (tests, embedding)
    pub fn with_backend(
        backend: Arc<dyn ShoppingListRepository>,
        mode: BackendMode,
        current_user: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            mode,
            current_user: current_user.into(),
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Localized text for an error, in this service's locale
    pub fn describe(&self, err: &ApiError) -> &'static str {
        err.message(self.locale)
    }

    fn logged<T>(&self, operation: &str, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            log::warn!("{} failed [{}]: {}", operation, err.code(), err);
        }
        result
    }

    pub async fn fetch_lists(&self) -> ApiResult<Vec<ShoppingList>> {
        log::debug!("fetch_lists");
        let result = self.backend.list_all().await;
        self.logged("fetch_lists", result)
    }

    pub async fn create_list(&self, name: &str) -> ApiResult<ShoppingList> {
        let name = self.logged("create_list", validation::list_name(name))?;
        log::debug!("create_list {:?}", name);
        let result = self.backend.create(&name).await;
        self.logged("create_list", result)
    }

    pub async fn update_list(&self, id: ListId, patch: ListPatch) -> ApiResult<ShoppingList> {
        let mut patch = patch;
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(self.logged("update_list", validation::list_name(name))?);
        }
        log::debug!("update_list {} {:?}", id, patch);
        let result = self.backend.update(id, &patch).await;
        self.logged("update_list", result)
    }

    pub async fn delete_list(&self, id: ListId) -> ApiResult<()> {
        log::debug!("delete_list {}", id);
        let result = self.backend.delete(id).await;
        self.logged("delete_list", result)
    }

    /// Returns the item as sent, including its generated id
    pub async fn add_item(&self, list_id: ListId, name: &str) -> ApiResult<Item> {
        let name = self.logged("add_item", validation::item_name(name))?;
        self.add_prepared_item(list_id, Item::new(name)).await
    }

    /// Send an item built by the caller (optimistic views create it first)
    pub async fn add_prepared_item(&self, list_id: ListId, item: Item) -> ApiResult<Item> {
        log::debug!("add_item {} {}", list_id, item.id);
        let result = self.backend.add_item(list_id, &item).await.map(|_| item);
        self.logged("add_item", result)
    }

    pub async fn toggle_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        log::debug!("toggle_item {} {}", list_id, item_id);
        let result = self.backend.toggle_item(list_id, item_id).await;
        self.logged("toggle_item", result)
    }

    pub async fn delete_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        log::debug!("delete_item {} {}", list_id, item_id);
        let result = self.backend.delete_item(list_id, item_id).await;
        self.logged("delete_item", result)
    }

    pub async fn add_member(&self, list_id: ListId, email: &str) -> ApiResult<Member> {
        let email = self.logged("add_member", validation::email(email))?;
        self.add_prepared_member(list_id, Member::invite(email)).await
    }

    pub async fn add_prepared_member(&self, list_id: ListId, member: Member) -> ApiResult<Member> {
        log::debug!("add_member {} {}", list_id, member.email);
        let result = self.backend.add_member(list_id, &member).await.map(|_| member);
        self.logged("add_member", result)
    }

    pub async fn remove_member(&self, list_id: ListId, member_id: &str) -> ApiResult<()> {
        log::debug!("remove_member {} {}", list_id, member_id);
        let result = self.backend.remove_member(list_id, member_id).await;
        self.logged("remove_member", result)
    }

    pub async fn set_member_role(&self, list_id: ListId, member_id: &str, is_owner: bool) -> ApiResult<()> {
        log::debug!("set_member_role {} {} owner={}", list_id, member_id, is_owner);
        let result = self.backend.set_member_role(list_id, member_id, is_owner).await;
        self.logged("set_member_role", result)
    }

    /// Remove the current user's own membership
    pub async fn leave_list(&self, list: &ShoppingList) -> ApiResult<()> {
        let member = list
            .member_by_email(&self.current_user)
            .ok_or_else(|| ApiError::NotFound(Resource::Member(self.current_user.clone())));
        let member = self.logged("leave_list", member)?;
        if member.is_owner {
            return self.logged("leave_list", Err(ApiError::Forbidden(Denial::OwnerRemoval)));
        }
        let member_id = member.id.clone();
        self.remove_member(list.id, &member_id).await
    }

    pub async fn toggle_archive(&self, list_id: ListId) -> ApiResult<()> {
        log::debug!("toggle_archive {}", list_id);
        let result = self.backend.toggle_archive(list_id).await;
        self.logged("toggle_archive", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};

    fn mock_service() -> ApiService {
        ApiService::from_config(&ApiConfig::mock())
    }

    #[tokio::test]
    async fn test_from_config_selects_backend() {
        assert_eq!(mock_service().mode(), BackendMode::Mock);
        let remote = ApiService::from_config(&ApiConfig::remote("http://127.0.0.1:9"));
        assert_eq!(remote.mode(), BackendMode::Remote);
    }

    #[tokio::test]
    async fn test_fetch_returns_mock_data() {
        let lists = mock_service().fetch_lists().await.unwrap();
        assert!(!lists.is_empty());
        assert!(!lists[0].name.is_empty());
    }

    #[tokio::test]
    async fn test_create_add_toggle_fetch() {
        let service = mock_service();
        let list = service.create_list("Test List").await.unwrap();
        assert_eq!(list.name, "Test List");
        assert!(list.items.is_empty());
        assert_eq!(list.members.len(), 1);
        assert!(list.is_owner(service.current_user()));

        let item = service.add_item(list.id, "Test Item").await.unwrap();
        service.toggle_item(list.id, item.id).await.unwrap();

        let lists = service.fetch_lists().await.unwrap();
        let fetched = lists.iter().find(|l| l.id == list.id).unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert!(fetched.items[0].completed);
        assert_eq!(fetched.items[0].name, "Test Item");
    }

    #[tokio::test]
    async fn test_blank_inputs_never_reach_backend() {
        let service = mock_service();
        let before = service.fetch_lists().await.unwrap();

        assert_eq!(
            service.create_list("   ").await.unwrap_err(),
            ApiError::Validation(ValidationError::BlankListName)
        );
        assert_eq!(
            service.add_item(1, "").await.unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            service.update_list(1, ListPatch::rename("\n")).await.unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(service.fetch_lists().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_missing_list_message() {
        let service = mock_service().with_locale(Locale::En);
        let err = service.update_list(999_999, ListPatch::rename("Test")).await.unwrap_err();
        assert_eq!(service.describe(&err), "List not found");
        let err = service.add_item(999_999, "Test Item").await.unwrap_err();
        assert_eq!(err, ApiError::list_not_found(999_999));
    }

    #[tokio::test]
    async fn test_malformed_email() {
        let service = mock_service();
        let err = service.add_member(1, "kamarad").await.unwrap_err();
        assert_eq!(err, ApiError::Validation(ValidationError::EmailInvalid("kamarad".into())));
        let err = service.add_member(1, "  ").await.unwrap_err();
        assert_eq!(err, ApiError::Validation(ValidationError::EmailRequired));
    }

    #[tokio::test]
    async fn test_leave_list() {
        let owner_view = mock_service();
        let lists = owner_view.fetch_lists().await.unwrap();
        assert_eq!(
            owner_view.leave_list(&lists[0]).await.unwrap_err(),
            ApiError::Forbidden(Denial::OwnerRemoval)
        );

        let guest = Member::invite("host@example.com");
        let mut list = ShoppingList::new(1, "Sdílený", Member::owner("1", "user@example.com"));
        list.add_member(guest.clone()).unwrap();
        let store = Arc::new(InMemoryRepository::new(vec![list.clone()], "host@example.com"));
        let service = ApiService::with_backend(store.clone(), BackendMode::Mock, "host@example.com");

        service.leave_list(&list).await.unwrap();
        assert!(!store.snapshot().await[0].is_member("host@example.com"));
        assert_eq!(
            service.leave_list(&store.snapshot().await[0]).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_add_prepared_item_is_idempotent() {
        let service = mock_service();
        let item = Item::new("Chleba");

        service.add_prepared_item(1, item.clone()).await.unwrap();
        service.add_prepared_item(1, item.clone()).await.unwrap();

        let lists = service.fetch_lists().await.unwrap();
        let list = lists.iter().find(|l| l.id == 1).unwrap();
        assert_eq!(list.items.iter().filter(|i| i.id == item.id).count(), 1);
    }
}
