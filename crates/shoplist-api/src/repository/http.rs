//! HTTP Repository
//!
//! REST client for the remote backend. Non-success statuses are mapped onto
//! the error taxonomy; transport failures become `Network`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::ShoppingListRepository;
use crate::domain::{Item, ItemId, ListId, ListPatch, Member, ShoppingList};
use crate::error::{ApiError, ApiResult, Resource};

#[derive(Serialize)]
struct NameBody<'a> {
    nazev: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleBody {
    is_owner: bool,
}

pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and check the status. `missing` is what a 404 refers to.
    async fn send(&self, request: RequestBuilder, missing: Option<Resource>) -> ApiResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        log::warn!("http: {} {}", status, response.url());
        Err(ApiError::from_status(status.as_u16(), missing))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() || err.is_body() {
        ApiError::InvalidResponse(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ShoppingListRepository for HttpRepository {
    async fn list_all(&self) -> ApiResult<Vec<ShoppingList>> {
        // A 404 on the collection itself means the endpoint is missing
        let response = self
            .send(self.client.get(self.url("/lists")), None)
            .await?;
        Self::json(response).await
    }

    async fn create(&self, name: &str) -> ApiResult<ShoppingList> {
        let request = self
            .client
            .post(self.url("/lists"))
            .json(&NameBody { nazev: name });
        let response = self.send(request, None).await?;
        Self::json(response).await
    }

    async fn update(&self, id: ListId, patch: &ListPatch) -> ApiResult<ShoppingList> {
        let request = self.client.put(self.url(&format!("/lists/{id}"))).json(patch);
        let response = self.send(request, Some(Resource::List(id))).await?;
        Self::json(response).await
    }

    async fn delete(&self, id: ListId) -> ApiResult<()> {
        let request = self.client.delete(self.url(&format!("/lists/{id}")));
        self.send(request, Some(Resource::List(id))).await?;
        Ok(())
    }

    async fn add_item(&self, list_id: ListId, item: &Item) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/lists/{list_id}/items")))
            .json(item);
        self.send(request, Some(Resource::List(list_id))).await?;
        Ok(())
    }

    async fn toggle_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/lists/{list_id}/items/{item_id}/toggle")));
        self.send(request, Some(Resource::Item(item_id))).await?;
        Ok(())
    }

    async fn delete_item(&self, list_id: ListId, item_id: ItemId) -> ApiResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/lists/{list_id}/items/{item_id}")));
        self.send(request, Some(Resource::Item(item_id))).await?;
        Ok(())
    }

    async fn add_member(&self, list_id: ListId, member: &Member) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/lists/{list_id}/members")))
            .json(member);
        self.send(request, Some(Resource::List(list_id))).await?;
        Ok(())
    }

    async fn remove_member(&self, list_id: ListId, member_id: &str) -> ApiResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/lists/{list_id}/members/{member_id}")));
        self.send(request, Some(Resource::Member(member_id.to_string()))).await?;
        Ok(())
    }

    async fn set_member_role(&self, list_id: ListId, member_id: &str, is_owner: bool) -> ApiResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/lists/{list_id}/members/{member_id}")))
            .json(&RoleBody { is_owner });
        self.send(request, Some(Resource::Member(member_id.to_string()))).await?;
        Ok(())
    }

    async fn toggle_archive(&self, list_id: ListId) -> ApiResult<()> {
        let request = self.client.put(self.url(&format!("/lists/{list_id}/archive")));
        self.send(request, Some(Resource::List(list_id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};
    use crate::repository::InMemoryRepository;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use std::sync::Arc;
    use uuid::Uuid;

    type Backend = State<Arc<InMemoryRepository>>;

    #[derive(serde::Deserialize)]
    struct NewList {
        nazev: String,
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Role {
        is_owner: bool,
    }

    fn status_for(err: ApiError) -> StatusCode {
        match err.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Server | ErrorKind::Network => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn done(result: ApiResult<()>) -> Result<StatusCode, StatusCode> {
        result.map(|_| StatusCode::NO_CONTENT).map_err(status_for)
    }

    /// REST facade over an in-memory store, standing in for the real server
    fn fake_backend(store: Arc<InMemoryRepository>) -> Router {
        Router::new()
            .route(
                "/lists",
                get(|State(s): Backend| async move { s.list_all().await.map(Json).map_err(status_for) })
                    .post(|State(s): Backend, Json(body): Json<NewList>| async move {
                        s.create(&body.nazev).await.map(Json).map_err(status_for)
                    }),
            )
            .route(
                "/lists/{id}",
                put(|State(s): Backend, Path(id): Path<u64>, Json(patch): Json<ListPatch>| async move {
                    s.update(id, &patch).await.map(Json).map_err(status_for)
                })
                .delete(|State(s): Backend, Path(id): Path<u64>| async move { done(s.delete(id).await) }),
            )
            .route(
                "/lists/{id}/items",
                post(|State(s): Backend, Path(id): Path<u64>, Json(item): Json<Item>| async move {
                    done(s.add_item(id, &item).await)
                }),
            )
            .route(
                "/lists/{id}/items/{item_id}",
                axum::routing::delete(|State(s): Backend, Path((id, item_id)): Path<(u64, Uuid)>| async move {
                    done(s.delete_item(id, item_id).await)
                }),
            )
            .route(
                "/lists/{id}/items/{item_id}/toggle",
                put(|State(s): Backend, Path((id, item_id)): Path<(u64, Uuid)>| async move {
                    done(s.toggle_item(id, item_id).await)
                }),
            )
            .route(
                "/lists/{id}/members",
                post(|State(s): Backend, Path(id): Path<u64>, Json(member): Json<Member>| async move {
                    done(s.add_member(id, &member).await)
                }),
            )
            .route(
                "/lists/{id}/members/{member_id}",
                put(
                    |State(s): Backend, Path((id, member_id)): Path<(u64, String)>, Json(role): Json<Role>| async move {
                        done(s.set_member_role(id, &member_id, role.is_owner).await)
                    },
                )
                .delete(|State(s): Backend, Path((id, member_id)): Path<(u64, String)>| async move {
                    done(s.remove_member(id, &member_id).await)
                }),
            )
            .route(
                "/lists/{id}/archive",
                put(|State(s): Backend, Path(id): Path<u64>| async move { done(s.toggle_archive(id).await) }),
            )
            .with_state(store)
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn setup() -> (HttpRepository, Arc<InMemoryRepository>) {
        let store = Arc::new(InMemoryRepository::with_fixtures("user@example.com"));
        let url = serve(fake_backend(store.clone())).await;
        (HttpRepository::new(format!("{url}/")), store)
    }

    /// Server answering every request with `status`
    async fn failing(status: StatusCode) -> HttpRepository {
        let router = Router::new().fallback(move || async move { status });
        HttpRepository::new(serve(router).await)
    }

    #[tokio::test]
    async fn test_base_url_is_normalized() {
        let repo = HttpRepository::new("http://localhost:3000/api/");
        assert_eq!(repo.base_url(), "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_list_all() {
        let (repo, _) = setup().await;
        let lists = repo.list_all().await.expect("list failed");
        assert_eq!(lists.len(), 5);
        assert_eq!(lists[0].name, "Zelenina na smoothie");
    }

    #[tokio::test]
    async fn test_create_add_toggle_scenario() {
        let (repo, store) = setup().await;

        let list = repo.create("Test List").await.expect("create failed");
        let item = Item::new("Test Item");
        repo.add_item(list.id, &item).await.expect("add failed");
        repo.toggle_item(list.id, item.id).await.expect("toggle failed");

        let lists = repo.list_all().await.unwrap();
        let fetched = lists.iter().find(|l| l.id == list.id).unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert!(fetched.items[0].completed);
        assert_eq!(fetched.items[0].id, item.id);
        assert_eq!(store.snapshot().await.len(), 6);
    }

    #[tokio::test]
    async fn test_missing_list_is_not_found() {
        let (repo, _) = setup().await;
        let err = repo.update(999_999, &ListPatch::rename("Test")).await.unwrap_err();
        assert_eq!(err, ApiError::list_not_found(999_999));
        assert_eq!(err.message(crate::Locale::Cs), "Seznam nenalezen");

        let err = repo.add_item(999_999, &Item::new("Test Item")).await.unwrap_err();
        assert_eq!(err, ApiError::list_not_found(999_999));
    }

    #[tokio::test]
    async fn test_missing_item_blames_item() {
        let (repo, _) = setup().await;
        let missing = Uuid::new_v4();
        assert_eq!(
            repo.toggle_item(1, missing).await.unwrap_err(),
            ApiError::NotFound(Resource::Item(missing))
        );
    }

    #[tokio::test]
    async fn test_member_round_trip() {
        let (repo, store) = setup().await;
        let member = Member::invite("novy@example.com");
        repo.add_member(1, &member).await.unwrap();
        repo.set_member_role(1, &member.id, true).await.unwrap();

        let err = repo.add_member(1, &Member::invite("novy@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = repo.remove_member(1, &member.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        repo.set_member_role(1, &member.id, false).await.unwrap();
        repo.remove_member(1, &member.id).await.unwrap();
        let lists = store.snapshot().await;
        assert!(!lists[0].is_member("novy@example.com"));
    }

    #[tokio::test]
    async fn test_archive_then_delete() {
        let (repo, _) = setup().await;
        repo.toggle_archive(2).await.unwrap();
        let err = repo.add_item(2, &Item::new("Duna")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        repo.delete(2).await.unwrap();
        assert!(repo.list_all().await.unwrap().iter().all(|l| l.id != 2));
        assert_eq!(repo.delete(2).await.unwrap_err(), ApiError::list_not_found(2));
    }

    #[tokio::test]
    async fn test_status_taxonomy() {
        let cases = [
            (StatusCode::BAD_REQUEST, ApiError::Validation(ValidationError::Rejected)),
            (StatusCode::FORBIDDEN, ApiError::Forbidden(crate::Denial::Unspecified)),
            (StatusCode::NOT_FOUND, ApiError::list_not_found(3)),
            (StatusCode::CONFLICT, ApiError::Conflict(crate::ConflictReason::Unspecified)),
            (StatusCode::TOO_MANY_REQUESTS, ApiError::RateLimited),
            (StatusCode::INTERNAL_SERVER_ERROR, ApiError::Server { status: 500 }),
            (StatusCode::BAD_GATEWAY, ApiError::Server { status: 502 }),
        ];
        for (status, expected) in cases {
            let repo = failing(status).await;
            assert_eq!(repo.delete(3).await.unwrap_err(), expected, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_missing_collection_endpoint_is_server_error() {
        let repo = failing(StatusCode::NOT_FOUND).await;
        assert_eq!(repo.list_all().await.unwrap_err(), ApiError::Server { status: 404 });
        assert_eq!(repo.create("Test").await.unwrap_err(), ApiError::Server { status: 404 });
        assert_eq!(repo.delete(3).await.unwrap_err(), ApiError::list_not_found(3));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let router = Router::new().route("/lists", get(|| async { "not json" }));
        let repo = HttpRepository::new(serve(router).await);
        let err = repo.list_all().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = HttpRepository::new(format!("http://{}", addr));
        let err = repo.list_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
