//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. All list state
//! lives here; views only dispatch [`Action`]s.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shoplist_api::{reconcile, Action, ApiError, ListCollection};

use crate::context::AppContext;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Every list the user can see
    pub lists: ListCollection,
    /// A list load is in flight
    pub loading: bool,
    /// Last failure shown in the error banner
    pub failure: Option<Failure>,
}

/// A failed action, kept so the user can retry it
#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub error: ApiError,
    pub retry: Option<Action>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Apply `action` locally, send it, and settle the store with the result.
///
/// Local rule violations (archived list, not an owner) surface immediately and
/// never reach the backend. A failed backend call rolls back only the list it
/// touched.
pub fn dispatch(store: AppStore, ctx: AppContext, action: Action) {
    let service = ctx.service();
    let label = action.label();
    store.failure().set(None);

    let applied = action.apply(&mut store.lists().write(), service.current_user());
    let undo = match applied {
        Ok(undo) => undo,
        Err(error) => {
            log::debug!("{label} rejected locally: {error}");
            store.failure().set(Some(Failure { error, retry: None }));
            return;
        }
    };

    let load = matches!(action, Action::Load).then(|| ctx.begin_load());
    if load.is_some() {
        store.loading().set(true);
    }
    let session = ctx.session();

    spawn_local(async move {
        let retry = action.clone();
        let result = action.send(&service).await;

        if !session.is_current() || load.as_ref().is_some_and(|t| !t.is_current()) {
            log::debug!("dropping stale {label} response");
            return;
        }
        if load.is_some() {
            store.loading().set(false);
        }
        let settled = reconcile(&mut store.lists().write(), undo, result);
        if let Err(error) = settled {
            store.failure().set(Some(Failure { error, retry: Some(retry) }));
        }
    });
}

/// Report a failure that happened before anything was dispatched
pub fn report(store: AppStore, error: ApiError) {
    store.failure().set(Some(Failure { error, retry: None }));
}

/// Build an action, or show why it could not be built
pub fn dispatch_with(store: AppStore, ctx: AppContext, action: Result<Action, ApiError>) -> bool {
    match action {
        Ok(action) => {
            dispatch(store, ctx, action);
            true
        }
        Err(error) => {
            report(store, error);
            false
        }
    }
}
