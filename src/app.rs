//! Shopping List App
//!
//! Provides the store and context, loads the lists once and renders the
//! current route.

use leptos::prelude::*;
use reactive_stores::Store;
use shoplist_api::{Action, ApiConfig};

use crate::components::{ApiToggle, Dashboard, ErrorMessage, ListDetail};
use crate::context::AppContext;
use crate::routing::Route;
use crate::store::{dispatch, AppState};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let route = signal(Route::current());
    let ctx = AppContext::new(ApiConfig::from_env(), route);
    provide_context(ctx);

    // Back/forward and hand-edited URLs
    let hash_listener = window_event_listener(leptos::ev::hashchange, move |_| ctx.sync_route());
    on_cleanup(move || hash_listener.remove());

    dispatch(store, ctx, Action::Load);

    view! {
        <div class="app-layout">
            <main class="main-content">
                <ErrorMessage />
                {move || match ctx.route.get() {
                    Route::Overview => view! { <Dashboard /> }.into_any(),
                    Route::Detail(id) => view! { <ListDetail list_id=id /> }.into_any(),
                }}
            </main>
            <ApiToggle />
        </div>
    }
}
