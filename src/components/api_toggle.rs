//! Mock/API Switch
//!
//! Debug builds only. Flipping it rebuilds the data service against the other
//! backend and reloads.

use leptos::prelude::*;
use shoplist_api::{Action, BackendMode};

use crate::context::AppContext;
use crate::store::{dispatch, use_app_store};

#[component]
pub fn ApiToggle() -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let is_mock = move || ctx.mode.get() == BackendMode::Mock;

    let toggle = move |_| {
        ctx.switch_backend(!is_mock());
        dispatch(store, ctx, Action::Load);
    };

    view! {
        <Show when=|| cfg!(debug_assertions)>
            <div class="api-toggle">
                <label>
                    <input type="checkbox" prop:checked=is_mock on:change=toggle />
                    " Mock data"
                </label>
                <span class="api-mode">{move || if is_mock() { "mock" } else { "api" }}</span>
            </div>
        </Show>
    }
}
