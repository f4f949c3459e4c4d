//! New List Form Component

use leptos::prelude::*;
use shoplist_api::Action;

use crate::context::AppContext;
use crate::store::{dispatch_with, use_app_store};

#[component]
pub fn NewListForm() -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let (name, set_name) = signal(String::new());

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if dispatch_with(store, ctx, Action::create_list(&name.get())) {
            set_name.set(String::new());
        }
    };

    view! {
        <form class="new-list-form" on:submit=create_list>
            <input
                type="text"
                placeholder="Název nového seznamu..."
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <button type="submit">"Vytvořit seznam"</button>
        </form>
    }
}
