//! List Card Component
//!
//! One tile on the dashboard. Clicking it opens the detail; owners get archive
//! and delete actions.

use leptos::prelude::*;
use shoplist_api::{Action, ListId, ListSummary};

use super::DeleteConfirmButton;
use crate::context::AppContext;
use crate::routing::Route;
use crate::store::{dispatch, use_app_store, AppStateStoreFields};

#[component]
pub fn ListCard(list_id: ListId) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let user = ctx.user();

    let list = Memo::new(move |_| store.lists().read().get(list_id).cloned());

    move || {
        list.get().map(|list| {
            let summary = ListSummary::of(&list, &user);
            let archived = list.archived;

            let owner_actions = summary.is_owner.then(|| {
                view! {
                    <div class="list-card-actions" on:click=move |ev| ev.stop_propagation()>
                        <button
                            class="archive-btn"
                            on:click=move |_| dispatch(store, ctx, Action::ToggleArchive { list_id })
                        >
                            {if archived { "Obnovit" } else { "Archivovat" }}
                        </button>
                        <DeleteConfirmButton
                            button_class="delete-btn"
                            on_confirm=move |_| dispatch(store, ctx, Action::DeleteList { list_id })
                        />
                    </div>
                }
            });

            view! {
                <article
                    class=if archived { "list-card archived" } else { "list-card" }
                    on:click=move |_| ctx.navigate(Route::Detail(list_id))
                >
                    <header class="list-card-header">
                        <h3>{list.name}</h3>
                        {archived.then(|| view! { <span class="badge archived-badge">"Archivováno"</span> })}
                    </header>
                    <p class="list-card-progress">
                        {format!("{}/{} položek hotovo", summary.completed, summary.total)}
                    </p>
                    <div class="progress-bar">
                        <div class="progress-fill" style=format!("width: {}%", summary.progress())></div>
                    </div>
                    <p class="list-card-members">{format!("Členové: {}", summary.members)}</p>
                    {owner_actions}
                </article>
            }
        })
    }
}
