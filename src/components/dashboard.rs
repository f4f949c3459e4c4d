//! Dashboard
//!
//! Overview of all lists: search, active/archive switch and the card grid.

use leptos::prelude::*;
use shoplist_api::ListFilter;

use super::{ListCard, LoadingSpinner, NewListForm};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_app_store();
    let (query, set_query) = signal(String::new());
    let (show_archived, set_show_archived) = signal(false);

    let visible = Memo::new(move |_| {
        let filter = ListFilter {
            query: query.get(),
            archived: show_archived.get(),
        };
        store
            .lists()
            .read()
            .filtered(&filter)
            .into_iter()
            .map(|list| list.id)
            .collect::<Vec<_>>()
    });
    let counts = Memo::new(move |_| {
        let lists = store.lists().read();
        (lists.active_count(), lists.archived_count())
    });

    let empty_text = move || {
        if store.loading().get() {
            None
        } else if !query.with(|q| q.trim().is_empty()) {
            Some("Žádný seznam neodpovídá hledání.")
        } else if show_archived.get() {
            Some("Archiv je prázdný.")
        } else {
            Some("Zatím tu nejsou žádné seznamy. Vytvořte první!")
        }
    };

    let tab_class = move |archived: bool| {
        if show_archived.get() == archived { "view-btn active" } else { "view-btn" }
    };

    view! {
        <section class="dashboard">
            <header class="dashboard-header">
                <h1>"Nákupní seznamy"</h1>
                <NewListForm />
            </header>

            <div class="dashboard-toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Hledat seznamy..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <div class="view-switch">
                    <button class=move || tab_class(false) on:click=move |_| set_show_archived.set(false)>
                        {move || format!("Aktivní ({})", counts.get().0)}
                    </button>
                    <button class=move || tab_class(true) on:click=move |_| set_show_archived.set(true)>
                        {move || format!("Archiv ({})", counts.get().1)}
                    </button>
                </div>
            </div>

            <Show when=move || store.loading().get() && store.lists().read().is_empty()>
                <LoadingSpinner message="Načítám seznamy..." />
            </Show>

            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=move || empty_text().map(|text| view! { <p class="empty-state">{text}</p> })
            >
                <div class="list-grid">
                    <For
                        each=move || visible.get()
                        key=|id| *id
                        children=move |id| view! { <ListCard list_id=id /> }
                    />
                </div>
            </Show>
        </section>
    }
}
