//! List Detail View
//!
//! One list: header with rename and archive, the items and the members panel.
//! Every part reads the list from the store, so optimistic changes and
//! rollbacks show up without reloading.

use leptos::prelude::*;
use shoplist_api::{visible_items, Action, Item, ListId, ShoppingList};

use super::{DeleteConfirmButton, LoadingSpinner, MembersPanel};
use crate::context::AppContext;
use crate::routing::Route;
use crate::store::{dispatch, dispatch_with, use_app_store, AppStateStoreFields};

#[component]
pub fn ListDetail(list_id: ListId) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let user = ctx.user();

    let list = Memo::new(move |_| store.lists().read().get(list_id).cloned());
    let is_owner = Memo::new(move |_| list.with(|l| l.as_ref().is_some_and(|l| l.is_owner(&user))));
    let back = move |_| ctx.navigate(Route::Overview);

    let missing = move || {
        if store.loading().get() {
            view! { <LoadingSpinner message="Načítám seznam..." /> }.into_any()
        } else {
            view! {
                <div class="not-found">
                    <h2>"Seznam nenalezen"</h2>
                    <p>"Seznam neexistuje nebo k němu nemáte přístup."</p>
                    <button on:click=back>"Zpět na přehled"</button>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <section class="list-detail">
            <button class="back-btn" on:click=back>"← Zpět"</button>
            <Show when=move || list.with(Option::is_some) fallback=missing>
                <ListHeader list_id=list_id list=list is_owner=is_owner />
                <ItemsPanel list_id=list_id list=list />
                <MembersPanel list_id=list_id list=list is_owner=is_owner />
            </Show>
        </section>
    }
}

#[component]
fn ListHeader(list_id: ListId, list: Memo<Option<ShoppingList>>, is_owner: Memo<bool>) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let name = move || list.with(|l| l.as_ref().map(|l| l.name.clone()).unwrap_or_default());
    let archived = move || list.with(|l| l.as_ref().is_some_and(|l| l.archived));

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if dispatch_with(store, ctx, Action::rename(list_id, &draft.get())) {
            set_editing.set(false);
        }
    };

    view! {
        <header class="list-detail-header">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <h1>{name}</h1>
                    <Show when=move || is_owner.get() && !archived()>
                        <button
                            class="rename-btn"
                            on:click=move |_| {
                                set_draft.set(name());
                                set_editing.set(true);
                            }
                        >
                            "Přejmenovat"
                        </button>
                    </Show>
                }
            >
                <form class="rename-form" on:submit=save>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"Uložit"</button>
                    <button type="button" on:click=move |_| set_editing.set(false)>"Zrušit"</button>
                </form>
            </Show>
            <Show when=archived>
                <span class="badge archived-badge">"Archivováno"</span>
            </Show>
            <Show when=move || is_owner.get()>
                <button
                    class="archive-btn"
                    on:click=move |_| dispatch(store, ctx, Action::ToggleArchive { list_id })
                >
                    {move || if archived() { "Obnovit z archivu" } else { "Archivovat" }}
                </button>
            </Show>
        </header>
    }
}

#[component]
fn ItemsPanel(list_id: ListId, list: Memo<Option<ShoppingList>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let (show_completed, set_show_completed) = signal(true);
    let (new_item, set_new_item) = signal(String::new());

    let archived = move || list.with(|l| l.as_ref().is_some_and(|l| l.archived));
    let items = Memo::new(move |_| {
        let show = show_completed.get();
        list.with(|l| l.as_ref().map(|l| visible_items(l, show)).unwrap_or_default())
    });
    let progress = move || {
        list.with(|l| {
            l.as_ref()
                .map(|l| format!("{}/{} hotovo", l.completed_count(), l.items.len()))
                .unwrap_or_default()
        })
    };

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if dispatch_with(store, ctx, Action::add_item(list_id, &new_item.get())) {
            set_new_item.set(String::new());
        }
    };

    view! {
        <section class="items-panel">
            <div class="items-toolbar">
                <h2>"Položky"</h2>
                <span class="items-count">{progress}</span>
                <label class="show-completed">
                    <input
                        type="checkbox"
                        prop:checked=move || show_completed.get()
                        on:change=move |ev| set_show_completed.set(event_target_checked(&ev))
                    />
                    " Zobrazit hotové"
                </label>
            </div>

            <Show when=move || !archived()>
                <form class="new-item-form" on:submit=add_item>
                    <input
                        type="text"
                        placeholder="Přidat položku..."
                        prop:value=move || new_item.get()
                        on:input=move |ev| set_new_item.set(event_target_value(&ev))
                    />
                    <button type="submit">"Přidat"</button>
                </form>
            </Show>

            <Show
                when=move || !items.with(Vec::is_empty)
                fallback=|| view! { <p class="empty-state">"Žádné položky."</p> }
            >
                <ul class="item-list">
                    <For
                        each=move || items.get()
                        key=|item| (item.id, item.completed)
                        children=move |item| view! {
                            <ItemRow list_id=list_id item=item archived=Signal::derive(archived) />
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn ItemRow(list_id: ListId, item: Item, archived: Signal<bool>) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let item_id = item.id;

    view! {
        <li class=if item.completed { "item-row completed" } else { "item-row" }>
            <label>
                <input
                    type="checkbox"
                    prop:checked=item.completed
                    prop:disabled=move || archived.get()
                    on:change=move |_| dispatch(store, ctx, Action::ToggleItem { list_id, item_id })
                />
                <span class="item-name">{item.name}</span>
            </label>
            <Show when=move || !archived.get()>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    on_confirm=move |_| dispatch(store, ctx, Action::DeleteItem { list_id, item_id })
                />
            </Show>
        </li>
    }
}
