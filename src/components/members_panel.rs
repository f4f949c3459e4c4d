//! Members Panel
//!
//! Who a list is shared with. Owners invite by email, grant or revoke owner
//! rights and remove members; everyone else can only leave.

use leptos::prelude::*;
use shoplist_api::{Action, ListId, Member, ShoppingList};

use super::DeleteConfirmButton;
use crate::context::AppContext;
use crate::routing::Route;
use crate::store::{dispatch, dispatch_with, use_app_store};

#[component]
pub fn MembersPanel(list_id: ListId, list: Memo<Option<ShoppingList>>, is_owner: Memo<bool>) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let user = ctx.user();
    let (email, set_email) = signal(String::new());

    let members = Memo::new(move |_| list.with(|l| l.as_ref().map(|l| l.members.clone()).unwrap_or_default()));

    let invite = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if dispatch_with(store, ctx, Action::add_member(list_id, &email.get())) {
            set_email.set(String::new());
        }
    };

    let leave = move |_| {
        if let Some(list) = list.get_untracked() {
            dispatch(store, ctx, Action::Leave { list });
            ctx.navigate(Route::Overview);
        }
    };

    view! {
        <section class="members-panel">
            <h2>"Sdílení"</h2>
            <ul class="member-list">
                {move || {
                    let manage = is_owner.get();
                    members
                        .get()
                        .into_iter()
                        .map(|member| {
                            let is_self = member.has_email(&user);
                            view! { <MemberRow list_id=list_id member=member manage=manage is_self=is_self /> }
                        })
                        .collect_view()
                }}
            </ul>
            <Show
                when=move || is_owner.get()
                fallback=move || view! {
                    <button class="leave-btn" on:click=leave>"Opustit seznam"</button>
                }
            >
                <form class="share-form" on:submit=invite>
                    <input
                        type="email"
                        placeholder="E-mail člena..."
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <button type="submit">"Pozvat"</button>
                </form>
            </Show>
        </section>
    }
}

#[component]
fn MemberRow(list_id: ListId, member: Member, manage: bool, is_self: bool) -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let member_is_owner = member.is_owner;

    let controls = (manage && !is_self).then(|| {
        let role_id = member.id.clone();
        let remove_id = member.id.clone();
        view! {
            <button
                class="role-btn"
                on:click=move |_| dispatch(
                    store,
                    ctx,
                    Action::SetRole { list_id, member_id: role_id.clone(), is_owner: !member_is_owner },
                )
            >
                {if member_is_owner { "Odebrat vlastnictví" } else { "Udělat vlastníkem" }}
            </button>
            {(!member_is_owner).then(|| view! {
                <DeleteConfirmButton
                    button_class="member-remove-btn"
                    on_confirm=move |_| dispatch(
                        store,
                        ctx,
                        Action::RemoveMember { list_id, member_id: remove_id.clone() },
                    )
                />
            })}
        }
    });

    view! {
        <li class="member-row">
            <span class="member-email">{member.email}</span>
            {member_is_owner.then(|| view! { <span class="badge owner-badge">"Vlastník"</span> })}
            {is_self.then(|| view! { <span class="badge self-badge">"Vy"</span> })}
            {controls}
        </li>
    }
}
