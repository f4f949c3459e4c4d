//! Error Banner Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{dispatch, use_app_store, AppStateStoreFields};

/// Shows the last failure in the user's language, with a retry button when
/// the failed action can be sent again.
#[component]
pub fn ErrorMessage() -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();
    let locale = ctx.locale();

    move || {
        store.failure().get().map(|failure| {
            let retry = failure.retry.map(|action| {
                view! {
                    <button
                        class="retry-btn"
                        on:click=move |_| dispatch(store, ctx, action.clone())
                    >
                        {locale.retry_label()}
                    </button>
                }
            });

            view! {
                <div class="error-message" role="alert" lang=locale.as_str() data-code=failure.error.code()>
                    <strong class="error-title">{locale.error_title()}</strong>
                    <p class="error-text">{ctx.describe(&failure.error)}</p>
                    {retry}
                    <button class="dismiss-btn" on:click=move |_| store.failure().set(None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
