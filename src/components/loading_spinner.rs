use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading-spinner" aria-busy="true">
            <div class="spinner"></div>
            <p>{message.unwrap_or_else(|| "Načítání...".to_string())}</p>
        </div>
    }
}
