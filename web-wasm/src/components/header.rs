//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Traffic Signal Identifier"</h1>
            <p class="text-muted">"Upload a traffic signal image to detect its status."</p>
        </header>
    }
}
