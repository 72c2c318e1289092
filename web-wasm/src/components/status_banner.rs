//! エラー・判定結果の表示

use leptos::prelude::*;
use signal_id_common::Session;

#[component]
pub fn StatusBanner(session: RwSignal<Session>) -> impl IntoView {
    let error = Memo::new(move |_| session.with(|s| s.error_message()));
    let result = Memo::new(move |_| session.with(|s| s.result().map(|r| r.to_string())));

    view! {
        {move || error.get().map(|message| view! {
            <div class="banner banner-error">
                <p>{message}</p>
            </div>
        })}
        {move || result.get().map(|label| view! {
            <div class="banner banner-result">
                <p>{label}</p>
            </div>
        })}
    }
}
