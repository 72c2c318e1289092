//! 判定・リセットボタン

use leptos::prelude::*;
use signal_id_common::Session;

#[component]
pub fn ActionButtons<FD, FR>(
    session: RwSignal<Session>,
    on_detect: FD,
    on_reset: FR,
) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    let can_detect = Memo::new(move |_| session.with(|s| s.can_detect()));
    let is_detecting = Memo::new(move |_| session.with(|s| s.is_detecting()));
    let has_result = Memo::new(move |_| session.with(|s| s.result().is_some()));

    view! {
        <div class="action-buttons">
            // 判定中は二重起動させない
            <button
                class="btn btn-primary"
                disabled=move || !can_detect.get()
                on:click={
                    let on_detect = on_detect.clone();
                    move |_| on_detect(())
                }
            >
                {move || if is_detecting.get() { "Detecting..." } else { "Detect Signal" }}
            </button>

            <Show when=move || has_result.get()>
                <button
                    class="btn btn-secondary"
                    on:click={
                        let on_reset = on_reset.clone();
                        move |_| on_reset(())
                    }
                >
                    "Upload Another Image"
                </button>
            </Show>
        </div>
    }
}
