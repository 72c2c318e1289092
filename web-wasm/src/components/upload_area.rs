//! アップロードエリアコンポーネント

use leptos::prelude::*;
use signal_id_common::Session;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::app::{drop_files, select_file};
use crate::browser;

#[component]
pub fn UploadArea<FR>(
    session: RwSignal<Session>,
    on_reset: FR,
) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    let has_image = Memo::new(move |_| session.with(|s| s.image().is_some()));
    let preview_src = Memo::new(move |_| {
        session.with(|s| s.preview().map(|p| p.src().to_string()))
    });
    let is_dragging = Memo::new(move |_| session.with(|s| s.is_dragging()));
    let input_epoch = Memo::new(move |_| session.with(|s| s.input_epoch()));

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        session.update(|s| s.drag_enter());
    };

    // dropを受け付けるには dragover の既定動作を止める必要がある
    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        session.update(|s| s.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let files = browser::files_from_list(ev.data_transfer().and_then(|dt| dt.files()));
        drop_files(session, files);
    };

    let on_change = move |ev: Event| {
        let file = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        select_file(session, file);
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragging.get()
            class:has-image=move || has_image.get()
            on:dragenter=on_dragenter
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            // リセットのたびに作り直し、同じファイルを再選択できるようにする
            {move || {
                let epoch = input_epoch.get();
                view! {
                    <input
                        type="file"
                        accept="image/*"
                        id="file-upload"
                        class="hidden"
                        data-epoch=epoch.to_string()
                        on:change=on_change
                    />
                }
            }}

            <Show
                when=move || has_image.get()
                fallback=|| view! {
                    <label for="file-upload" class="upload-label">
                        <div class="upload-icon">"🚦"</div>
                        <p>
                            <span class="upload-link">"Upload an image"</span>
                            " or drag and drop"
                        </p>
                    </label>
                }
            >
                <img
                    class="preview"
                    src=move || preview_src.get().unwrap_or_default()
                    alt="Preview"
                />
                <div class="preview-actions">
                    <button
                        class="btn btn-secondary"
                        on:click={
                            let on_reset = on_reset.clone();
                            move |_| on_reset(())
                        }
                    >
                        "Reset"
                    </button>
                </div>
            </Show>
        </div>
    }
}
