//! メインアプリケーションコンポーネント

use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use signal_id_common::{build_detector, DetectorSettings, Session};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::browser;
use crate::components::{
    action_buttons::ActionButtons,
    header::Header,
    status_banner::StatusBanner,
    upload_area::UploadArea,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // セッション状態（選択画像・エラー・判定結果）
    let session = RwSignal::new(Session::new());
    let settings = DetectorSettings::default();

    let on_detect = move |_: ()| start_detection(session, settings.clone());
    let on_reset = move |_: ()| reset_session(session);

    view! {
        <div class="container">
            <Header />

            <main class="card">
                <UploadArea session=session on_reset=on_reset />
                <StatusBanner session=session />
                <ActionButtons session=session on_detect=on_detect on_reset=on_reset />
            </main>
        </div>
    }
}

/// ファイル選択ダイアログからの入力
pub fn select_file(session: RwSignal<Session>, file: Option<File>) {
    let meta = file.as_ref().map(browser::file_meta);
    let mut accepted = None;
    session.update(|s| accepted = s.submit_file(meta).ok());
    flush_released(session);

    if let (Some(image_id), Some(file)) = (accepted, file) {
        load_preview(session, image_id, &file);
    }
}

/// ドラッグ&ドロップからの入力（先頭のファイルのみ使う）
pub fn drop_files(session: RwSignal<Session>, files: Vec<File>) {
    let metas = files.iter().map(browser::file_meta).collect();
    let mut accepted = None;
    session.update(|s| accepted = s.drop_files(metas).and_then(|outcome| outcome.ok()));
    flush_released(session);

    if let (Some(image_id), Some(file)) = (accepted, files.first()) {
        load_preview(session, image_id, file);
    }
}

fn load_preview(session: RwSignal<Session>, image_id: u64, file: &File) {
    match browser::object_url_preview(file) {
        Ok(preview) => attach_preview(session, image_id, preview),
        Err(err) => {
            log::warn!("createObjectURL failed, reading as data URL: {:?}", err);
            let started = browser::read_data_url_preview(file, move |outcome| match outcome {
                Ok(preview) => attach_preview(session, image_id, preview),
                Err(message) => log::error!("preview read failed: {}", message),
            });
            if let Err(err) = started {
                log::error!("FileReader unavailable: {:?}", err);
            }
        }
    }
}

fn attach_preview(session: RwSignal<Session>, image_id: u64, preview: signal_id_common::Preview) {
    session.update(|s| {
        s.attach_preview(image_id, preview);
    });
    flush_released(session);
}

/// 判定を開始し、待ち時間の後に結果を反映する
fn start_detection(session: RwSignal<Session>, settings: DetectorSettings) {
    let mut started = None;
    session.update(|s| started = s.begin_detection().ok());
    let Some(ticket) = started else {
        return;
    };

    let mut detector = build_detector(&settings);
    spawn_local(async move {
        let delay = detector.delay();
        if !delay.is_zero() {
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            TimeoutFuture::new(millis).await;
        }

        let outcome = session.with_untracked(|s| match s.image() {
            Some(image) => detector.detect(image),
            None => Err("selection was cleared before detection finished".to_string()),
        });
        session.update(|s| {
            s.complete_detection(ticket, outcome);
        });
    });
}

fn reset_session(session: RwSignal<Session>) {
    session.update(|s| s.reset());
    flush_released(session);
}

/// 差し替え済みのプレビューを解放する
fn flush_released(session: RwSignal<Session>) {
    let mut released = Vec::new();
    session.update(|s| released = s.take_released());
    for preview in &released {
        browser::release_preview(preview);
    }
}
