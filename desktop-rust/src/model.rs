use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use signal_id_common::{DetectionTicket, Preview};

/// プレビューの読み込み元
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// 読み込み済みプレビュー（表示用に縮小したRGBA付き）
pub struct LoadedPreview {
    pub preview: Preview,
    /// デコードできない画像は None
    pub pixels: Option<([usize; 2], Vec<u8>)>,
}

pub enum UiMessage {
    PreviewLoaded {
        image_id: u64,
        outcome: Result<LoadedPreview, String>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct PendingDetection {
    pub ticket: DetectionTicket,
    pub deadline: Instant,
}
