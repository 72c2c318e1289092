use anyhow::{Context, Result};
use image::ImageFormat;
use std::fs;
use std::path::Path;

use egui::DroppedFile;
use signal_id_common::{FALLBACK_MIME_TYPE, FileMeta, Preview};

use crate::model::{FileSource, LoadedPreview};

/// ファイル選択ダイアログの拡張子フィルタ
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

const PREVIEW_WIDTH: u32 = 480;
const PREVIEW_HEIGHT: u32 = 360;

pub fn content_type_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

pub fn file_meta_for(path: &Path) -> Result<FileMeta> {
    let metadata = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(FileMeta::new(name, content_type_for(path), metadata.len()))
}

/// OSからドロップされたファイルを選択候補に変換する
pub fn dropped_selection(file: &DroppedFile) -> Option<(FileMeta, FileSource)> {
    if let Some(path) = file.path.as_ref() {
        return match file_meta_for(path) {
            Ok(meta) => Some((meta, FileSource::Path(path.clone()))),
            Err(err) => {
                log::warn!("dropped file unreadable: {err:#}");
                None
            }
        };
    }
    let bytes = file.bytes.clone()?;
    let content_type = if file.mime.is_empty() {
        content_type_for(Path::new(&file.name)).to_string()
    } else {
        file.mime.clone()
    };
    let meta = FileMeta::new(file.name.clone(), content_type, bytes.len() as u64);
    Some((meta, FileSource::Bytes(bytes)))
}

/// ファイル全体を読み込み、Data URIと表示用ピクセルを作る
pub fn load_preview(source: &FileSource, content_type: &str) -> Result<LoadedPreview> {
    let bytes: Vec<u8> = match source {
        FileSource::Path(path) => {
            fs::read(path).with_context(|| format!("read {}", path.display()))?
        }
        FileSource::Bytes(bytes) => bytes.to_vec(),
    };

    let preview = Preview::from_bytes(content_type, &bytes);
    let pixels = image::load_from_memory(&bytes).ok().map(|image| {
        let thumb = image.thumbnail(PREVIEW_WIDTH, PREVIEW_HEIGHT);
        let size = [thumb.width() as usize, thumb.height() as usize];
        (size, thumb.to_rgba8().into_raw())
    });

    Ok(LoadedPreview { preview, pixels })
}
