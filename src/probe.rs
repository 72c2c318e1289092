//! ディスク上のファイルを選択ファイル(FileMeta)として扱う

use crate::error::{Result, SignalIdError};
use image::ImageFormat;
use signal_id_common::{FileMeta, Preview, FALLBACK_MIME_TYPE};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 拡張子からMIMEタイプを推定する
pub fn content_type_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

pub fn probe_file(path: &Path) -> Result<FileMeta> {
    if !path.is_file() {
        return Err(SignalIdError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(FileMeta::new(name, content_type_for(path), size))
}

/// ファイル全体を読み込んで Data URI プレビューを作る
pub fn read_preview(path: &Path, content_type: &str) -> Result<Preview> {
    let bytes = std::fs::read(path)?;
    Ok(Preview::from_bytes(content_type, &bytes))
}

/// 引数のパスを判定対象ファイルに展開する
///
/// フォルダは直下のファイルのみ、ファイル名順。拡張子では絞り込まない。
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file())
                .collect();
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            files.extend(entries);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(SignalIdError::FileNotFound(path.display().to_string()));
        }
    }

    if files.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(SignalIdError::NoFilesFound(joined));
    }

    Ok(files)
}
