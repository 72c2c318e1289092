//! セッションを使った判定フロー
//!
//! 画面での「選択 → Detect Signal」と同じ順序で遷移させる。

use crate::error::{Result, SignalIdError};
use crate::probe;
use indicatif::{ProgressBar, ProgressStyle};
use signal_id_common::{Detector, ResultLabel, Session, SessionError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// 疑似遅延を省略する
    pub no_delay: bool,
    /// 待機中にスピナーを表示する
    pub show_progress: bool,
}

/// 1ファイルを選択して判定する
///
/// 判定結果はセッションにも残る。
pub async fn detect_file(
    session: &mut Session,
    detector: &mut dyn Detector,
    path: &Path,
    options: RunOptions,
) -> Result<ResultLabel> {
    let file = probe::probe_file(path)?;
    let content_type = file.content_type.clone();
    let image_id = session.submit_file(Some(file))?;

    let preview = probe::read_preview(path, &content_type)?;
    log::debug!("preview ready: {} ({} chars)", path.display(), preview.src().len());
    session.attach_preview(image_id, preview);

    let ticket = session.begin_detection()?;

    let delay = if options.no_delay { Duration::ZERO } else { detector.delay() };
    if !delay.is_zero() {
        wait(delay, options.show_progress).await;
    }

    let outcome = match session.image() {
        Some(image) => detector.detect(image),
        None => Err("selection was cleared before detection finished".to_string()),
    };
    session.complete_detection(ticket, outcome);

    if let Some(err) = session.error() {
        return Err(err.clone().into());
    }
    session
        .result()
        .cloned()
        .ok_or_else(|| SessionError::DetectionFailure("no result recorded".to_string()).into())
}

/// 複数ファイルを順に判定し、1ファイル1行で `out` に書き出す
///
/// ファイルごとにセッションをリセットする。1件でも失敗があれば `DetectionsFailed`。
pub async fn detect_all<W: Write>(
    session: &mut Session,
    detector: &mut dyn Detector,
    files: &[PathBuf],
    options: RunOptions,
    out: &mut W,
) -> Result<()> {
    let mut failures = 0;
    for path in files {
        let name = path.display();
        match detect_file(session, detector, path, options).await {
            Ok(label) => writeln!(out, "✔ {}: {}", name, label)?,
            Err(err) => {
                failures += 1;
                writeln!(out, "✖ {}: {}", name, err)?;
            }
        }
        // 「Upload Another Image」と同じく次のファイルの前に初期化
        session.reset();
        for released in session.take_released() {
            log::debug!("preview released ({} chars)", released.src().len());
        }
    }

    if failures > 0 {
        return Err(SignalIdError::DetectionsFailed(failures));
    }
    Ok(())
}

async fn wait(delay: Duration, show_progress: bool) {
    if !show_progress {
        tokio::time::sleep(delay).await;
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("判定中...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    tokio::time::sleep(delay).await;
    spinner.finish_and_clear();
}
