//! 判定フローのテスト
//!
//! 選択 → 判定 → リセットの流れをファイル経由で検証

use signal_id::error::SignalIdError;
use signal_id::probe;
use signal_id::runner::{detect_all, detect_file, RunOptions};
use signal_id_common::{
    RandomDetector, Session, SessionError, SignalColor, StubDetector, PLACEHOLDER_LABEL,
};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const NO_DELAY: RunOptions = RunOptions { no_delay: true, show_progress: false };
const WITH_DELAY: RunOptions = RunOptions { no_delay: false, show_progress: false };

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn allowed_labels() -> Vec<&'static str> {
    SignalColor::ALL.iter().map(|c| c.label()).collect()
}

/// 画像を選択してスタブ判定
#[tokio::test]
async fn test_stub_detection_on_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "photo.png", b"\x89PNG\r\n\x1a\n");

    let mut session = Session::new();
    let mut detector = StubDetector;
    let label = detect_file(&mut session, &mut detector, &path, NO_DELAY).await.unwrap();

    assert_eq!(label.as_str(), PLACEHOLDER_LABEL);
    assert_eq!(session.result(), Some(&label));
    assert!(session.error().is_none());
    let preview = session.preview().expect("preview should be attached");
    assert!(preview.src().starts_with("data:image/png;base64,"));
}

/// ランダム判定は1.5秒待ってから3種類のどれかを返す
#[tokio::test(start_paused = true)]
async fn test_random_detection_waits_for_delay() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "photo.png", b"png");

    let mut session = Session::new();
    let mut detector = RandomDetector::seeded(1, Duration::from_millis(1500));

    let started = tokio::time::Instant::now();
    let label = detect_file(&mut session, &mut detector, &path, WITH_DELAY).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert!(allowed_labels().contains(&label.as_str()));
    assert!(session.error().is_none());
}

/// PDFは不正なファイルとして拒否
#[tokio::test]
async fn test_pdf_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "doc.pdf", b"%PDF-1.4");

    let mut session = Session::new();
    let mut detector = StubDetector;
    let err = detect_file(&mut session, &mut detector, &path, NO_DELAY).await.unwrap_err();

    assert!(matches!(err, SignalIdError::Session(SessionError::InvalidFileType(_))));
    assert_eq!(err.to_string(), "Invalid file type. Only images allowed.");
    assert!(session.image().is_none());
    assert!(session.preview().is_none());
    assert!(session.result().is_none());
}

/// 存在しないファイル
#[tokio::test]
async fn test_missing_file() {
    let mut session = Session::new();
    let mut detector = StubDetector;
    let err = detect_file(&mut session, &mut detector, Path::new("/nonexistent/photo.png"), NO_DELAY)
        .await
        .unwrap_err();

    assert!(matches!(err, SignalIdError::FileNotFound(_)));
}

/// 判定後のリセットで全て空に戻る
#[tokio::test]
async fn test_reset_after_detection() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "photo.jpg", b"jpg");

    let mut session = Session::new();
    let mut detector = RandomDetector::seeded(5, Duration::ZERO);
    detect_file(&mut session, &mut detector, &path, NO_DELAY).await.unwrap();

    session.reset();
    assert!(session.image().is_none());
    assert!(session.error().is_none());
    assert!(session.result().is_none());
    assert_eq!(session.take_released().len(), 1);
}

/// 続けて別の画像を判定すると前の結果は置き換わる
#[tokio::test]
async fn test_second_file_replaces_first() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = write_file(dir.path(), "a.png", b"a");
    let second = write_file(dir.path(), "b.gif", b"b");

    let mut session = Session::new();
    let mut detector = StubDetector;
    detect_file(&mut session, &mut detector, &first, NO_DELAY).await.unwrap();
    detect_file(&mut session, &mut detector, &second, NO_DELAY).await.unwrap();

    assert_eq!(session.image().map(|i| i.file.name.as_str()), Some("b.gif"));
    assert_eq!(session.take_released().len(), 1);
}

/// フォルダはファイル名順に展開され、拡張子で絞り込まない
#[test]
fn test_expand_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_file(dir.path(), "c.png", b"c");
    write_file(dir.path(), "a.txt", b"a");
    write_file(dir.path(), "b.jpg", b"b");
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let files = probe::expand_paths(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.jpg", "c.png"]);
}

/// 空のフォルダはエラー
#[test]
fn test_expand_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = probe::expand_paths(&[dir.path().to_path_buf()]);
    assert!(matches!(result, Err(SignalIdError::NoFilesFound(_))));
}

/// 複数ファイルは1件ずつ報告され、失敗があればエラーで終わる
#[tokio::test]
async fn test_detect_all_reports_each_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png = write_file(dir.path(), "photo.png", b"png");
    let pdf = write_file(dir.path(), "doc.pdf", b"%PDF-1.4");

    let mut session = Session::new();
    let mut detector = StubDetector;
    let mut out = Vec::new();
    let result = detect_all(&mut session, &mut detector, &[png, pdf], NO_DELAY, &mut out).await;

    assert!(matches!(result, Err(SignalIdError::DetectionsFailed(1))));
    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("✔ "));
    assert!(lines[0].ends_with(&format!("photo.png: {}", PLACEHOLDER_LABEL)));
    assert!(lines[1].starts_with("✖ "));
    assert!(lines[1].ends_with("doc.pdf: Invalid file type. Only images allowed."));

    // 各ファイルの後でリセットされる
    assert!(session.image().is_none());
    assert!(session.error().is_none());
}

/// 全件成功なら Ok
#[tokio::test]
async fn test_detect_all_succeeds() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = write_file(dir.path(), "a.png", b"a");
    let second = write_file(dir.path(), "b.jpg", b"b");

    let mut session = Session::new();
    let mut detector = RandomDetector::seeded(9, Duration::ZERO);
    let mut out = Vec::new();
    detect_all(&mut session, &mut detector, &[first, second], NO_DELAY, &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert_eq!(output.lines().filter(|l| l.starts_with("✔ ")).count(), 2);
}
