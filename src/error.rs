use signal_id_common::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("判定対象のファイルがありません: {0}")]
    NoFilesFound(String),

    #[error("判定器の設定が不正です: {0}")]
    Settings(#[from] signal_id_common::Error),

    /// 画面と同じメッセージをそのまま出す
    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("{0}件の判定に失敗しました")]
    DetectionsFailed(usize),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SignalIdError>;
