//! エラー型定義

use thiserror::Error;

/// 画面に表示されるセッションエラー
///
/// `Display` がそのままユーザー向けメッセージになる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please select an image file.")]
    NoFileSelected,

    /// 宣言されたMIMEタイプを保持する
    #[error("Invalid file type. Only images allowed.")]
    InvalidFileType(String),

    #[error("Upload an image first.")]
    NoImageSelected,

    #[error("Detection already in progress.")]
    DetectionInFlight,

    /// 原因はログ用に保持し、画面には汎用メッセージを出す
    #[error("Failed to process image. Please try again.")]
    DetectionFailure(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_messages() {
        assert_eq!(SessionError::NoFileSelected.to_string(), "Please select an image file.");
        assert_eq!(
            SessionError::InvalidFileType("application/pdf".into()).to_string(),
            "Invalid file type. Only images allowed."
        );
        assert_eq!(SessionError::NoImageSelected.to_string(), "Upload an image first.");
        assert_eq!(
            SessionError::DetectionFailure("timer dropped".into()).to_string(),
            "Failed to process image. Please try again."
        );
    }

    #[test]
    fn test_detection_failure_keeps_cause_in_debug() {
        let error = SessionError::DetectionFailure("decoder crashed".into());
        let debug = format!("{:?}", error);
        assert!(debug.contains("decoder crashed"));
    }

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("delayMs must be finite".to_string());
        assert_eq!(format!("{}", error), "Config error: delayMs must be finite");
    }
}
