//! Traffic Signal Identifier Common Library
//!
//! Web(WASM)・デスクトップ・CLIで共有されるセッションモデル

pub mod types;
pub mod error;
pub mod upload;
pub mod preview;
pub mod settings;
pub mod detector;
pub mod session;

pub use types::{FileMeta, ResultLabel, SelectedImage, SignalColor};
pub use error::{Error, Result, SessionError};
pub use upload::{is_image_content_type, validate_upload, FALLBACK_MIME_TYPE};
pub use preview::Preview;
pub use settings::{DetectorSettings, DetectorVariant, DEFAULT_DELAY_MS, MAX_DELAY_MS};
pub use detector::{build_detector, Detector, RandomDetector, StubDetector, PLACEHOLDER_LABEL};
pub use session::{DetectionTicket, Session};
