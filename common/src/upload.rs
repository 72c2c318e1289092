//! アップロード入力の検証

use crate::error::SessionError;
use crate::types::FileMeta;

/// 画像として受け付けるMIMEタイプの接頭辞
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// 判別できないファイルに使うMIMEタイプ
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// 宣言されたMIMEタイプが画像か
///
/// 大文字小文字は区別しない。サブタイプのない "image/" や前後の空白は不可。
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.len() > IMAGE_MIME_PREFIX.len()
        && content_type.is_char_boundary(IMAGE_MIME_PREFIX.len())
        && content_type[..IMAGE_MIME_PREFIX.len()].eq_ignore_ascii_case(IMAGE_MIME_PREFIX)
}

/// 選択されたファイルを検証する
pub fn validate_upload(file: Option<FileMeta>) -> Result<FileMeta, SessionError> {
    let file = file.ok_or(SessionError::NoFileSelected)?;
    if !is_image_content_type(&file.content_type) {
        return Err(SessionError::InvalidFileType(file.content_type));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_content_type() {
        assert!(is_image_content_type("image/png"));
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("IMAGE/WEBP"));
        assert!(is_image_content_type("image/svg+xml"));
        assert!(!is_image_content_type("image/"));
        assert!(!is_image_content_type("application/pdf"));
        assert!(!is_image_content_type("text/plain"));
        assert!(!is_image_content_type(""));
        assert!(!is_image_content_type("images"));
        assert!(!is_image_content_type(" image/png"));
    }

    #[test]
    fn test_validate_upload_missing() {
        assert_eq!(validate_upload(None), Err(SessionError::NoFileSelected));
    }

    #[test]
    fn test_validate_upload_rejects_pdf() {
        let file = FileMeta::new("doc.pdf", "application/pdf", 10);
        let err = validate_upload(Some(file)).unwrap_err();
        assert_eq!(err, SessionError::InvalidFileType("application/pdf".to_string()));
        assert_eq!(err.to_string(), "Invalid file type. Only images allowed.");
    }

    #[test]
    fn test_validate_upload_accepts_png() {
        let file = FileMeta::new("photo.png", "image/png", 10);
        assert_eq!(validate_upload(Some(file.clone())), Ok(file));
    }

    #[test]
    fn test_non_ascii_content_type() {
        assert!(!is_image_content_type("画像/png"));
    }
}
