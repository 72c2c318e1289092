//! プレビュー表現
//!
//! ブラウザの `URL.createObjectURL` で作るオブジェクトURLは明示的に解放する必要がある。
//! Data URI は文字列そのものなので解放不要。

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 画像プレビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// 一時的なオブジェクト参照 ("blob:..." 等)
    ObjectUrl(String),
    /// "data:image/png;base64,..." 形式
    DataUri(String),
}

impl Preview {
    /// バイト列から Data URI プレビューを作る
    pub fn from_bytes(content_type: &str, bytes: &[u8]) -> Self {
        Preview::DataUri(format!("data:{};base64,{}", content_type, STANDARD.encode(bytes)))
    }

    /// `<img src>` や描画にそのまま渡せる文字列
    pub fn src(&self) -> &str {
        match self {
            Preview::ObjectUrl(url) => url,
            Preview::DataUri(uri) => uri,
        }
    }

    /// 差し替え時に解放処理が必要か
    pub fn needs_release(&self) -> bool {
        matches!(self, Preview::ObjectUrl(_))
    }
}
