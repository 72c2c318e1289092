//! セッションで扱う型定義
//!
//! 全フロントエンド(Web/デスクトップ/CLI)で共有される型:
//! - FileMeta: 選択されたファイルの情報
//! - SelectedImage: 選択中の画像とプレビュー
//! - SignalColor / ResultLabel: 判定結果

use std::fmt;

use crate::preview::Preview;

/// 選択されたファイルの情報（ブラウザの File 相当）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    /// 宣言されたMIMEタイプ（例: "image/png"）
    pub content_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

/// 選択中の画像
///
/// `preview` は非同期読込(FileReader等)の完了までは `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub id: u64,
    pub file: FileMeta,
    pub preview: Option<Preview>,
}

/// 信号の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalColor {
    Red,
    Yellow,
    Green,
}

impl SignalColor {
    pub const ALL: [SignalColor; 3] = [SignalColor::Red, SignalColor::Yellow, SignalColor::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalColor::Red => "red",
            SignalColor::Yellow => "yellow",
            SignalColor::Green => "green",
        }
    }

    /// 分類器のクラスインデックス (0: red, 1: yellow, 2: green)
    pub fn class_index(&self) -> usize {
        match self {
            SignalColor::Red => 0,
            SignalColor::Yellow => 1,
            SignalColor::Green => 2,
        }
    }

    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 画面に表示する判定ラベル
    pub fn label(&self) -> &'static str {
        match self {
            SignalColor::Red => "🟥 Red Signal Detected",
            SignalColor::Yellow => "🟨 Yellow Signal Detected",
            SignalColor::Green => "🟩 Green Signal Detected",
        }
    }
}

/// 判定結果ラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLabel {
    pub text: String,
    /// スタブ判定では色が確定しない
    pub color: Option<SignalColor>,
}

impl ResultLabel {
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<SignalColor> for ResultLabel {
    fn from(color: SignalColor) -> Self {
        Self {
            text: color.label().to_string(),
            color: Some(color),
        }
    }
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
