//! 判定器の設定

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 疑似判定の既定待ち時間(ms)
pub const DEFAULT_DELAY_MS: u64 = 1500;

/// 待ち時間の上限(ms)
pub const MAX_DELAY_MS: u64 = 60_000;

/// 判定器の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorVariant {
    /// 3種類のラベルからランダムに選ぶ
    #[default]
    Random,
    /// 固定のプレースホルダを即時に返す
    Stub,
}

impl DetectorVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorVariant::Random => "random",
            DetectorVariant::Stub => "stub",
        }
    }
}

impl fmt::Display for DetectorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(DetectorVariant::Random),
            "stub" => Ok(DetectorVariant::Stub),
            _ => Err(format!("Invalid detector variant: {}. Use 'random' or 'stub'", s)),
        }
    }
}

/// 判定器の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorSettings {
    pub variant: DetectorVariant,
    /// ランダム判定の待ち時間(ms)
    pub delay_ms: u64,
    /// 指定するとランダム判定の結果が再現可能になる
    pub seed: Option<u64>,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            variant: DetectorVariant::Random,
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
        }
    }
}

impl DetectorSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(Error::Config(format!(
                "delayMs must be at most {} (got {})",
                MAX_DELAY_MS, self.delay_ms
            )));
        }
        Ok(())
    }

    /// JSON文字列から読み込み、値を検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: DetectorSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }
}
