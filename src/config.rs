use crate::error::{Result, SignalIdError};
use serde::{Deserialize, Serialize};
use signal_id_common::DetectorSettings;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub detector: DetectorSettings,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 値を検証せずに読み込む（`config` コマンドでの修正用）
    pub fn load_unchecked() -> Result<Self> {
        Self::load_unchecked_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む。ファイルが無ければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::load_unchecked_from(path)?;
        config.detector.validate()?;
        Ok(config)
    }

    pub fn load_unchecked_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SignalIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("signal-id").join("config.json"))
    }
}
