//! 信号判定器
//!
//! 実際の推論は行わない。将来の分類器はこの `Detector` を実装して差し替える。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::settings::{DetectorSettings, DetectorVariant};
use crate::types::{ResultLabel, SelectedImage, SignalColor};

/// スタブ判定が返す固定ラベル
pub const PLACEHOLDER_LABEL: &str = "Red Signal Detected";

/// 信号判定器
pub trait Detector {
    /// 結果を反映するまでの待ち時間
    fn delay(&self) -> Duration;

    /// 判定を行う。失敗時は原因を返す
    fn detect(&mut self, image: &SelectedImage) -> Result<ResultLabel, String>;
}

/// ランダム判定（疑似的な遅延つき）
pub struct RandomDetector<R = StdRng> {
    rng: R,
    delay: Duration,
}

impl RandomDetector<StdRng> {
    pub fn new(delay: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), delay)
    }

    pub fn seeded(seed: u64, delay: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), delay)
    }
}

impl<R: Rng> RandomDetector<R> {
    pub fn with_rng(rng: R, delay: Duration) -> Self {
        Self { rng, delay }
    }
}

impl<R: Rng> Detector for RandomDetector<R> {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn detect(&mut self, image: &SelectedImage) -> Result<ResultLabel, String> {
        let color = SignalColor::ALL
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| "no signal colors to choose from".to_string())?;
        log::debug!("random detection for {}: {}", image.file.name, color.as_str());
        Ok(color.into())
    }
}

/// 固定ラベルを即時に返すスタブ
#[derive(Debug, Clone, Copy, Default)]
pub struct StubDetector;

impl Detector for StubDetector {
    fn delay(&self) -> Duration {
        Duration::ZERO
    }

    fn detect(&mut self, image: &SelectedImage) -> Result<ResultLabel, String> {
        // TODO: 分類APIが決まったらここで画像を送信する
        log::debug!("stub detection for {}", image.file.name);
        Ok(ResultLabel::placeholder(PLACEHOLDER_LABEL))
    }
}

/// 設定から判定器を組み立てる
pub fn build_detector(settings: &DetectorSettings) -> Box<dyn Detector> {
    match settings.variant {
        DetectorVariant::Random => match settings.seed {
            Some(seed) => Box::new(RandomDetector::seeded(seed, settings.delay())),
            None => Box::new(RandomDetector::new(settings.delay())),
        },
        DetectorVariant::Stub => Box::new(StubDetector),
    }
}
