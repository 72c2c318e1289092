use clap::{Parser, Subcommand};
use signal_id_common::DetectorVariant;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signal-id")]
#[command(about = "Traffic Signal Identifier - 信号画像の判定（シミュレーション）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像ファイルを選択して信号を判定
    Detect {
        /// 画像ファイルまたはフォルダ（フォルダは直下のファイルを順に判定）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 判定器 (random/stub)。省略時は設定ファイルの値
        #[arg(long)]
        variant: Option<DetectorVariant>,

        /// 乱数シード（random判定の再現用）
        #[arg(long)]
        seed: Option<u64>,

        /// 疑似待ち時間を省略
        #[arg(long)]
        no_delay: bool,
    },

    /// 設定を表示・変更
    Config {
        /// 既定の判定器を設定 (random/stub)
        #[arg(long)]
        variant: Option<DetectorVariant>,

        /// random判定の待ち時間(ms)を設定
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
