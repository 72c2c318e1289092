use clap::Parser;
use signal_id::{cli, config, error, probe, runner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use runner::RunOptions;
use signal_id_common::{build_detector, Session};
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Detect { paths, variant, seed, no_delay } => {
            println!("🚦 signal-id - 信号判定\n");

            let config = Config::load()?;
            let mut settings = config.detector;
            if let Some(variant) = variant {
                settings.variant = variant;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            log::debug!("detector settings: {:?}", settings);

            let files = probe::expand_paths(&paths)?;
            let mut detector = build_detector(&settings);
            let mut session = Session::new();
            let options = RunOptions {
                no_delay,
                show_progress: !cli.verbose,
            };

            runner::detect_all(
                &mut session,
                detector.as_mut(),
                &files,
                options,
                &mut std::io::stdout(),
            )
            .await?;
            println!("\n✅ 判定完了");
        }

        Commands::Config { variant, delay_ms, show } => {
            // 不正な値が保存されていても修正できるよう検証せずに読む
            let mut config = Config::load_unchecked()?;
            let changed = variant.is_some() || delay_ms.is_some();

            if let Some(variant) = variant {
                config.detector.variant = variant;
            }
            if let Some(delay_ms) = delay_ms {
                config.detector.delay_ms = delay_ms;
            }
            if changed {
                config.detector.validate()?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  判定器: {}", config.detector.variant);
                println!("  待ち時間: {}ms", config.detector.delay_ms);
                println!(
                    "  シード: {}",
                    config.detector.seed.map(|s| s.to_string()).unwrap_or_else(|| "未設定".into())
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
