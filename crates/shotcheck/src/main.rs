//! shotcheck CLI - send debug screenshots to Claude for review.
//!
//! # Usage
//!
//! ```bash
//! # Review everything in debug_screenshots/ and write a Markdown report
//! shotcheck
//!
//! # Watch for new screenshots and review them as they land
//! shotcheck --watch
//!
//! # Only review screenshots of the login screen
//! shotcheck --screen login
//! ```
//!
//! Requires the ANTHROPIC_API_KEY environment variable.

use clap::Parser;
use shotcheck_core::{BatchOutcome, Config, Runner};
use std::path::PathBuf;

mod logging;

/// Review game screenshots with Claude.
#[derive(Parser, Debug)]
#[command(name = "shotcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Watch for new screenshots and review them in real time
    #[arg(short, long)]
    watch: bool,

    /// Review only screenshots whose file name contains this pattern
    #[arg(short, long)]
    screen: Option<String>,

    /// Screenshot directory (overrides config)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Report directory (overrides config)
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
            Config::default()
        }
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("shotcheck v{}", shotcheck_core::VERSION);

    if let Some(dir) = cli.dir {
        config.source.screenshot_dir = dir;
    }
    if let Some(dir) = cli.report_dir {
        config.report.report_dir = dir;
    }

    // Fails here when ANTHROPIC_API_KEY is unset: no scan, no network call.
    let runner = Runner::from_config(config)?.with_screen_filter(cli.screen);

    if cli.watch {
        println!("Watching for new screenshots... (press Ctrl+C to stop)");
        runner
            .watch(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
    } else {
        match runner.review_all().await? {
            BatchOutcome::MissingSourceDir(dir) => {
                println!("Screenshot directory '{}' does not exist", dir.display());
                println!("Run your game with debug mode to generate screenshots");
            }
            BatchOutcome::NoScreenshots(dir) => {
                println!("No screenshots found in '{}'", dir.display());
            }
            BatchOutcome::Report {
                path,
                reviewed,
                failed,
            } => {
                if failed > 0 {
                    println!("Reviewed {reviewed} screenshots ({failed} failed)");
                } else {
                    println!("Reviewed {reviewed} screenshots");
                }
                println!("Review complete! Report saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
