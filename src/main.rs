use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use media_age::{ProcessOptions, VideoPolicy};

#[derive(Parser)]
#[command(name = "media-age", version, about = "Backdate photo and video modification times to their capture date")]
struct Cli {
    /// Directory to process (quotes are stripped, a leading ~/ is expanded)
    directory: String,

    /// Which videos get their dates resolved
    #[arg(long, value_enum, default_value_t = VideoPolicy::All)]
    video_policy: VideoPolicy,

    /// Do not ask ffprobe for video dates
    #[arg(long)]
    no_probe: bool,

    /// Disable date guessing from filenames
    #[arg(long)]
    no_guess: bool,

    /// ffprobe executable
    #[arg(long, default_value = "ffprobe")]
    ffprobe: PathBuf,

    /// Seconds to wait for ffprobe on one file
    #[arg(long, default_value_t = 30)]
    probe_timeout: u64,

    /// Report what would change without touching any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let t_total = std::time::Instant::now();

    let home = dirs::home_dir();
    let directory = media_age::walk::expand_target(&cli.directory, home.as_deref());
    if !directory.exists() {
        println!("directory not found: {}", directory.display());
        return Ok(());
    }

    let options = ProcessOptions {
        directory,
        video_policy: cli.video_policy,
        no_probe: cli.no_probe,
        no_guess: cli.no_guess,
        ffprobe: cli.ffprobe,
        probe_timeout: Duration::from_secs(cli.probe_timeout),
        dry_run: cli.dry_run,
    };

    let result = media_age::process(&options)
        .with_context(|| format!("failed to scan {}", options.directory.display()))?;

    log::debug!(
        "{} files: {} updated, {} unchanged, {} without date, {} failed ({:.2}s)",
        result.files,
        result.updated,
        result.unchanged,
        result.no_date,
        result.failed,
        t_total.elapsed().as_secs_f64()
    );

    Ok(())
}
