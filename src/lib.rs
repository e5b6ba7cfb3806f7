pub mod date;
pub mod error;
pub mod media;
pub mod probe;
pub mod reconcile;
pub mod walk;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{Error, Result};
pub use reconcile::Outcome;

/// Which videos get their dates resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VideoPolicy {
    /// Every `video/*` file: container atoms, ffprobe and file name.
    #[default]
    All,
    /// MP4-family containers only, from their atoms alone.
    Mp4Only,
}

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub directory: PathBuf,
    pub video_policy: VideoPolicy,
    pub no_probe: bool,
    pub no_guess: bool,
    /// ffprobe executable
    pub ffprobe: PathBuf,
    pub probe_timeout: Duration,
    pub dry_run: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            video_policy: VideoPolicy::default(),
            no_probe: false,
            no_guess: false,
            ffprobe: PathBuf::from("ffprobe"),
            probe_timeout: Duration::from_secs(30),
            dry_run: false,
        }
    }
}

/// Per-run counters. Only ever logged, never printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    pub files: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub no_date: u64,
    pub failed: u64,
}

/// Resolve and reconcile a single file.
pub fn process_file(path: &Path, options: &ProcessOptions) -> Result<Outcome> {
    let media = media::MediaFile::open(path)?;
    let candidates = date::collect_candidates(&media, options);
    let resolved = date::resolve(&candidates);
    if let Some(winner) = &resolved {
        log::debug!("{}: {} from {}", path.display(), winner.value, winner.source);
    }
    reconcile::reconcile(&media, resolved.map(|c| c.value), options.dry_run)
}

/// Walk `options.directory` and reconcile every file in it, one at a time.
///
/// A failure on one file is logged and the walk moves on; only a failure to
/// enumerate the tree is returned.
pub fn process(options: &ProcessOptions) -> Result<ProcessResult> {
    log::info!("Scanning {}", options.directory.display());
    let files = walk::collect_files(&options.directory)?;

    let mut result = ProcessResult::default();
    for path in &files {
        result.files += 1;
        match process_file(path, options) {
            Ok(outcome) => {
                if let Some(line) = outcome.message(path) {
                    println!("{line}");
                }
                match outcome {
                    Outcome::Updated(_) => result.updated += 1,
                    Outcome::Unchanged => result.unchanged += 1,
                    Outcome::NoDate => result.no_date += 1,
                }
            }
            Err(err) => {
                log::error!("{}: {}", path.display(), err);
                result.failed += 1;
            }
        }
    }

    Ok(result)
}
