use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Turn the raw command-line argument into a directory path: surrounding
/// quotes are dropped and a leading `~/` is replaced by `home`.
pub fn expand_target(raw: &str, home: Option<&Path>) -> PathBuf {
    let trimmed = raw.trim().trim_matches(|c: char| c == '"' || c == '\'');
    match (trimmed.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(trimmed),
    }
}

/// Every regular file under `root`, following directory links, sorted
/// case-insensitively by full path.
///
/// Links whose target is gone are skipped; any other error while
/// enumerating aborts the walk.
pub fn collect_files(root: &Path) -> crate::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling_link(&err) => {
                log::warn!("skipping broken link: {}", err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_file() && !entry.path_is_symlink() {
            files.push(entry.into_path());
        }
    }

    files.sort_by_cached_key(|p| {
        let s = p.to_string_lossy().into_owned();
        (s.to_lowercase(), s)
    });
    Ok(files)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return false;
    }
    let Some(path) = err.path() else {
        return false;
    };
    let is_link = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    is_link && fs::metadata(path).is_err()
}
