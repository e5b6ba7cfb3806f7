use std::path::Path;

use chrono::{Local, NaiveDateTime};
use filetime::FileTime;

use crate::media::MediaFile;
use crate::{Error, Result};

/// Format used when reporting a new timestamp.
const REPORT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What reconciliation did to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The modification time was moved back to this date.
    Updated(NaiveDateTime),
    /// The file is already at or before its resolved date.
    Unchanged,
    /// No usable date was found.
    NoDate,
}

impl Outcome {
    /// Console line for this outcome, if it warrants one.
    pub fn message(&self, path: &Path) -> Option<String> {
        match self {
            Outcome::Updated(date) => Some(format!(
                "{} -> {}",
                path.display(),
                date.format(REPORT_FORMAT)
            )),
            Outcome::NoDate => Some(format!("no date for {}", path.display())),
            Outcome::Unchanged => None,
        }
    }
}

/// Move the file's modification time back to `resolved` when it is currently later.
///
/// Never moves a timestamp forward. With `dry_run` the decision is made the
/// same way but nothing is written.
pub fn reconcile(media: &MediaFile, resolved: Option<NaiveDateTime>, dry_run: bool) -> Result<Outcome> {
    let Some(date) = resolved else {
        return Ok(Outcome::NoDate);
    };

    if media.modified_local() <= date {
        return Ok(Outcome::Unchanged);
    }

    if !dry_run {
        set_mtime(media.path(), date)?;
    }
    Ok(Outcome::Updated(date))
}

/// Set the modification time to a local wall-clock date, leaving atime alone.
pub fn set_mtime(path: &Path, date: NaiveDateTime) -> Result<()> {
    // NaiveDateTime is local time; an ambiguous hour takes the earlier instant
    let local = date
        .and_local_timezone(Local)
        .earliest()
        .ok_or(Error::NonexistentLocalTime(date))?;
    filetime::set_file_mtime(path, FileTime::from_unix_time(local.timestamp(), 0))?;
    Ok(())
}
