use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use mime_guess::mime;
use mime_guess::Mime;

use crate::date::truncate;

/// Content category used to pick the date sources for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

/// Containers whose `mvhd`/`mdhd` atoms the MP4 reader understands
const MP4_FAMILY: &[&str] = &["video/mp4", "video/x-m4v", "video/quicktime"];

#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Path as found by the walk
    path: PathBuf,
    /// Content type guessed from the file name
    mime: Option<Mime>,
    /// Modification time when the file was opened
    modified: SystemTime,
}

impl MediaFile {
    pub fn open(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        let modified = fs::symlink_metadata(&path)?.modified()?;
        let mime = mime_guess::from_path(&path).first();
        Ok(Self {
            path,
            mime,
            modified,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> MediaKind {
        match self.mime.as_ref().map(|m| m.type_()) {
            Some(t) if t == mime::IMAGE => MediaKind::Image,
            Some(t) if t == mime::VIDEO => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    pub fn is_mp4_family(&self) -> bool {
        self.mime
            .as_ref()
            .is_some_and(|m| MP4_FAMILY.contains(&m.essence_str()))
    }

    /// Current modification time as local wall-clock time, whole seconds.
    pub fn modified_local(&self) -> NaiveDateTime {
        let local: DateTime<Local> = self.modified.into();
        truncate(local.naive_local())
    }
}
