use std::time::Duration;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised while reading metadata, probing, walking or touching files.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EXIF decoding failed: {0}")]
    Exif(#[from] exif::Error),

    #[error("MP4 decoding failed: {0}")]
    Mp4(#[from] mp4::Error),

    #[error("malformed PNG: {0}")]
    Png(&'static str),

    #[error("could not run {program}: {source}")]
    ProbeSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {timeout:?}")]
    ProbeTimeout { program: String, timeout: Duration },

    #[error("reading {program} output failed")]
    ProbeOutput { program: String },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{0} does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

pub type Result<T> = std::result::Result<T, Error>;
