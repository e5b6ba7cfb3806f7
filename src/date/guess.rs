use chrono::NaiveDateTime;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<date>[0-9]{8}_[0-9]{6})").unwrap());

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Guess a local date from a `YYYYMMDD_HHMMSS` run in the file's base name.
/// When the name holds several runs, the last one wins.
pub fn guess_date_from_filename(filename: &str) -> Option<NaiveDateTime> {
    let basename = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    let caps = RE_STAMP.captures_iter(basename).last()?;
    let date_str = caps.name("date")?.as_str();
    NaiveDateTime::parse_from_str(date_str, STAMP_FORMAT).ok()
}
