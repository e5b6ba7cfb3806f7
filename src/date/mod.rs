pub mod exif;
pub mod guess;
pub mod movie;
pub mod parse;
pub mod png;
pub mod sentinel;
pub mod source;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::media::MediaFile;
use crate::ProcessOptions;
pub use source::{DateSource, SourceContext};

/// One date read from one source, in local time, whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate {
    pub source: DateSource,
    pub value: NaiveDateTime,
}

/// Ask every applicable source for dates. A source that fails to read
/// contributes nothing; the rest are still consulted.
pub fn collect_candidates(media: &MediaFile, options: &ProcessOptions) -> Vec<DateCandidate> {
    let ctx = SourceContext::new(media, options);
    let mut candidates = Vec::new();

    for source in DateSource::for_media(media, options) {
        match source.dates(&ctx) {
            Ok(dates) => {
                log::debug!(
                    "{}: {} date(s) from {}",
                    media.path().display(),
                    dates.len(),
                    source
                );
                candidates.extend(dates.into_iter().map(|value| DateCandidate {
                    source,
                    value: truncate(value),
                }));
            }
            Err(err) => log::warn!("{}: {} skipped: {}", media.path().display(), source, err),
        }
    }

    candidates
}

/// The earliest candidate that is not a sentinel, or `None` when nothing is left.
/// On a tie the first source consulted wins.
pub fn resolve(candidates: &[DateCandidate]) -> Option<DateCandidate> {
    candidates
        .iter()
        .filter(|c| sentinel::is_valid(&c.value))
        .min_by_key(|c| c.value)
        .copied()
}

pub fn truncate(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Express an absolute instant as local wall-clock time.
///
/// Instants on a sentinel day in UTC keep their UTC fields, so the sentinel
/// filter still recognises them when the local zone would shift the day.
pub fn localize<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDateTime {
    let utc = instant.with_timezone(&Utc);
    if sentinel::is_sentinel_day(utc.date_naive()) {
        return truncate(utc.naive_utc());
    }
    truncate(utc.with_timezone(&Local).naive_local())
}
