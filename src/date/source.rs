use std::cell::OnceCell;
use std::fmt;

use chrono::NaiveDateTime;

use super::exif;
use super::movie::{self, ContainerTimes};
use super::{guess, parse, png};
use crate::media::{MediaFile, MediaKind};
use crate::probe::Prober;
use crate::{ProcessOptions, VideoPolicy};

/// Every place a capture date can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSource {
    GenericExif,
    Png,
    ImageFile,
    SubIfd,
    FileSystem,
    Mp4Container,
    Mp4Media,
    Probe,
    Filename,
}

const IMAGE_SOURCES: [DateSource; 5] = [
    DateSource::GenericExif,
    DateSource::Png,
    DateSource::ImageFile,
    DateSource::SubIfd,
    DateSource::FileSystem,
];

impl DateSource {
    /// Sources worth asking for `media` under `options`.
    pub fn for_media(media: &MediaFile, options: &ProcessOptions) -> Vec<DateSource> {
        match media.kind() {
            MediaKind::Image => IMAGE_SOURCES.to_vec(),
            MediaKind::Video => {
                let mut sources = Vec::new();
                if media.is_mp4_family() {
                    sources.extend([DateSource::Mp4Container, DateSource::Mp4Media]);
                }
                if options.video_policy == VideoPolicy::All {
                    if !options.no_probe {
                        sources.push(DateSource::Probe);
                    }
                    if !options.no_guess {
                        sources.push(DateSource::Filename);
                    }
                }
                sources
            }
            MediaKind::Other => Vec::new(),
        }
    }

    /// Dates this source holds for the file behind `ctx`.
    pub fn dates(self, ctx: &SourceContext<'_>) -> crate::Result<Vec<NaiveDateTime>> {
        let path = ctx.media.path();
        let dates = match self {
            DateSource::GenericExif => ctx.exif().map(exif::generic_dates).unwrap_or_default(),
            DateSource::ImageFile => ctx.exif().map(exif::image_dates).unwrap_or_default(),
            DateSource::SubIfd => ctx.exif().map(exif::sub_ifd_dates).unwrap_or_default(),
            DateSource::Png => png::modification_times(path)?,
            DateSource::FileSystem => vec![ctx.media.modified_local()],
            DateSource::Mp4Container => ctx
                .container()
                .and_then(|times| times.movie)
                .into_iter()
                .collect(),
            DateSource::Mp4Media => ctx
                .container()
                .map(|times| times.media.clone())
                .unwrap_or_default(),
            DateSource::Probe => {
                let prober = Prober::new(&ctx.options.ffprobe, ctx.options.probe_timeout);
                parse::probe_dates(&prober.run(path)?)
            }
            DateSource::Filename => path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(guess::guess_date_from_filename)
                .into_iter()
                .collect(),
        };
        Ok(dates)
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateSource::GenericExif => "exif",
            DateSource::Png => "png",
            DateSource::ImageFile => "exif-image",
            DateSource::SubIfd => "exif-subifd",
            DateSource::FileSystem => "filesystem",
            DateSource::Mp4Container => "mp4-movie",
            DateSource::Mp4Media => "mp4-media",
            DateSource::Probe => "ffprobe",
            DateSource::Filename => "filename",
        };
        f.write_str(name)
    }
}

/// Per-file state shared by the sources, so each container is decoded once.
pub struct SourceContext<'a> {
    media: &'a MediaFile,
    options: &'a ProcessOptions,
    exif: OnceCell<Option<::exif::Exif>>,
    container: OnceCell<Option<ContainerTimes>>,
}

impl<'a> SourceContext<'a> {
    pub fn new(media: &'a MediaFile, options: &'a ProcessOptions) -> Self {
        Self {
            media,
            options,
            exif: OnceCell::new(),
            container: OnceCell::new(),
        }
    }

    fn exif(&self) -> Option<&::exif::Exif> {
        self.exif
            .get_or_init(|| match exif::read_exif(self.media.path()) {
                Ok(exif) => Some(exif),
                Err(err) => {
                    log::debug!("{}: no EXIF: {}", self.media.path().display(), err);
                    None
                }
            })
            .as_ref()
    }

    fn container(&self) -> Option<&ContainerTimes> {
        self.container
            .get_or_init(|| match movie::read_container_times(self.media.path()) {
                Ok(times) => Some(times),
                Err(err) => {
                    log::warn!("{}: unreadable container: {}", self.media.path().display(), err);
                    None
                }
            })
            .as_ref()
    }
}
