//! Tag and audio-info extraction for a single file.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::tag::ItemKey;

/// Name used in the error message when no tag decoder is available.
pub const DECODER_NAME: &str = "lofty";

/// Fields pulled from one file's tag and audio-info containers.
#[derive(Debug, Clone, Default)]
pub struct TagFields {
    pub title: Option<String>,
    pub comment: Option<String>,
    pub duration: Option<Duration>,
}

/// Decodes the embedded metadata of one audio file.
pub trait TagDecoder {
    fn read(&self, path: &Path) -> Result<TagFields, String>;
}

/// Production decoder backed by `lofty`.
pub struct LoftyDecoder;

impl TagDecoder for LoftyDecoder {
    fn read(&self, path: &Path) -> Result<TagFields, String> {
        let tagged = lofty::read_from_path(path).map_err(|e| e.to_string())?;

        let mut fields = TagFields {
            duration: Some(tagged.properties().duration()),
            ..TagFields::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    fields.title = Some(v.to_string());
                }
            }
            // Only the first comment entry is consulted, even when several exist.
            if let Some(v) = tag.get_string(ItemKey::Comment) {
                if !v.is_empty() {
                    fields.comment = Some(v.to_string());
                }
            }
        }

        Ok(fields)
    }
}

/// Outcome of one extraction attempt.
///
/// A record is built from exactly one of these; a failure never carries
/// partial tag data alongside its message.
#[derive(Debug, Clone)]
pub enum Extraction {
    Tags(TagFields),
    Failed(String),
}

/// Read the tag fields of `path`, routing every failure into [`Extraction::Failed`].
pub fn extract(decoder: Option<&dyn TagDecoder>, path: &Path) -> Extraction {
    let Some(decoder) = decoder else {
        return Extraction::Failed(format!("{DECODER_NAME} not installed"));
    };

    match decoder.read(path) {
        Ok(fields) => Extraction::Tags(fields),
        Err(msg) => Extraction::Failed(msg),
    }
}

/// Format a play duration as zero-padded `HH:MM:SS`, truncating to whole
/// seconds. Hours grow past two digits instead of clamping.
pub fn format_duration(duration: Option<Duration>) -> Option<String> {
    let secs = duration?.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    Some(format!("{hours:02}:{minutes:02}:{seconds:02}"))
}
