//! Episode records and the YAML report document.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::scan::Mp3File;
use crate::tags::{Extraction, format_duration};

/// One output record. Struct field order here is the key order in the
/// emitted document, so keep it as-is.
#[derive(Debug, Clone, Serialize)]
pub struct Episode {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub file: String,
    pub length: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Merge a scanned candidate with its extraction outcome.
///
/// `file` always carries the display name (superseding whatever path the
/// extraction error mentioned) and `length` the grouped byte size. The
/// tag fields and `error` are mutually exclusive.
pub fn build_record(candidate: &Mp3File, extraction: Extraction) -> Episode {
    let (title, description, duration, error) = match extraction {
        Extraction::Tags(fields) => (
            fields.title,
            fields.comment,
            format_duration(fields.duration),
            None,
        ),
        Extraction::Failed(msg) => (None, None, None, Some(msg)),
    };

    Episode {
        title,
        description,
        duration,
        file: candidate.display_name.clone(),
        length: format_size(candidate.size),
        error,
    }
}

/// Render a byte count with comma grouping (`1234567` -> `"1,234,567"`).
pub fn format_size(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Writes the assembled records out as one document.
pub trait ReportWriter {
    fn write(&self, episodes: &[Episode], path: &Path) -> io::Result<()>;
}

/// Production writer emitting a YAML sequence of mappings. Non-ASCII text
/// is written literally, not escaped, and an empty run still produces a
/// valid document holding an empty sequence.
pub struct YamlWriter;

impl ReportWriter for YamlWriter {
    fn write(&self, episodes: &[Episode], path: &Path) -> io::Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(file, episodes).map_err(io::Error::other)
    }
}
