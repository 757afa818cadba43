//! End-to-end composition: scan, extract, write.

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::report::{self, Episode, ReportWriter, YamlWriter};
use crate::scan;
use crate::tags::{self, LoftyDecoder, TagDecoder};

/// Directory scanned for MP3 files.
pub const AUDIO_DIR: &str = "audio";
/// Output document, overwritten on every run.
pub const OUTPUT_PATH: &str = "episodes.yml";

/// Optional capabilities, resolved once at startup.
///
/// Either may be absent; absence degrades the affected stage (error
/// records for the decoder, skip-with-warning for the writer) instead of
/// aborting the run.
pub struct Capabilities {
    pub decoder: Option<Box<dyn TagDecoder>>,
    pub writer: Option<Box<dyn ReportWriter>>,
}

impl Capabilities {
    /// Resolve the capabilities of a normal build: both present.
    pub fn detect() -> Self {
        Self {
            decoder: Some(Box::new(LoftyDecoder)),
            writer: Some(Box::new(YamlWriter)),
        }
    }
}

/// What the run produced, for the single console line at the end.
#[derive(Debug)]
pub enum Outcome {
    Written { path: PathBuf, episodes: usize },
    WriterMissing,
}

/// Build one record per scanned file, in scan order.
///
/// Extraction failures become error records; they never drop the file
/// from the report and never abort the remaining files.
pub fn build_report(dir: &Path, decoder: Option<&dyn TagDecoder>) -> Vec<Episode> {
    scan::scan(dir)
        .iter()
        .map(|candidate| {
            let extraction = tags::extract(decoder, &candidate.path);
            report::build_record(candidate, extraction)
        })
        .collect()
}

/// Run the whole pipeline once.
pub fn run(dir: &Path, output: &Path, caps: &Capabilities) -> Result<Outcome, Box<dyn Error>> {
    let episodes = build_report(dir, caps.decoder.as_deref());

    match &caps.writer {
        Some(writer) => {
            writer.write(&episodes, output)?;
            Ok(Outcome::Written {
                path: output.to_path_buf(),
                episodes: episodes.len(),
            })
        }
        None => Ok(Outcome::WriterMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagFields;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    struct StaticDecoder;

    impl TagDecoder for StaticDecoder {
        fn read(&self, _path: &Path) -> Result<TagFields, String> {
            Ok(TagFields {
                title: Some("Episode One".to_string()),
                comment: Some("The pilot".to_string()),
                duration: Some(Duration::from_secs(185)),
            })
        }
    }

    #[test]
    fn every_scanned_file_yields_one_record() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"junk").unwrap();
        fs::write(dir.path().join("b.mp3"), b"junk").unwrap();
        fs::write(dir.path().join("notes.txt"), b"junk").unwrap();

        let episodes = build_report(dir.path(), Some(&StaticDecoder));
        assert_eq!(episodes.len(), 2);
        assert!(episodes.iter().all(|e| e.error.is_none()));
        assert!(episodes.iter().all(|e| e.duration.as_deref() == Some("00:03:05")));
    }

    #[test]
    fn decode_failures_become_error_records_without_tag_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.mp3"), b"junk").unwrap();

        let episodes = build_report(dir.path(), Some(&LoftyDecoder));
        assert_eq!(episodes.len(), 1);

        let episode = &episodes[0];
        assert!(episode.error.is_some());
        assert!(episode.title.is_none());
        assert!(episode.description.is_none());
        assert!(episode.duration.is_none());
        assert_eq!(episode.file, "/audio/bad.mp3");
    }

    #[test]
    fn missing_decoder_still_reports_every_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("episode1.mp3"), vec![0u8; 2048]).unwrap();

        let episodes = build_report(dir.path(), None);
        assert_eq!(episodes.len(), 1);

        let episode = &episodes[0];
        assert_eq!(episode.error.as_deref(), Some("lofty not installed"));
        assert_eq!(episode.file, "/audio/episode1.mp3");
        assert_eq!(episode.length, "2,048");
        assert!(episode.title.is_none());
        assert!(episode.description.is_none());
        assert!(episode.duration.is_none());
    }

    #[test]
    fn run_writes_an_empty_sequence_for_a_missing_directory() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("episodes.yml");

        let outcome = run(&dir.path().join("nope"), &output, &Capabilities::detect()).unwrap();
        match outcome {
            Outcome::Written { episodes, .. } => assert_eq!(episodes, 0),
            Outcome::WriterMissing => panic!("writer should be present"),
        }
        assert_eq!(fs::read_to_string(&output).unwrap().trim(), "[]");
    }

    #[test]
    fn run_without_writer_skips_the_document() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("episodes.yml");

        let caps = Capabilities {
            decoder: None,
            writer: None,
        };
        let outcome = run(dir.path(), &output, &caps).unwrap();
        assert!(matches!(outcome, Outcome::WriterMissing));
        assert!(!output.exists());
    }

    #[test]
    fn rerun_overwrites_the_previous_document() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("audio");
        fs::create_dir(&audio).unwrap();
        fs::write(audio.join("a.mp3"), b"junk").unwrap();
        let output = dir.path().join("episodes.yml");

        let caps = Capabilities {
            decoder: Some(Box::new(StaticDecoder)),
            writer: Some(Box::new(YamlWriter)),
        };
        run(&audio, &output, &caps).unwrap();
        let first = fs::read_to_string(&output).unwrap();

        fs::remove_file(audio.join("a.mp3")).unwrap();
        run(&audio, &output, &caps).unwrap();
        let second = fs::read_to_string(&output).unwrap();

        assert!(first.contains("Episode One"));
        assert_eq!(second.trim(), "[]");
    }
}
