//! Directory scanning for candidate MP3 files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Public path root the generated records point at, as served by the site.
pub const DISPLAY_PREFIX: &str = "/audio/";

/// One candidate file found by [`scan`].
#[derive(Debug, Clone)]
pub struct Mp3File {
    /// Filesystem path used for reading.
    pub path: PathBuf,
    /// Output-facing path (`/audio/<filename>`), never used for I/O.
    pub display_name: String,
    /// Byte size at scan time.
    pub size: u64,
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Collect the MP3 files directly inside `dir`, in directory-listing order.
///
/// A missing directory yields an empty list rather than an error.
/// Subdirectories are never entered, directory entries are filtered out
/// even when their name ends in `.mp3`, and entries whose metadata cannot
/// be read are skipped.
pub fn scan(dir: &Path) -> Vec<Mp3File> {
    let mut files: Vec<Mp3File> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_mp3(path) {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy();
        files.push(Mp3File {
            path: path.to_path_buf(),
            display_name: format!("{DISPLAY_PREFIX}{name}"),
            size: meta.len(),
        });
    }

    files
}
