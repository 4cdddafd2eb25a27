//! Track metadata via ffprobe.
//!
//! Shells out to `ffprobe` once per session and parses its JSON output
//! into the title/author/duration/chapter table the session is built
//! from. Any failure here is fatal to session construction; there is no
//! playback without a chapter table and total duration.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::chapters::{Chapter, UNKNOWN_CHAPTER};

/// Default title when the container carries none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Default author when the container carries none.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Errors that can occur while probing track metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to run ffprobe on {path}: {source}")]
    Probe {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("ffprobe failed on {path}: {stderr}")]
    ProbeFailed { path: PathBuf, stderr: String },

    #[error("Failed to parse ffprobe output for {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Track {path} has no usable duration")]
    MissingDuration { path: PathBuf },

    #[error("Chapter in {path} has an unparseable time range")]
    BadChapterTime { path: PathBuf },
}

/// Probed track metadata.
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    pub title: String,
    pub author: String,
    /// Total duration of the whole track, in seconds
    pub total_duration: f64,
    pub chapters: Vec<Chapter>,
}

// ffprobe JSON shapes. Times arrive as strings, tags are free-form.

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    chapters: Vec<ProbeChapter>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    tags: Option<FormatTags>,
}

#[derive(Debug, Default, Deserialize)]
struct FormatTags {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeChapter {
    start_time: String,
    end_time: String,
    #[serde(default)]
    tags: Option<ChapterTags>,
}

#[derive(Debug, Deserialize)]
struct ChapterTags {
    #[serde(default)]
    title: Option<String>,
}

/// Probe `path` with ffprobe and extract title, author, duration, and the
/// chapter table.
pub fn probe(path: &Path) -> Result<TrackMetadata, MetadataError> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-print_format")
        .arg("json")
        .arg("-show_format")
        .arg("-show_chapters")
        .arg(path)
        .output()
        .map_err(|source| MetadataError::Probe {
            path: path.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        return Err(MetadataError::ProbeFailed {
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_probe_output(&output.stdout, path)
}

/// Parse raw ffprobe JSON into [`TrackMetadata`].
///
/// Split from [`probe`] so the parsing rules are testable without an
/// ffprobe binary.
pub fn parse_probe_output(raw: &[u8], path: &Path) -> Result<TrackMetadata, MetadataError> {
    let probed: ProbeOutput =
        serde_json::from_slice(raw).map_err(|source| MetadataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let format = probed.format.unwrap_or_default();

    let total_duration = format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MetadataError::MissingDuration {
            path: path.to_path_buf(),
        })?;

    let tags = format.tags.unwrap_or_default();
    let title = tags.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let author = tags.artist.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let mut chapters = Vec::with_capacity(probed.chapters.len());
    for chapter in probed.chapters {
        let (Ok(start), Ok(end)) = (
            chapter.start_time.parse::<f64>(),
            chapter.end_time.parse::<f64>(),
        ) else {
            return Err(MetadataError::BadChapterTime {
                path: path.to_path_buf(),
            });
        };
        let title = chapter
            .tags
            .and_then(|t| t.title)
            .unwrap_or_else(|| UNKNOWN_CHAPTER.to_string());
        chapters.push(Chapter::new(start, end, title));
    }

    debug!(
        %title,
        %author,
        total_duration,
        chapter_count = chapters.len(),
        "probed track metadata"
    );

    Ok(TrackMetadata {
        title,
        author,
        total_duration,
        chapters,
    })
}
