use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::audio::analytics::Analytics;
use crate::error::AppError;
use crate::output::{DISPLAY_TIMESTAMP_FORMAT, output_file_name, write_file};

/// Paths of the three files written for one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub transcription: PathBuf,
    pub summary: PathBuf,
    pub analytics: PathBuf,
}

/// Writes transcript, summary and analytics next to each other in `dir`.
///
/// The three writes are independent; a failure part way leaves the earlier
/// files in place.
pub fn save_results(
    dir: &Path,
    audio_path: &Path,
    transcript: &str,
    summary: &str,
    analytics: &Analytics,
    at: &DateTime<Local>,
) -> Result<SavedFiles, AppError> {
    let base = audio_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "audio".to_string());

    let files = SavedFiles {
        transcription: dir.join(output_file_name("transcription", &base, at, "md")),
        summary: dir.join(output_file_name("summary", &base, at, "md")),
        analytics: dir.join(output_file_name("analysis", &base, at, "json")),
    };

    write_file(
        &files.transcription,
        &markdown_document("Transcription", "Transcript", &base, audio_path, transcript, at),
    )?;
    write_file(
        &files.summary,
        &markdown_document("Summary", "Summary", &base, audio_path, summary, at),
    )?;
    write_file(&files.analytics, &serde_json::to_string_pretty(analytics)?)?;

    Ok(files)
}

/// Reads a persisted analytics file back.
pub fn read_analytics(path: &Path) -> Result<Analytics, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn markdown_document(
    title: &str,
    section: &str,
    base: &str,
    audio_path: &Path,
    body: &str,
    at: &DateTime<Local>,
) -> String {
    format!(
        "# {title} - {base}\n\n**Generated on:** {}\n\n**Source Audio:** {}\n\n## {section}\n\n{body}",
        at.format(DISPLAY_TIMESTAMP_FORMAT),
        audio_path.display(),
    )
}
