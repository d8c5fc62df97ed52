//! Output file naming and writing.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::AppError;

pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `<kind>_<base>_<timestamp>.<ext>`, timestamp at second granularity.
pub fn output_file_name(kind: &str, base: &str, at: &DateTime<Local>, ext: &str) -> String {
    format!("{kind}_{base}_{}.{ext}", at.format(FILE_TIMESTAMP_FORMAT))
}

/// Writes `contents` to `path`, creating missing parent directories. Overwrites.
pub fn write_file(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_follows_kind_base_timestamp_pattern() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            output_file_name("summary", "meeting", &at, "md"),
            "summary_meeting_20240309_070501.md"
        );
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("report.md");
        write_file(&path, "# Report").expect("write should succeed");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "# Report");
    }

    #[test]
    fn write_under_a_file_reports_directory_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("marker");
        let err = write_file(&blocker.join("out.md"), "x").expect_err("should fail");
        assert!(err.to_string().contains("Failed to create output directory"));
    }
}
