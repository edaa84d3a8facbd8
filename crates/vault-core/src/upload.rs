//! Upload Pipeline metadata
//!
//! The transfer itself happens in the UI crate (cloud storage or a data URL
//! in local mode); this module owns the result type and the shared rules.

use serde::{Deserialize, Serialize};

use crate::domain::{FileData, ValidationError};

/// Result of a finished upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    /// Blob key in cloud storage; None for inlined local uploads
    pub storage_path: Option<String>,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

impl UploadedFile {
    pub fn into_parts(self) -> (FileData, Option<String>) {
        (
            FileData {
                url: self.url,
                file_name: self.file_name,
                file_size: self.file_size,
                file_type: self.file_type,
            },
            self.storage_path,
        )
    }
}

/// `uploads/<millis>_<name>` with anything outside `[A-Za-z0-9._-]` replaced
pub fn storage_path_for(file_name: &str, millis: i64) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let sanitized = if sanitized.is_empty() { "file".to_string() } else { sanitized };
    format!("uploads/{}_{}", millis, sanitized)
}

/// Whole percent for the progress indicator
pub fn progress_percent(transferred: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    ((transferred / total) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Local uploads are inlined into the items slot, which has a small quota
pub fn check_local_size(size: u64, limit: u64) -> Result<(), ValidationError> {
    if size > limit {
        Err(ValidationError::FileTooLarge { size, limit })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path_is_sanitized() {
        assert_eq!(storage_path_for("annual report (v2).pdf", 1700), "uploads/1700_annual_report__v2_.pdf");
        assert_eq!(storage_path_for("", 5), "uploads/5_file");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 0.0), 0);
        assert_eq!(progress_percent(50.0, 200.0), 25);
        assert_eq!(progress_percent(200.0, 200.0), 100);
    }

    #[test]
    fn test_local_size_limit() {
        assert!(check_local_size(10, 10).is_ok());
        assert_eq!(check_local_size(11, 10), Err(ValidationError::FileTooLarge { size: 11, limit: 10 }));
    }
}
