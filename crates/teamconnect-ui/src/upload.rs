//! Upload form staging: the file picked for upload and the drop zone state.

use std::fs;
use std::path::{Path, PathBuf};

use teamconnect_core::error::AppError;
use teamconnect_core::result::AppResult;
use teamconnect_core::types::format_file_size;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Full path on disk.
    pub path: PathBuf,
    /// File name shown in the form.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl StagedFile {
    /// Human-readable size, e.g. `1.5 KB`.
    pub fn display_size(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

/// State of the upload form.
#[derive(Debug, Default)]
pub struct UploadStager {
    staged: Option<StagedFile>,
    drag_over: bool,
}

impl UploadStager {
    /// Create an empty stager with the upload button disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `path` for upload.
    pub fn select(&mut self, path: impl AsRef<Path>) -> AppResult<&StagedFile> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .map_err(|e| AppError::not_found(format!("Cannot read '{}': {e}", path.display())))?;
        if !metadata.is_file() {
            return Err(AppError::validation(format!(
                "'{}' is not a regular file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("'{}' has no usable file name", path.display()))
            })?
            .to_string();

        let staged = self.staged.insert(StagedFile {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
        });
        tracing::debug!("Staged '{}' ({})", staged.name, staged.display_size());
        Ok(&*staged)
    }

    /// Remove the staged file.
    pub fn clear(&mut self) {
        self.staged = None;
    }

    /// File currently staged.
    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    /// Whether the upload button is enabled.
    pub fn can_upload(&self) -> bool {
        self.staged.is_some()
    }

    /// Whether a drag is hovering over the drop zone.
    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// A drag entered the drop zone.
    pub fn drag_over(&mut self) {
        self.drag_over = true;
    }

    /// A drag left the drop zone.
    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Files dropped on the zone. The first one is staged; an empty drop
    /// leaves the current selection alone.
    pub fn drop_files(&mut self, paths: &[PathBuf]) -> AppResult<Option<&StagedFile>> {
        self.drag_over = false;
        match paths.first() {
            Some(first) => self.select(first).map(Some),
            None => Ok(self.staged.as_ref()),
        }
    }
}
