use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::consts::{ARCHIVE_EXTENSIONS, TEMP_DIR_NAME};
use crate::error::{Result, ViewerError};

/// `<system temp>/crp/`, created if missing. `None` if it cannot be created.
pub fn resolve_temp_dir() -> Option<PathBuf> {
    let dir = std::env::temp_dir().join(TEMP_DIR_NAME);
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(e) => {
            warn!(dir = %dir.display(), "Couldn't create temp directory: {e}");
            None
        }
    }
}

/// Copy `src` to `dst`, overwriting any existing file.
pub fn copy_to_temp(src: &Path, dst: &Path) -> Result<()> {
    let bytes = std::fs::copy(src, dst)?;
    debug!(src = %src.display(), dst = %dst.display(), bytes, "Copied to temp");
    Ok(())
}

/// Final path component, falling back to the whole path.
pub fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// Extension without the dot; empty for none or for dot-files such as `.vpy`.
pub fn file_extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

pub fn is_archive(ext: &str) -> bool {
    ARCHIVE_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ViewerError::NotFound(path.to_path_buf()))
    }
}
