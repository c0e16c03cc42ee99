use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::error::{Result, ViewerError};
use crate::io::fs::{copy_to_temp, file_extension, file_name, is_archive, require_file};

/// What the user pointed the viewer at.
///
/// Only single files are materialised; archives and folders are recognised
/// so callers can report them, and so the job pipeline can later run once per
/// member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSet {
    SingleFile(PathBuf),
    Archive(PathBuf),
    Folder(PathBuf),
}

impl SourceSet {
    pub fn classify(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::Folder(path.to_path_buf()));
        }
        require_file(path)?;
        if is_archive(file_extension(path)) {
            Ok(Self::Archive(path.to_path_buf()))
        } else {
            Ok(Self::SingleFile(path.to_path_buf()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::SingleFile(p) | Self::Archive(p) | Self::Folder(p) => p,
        }
    }

    /// Number of images the set yields.
    pub fn len(&self) -> usize {
        match self {
            Self::SingleFile(_) => 1,
            Self::Archive(_) | Self::Folder(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make member `index` available to the decoder, copying it into a fresh
    /// session directory under `temp_dir` when one is given.
    pub fn stage(&self, index: usize, temp_dir: Option<&Path>) -> Result<StagedSource> {
        let path = match self {
            Self::SingleFile(p) if index == 0 => p,
            Self::SingleFile(p) => {
                return Err(ViewerError::UnsupportedSource(format!(
                    "{} has a single image, member {index} requested",
                    p.display()
                )))
            }
            Self::Archive(p) => {
                return Err(ViewerError::UnsupportedSource(format!(
                    "archives are not supported yet: {}",
                    p.display()
                )))
            }
            Self::Folder(p) => {
                return Err(ViewerError::UnsupportedSource(format!(
                    "folders are not supported yet: {}",
                    p.display()
                )))
            }
        };

        match temp_dir {
            Some(dir) => {
                let session_dir = tempfile::Builder::new()
                    .prefix("session-")
                    .tempdir_in(dir)?;
                let target = session_dir.path().join(file_name(path));
                copy_to_temp(path, &target)?;
                info!(path = %target.display(), "Source staged");
                Ok(StagedSource {
                    path: std::path::absolute(&target)?,
                    session_dir: Some(session_dir),
                })
            }
            None => {
                warn!("No temp directory, decoding the source in place");
                Ok(StagedSource {
                    path: std::path::absolute(path)?,
                    session_dir: None,
                })
            }
        }
    }
}

/// Absolute path handed to the script. A staged copy lives in its own
/// session directory under the temp dir, removed on drop.
#[derive(Debug)]
pub struct StagedSource {
    path: PathBuf,
    session_dir: Option<TempDir>,
}

impl StagedSource {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedSource {
    fn drop(&mut self) {
        let Some(dir) = self.session_dir.take() else {
            return;
        };
        let dir_path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => debug!(dir = %dir_path.display(), "Staged copy removed"),
            Err(e) => warn!(dir = %dir_path.display(), "Couldn't remove staged copy: {e}"),
        }
    }
}
