//! Hand-off of encoded artifacts to a save/share facility.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ExportArtifact;

/// Receives finished export blobs.
///
/// The engine's job ends once the artifact is complete; a target failure is
/// reported but never alters the artifact or the recorded series.
pub trait ShareTarget {
    /// Deliver the artifact, returning where it ended up
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Saves artifacts into a directory, creating it if needed.
///
/// Writes go to a `.part` file that is renamed into place, so a failed write
/// never leaves a truncated export behind.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShareTarget for DirectoryTarget {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating export directory {}", self.dir.display()))?;

        let path = self.dir.join(&artifact.file_name);
        let part = self.dir.join(format!("{}.part", artifact.file_name));

        if let Err(e) = fs::write(&part, &artifact.bytes) {
            let _ = fs::remove_file(&part);
            return Err(e).with_context(|| format!("writing {}", part.display()));
        }
        fs::rename(&part, &path).with_context(|| format!("moving export into {}", path.display()))?;

        log::info!("{} export saved: {}", artifact.kind, path.display());
        Ok(path)
    }
}

/// Keeps delivered artifacts in memory
#[derive(Debug, Default)]
pub struct MemoryTarget {
    delivered: RefCell<Vec<ExportArtifact>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts delivered so far, oldest first
    pub fn delivered(&self) -> Vec<ExportArtifact> {
        self.delivered.borrow().clone()
    }
}

impl ShareTarget for MemoryTarget {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        self.delivered.borrow_mut().push(artifact.clone());
        Ok(PathBuf::from(&artifact.file_name))
    }
}
