//! Scoped temporary storage for a single run.
//!
//! A [`WorkArea`] owns a fresh temporary directory holding the downloaded
//! archive and its unpacked contents. The directory is removed by
//! [`WorkArea::release`], or by `Drop` when a run bails out early.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const WORK_AREA_PREFIX: &str = "wheelshift-";

#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    /// Create a new working area, under `parent` when given, otherwise under
    /// the system temp directory.
    pub fn acquire(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORK_AREA_PREFIX);

        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };

        tracing::debug!(path = %dir.path().display(), "acquired work area");
        Ok(Self { dir })
    }

    /// Root of the working area.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where downloaded archives are stored.
    pub fn download_dir(&self) -> PathBuf {
        self.dir.path().join("download")
    }

    /// Where archives are unpacked.
    pub fn extract_dir(&self) -> PathBuf {
        self.dir.path().join("extracted")
    }

    /// Remove the working area, reporting any cleanup error.
    pub fn release(self) -> io::Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(path = %path.display(), "released work area");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_removes_directory() {
        let parent = TempDir::new().unwrap();
        let area = WorkArea::acquire(Some(parent.path())).unwrap();
        let root = area.path().to_path_buf();
        std::fs::create_dir_all(area.extract_dir().join("nested")).unwrap();
        std::fs::write(area.extract_dir().join("nested/file.txt"), "x").unwrap();

        assert!(root.starts_with(parent.path()));
        area.release().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let parent = TempDir::new().unwrap();
        let root = {
            let area = WorkArea::acquire(Some(parent.path())).unwrap();
            std::fs::create_dir_all(area.download_dir()).unwrap();
            area.path().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_missing_parent_is_created() {
        let parent = TempDir::new().unwrap();
        let nested = parent.path().join("a/b");
        let area = WorkArea::acquire(Some(&nested)).unwrap();
        assert!(area.path().starts_with(&nested));
    }
}
