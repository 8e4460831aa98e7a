//! Zip unpacking and extracted-file enumeration.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("not a valid zip archive: {0}")]
    InvalidArchive(String),
}

/// A regular file found under the extraction root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedEntry {
    /// Path relative to the extraction root, always `/`-separated
    pub relative_path: String,
    /// Absolute path on disk
    pub absolute_path: PathBuf,
}

/// Unpack a zip archive into `dest_dir`, returning the number of files written.
///
/// Entries whose names would escape `dest_dir` are skipped.
pub fn unpack_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ExtractError::InvalidArchive(e.to_string()))?;

    fs::create_dir_all(dest_dir)?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ExtractError::InvalidArchive(e.to_string()))?;
        let Some(relative_path) = entry.enclosed_name() else {
            tracing::warn!(name = entry.name(), "skipping zip entry outside extraction root");
            continue;
        };

        let absolute_path = dest_dir.join(&relative_path);
        if entry.is_dir() {
            fs::create_dir_all(&absolute_path)?;
            continue;
        }
        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut outfile = File::create(&absolute_path)?;
        io::copy(&mut entry, &mut outfile).map_err(|e| {
            // Decompression and CRC failures surface as InvalidData.
            if e.kind() == io::ErrorKind::InvalidData {
                ExtractError::InvalidArchive(format!("{}: {e}", relative_path.display()))
            } else {
                ExtractError::Io(e)
            }
        })?;

        restore_mode(&absolute_path, entry.unix_mode())?;
        written += 1;
    }

    Ok(written)
}

#[cfg(unix)]
fn restore_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    match mode {
        // Keep the owner able to read and write so the work area can be removed.
        Some(mode) => fs::set_permissions(path, fs::Permissions::from_mode(mode | 0o600)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn restore_mode(_: &Path, _: Option<u32>) -> io::Result<()> {
    Ok(())
}

/// List every regular file under `root`, sorted by path.
pub fn walk_files(root: &Path) -> Result<Vec<ExtractedEntry>, ExtractError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        entries.push(ExtractedEntry {
            relative_path,
            absolute_path: entry.path().to_path_buf(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();
        for (name, body) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_unpack_and_walk() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("pkg-1.0-py3-none-any.whl");
        write_zip(
            &archive,
            &[
                ("pkg/__init__.py", ""),
                ("pkg/sub/mod.py", "x = 1"),
                ("pkg-1.0.dist-info/METADATA", "Name: pkg"),
            ],
        );

        let dest = tmp.path().join("out");
        assert_eq!(unpack_zip(&archive, &dest).unwrap(), 3);

        let entries = walk_files(&dest).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            ["pkg/__init__.py", "pkg/sub/mod.py", "pkg-1.0.dist-info/METADATA"]
        );
        assert_eq!(
            fs::read_to_string(&entries[1].absolute_path).unwrap(),
            "x = 1"
        );
    }

    #[test]
    fn test_directories_are_not_listed() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("a.whl");
        let mut writer = zip::ZipWriter::new(File::create(&archive).unwrap());
        writer
            .add_directory("empty/", SimpleFileOptions::default())
            .unwrap();
        writer.finish().unwrap();

        let dest = tmp.path().join("out");
        assert_eq!(unpack_zip(&archive, &dest).unwrap(), 0);
        assert!(dest.join("empty").is_dir());
        assert!(walk_files(&dest).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_invalid_archive() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("broken-1.0-py3-none-any.whl");
        fs::write(&archive, b"definitely not a zip file").unwrap();

        let err = unpack_zip(&archive, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidArchive(_)), "{err}");
    }

    #[test]
    fn test_missing_archive_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = unpack_zip(&tmp.path().join("nope.whl"), tmp.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
