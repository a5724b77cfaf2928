use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum FsError {
    #[error("I/O error within copy domain")]
    #[diagnostic(code(sprout::copy::io))]
    Io(#[from] IoError),

    #[error("source directory does not exist: '{path}'")]
    #[diagnostic(
        code(sprout::copy::source_missing),
        help("The template is incomplete; check the template root")
    )]
    SourceMissing { path: PathBuf },

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(sprout::copy::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        source: std::path::StripPrefixError,
    },
}

/// Recursively copies every file and subdirectory from `src` into `dst`,
/// creating `dst` if absent. Existing destination files are overwritten
/// silently; contents are preserved byte-for-byte.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), FsError> {
    if !src.is_dir() {
        return Err(FsError::SourceMissing {
            path: src.to_path_buf(),
        });
    }

    for entry in WalkDir::new(src) {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or_else(|| Path::new(""));

                Err(IoError::new(
                    FileOperation::Read,
                    path.to_path_buf(),
                    error.into(),
                ))?
            }
        };

        let relative = match entry.path().strip_prefix(src) {
            Ok(r) => r,
            Err(error) => Err(FsError::StripPrefix {
                path: entry.path().to_path_buf(),
                dir: src.to_path_buf(),
                source: error,
            })?,
        };

        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|error| IoError::new(FileOperation::Mkdir, target.clone(), error))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|error| {
                    IoError::new(FileOperation::Mkdir, parent.to_path_buf(), error)
                })?;
            }

            fs::copy(entry.path(), &target)
                .map_err(|error| IoError::new(FileOperation::Copy, target.clone(), error))?;
        }
    }

    log::debug!("copied tree {} -> {}", src.display(), dst.display());

    Ok(())
}

/// Copies a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), FsError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| IoError::new(FileOperation::Mkdir, parent.to_path_buf(), error))?;
    }

    fs::copy(src, dst)
        .map_err(|error| IoError::new(FileOperation::Copy, dst.to_path_buf(), error))?;

    log::debug!("copied file {} -> {}", src.display(), dst.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested/middle.txt"), "middle").unwrap();
        fs::write(src.join("nested/deeper/leaf.txt"), "leaf").unwrap();
        dir
    }

    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut entries: Vec<(PathBuf, Vec<u8>)> = WalkDir::new(root)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(root).unwrap().to_path_buf(),
                    fs::read(e.path()).unwrap(),
                )
            })
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn copy_tree_preserves_structure_and_contents() {
        let dir = tree_fixture();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");

        copy_tree(&src, &dst).unwrap();

        assert_eq!(snapshot(&src), snapshot(&dst));
        assert_eq!(fs::read_to_string(dst.join("nested/deeper/leaf.txt")).unwrap(), "leaf");
    }

    #[test]
    fn copy_tree_is_idempotent() {
        let dir = tree_fixture();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");

        copy_tree(&src, &dst).unwrap();
        let first = snapshot(&dst);
        copy_tree(&src, &dst).unwrap();
        let second = snapshot(&dst);

        assert_eq!(first, second);
    }

    #[test]
    fn copy_tree_overwrites_existing_files() {
        let dir = tree_fixture();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("top.txt"), "stale").unwrap();

        copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
    }

    #[test]
    fn copy_tree_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_tree(&dir.path().join("absent"), &dir.path().join("dst")).unwrap_err();
        assert!(matches!(err, FsError::SourceMissing { .. }));
    }

    #[test]
    fn copy_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("VERSION");
        fs::write(&src, "0.1.0\n").unwrap();

        let dst = dir.path().join("deep/nested/VERSION");
        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst).unwrap(), "0.1.0\n");
    }
}
