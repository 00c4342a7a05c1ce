//! Filesystem-backed artifact sink.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::diagnostic::GeneratorError;
use super::ArtifactSink;

/// Persists artifacts under a root directory with real filesystem I/O.
/// Parent directories are created on demand, so callers can write files
/// without ensuring their directories first.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl ArtifactSink for FsSink {
    fn ensure_dir(&mut self, path: &str) -> Result<(), GeneratorError> {
        let full = self.full_path(path);
        fs::create_dir_all(&full).map_err(|e| GeneratorError::io(&full, e.to_string()))
    }

    fn write_file(&mut self, path: &str, content: &str) -> Result<(), GeneratorError> {
        let full = self.full_path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }
        fs::write(&full, content).map_err(|e| GeneratorError::io(&full, e.to_string()))
    }

    fn read_file(&self, path: &str) -> Result<Option<String>, GeneratorError> {
        let full = self.full_path(path);
        match fs::read_to_string(&full) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GeneratorError::io(&full, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(dir.path());

        sink.write_file("src/user/domain/entities/user.entity.ts", "export class User {}\n")
            .unwrap();

        let on_disk = dir.path().join("src/user/domain/entities/user.entity.ts");
        assert!(on_disk.exists());
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let sink = FsSink::new(dir.path());
        assert_eq!(sink.read_file("absent.ts").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(dir.path());

        sink.write_file("a.ts", "first\n").unwrap();
        assert_eq!(sink.read_file("a.ts").unwrap().unwrap(), "first\n");

        // Overwrite semantics, not merge.
        sink.write_file("a.ts", "second\n").unwrap();
        assert_eq!(sink.read_file("a.ts").unwrap().unwrap(), "second\n");
    }

    #[test]
    fn test_ensure_dir() {
        let dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(dir.path());
        sink.ensure_dir("src/post/application/use-cases").unwrap();
        assert!(dir.path().join("src/post/application/use-cases").is_dir());
    }
}
