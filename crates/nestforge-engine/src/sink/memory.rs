//! In-memory artifact sink for dry runs and tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::diagnostic::GeneratorError;
use super::ArtifactSink;

/// Stores artifacts in memory. Backs `--dry-run` (show what would be
/// written) and keeps tests off the filesystem. BTree maps keep path
/// listings deterministic.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All file paths written so far, in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Content of a single file, if present.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl ArtifactSink for MemorySink {
    fn ensure_dir(&mut self, path: &str) -> Result<(), GeneratorError> {
        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn write_file(&mut self, path: &str, content: &str) -> Result<(), GeneratorError> {
        self.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<Option<String>, GeneratorError> {
        Ok(self.files.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut sink = MemorySink::new();
        sink.write_file("src/a.ts", "content").unwrap();
        assert_eq!(sink.read_file("src/a.ts").unwrap().unwrap(), "content");
        assert_eq!(sink.read_file("src/b.ts").unwrap(), None);
    }

    #[test]
    fn test_paths_sorted() {
        let mut sink = MemorySink::new();
        sink.write_file("z.ts", "").unwrap();
        sink.write_file("a.ts", "").unwrap();
        assert_eq!(sink.paths(), vec!["a.ts", "z.ts"]);
    }
}
