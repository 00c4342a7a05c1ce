//! The artifact sink: where generated files live.
//!
//! The engine never touches the filesystem directly. Every write, read,
//! and patch flows through [`ArtifactSink`], so a run can target a real
//! directory ([`FsSink`]) or an in-memory projection ([`MemorySink`], used
//! by dry runs and tests). The sink is the long-lived source of truth for
//! a project: the patch engine re-reads previously emitted artifacts from
//! here before mutating them, which is what makes multi-step sessions
//! (generate base entity, later retrofit a relation into it) work without
//! any persisted model of what was generated.

mod fs;
mod memory;

pub use fs::FsSink;
pub use memory::MemorySink;

use crate::diagnostic::GeneratorError;

/// A single text mutation against a previously generated artifact.
///
/// The anchor is literal text matched against the file's current content
/// (first occurrence). Anchors are chosen to match the exact template
/// shapes the generators emit; see `patch::anchors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPatch {
    pub anchor: String,
    pub action: PatchAction,
}

/// What to do at the matched anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchAction {
    /// Insert text immediately before the anchor.
    InsertBefore(String),
    /// Insert text immediately after the anchor.
    InsertAfter(String),
    /// Replace the anchor itself.
    Replace(String),
}

impl TextPatch {
    pub fn insert_before(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            action: PatchAction::InsertBefore(text.into()),
        }
    }

    pub fn insert_after(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            action: PatchAction::InsertAfter(text.into()),
        }
    }

    pub fn replace(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            action: PatchAction::Replace(text.into()),
        }
    }
}

/// Result of a patch attempt. Misses are data, not errors; the caller
/// decides whether a miss is worth a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Anchor matched; the file was rewritten.
    Patched,
    /// The file exists but the anchor did not match.
    PatternNotFound,
    /// The file does not exist in the sink.
    NotFound,
}

/// Applies a patch to file content, returning the rewritten text or `None`
/// when the anchor does not match. Shared by every sink implementation so
/// patch semantics cannot drift between the filesystem and memory sinks.
pub fn apply_text_patch(content: &str, patch: &TextPatch) -> Option<String> {
    let start = content.find(&patch.anchor)?;
    let end = start + patch.anchor.len();
    let mut result = String::with_capacity(content.len() + 64);
    match &patch.action {
        PatchAction::InsertBefore(text) => {
            result.push_str(&content[..start]);
            result.push_str(text);
            result.push_str(&content[start..]);
        }
        PatchAction::InsertAfter(text) => {
            result.push_str(&content[..end]);
            result.push_str(text);
            result.push_str(&content[end..]);
        }
        PatchAction::Replace(text) => {
            result.push_str(&content[..start]);
            result.push_str(text);
            result.push_str(&content[end..]);
        }
    }
    Some(result)
}

/// Where generated artifacts are persisted.
///
/// Paths are forward-slash paths relative to the project root. Writes are
/// durably visible to subsequent reads within a session; the pipeline
/// depends on read-after-write consistency.
pub trait ArtifactSink {
    /// Creates a directory and any missing parents.
    fn ensure_dir(&mut self, path: &str) -> Result<(), GeneratorError>;

    /// Writes a file, overwriting any existing content.
    fn write_file(&mut self, path: &str, content: &str) -> Result<(), GeneratorError>;

    /// Reads a file back; `None` when it does not exist.
    fn read_file(&self, path: &str) -> Result<Option<String>, GeneratorError>;

    /// Applies a text patch to an existing file.
    fn patch_file(&mut self, path: &str, patch: &TextPatch) -> Result<PatchOutcome, GeneratorError> {
        let Some(content) = self.read_file(path)? else {
            return Ok(PatchOutcome::NotFound);
        };
        match apply_text_patch(&content, patch) {
            Some(updated) => {
                self.write_file(path, &updated)?;
                Ok(PatchOutcome::Patched)
            }
            None => Ok(PatchOutcome::PatternNotFound),
        }
    }
}
