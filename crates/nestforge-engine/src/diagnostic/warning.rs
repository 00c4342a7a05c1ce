//! Non-fatal findings collected during a generation run.

use std::fmt;

/// A soft failure: the run continued, the finding is surfaced in the report.
///
/// Patch anchor misses fall here rather than into [`super::GeneratorError`]
/// because a miss leaves the target file untouched instead of corrupting it;
/// aborting the run would throw away every healthy artifact for the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// A patch anchor did not match the target file's current content.
    AnchorNotFound {
        path: String,
        anchor: String,
    },

    /// A patch target file does not exist in the sink.
    TargetMissing {
        path: String,
    },

    /// The injected field already exists in the target; the patch was skipped.
    AlreadyPatched {
        path: String,
        field: String,
    },

    /// The relation is many-to-many; no side carries a scalar foreign key,
    /// so DTO/mapper patching does not apply. A pivot table is left to the
    /// schema layer of the consuming project.
    ManyToManyPivot {
        source: String,
        target: String,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::AnchorNotFound { path, anchor } => {
                write!(f, "anchor {anchor:?} not found in '{path}'; patch skipped")
            }
            GenerationWarning::TargetMissing { path } => {
                write!(f, "patch target '{path}' does not exist; patch skipped")
            }
            GenerationWarning::AlreadyPatched { path, field } => {
                write!(f, "'{path}' already contains '{field}'; patch skipped")
            }
            GenerationWarning::ManyToManyPivot { source, target } => {
                write!(
                    f,
                    "relation {source} <-> {target} is many-to-many; no foreign key generated (pivot semantics)"
                )
            }
        }
    }
}
