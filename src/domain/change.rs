//! Change records as produced by the lint workflow.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One proposed whole-file edit, decoded from a single line of a change file.
///
/// `original` and `replacement` are optional on the wire. A record lacking
/// either one is kept so it can be reported, but it is never applied.
/// Any other keys (linter name, code, description) ride along in `extra` and
/// are written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record carrying both sides of the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteChange<'a> {
    pub path: &'a str,
    pub original: &'a str,
    pub replacement: &'a str,
}

/// Whether a record can be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape<'a> {
    Complete(CompleteChange<'a>),
    Incomplete { path: &'a str },
}

impl ChangeRecord {
    pub fn new(
        path: impl Into<String>,
        original: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            original: Some(original.into()),
            replacement: Some(replacement.into()),
            extra: Map::new(),
        }
    }

    pub fn shape(&self) -> RecordShape<'_> {
        match (self.original.as_deref(), self.replacement.as_deref()) {
            (Some(original), Some(replacement)) => {
                RecordShape::Complete(CompleteChange { path: &self.path, original, replacement })
            }
            _ => RecordShape::Incomplete { path: &self.path },
        }
    }

    /// Same record with a different target path; contents and extra keys are kept.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self { path: path.into(), ..self.clone() }
    }
}
