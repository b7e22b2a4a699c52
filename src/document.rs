use serde::{Deserialize, Serialize};

/// Document identifier, assigned by insertion order within one index build.
pub type DocId = usize;

/// A document as seen by the query engine: its ID and the stored text that
/// matched lines are read back from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, text: String) -> Self {
        Self { id, text }
    }

    /// The document's lines, split on `\n`. An empty text still has one
    /// (empty) line.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// Split a multi-document submission into documents, one per line.
pub fn split_documents(submission: &str) -> Vec<String> {
    submission.split('\n').map(str::to_string).collect()
}
