use crate::document::DocId;
use crate::normalizer::Normalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One occurrence of a term: the document it appears in and its ordinal in
/// that document's normalized term sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub position: usize,
}

impl Posting {
    pub fn new(doc_id: DocId, position: usize) -> Self {
        Self { doc_id, position }
    }
}

/// Inverted index: term -> postings in document-then-position order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvertedIndex {
    index: HashMap<String, Vec<Posting>>,
    doc_count: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            doc_count: 0,
        }
    }

    /// Append one posting per term. Repeated terms each get their own posting.
    fn add_document(&mut self, doc_id: DocId, terms: &[String]) {
        for (position, term) in terms.iter().enumerate() {
            self.index
                .entry(term.clone())
                .or_default()
                .push(Posting::new(doc_id, position));
        }

        self.doc_count += 1;
    }

    /// Get the postings of a term
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.index.get(term).map(Vec::as_slice)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Get total number of indexed documents
    pub fn total_documents(&self) -> usize {
        self.doc_count
    }

    /// Number of distinct terms
    pub fn total_terms(&self) -> usize {
        self.index.len()
    }

    pub fn total_postings(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    /// Get all terms in the index, sorted
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.index.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        let total_postings = self.total_postings();
        IndexStats {
            total_documents: self.doc_count,
            total_terms: self.index.len(),
            total_postings,
            avg_postings_per_term: if self.index.is_empty() {
                0.0
            } else {
                total_postings as f64 / self.index.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub total_postings: usize,
    pub avg_postings_per_term: f64,
}

/// Build an index over `documents`, assigning IDs `0..documents.len()` in
/// input order.
///
/// Each document is normalized as a whole, so its line breaks only separate
/// terms. Returns the index together with every document's normalized text
/// (its terms joined by single spaces), indexed by document ID.
pub fn build_index<S: AsRef<str>>(
    normalizer: &Normalizer,
    documents: &[S],
) -> (InvertedIndex, Vec<String>) {
    let mut index = InvertedIndex::new();
    let mut normalized = Vec::with_capacity(documents.len());

    for (doc_id, document) in documents.iter().enumerate() {
        let terms = normalizer.normalize(document.as_ref());
        index.add_document(doc_id, &terms);
        normalized.push(terms.join(" "));
    }

    tracing::debug!(
        documents = index.total_documents(),
        terms = index.total_terms(),
        postings = index.total_postings(),
        "built index"
    );

    (index, normalized)
}
