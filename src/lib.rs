// Re-export main components
pub mod api;
pub mod document;
pub mod engine;
pub mod index;
pub mod input;
pub mod normalizer;

// Re-export commonly used types
pub use document::{split_documents, DocId, Document};
pub use engine::{collect_positions, resolve_lines, search, SearchEngine, SearchResult};
pub use index::{build_index, IndexStats, InvertedIndex, Posting};
pub use normalizer::Normalizer;

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        let normalizer = Normalizer::new();
        let documents = split_documents("Rust programming\nThe Go language\nPrograms in Rust");

        let (index, normalized) = build_index(&normalizer, &documents);
        assert_eq!(index.total_documents(), 3);

        let results = search(&normalizer, "rust programs", &index, &normalized);

        // Only ordinal 0 resolves against the single-line stored texts.
        assert_eq!(results.len(), 2);
        assert_eq!(results[&0], vec!["rust program".to_string()]);
        assert_eq!(results[&2], vec!["program rust".to_string()]);
    }
}
