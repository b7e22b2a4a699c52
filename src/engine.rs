use crate::document::{DocId, Document};
use crate::index::{build_index, InvertedIndex};
use crate::normalizer::Normalizer;
use std::collections::BTreeMap;

/// Matched lines per document, ordered by document ID.
pub type SearchResult = BTreeMap<DocId, Vec<String>>;

/// Collected postings positions per document, before line resolution.
pub type PositionMap = BTreeMap<DocId, Vec<usize>>;

/// Gather the positions of every posting of every query term, grouped by
/// document. Duplicate query terms contribute their postings again.
pub fn collect_positions(query_terms: &[String], index: &InvertedIndex) -> PositionMap {
    let mut positions = PositionMap::new();

    for term in query_terms {
        if let Some(postings) = index.postings(term) {
            for posting in postings {
                positions
                    .entry(posting.doc_id)
                    .or_default()
                    .push(posting.position);
            }
        }
    }

    positions
}

/// Map each collected position to the line at that index of the stored
/// document. Positions are term ordinals, not line numbers; any position past
/// the last line is dropped, and so is a document left with no lines.
pub fn resolve_lines(positions: PositionMap, documents: &[Document]) -> SearchResult {
    let mut results = SearchResult::new();

    for (doc_id, doc_positions) in positions {
        let Some(document) = documents.get(doc_id) else {
            continue;
        };
        let lines = document.lines();

        let matched: Vec<String> = doc_positions
            .into_iter()
            .filter_map(|position| lines.get(position).map(|line| line.to_string()))
            .collect();

        if !matched.is_empty() {
            results.insert(doc_id, matched);
        }
    }

    results
}

fn run_query(
    normalizer: &Normalizer,
    query: &str,
    index: &InvertedIndex,
    documents: &[Document],
) -> SearchResult {
    let query_terms = normalizer.normalize(query);

    if query_terms.is_empty() {
        tracing::debug!(query, "query has no terms after normalization");
        return SearchResult::new();
    }

    let positions = collect_positions(&query_terms, index);
    let results = resolve_lines(positions, documents);

    tracing::debug!(
        query,
        terms = query_terms.len(),
        matched_documents = results.len(),
        "search complete"
    );

    results
}

/// Answer `query` against an index and the documents it was built from.
///
/// `documents` are the stored texts returned by
/// [`build_index`](crate::index::build_index), in ID order; matched lines
/// are read from them.
pub fn search<S: AsRef<str>>(
    normalizer: &Normalizer,
    query: &str,
    index: &InvertedIndex,
    documents: &[S],
) -> SearchResult {
    let documents: Vec<Document> = documents
        .iter()
        .enumerate()
        .map(|(id, text)| Document::new(id, text.as_ref().to_string()))
        .collect();

    run_query(normalizer, query, index, &documents)
}

/// One index build: the shared normalizer, the index and the stored
/// (normalized) documents. Built per request and dropped afterwards.
pub struct SearchEngine<'a> {
    normalizer: &'a Normalizer,
    index: InvertedIndex,
    documents: Vec<Document>,
}

impl<'a> SearchEngine<'a> {
    /// Build an engine over raw documents.
    pub fn build<S: AsRef<str>>(normalizer: &'a Normalizer, documents: &[S]) -> Self {
        let (index, normalized) = build_index(normalizer, documents);
        let documents = normalized
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document::new(id, text))
            .collect();

        Self {
            normalizer,
            index,
            documents,
        }
    }

    pub fn search(&self, query: &str) -> SearchResult {
        run_query(self.normalizer, query, &self.index, &self.documents)
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Normalized documents, in ID order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Normalized document texts, in ID order.
    pub fn into_texts(self) -> Vec<String> {
        self.documents.into_iter().map(|d| d.text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_position_past_last_line_is_dropped() {
        let normalizer = Normalizer::new();
        let (index, docs) = build_index(&normalizer, &["The quick brown fox", "A lazy dog sleeps"]);

        // "fox" sits at position 2 but the stored text is a single line.
        assert_eq!(index.postings("fox").unwrap()[0].position, 2);
        let results = search(&normalizer, "fox", &index, &docs);
        assert!(results.is_empty());
    }

    #[test]
    fn test_first_term_resolves_to_first_line() {
        let normalizer = Normalizer::new();
        let (index, docs) = build_index(&normalizer, &["The quick brown fox", "A lazy dog sleeps"]);

        let results = search(&normalizer, "Quickly lazy!", &index, &docs);

        let mut expected = SearchResult::new();
        expected.insert(0, vec!["quick brown fox".to_string()]);
        expected.insert(1, vec!["lazi dog sleep".to_string()]);
        assert_eq!(results, expected);
    }

    #[test]
    fn test_positions_resolve_against_line_array() {
        let normalizer = Normalizer::new();
        let raw = ["apple\nbanana\ncherry", "the cherry"];
        let (index, _) = build_index(&normalizer, &raw);

        let results = search(&normalizer, "cherry", &index, &raw);

        // doc 0: position 2 -> third line; doc 1: position 0 -> first line
        assert_eq!(results.get(&0), Some(&vec!["cherry".to_string()]));
        assert_eq!(results.get(&1), Some(&vec!["the cherry".to_string()]));
    }

    #[test]
    fn test_resolved_line_need_not_contain_term() {
        let normalizer = Normalizer::new();
        let raw = ["apple banana\ncherry"];
        let (index, _) = build_index(&normalizer, &raw);

        // "banana" is term 1, so line 1 comes back although it holds "cherry".
        let results = search(&normalizer, "banana", &index, &raw);
        assert_eq!(results.get(&0), Some(&vec!["cherry".to_string()]));
    }

    #[test]
    fn test_duplicate_matches_are_kept() {
        let normalizer = Normalizer::new();
        let raw = ["fox\nfox fox"];
        let (index, _) = build_index(&normalizer, &raw);

        let results = search(&normalizer, "fox fox", &index, &raw);

        // positions [0, 1, 2] twice; position 2 is out of range
        assert_eq!(
            results.get(&0),
            Some(&vec![
                "fox".to_string(),
                "fox fox".to_string(),
                "fox".to_string(),
                "fox fox".to_string(),
            ])
        );
    }

    #[test]
    fn test_collect_positions() {
        let normalizer = Normalizer::new();
        let (index, _) = build_index(&normalizer, &["fox dog fox", "dog"]);
        let terms = normalizer.normalize("dogs fox unknown");

        let positions = collect_positions(&terms, &index);

        let mut expected = PositionMap::new();
        expected.insert(0, vec![1, 0, 2]);
        expected.insert(1, vec![0]);
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_unmatched_term_has_no_entry() {
        let normalizer = Normalizer::new();
        let (index, docs) = build_index(&normalizer, &["fox", "dog"]);

        let results = search(&normalizer, "fox zebra", &index, &docs);

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&0));
        assert!(!results.contains_key(&1));
        assert!(search(&normalizer, "zebra", &index, &docs).is_empty());
    }

    #[test]
    fn test_empty_and_stopword_queries() {
        let normalizer = Normalizer::new();
        let (index, docs) = build_index(&normalizer, &["The quick brown fox"]);

        assert!(search(&normalizer, "", &index, &docs).is_empty());
        assert!(search(&normalizer, "the and of", &index, &docs).is_empty());
        assert!(search(&normalizer, "?!", &index, &docs).is_empty());
    }

    #[test]
    fn test_results_only_for_documents_with_query_terms() {
        let normalizer = Normalizer::new();
        let raw = ["fox", "dog", "cat", "fox dog"];
        let (index, docs) = build_index(&normalizer, &raw);
        let query = "fox birds";
        let terms = normalizer.normalize(query);

        for doc_id in search(&normalizer, query, &index, &docs).keys() {
            let has_posting = terms.iter().any(|term| {
                index
                    .postings(term)
                    .map_or(false, |ps| ps.iter().any(|p| p.doc_id == *doc_id))
            });
            assert!(has_posting, "document {doc_id} has no posting for the query");
        }
    }

    #[test]
    fn test_missing_document_is_skipped() {
        let normalizer = Normalizer::new();
        let (index, _) = build_index(&normalizer, &["fox", "fox"]);

        let results = search(&normalizer, "fox", &index, &["fox"]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_engine() {
        let normalizer = Normalizer::new();
        let engine = SearchEngine::build(&normalizer, &["Fox runs", "A lazy dog sleeps"]);

        assert_eq!(engine.documents().len(), 2);
        assert_eq!(engine.documents()[1].text, "lazi dog sleep");
        assert_eq!(engine.index().total_documents(), 2);

        let results = engine.search("fox");
        assert_eq!(results.get(&0), Some(&vec!["fox run".to_string()]));
        assert!(engine.search("fox sleeps").get(&1).is_none());
    }

    #[test]
    fn test_resolve_lines_reads_document_lines() {
        let documents = vec![
            Document::new(0, "first\nsecond".to_string()),
            Document::new(1, "only".to_string()),
        ];
        let mut positions = PositionMap::new();
        positions.insert(0, vec![1, 5, 0]);
        positions.insert(1, vec![3]);
        positions.insert(7, vec![0]);

        let results = resolve_lines(positions, &documents);

        let mut expected = SearchResult::new();
        expected.insert(0, vec!["second".to_string(), "first".to_string()]);
        assert_eq!(results, expected);
    }

    #[test]
    fn test_search_engine_matches_free_functions() {
        let normalizer = Normalizer::new();
        let raw = ["Quick foxes\njump", "The lazy dog", "fox"];
        let (index, docs) = build_index(&normalizer, &raw);
        let engine = SearchEngine::build(&normalizer, &raw);

        for query in ["fox", "lazy quick", "the", "fox fox dog"] {
            assert_eq!(engine.search(query), search(&normalizer, query, &index, &docs));
        }
        assert_eq!(engine.into_texts(), docs);
    }
}
