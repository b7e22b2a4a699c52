use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static::lazy_static! {
    /// English stopwords, matching the NLTK corpus list.
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
            "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
            "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
            "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
            "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
            "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
            "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
            "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
            "against", "between", "into", "through", "during", "before", "after", "above",
            "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
            "again", "further", "then", "once", "here", "there", "when", "where", "why",
            "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
            "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
            "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
            "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
            "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
            "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
            "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
            "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
            "wouldn't",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Turns raw text into the sequence of terms that gets indexed and queried.
///
/// The stopword set and the stemmer never change after construction, so one
/// `Normalizer` is built at startup and shared (behind an `Arc`) by every
/// request.
///
/// Stemming uses the Snowball English algorithm (Porter2), which keeps some
/// suffixes classic Porter strips: "generously" stems to "generous", not
/// "gener".
pub struct Normalizer {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
}

impl Normalizer {
    /// English normalizer with the built-in stopword list.
    pub fn new() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().copied())
    }

    /// English normalizer with a caller-supplied stopword list.
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Lowercase every character
    fn lowercase_filter(&self, text: &str) -> String {
        text.to_lowercase()
    }

    /// Drop everything that is neither alphanumeric nor whitespace.
    /// Nothing is substituted, so "don't" becomes "dont".
    fn punctuation_filter(&self, text: String) -> String {
        text.chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect()
    }

    /// Split into whitespace-separated tokens
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    /// Remove stopwords
    fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.is_stopword(t))
            .collect()
    }

    /// Apply stemming
    fn stemmer_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| self.stemmer.stem(&t).into_owned())
            .collect()
    }

    /// Full normalization pipeline. Order is preserved and duplicates are kept.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let text = self.lowercase_filter(text);
        let text = self.punctuation_filter(text);
        let tokens = self.tokenize(&text);
        let tokens = self.stopword_filter(tokens);
        self.stemmer_filter(tokens)
    }

    /// Normalized terms joined by single spaces.
    pub fn normalize_to_text(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
