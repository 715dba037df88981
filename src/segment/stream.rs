use serde::{Deserialize, Serialize};

/// Words (or grouped tokens) paired with the 1-based page each came from.
///
/// The two sequences always have equal length. Every pass consumes one
/// `PagedText` and produces a new one; nothing is mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagedText {
    items: Vec<String>,
    pages: Vec<u32>,
}

impl PagedText {
    /// # Panics
    ///
    /// Panics if `items` and `pages` differ in length or if any page is 0.
    pub fn new(items: Vec<String>, pages: Vec<u32>) -> Self {
        assert_eq!(
            items.len(),
            pages.len(),
            "word and page sequences must have equal length"
        );
        assert!(
            pages.iter().all(|&page| page >= 1),
            "page numbers are 1-based"
        );
        Self { items, pages }
    }

    /// Convenience constructor for borrowed words.
    pub fn from_words<S: AsRef<str>>(words: &[S], pages: &[u32]) -> Self {
        Self::new(
            words.iter().map(|w| w.as_ref().to_string()).collect(),
            pages.to_vec(),
        )
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            pages: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, item: String, page: u32) {
        self.items.push(item);
        self.pages.push(page);
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.items
            .iter()
            .map(String::as_str)
            .zip(self.pages.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<u32>) {
        (self.items, self.pages)
    }
}

/// One flash unit as seen by a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingToken<'a> {
    pub text: &'a str,
    pub page: u32,
    /// How many source words this token stands for.
    pub weight: u32,
}

/// Final output of the assembler: tokens with their page and weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    pub tokens: Vec<String>,
    pub pages: Vec<u32>,
    pub weights: Vec<u32>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: String, page: u32, weight: u32) {
        self.tokens.push(token);
        self.pages.push(page);
        self.weights.push(weight);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// False when deserialized data broke the parallel-array invariant.
    pub fn is_consistent(&self) -> bool {
        self.tokens.len() == self.pages.len() && self.tokens.len() == self.weights.len()
    }

    pub fn get(&self, index: usize) -> Option<ReadingToken<'_>> {
        Some(ReadingToken {
            text: self.tokens.get(index)?,
            page: *self.pages.get(index)?,
            weight: *self.weights.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ReadingToken<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }
}

/// A segmented document: the token stream plus the source page count.
///
/// Serializes to the flat `{tokens, pages, weights, page_count}` shape
/// used by the token cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedDocument {
    #[serde(flatten)]
    pub stream: TokenStream,
    pub page_count: u32,
}

impl TokenizedDocument {
    pub fn new(stream: TokenStream, page_count: u32) -> Self {
        Self { stream, page_count }
    }

    pub fn len(&self) -> usize {
        self.stream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }
}
