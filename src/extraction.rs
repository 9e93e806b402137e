/*!
 * Candidate phrase extraction.
 *
 * The terminology preprocessor does not do NLP itself; it consumes a narrow
 * collaborator interface: "given a sentence, produce candidate spans with
 * their text offsets". This module defines that interface and two
 * implementations selected at construction time:
 *
 * - `ChunkExtractor`: a regex-based approximation of noun chunking that
 *   proposes word n-grams as candidate phrases.
 * - `KeywordExtractor`: a degraded fallback used when no chunking capability
 *   is available; it only proposes single words that are known dictionary
 *   keys.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Debug;

/// Word token pattern shared by both extractors
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9'\-]*").unwrap());

/// Sentence units including their trailing terminator and whitespace,
/// so that concatenating the pieces reproduces the input exactly
static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]*[.!?]+\s*|[^.!?]+$").unwrap());

/// A candidate phrase inside a single sentence.
///
/// Offsets are byte offsets into the sentence, half-open `[start, end)`,
/// always on UTF-8 character boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    /// The matched slice of the sentence
    pub text: String,
    /// Byte offset of the first byte of the phrase
    pub start: usize,
    /// Byte offset one past the last byte of the phrase
    pub end: usize,
}

impl PhraseSpan {
    /// Create a span from a sentence slice and its offsets
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether this span overlaps another span's offsets
    pub fn overlaps(&self, other: &PhraseSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Strategy interface for sentence splitting and candidate phrase extraction
pub trait PhraseExtractor: Send + Sync + Debug {
    /// Split a text block into sentence units.
    ///
    /// Implementations decide how much of the original inter-sentence
    /// material they preserve; `join_sentences` must reverse this split as
    /// faithfully as the implementation allows.
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Produce candidate phrase spans for one sentence
    fn extract_phrases(&self, sentence: &str) -> Vec<PhraseSpan>;

    /// Reassemble processed sentences into one text block
    fn join_sentences(&self, sentences: &[String]) -> String;
}

/// Regex-based candidate chunker.
///
/// Proposes every contiguous run of up to `max_phrase_words` word tokens as
/// a candidate. This over-generates compared to a real noun chunker, but the
/// preprocessor discards every candidate without a dictionary match, so
/// over-generation only costs lookups. Sentence splitting keeps each
/// sentence's trailing terminator and whitespace, making reassembly
/// lossless.
#[derive(Debug, Clone)]
pub struct ChunkExtractor {
    max_phrase_words: usize,
}

impl ChunkExtractor {
    /// Default upper bound on candidate phrase length, in words
    pub const DEFAULT_MAX_PHRASE_WORDS: usize = 4;

    /// Create a chunker with the default phrase length bound
    pub fn new() -> Self {
        Self {
            max_phrase_words: Self::DEFAULT_MAX_PHRASE_WORDS,
        }
    }

    /// Create a chunker proposing phrases of at most `max_phrase_words` words
    pub fn with_max_phrase_words(max_phrase_words: usize) -> Self {
        Self {
            max_phrase_words: max_phrase_words.max(1),
        }
    }
}

impl Default for ChunkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseExtractor for ChunkExtractor {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn extract_phrases(&self, sentence: &str) -> Vec<PhraseSpan> {
        let words: Vec<(usize, usize)> = WORD_PATTERN
            .find_iter(sentence)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut spans = Vec::new();
        for first in 0..words.len() {
            let last_bound = (first + self.max_phrase_words).min(words.len());
            for last in first..last_bound {
                let start = words[first].0;
                let end = words[last].1;
                spans.push(PhraseSpan::new(&sentence[start..end], start, end));
            }
        }
        spans
    }

    fn join_sentences(&self, sentences: &[String]) -> String {
        sentences.concat()
    }
}

/// Dictionary keyword fallback used when no chunking capability is available.
///
/// Only proposes single words whose case-folded form is a known dictionary
/// key, so multi-word terms are not matched in this mode. Sentence
/// reassembly rejoins with `". "` and a trailing period, which is lossy with
/// respect to the original terminators; this is a known approximation of
/// the degraded path, not something to compensate for elsewhere.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    known_keys: HashSet<String>,
}

impl KeywordExtractor {
    /// Create a fallback extractor from the set of dictionary keys
    pub fn new(known_keys: HashSet<String>) -> Self {
        Self { known_keys }
    }
}

impl PhraseExtractor for KeywordExtractor {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        text.split(['.', '!', '?'])
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    fn extract_phrases(&self, sentence: &str) -> Vec<PhraseSpan> {
        WORD_PATTERN
            .find_iter(sentence)
            .filter(|m| self.known_keys.contains(&m.as_str().to_lowercase()))
            .map(|m| PhraseSpan::new(m.as_str(), m.start(), m.end()))
            .collect()
    }

    fn join_sentences(&self, sentences: &[String]) -> String {
        if sentences.is_empty() {
            return String::new();
        }
        format!("{}.", sentences.join(". "))
    }
}
