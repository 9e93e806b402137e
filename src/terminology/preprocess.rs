/*!
 * Placeholder substitution ahead of the external translation step.
 *
 * The preprocessor matches candidate phrase spans against the term table and
 * rewrites the text with synthetic `<N>` placeholders, keeping enough
 * metadata (curated rendering, original surface form) for the postprocessor
 * to restore the terminology afterwards.
 *
 * Placeholder numbering is scoped to one preprocess call and is globally
 * unique across all sentences of that call. The translation engine may
 * reorder material across sentence boundaries, so per-sentence numbering
 * could make one sentence's placeholder resolve against another sentence's
 * replacement entry.
 */

use log::debug;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::extraction::{PhraseExtractor, PhraseSpan};
use crate::terminology::table::TermTable;

/// Fixed stopword set for the secondary match pass.
///
/// Deliberately narrow: determiners and possessives that a phrase chunker
/// attaches to the front of a noun phrase. Stripping these recovers matches
/// like "the export market" against a stored "export market". Conjunctions
/// and prepositions stay out of the set so that a candidate like "and maize"
/// never swallows its neighbor word.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its",
        "our", "their", "some", "any", "each", "every",
    ]
    .into_iter()
    .collect()
});

/// Per-call placeholder numbering.
///
/// An explicit counter object threaded through one preprocess call; never a
/// process-wide counter, so concurrent requests cannot interfere.
#[derive(Debug, Default)]
pub struct PlaceholderCounter {
    next: usize,
}

impl PlaceholderCounter {
    /// Start numbering at `<1>`
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Mint the next placeholder token
    pub fn next_placeholder(&mut self) -> String {
        self.next += 1;
        format!("<{}>", self.next)
    }

    /// How many placeholders have been minted
    pub fn minted(&self) -> usize {
        self.next
    }
}

/// Result of one preprocess call.
///
/// The maps are request-local: they are consumed by exactly one paired
/// postprocess call and must never be shared across requests.
#[derive(Debug, Clone, Default)]
pub struct PreprocessOutcome {
    /// The rewritten text handed to the translation engine
    pub text: String,
    /// placeholder -> curated target-language rendering
    pub replacements: HashMap<String, String>,
    /// placeholder -> exact source slice that was replaced
    pub original_cases: HashMap<String, String>,
}

/// A candidate span that matched the term table
struct MatchedSpan {
    span: PhraseSpan,
    translation: String,
}

/// Sentence-wise placeholder rewriting against a frozen term table
pub struct Preprocessor {
    extractor: Box<dyn PhraseExtractor>,
}

impl Preprocessor {
    /// Create a preprocessor around a phrase extraction strategy
    pub fn new(extractor: Box<dyn PhraseExtractor>) -> Self {
        Self { extractor }
    }

    /// Rewrite `text`, replacing every matched term with a placeholder.
    ///
    /// With an empty table this is a pass-through: the input comes back
    /// unchanged with empty maps and no extraction work is performed.
    pub fn preprocess(&self, table: &TermTable, text: &str) -> PreprocessOutcome {
        if table.is_empty() {
            return PreprocessOutcome {
                text: text.to_string(),
                ..Default::default()
            };
        }

        let mut counter = PlaceholderCounter::new();
        let mut outcome = PreprocessOutcome::default();
        let mut processed_sentences = Vec::new();

        for sentence in self.extractor.split_sentences(text) {
            let processed =
                self.preprocess_sentence(table, &sentence, &mut counter, &mut outcome);
            processed_sentences.push(processed);
        }

        outcome.text = self.extractor.join_sentences(&processed_sentences);
        debug!(
            "Preprocessed text with {} placeholder(s): {}",
            counter.minted(),
            outcome.text
        );
        outcome
    }

    fn preprocess_sentence(
        &self,
        table: &TermTable,
        sentence: &str,
        counter: &mut PlaceholderCounter,
        outcome: &mut PreprocessOutcome,
    ) -> String {
        let candidates = self.extractor.extract_phrases(sentence);
        let matched = match_candidates(table, candidates);
        let kept = dedup_overlaps(matched);

        // Replace right-to-left so earlier replacements cannot shift the
        // offsets of spans still waiting to be processed.
        let mut ordered = kept;
        ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        let mut rewritten = sentence.to_string();
        for m in ordered {
            let placeholder = counter.next_placeholder();
            rewritten.replace_range(m.span.start..m.span.end, &placeholder);
            outcome
                .replacements
                .insert(placeholder.clone(), m.translation);
            outcome.original_cases.insert(placeholder, m.span.text);
        }
        rewritten
    }
}

/// Keep the candidate spans that resolve to a curated term.
///
/// Exact normalized match first; when that fails, retry after removing the
/// fixed stopword set from the phrase. A fallback match still claims the
/// full original span, so "the export market" is replaced wholesale.
fn match_candidates(table: &TermTable, candidates: Vec<PhraseSpan>) -> Vec<MatchedSpan> {
    let mut matched = Vec::new();

    for span in candidates {
        if let Some(translation) = table.lookup(&span.text) {
            matched.push(MatchedSpan {
                translation: translation.to_string(),
                span,
            });
            continue;
        }

        // Stopwords lead a noun phrase; a candidate that ends in one is a
        // chunking artifact ("water the") and must not claim its span.
        let lowered = span.text.to_lowercase();
        if lowered
            .split_whitespace()
            .last()
            .is_some_and(|word| STOPWORDS.contains(word))
        {
            continue;
        }

        let stripped = strip_stopwords(&span.text);
        if stripped.is_empty() || stripped == lowered {
            continue;
        }
        if let Some(translation) = table.lookup(&stripped) {
            matched.push(MatchedSpan {
                translation: translation.to_string(),
                span,
            });
        }
    }

    matched
}

/// Remove stopword tokens from a phrase, case-folded
fn strip_stopwords(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Discard overlapping matches.
///
/// Overlapping offsets from the collaborator are a data inconsistency; the
/// policy is that the earliest-starting span wins and the later-starting one
/// is dropped. On equal starts the longer span wins, since it is the more
/// specific phrase.
fn dedup_overlaps(mut matched: Vec<MatchedSpan>) -> Vec<MatchedSpan> {
    matched.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });

    let mut kept: Vec<MatchedSpan> = Vec::new();
    for m in matched {
        match kept.last() {
            Some(last) if m.span.overlaps(&last.span) => {
                debug!(
                    "Dropping overlapping candidate '{}' at {}..{}",
                    m.span.text, m.span.start, m.span.end
                );
            }
            _ => kept.push(m),
        }
    }
    kept
}
