/*!
 * Casing policy derivation and application.
 *
 * When a matched term is replaced by a placeholder, the original surface
 * form is recorded; after translation the curated rendering is reinserted
 * with a casing derived from that surface form. Both steps live here as
 * pure functions so the rest of the pipeline never inspects characters.
 */

use serde::{Deserialize, Serialize};

/// Casing observed on an original term occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasePolicy {
    /// Every alphabetic character was uppercase (e.g. "COCOA")
    Upper,
    /// Every word started with an uppercase letter (e.g. "Export Market")
    Title,
    /// Only the leading character was uppercase (e.g. "Cocoa beans")
    Sentence,
    /// No casing to reproduce; use the stored rendering as-is
    None,
}

impl CasePolicy {
    /// Derive the casing policy from an original surface form.
    ///
    /// Empty strings and strings without alphabetic characters degrade to
    /// `None` rather than erroring.
    pub fn classify(original: &str) -> CasePolicy {
        if original.is_empty() {
            return CasePolicy::None;
        }

        let has_alpha = original.chars().any(|c| c.is_alphabetic());
        if !has_alpha {
            return CasePolicy::None;
        }

        if original.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()) {
            return CasePolicy::Upper;
        }

        if is_title_case(original) {
            return CasePolicy::Title;
        }

        if original.chars().next().is_some_and(|c| c.is_uppercase()) {
            return CasePolicy::Sentence;
        }

        CasePolicy::None
    }

    /// Apply this casing policy to a stored translation
    pub fn apply(self, translation: &str) -> String {
        match self {
            CasePolicy::Upper => translation.to_uppercase(),
            CasePolicy::Title => translation
                .split_whitespace()
                .map(capitalize_word)
                .collect::<Vec<_>>()
                .join(" "),
            CasePolicy::Sentence => capitalize_word(translation),
            CasePolicy::None => translation.to_string(),
        }
    }
}

/// Whether every word is capitalized: first alphabetic character uppercase,
/// remaining alphabetic characters lowercase. Words without alphabetic
/// characters are ignored; a string with no such words is not title case.
fn is_title_case(text: &str) -> bool {
    let mut saw_cased_word = false;

    for word in text.split_whitespace() {
        let mut chars = word.chars().filter(|c| c.is_alphabetic());
        let Some(first) = chars.next() else {
            continue;
        };
        if !first.is_uppercase() {
            return false;
        }
        if chars.any(|c| c.is_uppercase()) {
            return false;
        }
        saw_cased_word = true;
    }

    saw_cased_word
}

/// Uppercase the first character, leaving the rest unchanged
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
