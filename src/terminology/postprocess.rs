/*!
 * Placeholder reinsertion after the external translation step.
 *
 * The engine round-trips placeholder text with no preservation guarantee:
 * tokens can move, vanish, or come back mangled. Reinsertion is therefore a
 * partial function. Every placeholder that survived verbatim is replaced by
 * its curated rendering with the original occurrence's casing; every one
 * that did not is reported as a miss, never raised as an error.
 */

use log::warn;
use std::collections::HashMap;

use crate::terminology::case::CasePolicy;

/// Result of one postprocess call
#[derive(Debug, Clone, Default)]
pub struct PostprocessOutcome {
    /// Final text with curated renderings reinserted
    pub text: String,
    /// Placeholders from the replacement map that did not survive the
    /// engine round-trip verbatim (silent misses)
    pub missed_placeholders: Vec<String>,
}

/// Reinsert curated renderings into placeholder slots.
///
/// Replacement is literal-substring, never regex: placeholder syntax
/// contains characters a regex engine would treat specially. A placeholder
/// with no entry in `original_cases` is reinserted without case transform.
pub fn postprocess(
    translated_text: &str,
    replacements: &HashMap<String, String>,
    original_cases: &HashMap<String, String>,
) -> PostprocessOutcome {
    let mut text = translated_text.to_string();
    let mut missed_placeholders = Vec::new();

    // Sorted for deterministic output; ordering is otherwise irrelevant
    // since placeholders are synthetic, non-overlapping tokens.
    let mut placeholders: Vec<&String> = replacements.keys().collect();
    placeholders.sort();

    for placeholder in placeholders {
        let translation = &replacements[placeholder];

        if !text.contains(placeholder.as_str()) {
            warn!(
                "Placeholder {} did not survive translation; curated term '{}' not reinserted",
                placeholder, translation
            );
            missed_placeholders.push(placeholder.clone());
            continue;
        }

        let original = original_cases
            .get(placeholder)
            .map(String::as_str)
            .unwrap_or("");
        let cased = CasePolicy::classify(original).apply(translation);
        text = text.replace(placeholder.as_str(), &cased);
    }

    PostprocessOutcome {
        text,
        missed_placeholders,
    }
}
