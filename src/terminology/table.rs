/*!
 * Curated terminology storage.
 *
 * A `TermTable` holds the merged mapping from normalized source phrase to
 * curated target-language rendering, with provenance per entry. Tables are
 * built once per session from an embedded builtin store and an optional
 * user-supplied delimited file, then treated as frozen: translation requests
 * only read them.
 */

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::errors::TerminologyError;
use crate::language_utils::normalize_to_engine;

/// Builtin dictionaries shipped with the crate, keyed by engine language code
const BUILTIN_STORES: &[(&str, &str)] = &[
    ("ak", include_str!("data/terms_ak.json")),
    ("ee", include_str!("data/terms_ee.json")),
    ("gaa", include_str!("data/terms_gaa.json")),
];

/// Header names recognized as the source-phrase column
const SOURCE_COLUMN_NAMES: &[&str] = &["text", "english", "source", "term", "word"];

/// Header names recognized as the translation column
const TARGET_COLUMN_NAMES: &[&str] = &["text_translated", "translation", "target", "translated"];

/// Origin of a terminology entry, determining override precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermProvenance {
    /// Shipped with the crate
    Builtin,
    /// Loaded from a user-supplied file; overrides builtin on key collision
    User,
}

impl std::fmt::Display for TermProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A curated source-phrase -> rendering pair with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Curated target-language rendering
    pub translation: String,
    /// Where the entry came from
    pub provenance: TermProvenance,
}

/// Entry counts by provenance, for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounts {
    pub total: usize,
    pub builtin: usize,
    pub user: usize,
}

/// The merged terminology mapping for one session
#[derive(Debug, Clone, Default)]
pub struct TermTable {
    terms: HashMap<String, Term>,
}

/// Result of building a table: the table itself plus the non-fatal
/// diagnostics gathered along the way
#[derive(Debug)]
pub struct TermTableLoad {
    pub table: TermTable,
    pub diagnostics: Vec<TerminologyError>,
}

impl TermTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table for `target_language`, merging sources in fixed order:
    /// builtin store first, user file second, last write wins.
    ///
    /// Never fails: an unavailable source contributes zero entries and a
    /// diagnostic, since the other source may still be usable.
    pub fn load(
        target_language: &str,
        user_source: Option<&Path>,
        use_builtin: bool,
    ) -> TermTableLoad {
        let mut table = TermTable::new();
        let mut diagnostics = Vec::new();

        if use_builtin {
            if let Err(e) = table.merge_builtin(target_language) {
                warn!("Builtin terminology disabled: {}", e);
                diagnostics.push(e);
            }
        }

        if let Some(path) = user_source {
            if let Err(e) = table.merge_user_file(path) {
                warn!("User terminology disabled: {}", e);
                diagnostics.push(e);
            }
        }

        let counts = table.counts();
        info!(
            "Terminology loaded: {} total terms ({} builtin, {} user)",
            counts.total, counts.builtin, counts.user
        );

        TermTableLoad { table, diagnostics }
    }

    /// Insert one entry; the key is normalized by trimming and case-folding.
    /// A later insert with the same key replaces the earlier one.
    pub fn insert(&mut self, key: &str, translation: &str, provenance: TermProvenance) {
        let key = normalize_key(key);
        if key.is_empty() || translation.is_empty() {
            return;
        }
        self.terms.insert(
            key,
            Term {
                translation: translation.to_string(),
                provenance,
            },
        );
    }

    /// Exact-match lookup on the normalized key.
    ///
    /// Any richer normalization (e.g. stopword stripping) happens in the
    /// caller before retrying a lookup.
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.terms
            .get(&normalize_key(phrase))
            .map(|term| term.translation.as_str())
    }

    /// Entry counts by provenance
    pub fn counts(&self) -> TermCounts {
        let builtin = self
            .terms
            .values()
            .filter(|t| t.provenance == TermProvenance::Builtin)
            .count();
        TermCounts {
            total: self.terms.len(),
            builtin,
            user: self.terms.len() - builtin,
        }
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The set of normalized keys, used to seed the keyword fallback extractor
    pub fn key_set(&self) -> HashSet<String> {
        self.terms.keys().cloned().collect()
    }

    /// Iterate over entries, for listing/export
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn merge_builtin(&mut self, target_language: &str) -> Result<(), TerminologyError> {
        let engine_code = normalize_to_engine(target_language).map_err(|e| {
            TerminologyError::SourceUnavailable(format!(
                "unrecognized target language '{}': {}",
                target_language, e
            ))
        })?;

        let Some((_, raw)) = BUILTIN_STORES.iter().find(|(code, _)| *code == engine_code)
        else {
            return Err(TerminologyError::SourceUnavailable(format!(
                "no builtin dictionary for language '{}'",
                target_language
            )));
        };

        let entries: HashMap<String, String> = serde_json::from_str(raw).map_err(|e| {
            TerminologyError::SourceUnavailable(format!(
                "builtin dictionary for '{}' is corrupt: {}",
                engine_code, e
            ))
        })?;

        for (key, translation) in &entries {
            self.insert(key, translation, TermProvenance::Builtin);
        }
        Ok(())
    }

    fn merge_user_file(&mut self, path: &Path) -> Result<(), TerminologyError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TerminologyError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let delimiter = detect_delimiter(&content);
        let mut lines = content.lines();

        let header = lines.next().ok_or_else(|| {
            TerminologyError::MalformedSource(format!("{}: empty file", path.display()))
        })?;
        let columns: Vec<String> = header
            .split(delimiter)
            .map(|c| unquote(c).to_lowercase())
            .collect();
        if columns.len() < 2 {
            return Err(TerminologyError::MalformedSource(format!(
                "{}: needs at least 2 columns",
                path.display()
            )));
        }

        let source_idx = find_column(&columns, SOURCE_COLUMN_NAMES);
        let target_idx = find_column(&columns, TARGET_COLUMN_NAMES);
        // Fall back to the first two columns when either name is missing
        let (source_idx, target_idx) = match (source_idx, target_idx) {
            (Some(s), Some(t)) => (s, t),
            _ => (0, 1),
        };

        let mut loaded = 0usize;
        for line in lines {
            let fields: Vec<&str> = line.split(delimiter).collect();
            let key = fields.get(source_idx).map(|f| unquote(f)).unwrap_or_default();
            let translation = fields.get(target_idx).map(|f| unquote(f)).unwrap_or_default();
            // Rows missing either field are skipped, not fatal
            if key.is_empty() || translation.is_empty() {
                continue;
            }
            self.insert(&key, &translation, TermProvenance::User);
            loaded += 1;
        }

        info!("Loaded {} user terms from {}", loaded, path.display());
        Ok(())
    }
}

/// Case-fold and trim a phrase into its table key
fn normalize_key(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// Pick the field delimiter by presence in a leading sample, preferring
/// comma, then semicolon, then tab
fn detect_delimiter(content: &str) -> char {
    let sample: String = content.chars().take(1024).collect();
    if sample.contains(',') {
        ','
    } else if sample.contains(';') {
        ';'
    } else if sample.contains('\t') {
        '\t'
    } else {
        ','
    }
}

/// Index of the first header column matching any of the given names
fn find_column(columns: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| columns.iter().position(|c| c == name))
}

/// Trim whitespace and a surrounding pair of double quotes
fn unquote(field: &str) -> String {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termTable_insert_shouldNormalizeKeys() {
        let mut table = TermTable::new();
        table.insert("  Cocoa ", "kookoo", TermProvenance::Builtin);

        assert_eq!(table.lookup("cocoa"), Some("kookoo"));
        assert_eq!(table.lookup("COCOA"), Some("kookoo"));
        assert_eq!(table.lookup(" Cocoa "), Some("kookoo"));
    }

    #[test]
    fn test_termTable_insert_userAfterBuiltin_shouldWin() {
        let mut table = TermTable::new();
        table.insert("cocoa", "kookoo", TermProvenance::Builtin);
        table.insert("cocoa", "koko pa", TermProvenance::User);

        assert_eq!(table.lookup("cocoa"), Some("koko pa"));
        let counts = table.counts();
        assert_eq!(counts.total, 1);
        assert_eq!(counts.builtin, 0);
        assert_eq!(counts.user, 1);
    }

    #[test]
    fn test_termTable_lookup_unknownPhrase_shouldReturnNone() {
        let table = TermTable::new();
        assert_eq!(table.lookup("anything"), None);
    }

    #[test]
    fn test_termTable_insert_emptyKeyOrTranslation_shouldBeIgnored() {
        let mut table = TermTable::new();
        table.insert("", "x", TermProvenance::User);
        table.insert("  ", "x", TermProvenance::User);
        table.insert("word", "", TermProvenance::User);

        assert!(table.is_empty());
    }

    #[test]
    fn test_termTable_load_builtinForKnownLanguage_shouldPopulate() {
        let load = TermTable::load("ak", None, true);

        assert!(load.diagnostics.is_empty());
        assert!(!load.table.is_empty());
        assert_eq!(load.table.lookup("cocoa"), Some("kookoo"));
    }

    #[test]
    fn test_termTable_load_aliasLanguageCode_shouldResolveBuiltin() {
        let load = TermTable::load("twi", None, true);

        assert!(load.diagnostics.is_empty());
        assert_eq!(load.table.lookup("cocoa"), Some("kookoo"));
    }

    #[test]
    fn test_termTable_load_unknownLanguage_shouldDegradeWithDiagnostic() {
        let load = TermTable::load("fr", None, true);

        assert!(load.table.is_empty());
        assert_eq!(load.diagnostics.len(), 1);
        assert!(matches!(
            load.diagnostics[0],
            TerminologyError::SourceUnavailable(_)
        ));
    }

    #[test]
    fn test_termTable_load_missingUserFile_shouldDegradeWithDiagnostic() {
        let load = TermTable::load("ak", Some(Path::new("/no/such/file.csv")), true);

        // Builtin still contributes even though the user source failed
        assert!(!load.table.is_empty());
        assert_eq!(load.diagnostics.len(), 1);
    }

    #[test]
    fn test_detectDelimiter_shouldPreferCommaThenSemicolonThenTab() {
        assert_eq!(detect_delimiter("a,b"), ',');
        assert_eq!(detect_delimiter("a;b"), ';');
        assert_eq!(detect_delimiter("a\tb"), '\t');
        assert_eq!(detect_delimiter("ab"), ',');
    }

    #[test]
    fn test_findColumn_shouldMatchSynonymsInOrder() {
        let columns = vec!["id".to_string(), "word".to_string(), "target".to_string()];

        assert_eq!(find_column(&columns, SOURCE_COLUMN_NAMES), Some(1));
        assert_eq!(find_column(&columns, TARGET_COLUMN_NAMES), Some(2));
        assert_eq!(find_column(&columns, &["missing"]), None);
    }
}
