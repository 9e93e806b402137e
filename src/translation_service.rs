/*!
 * Translation orchestration.
 *
 * A `TranslationService` owns the frozen term table, the phrase extraction
 * strategy, and the engine client for one session, and runs the full
 * round-trip per request: preprocess -> engine (direct or two-hop pivot) ->
 * postprocess. Every stage is captured in the returned audit trail so a
 * caller can diagnose silent misses after the fact.
 *
 * Request-local state (placeholder maps) is allocated fresh per call;
 * nothing here is shared mutably across concurrent requests.
 */

use anyhow::Result;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{TerminologyError, TranslationError};
use crate::extraction::{ChunkExtractor, KeywordExtractor};
use crate::language_utils::{is_engine_supported, normalize_to_engine};
use crate::providers::TranslationProvider;
use crate::terminology::{postprocess, Preprocessor, TermCounts, TermTable};

/// One matched term in the audit trail
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReplacedTerm {
    /// Placeholder token that stood in for the term
    pub placeholder: String,
    /// Exact source slice that was replaced
    pub original: String,
    /// Curated rendering recorded for reinsertion
    pub translation: String,
}

/// Transparent audit trail of a single translate call
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResult {
    /// Final text with curated terminology reinserted
    pub text: String,
    /// Source language as configured
    pub src: String,
    /// Target language as configured
    pub dest: String,
    /// The input text
    pub original: String,
    /// The placeholder text handed to the engine
    pub preprocessed: String,
    /// Raw engine output before placeholder reinsertion
    pub engine_translation: String,
    /// Intermediate pivot-language text, when pivot mode was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_translation: Option<String>,
    /// Number of placeholders emitted by preprocessing
    pub replacements_count: usize,
    /// Every matched term, by placeholder
    pub replaced_terms: Vec<ReplacedTerm>,
    /// Placeholders that did not survive the engine round-trip
    pub missed_placeholders: Vec<String>,
    /// Wall-clock time for the whole call
    pub translation_time_ms: u64,
    /// Whether pivot sequencing was used
    pub used_pivot: bool,
}

/// Per-item outcome of a batch; a failed item never aborts the batch
#[derive(Debug, Serialize)]
pub struct BatchItemResult {
    /// The input text for this item
    pub original: String,
    /// The translation, when the item succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TranslationResult>,
    /// The failure message, when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Session-scoped translator with terminology control
pub struct TranslationService {
    config: Config,
    provider: Box<dyn TranslationProvider>,
    table: TermTable,
    preprocessor: Preprocessor,
    source_engine: String,
    target_engine: String,
    pivot_engine: Option<String>,
}

impl TranslationService {
    /// Build a service for one session.
    ///
    /// Loads the term table once (soft-failing per source) and resolves the
    /// language codes up front. Returns the non-fatal terminology
    /// diagnostics alongside the service.
    pub fn new(
        config: Config,
        provider: Box<dyn TranslationProvider>,
    ) -> Result<(Self, Vec<TerminologyError>)> {
        config.validate()?;

        let source_engine = normalize_to_engine(&config.source_language)?;
        let target_engine = normalize_to_engine(&config.target_language)?;
        let pivot_engine = if config.pivot.enabled {
            Some(normalize_to_engine(&config.pivot.language)?)
        } else {
            None
        };

        for (role, code) in [
            ("Source", &config.source_language),
            ("Target", &config.target_language),
        ] {
            if !is_engine_supported(code) {
                warn!("{} language '{}' may not be supported by the engine", role, code);
            }
        }
        if config.pivot.enabled && !is_engine_supported(&config.pivot.language) {
            warn!(
                "Pivot language '{}' may not be supported by the engine",
                config.pivot.language
            );
        }

        let load = TermTable::load(
            &config.target_language,
            config.terminology.user_file.as_deref(),
            config.terminology.use_builtin,
        );

        if let Some(pivot) = &pivot_engine {
            info!(
                "Using pivot translation: {} -> {} -> {}",
                source_engine, pivot, target_engine
            );
        }

        let service = Self {
            preprocessor: Preprocessor::new(Box::new(ChunkExtractor::new())),
            table: load.table,
            config,
            provider,
            source_engine,
            target_engine,
            pivot_engine,
        };
        Ok((service, load.diagnostics))
    }

    /// Switch to the degraded keyword extraction strategy.
    ///
    /// Used when phrase chunking is not wanted or trusted; only single-word
    /// dictionary keys will match in this mode.
    pub fn use_keyword_fallback(&mut self) {
        let extractor = KeywordExtractor::new(self.table.key_set());
        self.preprocessor = Preprocessor::new(Box::new(extractor));
    }

    /// The loaded term table
    pub fn table(&self) -> &TermTable {
        &self.table
    }

    /// Term counts for observability
    pub fn term_counts(&self) -> TermCounts {
        self.table.counts()
    }

    /// Check the engine connection
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.provider.test_connection().await.map_err(Into::into)
    }

    /// Translate one text with terminology control.
    ///
    /// Engine failures are the only fatal outcome; a text where nothing
    /// matched the table, or where placeholders were lost in transit, is a
    /// valid result with the loss visible in the audit fields.
    pub async fn translate(&self, text: &str) -> Result<TranslationResult, TranslationError> {
        let start = Instant::now();

        let pre = self.preprocessor.preprocess(&self.table, text);
        debug!("Preprocessed text: {}", pre.text);
        debug!("Replacements: {:?}", pre.replacements.keys().collect::<Vec<_>>());

        let (engine_translation, pivot_translation) = match &self.pivot_engine {
            Some(pivot) => {
                debug!("Hop 1: {} -> {}", self.source_engine, pivot);
                let intermediate = self
                    .provider
                    .translate(&pre.text, &self.source_engine, pivot)
                    .await?;

                // Pacing between hops to stay under the engine's rate limits
                tokio::time::sleep(Duration::from_millis(self.config.engine.hop_delay_ms)).await;

                debug!("Hop 2: {} -> {}", pivot, self.target_engine);
                let translated = self
                    .provider
                    .translate(&intermediate, pivot, &self.target_engine)
                    .await?;
                (translated, Some(intermediate))
            }
            None => {
                debug!("Direct: {} -> {}", self.source_engine, self.target_engine);
                let translated = self
                    .provider
                    .translate(&pre.text, &self.source_engine, &self.target_engine)
                    .await?;
                (translated, None)
            }
        };

        let post = postprocess(&engine_translation, &pre.replacements, &pre.original_cases);

        let mut replaced_terms: Vec<ReplacedTerm> = pre
            .replacements
            .iter()
            .map(|(placeholder, translation)| ReplacedTerm {
                placeholder: placeholder.clone(),
                original: pre
                    .original_cases
                    .get(placeholder)
                    .cloned()
                    .unwrap_or_default(),
                translation: translation.clone(),
            })
            .collect();
        replaced_terms.sort_by(|a, b| a.placeholder.cmp(&b.placeholder));

        Ok(TranslationResult {
            text: post.text,
            src: self.config.source_language.clone(),
            dest: self.config.target_language.clone(),
            original: text.to_string(),
            preprocessed: pre.text,
            engine_translation,
            pivot_translation,
            replacements_count: pre.replacements.len(),
            replaced_terms,
            missed_placeholders: post.missed_placeholders,
            translation_time_ms: start.elapsed().as_millis() as u64,
            used_pivot: self.pivot_engine.is_some(),
        })
    }

    /// Translate multiple texts sequentially with pacing between items.
    ///
    /// Per-item failures are recorded in place so one bad input never fails
    /// the whole batch. The callback receives (completed, total) after each
    /// item for progress reporting.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        progress: impl Fn(usize, usize),
    ) -> Vec<BatchItemResult> {
        let total = texts.len();
        let mut results = Vec::with_capacity(total);

        for (index, text) in texts.iter().enumerate() {
            match self.translate(text).await {
                Ok(result) => results.push(BatchItemResult {
                    original: text.clone(),
                    result: Some(result),
                    error: None,
                }),
                Err(e) => {
                    error!("Failed to translate text {}: {}", index, e);
                    results.push(BatchItemResult {
                        original: text.clone(),
                        result: None,
                        error: Some(e.to_string()),
                    });
                }
            }
            progress(index + 1, total);

            if index + 1 < total {
                tokio::time::sleep(Duration::from_millis(self.config.engine.batch_delay_ms))
                    .await;
            }
        }

        results
    }
}
