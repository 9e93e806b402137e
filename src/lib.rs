/*!
 * # termlock - Terminology-Controlled Machine Translation
 *
 * A Rust library that wraps an opaque machine translation engine and
 * guarantees curated renderings for a bounded vocabulary.
 *
 * ## How it works
 *
 * Matched terms are swapped for synthetic `<N>` placeholders before the
 * text reaches the engine, and the curated target-language renderings are
 * reinserted afterwards with the original occurrence's casing. The engine
 * is free to move, drop, or mangle placeholder tokens; losses are tolerated
 * and surfaced in the per-request audit trail rather than hidden.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `terminology`: The placeholder substitution protocol:
 *   - `terminology::table`: merged term mapping with provenance
 *   - `terminology::preprocess`: placeholder rewriting before translation
 *   - `terminology::postprocess`: placeholder reinsertion after translation
 *   - `terminology::case`: casing policy derivation
 * - `extraction`: candidate phrase span strategies
 * - `providers`: translation engine clients (Google web endpoint, mock)
 * - `translation_service`: per-session orchestration and batching
 * - `language_utils`: ISO language code normalization for the engine
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod extraction;
pub mod language_utils;
pub mod providers;
pub mod terminology;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TerminologyError, TranslationError};
pub use extraction::{ChunkExtractor, KeywordExtractor, PhraseExtractor, PhraseSpan};
pub use language_utils::{get_language_name, is_engine_supported, normalize_to_engine};
pub use providers::{GoogleTranslate, MockProvider, TranslationProvider};
pub use terminology::{CasePolicy, Preprocessor, TermTable};
pub use translation_service::{BatchItemResult, TranslationResult, TranslationService};
