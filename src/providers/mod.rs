/*!
 * Clients for the external translation engine.
 *
 * The terminology core treats the engine as a single opaque call: text with
 * placeholders goes in, translated text comes back, with no guarantee the
 * placeholders survive byte-for-byte. This module defines that seam and its
 * implementations:
 * - `google`: the Google Translate web endpoint
 * - `mock`: scripted engine for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation engine clients.
///
/// Implementations are interchangeable behind this trait; the service layer
/// never knows which engine it is driving.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate `text` from `source` to `target` (engine language codes).
    ///
    /// The text must be round-tripped as-is: no trimming, no token-level
    /// rewriting, since it may carry placeholder tokens.
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, ProviderError>;

    /// Test the connection to the engine
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short engine name for logs and audit output
    fn name(&self) -> &'static str;
}

// Forwarding impl so callers can keep a handle on a shared provider
// (the service takes ownership of its client)
#[async_trait]
impl<T: TranslationProvider + ?Sized> TranslationProvider for std::sync::Arc<T> {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        (**self).translate(text, source, target).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        (**self).test_connection().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

pub mod google;
pub mod mock;

pub use google::GoogleTranslate;
pub use mock::MockProvider;
