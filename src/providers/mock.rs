/*!
 * Scripted translation engine for tests and offline runs.
 *
 * The interesting engine behaviors for this crate are not good translations
 * but the ways an engine can mistreat placeholder text. The mock can echo
 * text back (identity), return scripted outputs, strip placeholder tokens
 * (the silent-miss case), or fail outright.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Mutex;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

static PLACEHOLDER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\d+>\s?").unwrap());

/// What the mock engine does with each request
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the input text unchanged
    Identity,
    /// Pop scripted responses in order; echoes input once exhausted
    Scripted(Vec<String>),
    /// Echo the input with every placeholder token removed
    DropPlaceholders,
    /// Fail every request with the given message
    Fail(String),
}

/// One recorded engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub source: String,
    pub target: String,
}

/// Scripted engine implementation
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    scripted: Mutex<Vec<String>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        let scripted = match &behavior {
            MockBehavior::Scripted(responses) => responses.clone(),
            _ => Vec::new(),
        };
        Self {
            behavior,
            scripted: Mutex::new(scripted),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that echoes input back unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                text: text.to_string(),
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        match &self.behavior {
            MockBehavior::Identity => Ok(text.to_string()),
            MockBehavior::Scripted(_) => {
                let mut scripted = self
                    .scripted
                    .lock()
                    .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
                if scripted.is_empty() {
                    Ok(text.to_string())
                } else {
                    Ok(scripted.remove(0))
                }
            }
            MockBehavior::DropPlaceholders => {
                Ok(PLACEHOLDER_TOKEN.replace_all(text, "").into_owned())
            }
            MockBehavior::Fail(message) => Err(ProviderError::RequestFailed(message.clone())),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(message) => Err(ProviderError::ConnectionError(message.clone())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
