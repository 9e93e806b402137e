/*!
 * End-to-end placeholder round-trip tests against the mock engine
 */

use std::sync::Arc;

use termlock::app_config::Config;
use termlock::providers::mock::{MockBehavior, MockProvider};
use termlock::translation_service::TranslationService;

use crate::common;

fn offline_config() -> Config {
    let mut config = Config {
        source_language: "en".to_string(),
        target_language: "twi".to_string(),
        ..Config::default()
    };
    config.pivot.enabled = false;
    config.engine.hop_delay_ms = 0;
    config.engine.batch_delay_ms = 0;
    config
}

#[tokio::test]
async fn test_flow_userCsvAndIdentityEngine_shouldProtectCuratedTerms() {
    let dir = common::create_temp_dir().unwrap();
    let csv = common::create_comma_terms(dir.path(), "terms.csv").unwrap();

    let mut config = offline_config();
    config.terminology.user_file = Some(csv);

    let (service, diagnostics) =
        TranslationService::new(config, Box::new(MockProvider::identity())).unwrap();
    assert!(diagnostics.is_empty());

    let result = service
        .translate("The export market wants cocoa.")
        .await
        .unwrap();

    // User terms override the builtin "cocoa" entry
    assert_eq!(result.text, "Amannɔne dwam wants koko pa.");
    assert_eq!(result.replacements_count, 2);
    assert!(result.missed_placeholders.is_empty());
    assert_eq!(result.original, "The export market wants cocoa.");
    assert!(result.preprocessed.contains("<1>"));
    assert!(result.preprocessed.contains("<2>"));
}

#[tokio::test]
async fn test_flow_pivotMode_shouldSequenceTwoEngineCalls() {
    let mut config = offline_config();
    config.pivot.enabled = true;

    let provider = Arc::new(MockProvider::identity());
    let (service, _) =
        TranslationService::new(config, Box::new(Arc::clone(&provider))).unwrap();

    let result = service.translate("Sell cocoa today.").await.unwrap();
    assert!(result.used_pivot);
    assert_eq!(result.text, "Sell kookoo today.");

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!((calls[0].source.as_str(), calls[0].target.as_str()), ("en", "th"));
    assert_eq!((calls[1].source.as_str(), calls[1].target.as_str()), ("th", "ak"));
    // The placeholder text is what crosses both hops
    assert_eq!(calls[0].text, "Sell <1> today.");
}

#[tokio::test]
async fn test_flow_scriptedEngineReordering_shouldStillReinsertByPlaceholder() {
    let mut config = offline_config();
    config.terminology.use_builtin = true;

    // The engine moved the placeholder and rewrote everything around it
    let provider = MockProvider::new(MockBehavior::Scripted(vec![
        "ɛnnɛ yɛtɔn <1> no".to_string(),
    ]));
    let (service, _) = TranslationService::new(config, Box::new(provider)).unwrap();

    let result = service.translate("Sell cocoa today.").await.unwrap();
    assert_eq!(result.text, "ɛnnɛ yɛtɔn kookoo no");
    assert!(result.missed_placeholders.is_empty());
}

#[tokio::test]
async fn test_flow_lossyEngine_shouldSurfaceSilentMissInAudit() {
    let (service, _) = TranslationService::new(
        offline_config(),
        Box::new(MockProvider::new(MockBehavior::DropPlaceholders)),
    )
    .unwrap();

    let result = service.translate("Sell cocoa and maize today.").await.unwrap();

    assert_eq!(result.replacements_count, 2);
    assert_eq!(result.missed_placeholders.len(), 2);
    // Expected vs actually-substituted is visible to the caller
    assert_eq!(
        result.replacements_count - result.missed_placeholders.len(),
        0
    );
}

#[tokio::test]
async fn test_flow_emptyTable_shouldPassTextThroughUntouched() {
    let mut config = offline_config();
    config.terminology.use_builtin = false;

    let provider = Arc::new(MockProvider::identity());
    let (service, _) =
        TranslationService::new(config, Box::new(Arc::clone(&provider))).unwrap();

    let result = service.translate("Sell cocoa today.").await.unwrap();

    assert_eq!(result.text, "Sell cocoa today.");
    assert_eq!(result.replacements_count, 0);
    // The engine saw the raw input, placeholder-free
    assert_eq!(provider.calls()[0].text, "Sell cocoa today.");
}

#[tokio::test]
async fn test_flow_batch_shouldTranslateEveryLineAndReportProgress() {
    let (service, _) =
        TranslationService::new(offline_config(), Box::new(MockProvider::identity())).unwrap();

    let texts = vec![
        "Sell cocoa.".to_string(),
        "Visit the farm.".to_string(),
    ];
    let results = service.translate_batch(&texts, |_, _| {}).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].result.as_ref().unwrap().text, "Sell kookoo.");
    // "the farm" matches "farm" after stopword stripping and is replaced
    // wholesale, determiner included
    assert_eq!(results[1].result.as_ref().unwrap().text, "Visit afuo.");
}
