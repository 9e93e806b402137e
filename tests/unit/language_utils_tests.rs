/*!
 * Language code normalization tests
 */

use termlock::language_utils::{get_language_name, is_engine_supported, normalize_to_engine};

#[test]
fn test_normalizeToEngine_mixedCodeStyles_shouldAgree() {
    // 639-1 and 639-3 spellings of the same language normalize identically
    assert_eq!(
        normalize_to_engine("en").unwrap(),
        normalize_to_engine("eng").unwrap()
    );
    assert_eq!(
        normalize_to_engine("th").unwrap(),
        normalize_to_engine("tha").unwrap()
    );
    assert_eq!(
        normalize_to_engine("ak").unwrap(),
        normalize_to_engine("twi").unwrap()
    );
}

#[test]
fn test_normalizeToEngine_whitespaceAndCase_shouldBeTolerated() {
    assert_eq!(normalize_to_engine(" EN ").unwrap(), "en");
    assert_eq!(normalize_to_engine("Twi").unwrap(), "ak");
}

#[test]
fn test_isEngineSupported_ghanaianTargets_shouldBeAdvisedSupported() {
    assert!(is_engine_supported("twi"));
    assert!(is_engine_supported("ewe"));
    assert!(is_engine_supported("gaa"));
}

#[test]
fn test_isEngineSupported_invalidCode_shouldBeFalseNotError() {
    assert!(!is_engine_supported("zz"));
    assert!(!is_engine_supported(""));
}

#[test]
fn test_getLanguageName_shouldResolveBothCodeLengths() {
    assert_eq!(get_language_name("th"), "Thai");
    assert_eq!(get_language_name("tha"), "Thai");
}
