/*!
 * Language utilities for ISO language code handling
 *
 * This module provides functions for normalizing ISO 639-1 (2-letter) and
 * ISO 639-3 (3-letter) language codes to the identifiers the external
 * translation engine expects, which are ISO 639-1 codes except for a few
 * languages the engine labels non-standardly.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Normalize a language code to the form the translation engine expects.
///
/// Accepts ISO 639-1 or ISO 639-3 input. Most languages map to their
/// ISO 639-1 code; the engine uses irregular identifiers for some languages
/// (notably the Ghanaian ones), handled by the explicit table below.
pub fn normalize_to_engine(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.is_empty() {
        return Err(anyhow!("Empty language code"));
    }

    // Engine identifiers that do not follow ISO 639-1
    match normalized_code.as_str() {
        "twi" | "aka" | "ak" => return Ok("ak".to_string()), // Akan/Twi
        "ewe" | "ee" => return Ok("ee".to_string()),         // Ewe
        "gaa" => return Ok("gaa".to_string()),               // Ga (engine keeps 3 letters)
        _ => {}
    }

    // Already a valid ISO 639-1 code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        return Err(anyhow!("Invalid language code: {}", code));
    }

    // ISO 639-3 code, convert to ISO 639-1 when one exists
    if normalized_code.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized_code) {
            if let Some(part1) = lang.to_639_1() {
                return Ok(part1.to_string());
            }
            // No 2-letter equivalent; the engine generally accepts the
            // 3-letter code for these.
            return Ok(normalized_code);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check whether a language is likely supported by the translation engine.
///
/// Advisory only: a `false` here should produce a warning, never abort a
/// session, since the engine's supported set changes over time.
pub fn is_engine_supported(code: &str) -> bool {
    let Ok(engine_code) = normalize_to_engine(code) else {
        return false;
    };

    matches!(
        engine_code.as_str(),
        "en" | "es" | "fr" | "de" | "zh" | "ja" | "ko" | "ru" | "ar" | "hi"
            | "pt" | "it" | "nl" | "pl" | "sv" | "da" | "fi" | "el" | "cs" | "ro"
            | "hu" | "sk" | "bg" | "sl" | "lt" | "lv" | "et" | "mt" | "th"
            | "ak" | "gaa" | "ee"
            | "ha" | "ig" | "yo" | "zu" | "sw" | "am"
    )
}

/// Get the English name of a language from its code, for log messages.
///
/// Falls back to the code itself when the code is unknown.
pub fn get_language_name(code: &str) -> String {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    };

    match language {
        Some(lang) => lang.to_name().to_string(),
        None => code.to_string(),
    }
}
