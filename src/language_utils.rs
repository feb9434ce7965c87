use anyhow::{Result, anyhow};
use isolang::Language;

// Language utilities for the target locale
//
// The locale is handed to the model verbatim; these helpers only turn its
// language subtag (`pt` in `pt-BR`) into a readable name for log messages.

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Language subtag of a locale: `en` for `en-US`, `pt` for `pt_BR`
pub fn language_subtag(locale: &str) -> &str {
    let trimmed = locale.trim();
    trimmed.split(['-', '_']).next().unwrap_or(trimmed)
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&normalized_code) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&normalized_code).is_some() {
                return Ok(normalized_code);
            }
            if let Some((_, part2t)) = PART2B_TO_PART2T.iter().find(|(b, _)| *b == normalized_code) {
                return Ok(part2t.to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name for a code or a locale
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(language_subtag(code))?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Human readable form of a locale, e.g. `English (en-US)`.
/// Unknown locales are returned unchanged.
pub fn describe_locale(locale: &str) -> String {
    match get_language_name(locale) {
        Ok(name) => format!("{} ({})", name, locale),
        Err(_) => locale.to_string(),
    }
}

/// Whether the locale's language subtag is a known ISO 639 code
pub fn is_known_locale(locale: &str) -> bool {
    normalize_to_part2t(language_subtag(locale)).is_ok()
}
