/*!
 * Tests for language utility functions
 */

use phrasecut::language_utils::{describe_locale, get_language_name, is_known_locale, language_subtag, normalize_to_part2t};

#[test]
fn test_normalizeToPart2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("deu").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t(" EN ").unwrap(), "eng");
}

#[test]
fn test_normalizeToPart2t_withInvalidCodes_shouldFail() {
    assert!(normalize_to_part2t("e").is_err());
    assert!(normalize_to_part2t("123").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

#[test]
fn test_getLanguageName_withLocale_shouldUseLanguageSubtag() {
    assert_eq!(get_language_name("en-US").unwrap(), "English");
    assert_eq!(get_language_name("de_AT").unwrap(), "German");
    assert_eq!(get_language_name("fr").unwrap(), "French");
}

#[test]
fn test_describeLocale_shouldIncludeNameAndLocale() {
    assert_eq!(describe_locale("en-US"), "English (en-US)");
    assert_eq!(describe_locale("Klingon"), "Klingon");
}

#[test]
fn test_isKnownLocale_shouldCheckLanguageSubtagOnly() {
    assert!(is_known_locale("pt-BR"));
    assert!(is_known_locale("es"));
    assert!(!is_known_locale("xx-YY"));
    assert!(!is_known_locale(""));
}

#[test]
fn test_languageSubtag_withoutRegion_shouldReturnInput() {
    assert_eq!(language_subtag("it"), "it");
    assert_eq!(language_subtag("zh-Hant-TW"), "zh");
}
