use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use teloxide::types::User;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "ar",
        // Interpolated values go straight into MarkdownV2, without FSI/PDI marks
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Supported languages (code, human-readable name).
pub static SUPPORTED_LANGS: &[(&str, &str)] = &[("ar", "العربية"), ("en", "English")];

/// Default language identifier used as a fallback.
#[allow(clippy::unwrap_used)]
pub static DEFAULT_LANG: Lazy<LanguageIdentifier> = Lazy::new(|| "ar".parse().unwrap());

/// Normalizes a language code into a LanguageIdentifier (falls back to default).
pub fn lang_from_code(code: &str) -> LanguageIdentifier {
    match is_language_supported(code) {
        Some(supported) => supported.parse().unwrap_or_else(|_| DEFAULT_LANG.clone()),
        None => DEFAULT_LANG.clone(),
    }
}

/// Picks the interface language from the Telegram user's client locale.
pub fn lang_for_user(user: Option<&User>) -> LanguageIdentifier {
    user.and_then(|u| u.language_code.as_deref())
        .map(lang_from_code)
        .unwrap_or_else(|| DEFAULT_LANG.clone())
}

/// Returns a localized string for the given key.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(lang: &LanguageIdentifier, key: &str) -> String {
    let text = LOCALES
        .lookup(lang, key)
        .unwrap_or_else(|| LOCALES.lookup(&DEFAULT_LANG, key).unwrap_or_else(|| key.to_string()));
    text.replace("\\n", "\n")
}

/// Returns a localized string with arguments for interpolation.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t_args(lang: &LanguageIdentifier, key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let text = LOCALES.lookup_with_args(lang, key, &args_map).unwrap_or_else(|| {
        LOCALES
            .lookup_with_args(&DEFAULT_LANG, key, &args_map)
            .unwrap_or_else(|| key.to_string())
    });
    text.replace("\\n", "\n")
}

/// Checks if a language code is supported by the bot.
/// Returns the normalized language code if supported, None otherwise.
pub fn is_language_supported(code: &str) -> Option<&'static str> {
    // "en-US" -> "en"
    let normalized = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();

    SUPPORTED_LANGS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(&normalized))
        .map(|(c, _)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_translation() {
        let ar = lang_from_code("ar");
        let en = lang_from_code("en");

        assert_eq!(t(&ar, "button-back"), "🔙 رجوع");
        assert_eq!(t(&en, "button-back"), "🔙 Back");
    }

    #[test]
    fn converts_newlines() {
        let en = lang_from_code("en");
        let text = t(&en, "broadcast-prompt");

        assert!(text.contains('\n'));
        assert!(!text.contains("\\n"));
    }

    #[test]
    fn interpolates_without_isolation_marks() {
        let en = lang_from_code("en");
        let mut args = FluentArgs::new();
        args.set("count", 3);

        let text = t_args(&en, "broadcast-done", &args);

        assert!(text.ends_with("📊 Targets: 3"), "got {:?}", text);
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t(&DEFAULT_LANG, "no-such-key"), "no-such-key");
    }

    #[test]
    fn unsupported_code_uses_default() {
        assert_eq!(lang_from_code("ja"), *DEFAULT_LANG);
        assert_eq!(lang_from_code("en-GB").to_string(), "en");
    }

    #[test]
    fn test_is_language_supported() {
        assert_eq!(is_language_supported("ar"), Some("ar"));
        assert_eq!(is_language_supported("en-US"), Some("en"));
        assert_eq!(is_language_supported("AR"), Some("ar"));
        assert_eq!(is_language_supported("ru"), None);
    }
}
