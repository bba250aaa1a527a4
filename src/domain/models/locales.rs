//! Catalog of recognized language codes for `LANGUAGE_CODE` validation.
//!
//! The set mirrors the translation catalog the original web framework
//! ships, so any code the existing deployment used keeps working.

/// Language codes with a recognized translation catalog, lowercase,
/// sorted for binary search.
const RECOGNIZED: &[&str] = &[
    "af", "ar", "ar-dz", "ast", "az", "be", "bg", "bn", "br", "bs", "ca", "ckb", "cs", "cy", "da",
    "de", "dsb", "el", "en", "en-au", "en-gb", "eo", "es", "es-ar", "es-co", "es-mx", "es-ni",
    "es-ve", "et", "eu", "fa", "fi", "fr", "fy", "ga", "gd", "gl", "he", "hi", "hr", "hsb", "hu",
    "hy", "ia", "id", "ig", "io", "is", "it", "ja", "ka", "kab", "kk", "km", "kn", "ko", "ky",
    "lb", "lt", "lv", "mk", "ml", "mn", "mr", "ms", "my", "nb", "ne", "nl", "nn", "os", "pa",
    "pl", "pt", "pt-br", "ro", "ru", "sk", "sl", "sq", "sr", "sr-latn", "sv", "sw", "ta", "te",
    "tg", "th", "tk", "tr", "tt", "udm", "ug", "uk", "ur", "uz", "vi", "zh-hans", "zh-hant",
];

/// Normalizes a language tag the way the catalog stores it: trimmed
/// and lowercased (`en-GB` becomes `en-gb`).
pub fn normalize(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// Whether a (normalized) language tag has a recognized catalog entry.
pub fn is_recognized(tag: &str) -> bool {
    RECOGNIZED.binary_search(&tag).is_ok()
}
