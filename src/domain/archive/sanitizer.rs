use once_cell::sync::Lazy;
use regex::Regex;

/// Latin letters with diacritics (U+00E0..U+017E) and the Cyrillic alphabet
/// are kept so Lithuanian and Russian words stay readable as file names.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9à-žа-яё]").expect("static pattern is valid"));

/// Map arbitrary text to a safe archive entry stem.
///
/// The text is lower-cased first and every character outside the allowed set
/// becomes `_`, so non-empty input never produces an empty name.
pub fn sanitize_filename(text: &str) -> String {
    let lowered = text.to_lowercase();
    DISALLOWED.replace_all(&lowered, "_").into_owned()
}

/// `<sanitized-word>.<extension>`
pub fn entry_file_name(word: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_filename(word), extension)
}
