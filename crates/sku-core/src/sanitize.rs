//! Filesystem-safe names for SKUs and projects.

use unicode_normalization::UnicodeNormalization;

/// Longest stem produced by [`clean_filename`].
pub const MAX_STEM_LEN: usize = 255;

/// Punctuation kept alongside ASCII letters and digits.
const ALLOWED_PUNCTUATION: &[char] = &['-', '_', '.', '(', ')', ' '];

/// Converts arbitrary text into a name that is valid on Windows and Unix.
///
/// Spaces become underscores, accented characters are reduced to their ASCII
/// base, and anything outside `[A-Za-z0-9-_.() ]` is dropped. Results longer
/// than [`MAX_STEM_LEN`] are truncated with a warning, so two long inputs may
/// collapse onto the same stem.
pub fn clean_filename(name: &str) -> String {
    let cleaned: String = name
        .replace(' ', "_")
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect();

    if cleaned.len() > MAX_STEM_LEN {
        tracing::warn!(
            limit = MAX_STEM_LEN,
            length = cleaned.len(),
            "filename truncated; names may no longer be unique"
        );
        // Only ASCII survives the filter, so byte and char boundaries agree.
        return cleaned[..MAX_STEM_LEN].to_string();
    }

    cleaned
}
