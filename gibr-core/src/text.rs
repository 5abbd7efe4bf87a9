//! Text helpers for turning free-form tracker text into branch-safe tokens.

use deunicode::deunicode_with_tofu;

/// Convert free text into a lowercase, hyphen-separated slug.
///
/// The input is transliterated to ASCII first, so accented, Cyrillic, Greek
/// and CJK text keeps its letters. Quotes are dropped and every other run of
/// non-alphanumeric characters becomes a single hyphen. The result never
/// starts or ends with a hyphen.
///
/// ```
/// use gibr_core::text::slugify;
///
/// assert_eq!(slugify("Fix login bug"), "fix-login-bug");
/// assert_eq!(slugify("  Don't crash on café menu!! "), "dont-crash-on-cafe-menu");
/// ```
pub fn slugify(input: &str) -> String {
  let ascii = deunicode_with_tofu(input, "");
  let mut slug = String::with_capacity(ascii.len());
  let mut pending_separator = false;

  for c in ascii.chars() {
    if is_quote(c) {
      continue;
    }
    if !c.is_ascii_alphanumeric() {
      pending_separator = true;
      continue;
    }
    if pending_separator && !slug.is_empty() {
      slug.push('-');
    }
    pending_separator = false;
    slug.push(c.to_ascii_lowercase());
  }

  slug
}

/// Keep only ASCII alphanumerics of `input`, lowercased and cut to `max_len`.
pub fn alphanumeric_prefix(input: &str, max_len: usize) -> String {
  input
    .chars()
    .filter(char::is_ascii_alphanumeric)
    .take(max_len)
    .collect::<String>()
    .to_lowercase()
}

// Typographic quotes are already ASCII after transliteration.
const fn is_quote(c: char) -> bool {
  matches!(c, '\'' | '"' | '`')
}
