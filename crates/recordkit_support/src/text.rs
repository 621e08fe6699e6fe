//! String helpers.
//!
//! Lengths and limits count Unicode scalar values unless the name says
//! bytes.

use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::SupportResult;

/// URL-safe alphabet that accepts input with or without trailing `=`.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Length of `s` in bytes.
pub fn byte_length(s: &str) -> usize {
    s.len()
}

/// Length of `s` in characters.
pub fn char_length(s: &str) -> usize {
    s.chars().count()
}

/// Returns true if `s` starts with `prefix`.
///
/// An empty prefix always matches. The case-insensitive mode compares the
/// lower-cased prefix of `s` having the same byte length as `prefix`.
pub fn starts_with(s: &str, prefix: &str, case_sensitive: bool) -> bool {
    if prefix.is_empty() {
        return true;
    }
    if case_sensitive {
        return s.starts_with(prefix);
    }
    s.get(..prefix.len())
        .is_some_and(|head| head.to_lowercase() == prefix.to_lowercase())
}

/// Returns true if `s` ends with `suffix`. See [`starts_with`].
pub fn ends_with(s: &str, suffix: &str, case_sensitive: bool) -> bool {
    if suffix.is_empty() {
        return true;
    }
    if case_sensitive {
        return s.ends_with(suffix);
    }
    s.len()
        .checked_sub(suffix.len())
        .and_then(|start| s.get(start..))
        .is_some_and(|tail| tail.to_lowercase() == suffix.to_lowercase())
}

/// Truncates `s` to `max_chars` characters and appends `suffix`.
///
/// Trailing whitespace left by the cut is removed before the suffix is
/// added. Strings within the limit are returned unchanged.
pub fn limit(s: &str, max_chars: usize, suffix: &str) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{suffix}", s[..cut].trim_end()),
        None => s.to_string(),
    }
}

/// Keeps the first `words` whitespace-separated words of `s` and appends
/// `end` if anything was cut.
pub fn words_limit(s: &str, words: usize, end: &str) -> String {
    if words == 0 {
        return s.to_string();
    }

    let mut rest = s.trim_start();
    let mut kept = s.len() - rest.len();
    for _ in 0..words {
        if rest.is_empty() {
            break;
        }
        let word = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let after_word = &rest[word..];
        let spaces = after_word.len() - after_word.trim_start().len();
        kept += word + spaces;
        rest = &after_word[spaces..];
    }

    if rest.is_empty() {
        s.to_string()
    } else {
        format!("{}{end}", s[..kept].trim_end())
    }
}

/// Replaces the first occurrence of `search` in `subject`.
///
/// An empty `search` leaves `subject` unchanged.
pub fn replace_first(search: &str, replace: &str, subject: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    subject.replacen(search, replace, 1)
}

/// Replaces the last occurrence of `search` in `subject`.
///
/// An empty `search` leaves `subject` unchanged.
pub fn replace_last(search: &str, replace: &str, subject: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    match subject.rfind(search) {
        Some(pos) => {
            let mut out = String::with_capacity(subject.len() - search.len() + replace.len());
            out.push_str(&subject[..pos]);
            out.push_str(replace);
            out.push_str(&subject[pos + search.len()..]);
            out
        }
        None => subject.to_string(),
    }
}

/// Title-cases `s`: the first letter of every word upper-cased, all other
/// letters lower-cased. A word starts after any character that is not
/// alphanumeric or an apostrophe.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'');
    }
    out
}

/// Base64 with `-` and `_` in place of `+` and `/`. Padding is kept.
pub fn base64_url_encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(input)
}

/// Reverses [`base64_url_encode`]; trailing padding is optional.
pub fn base64_url_decode(input: &str) -> SupportResult<Vec<u8>> {
    Ok(URL_SAFE_LENIENT.decode(input)?)
}
