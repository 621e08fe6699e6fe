//! Record keys.

use std::fmt;

use crate::value::Value;

/// A record key: either an integer position or a text name.
///
/// Text that spells a canonical decimal integer (`"0"`, `"42"`, `"-7"`) is
/// normalised to [`Key::Int`] on conversion, so `"3"` and `3` address the
/// same slot. Text such as `"07"`, `"+1"` or `"1.0"` stays text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key.
    Int(i64),
    /// Text key.
    Str(String),
}

impl Key {
    /// Parses a text key, normalising canonical integers.
    pub fn parse(text: &str) -> Self {
        match canonical_int(text) {
            Some(n) => Key::Int(n),
            None => Key::Str(text.to_string()),
        }
    }

    /// Converts a scalar value into a key.
    ///
    /// Lists, records and entities cannot be keys and yield `None`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Key::Str(String::new())),
            Value::Bool(b) => Some(Key::Int(i64::from(*b))),
            Value::Integer(n) => Some(Key::Int(*n)),
            Value::Float(f) if f.is_finite() => Some(Key::Int(f.trunc() as i64)),
            Value::Float(_) => None,
            Value::Text(s) => Some(Key::parse(s)),
            Value::List(_) | Value::Record(_) | Value::Entity(_) => None,
        }
    }

    /// Returns true for integer keys.
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Get the integer position, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Get the text name, if this is a text key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Converts the key back into a value.
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::Integer(*n),
            Key::Str(s) => Value::Text(s.clone()),
        }
    }
}

fn canonical_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if text == "-0" {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

impl From<usize> for Key {
    #[allow(clippy::cast_possible_wrap)]
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s),
        }
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}
