//! Value comparators for the sort modes in [`SortFlag`].
//!
//! Every comparator is a total order over all values, mixed types
//! included, so it is safe to hand to `sort_by`.

use std::cmp::Ordering;

use recordkit_value::{KeyedContainer, Value};

use crate::config::SortFlag;

/// Compares two values under the given comparison mode.
pub fn compare(a: &Value, b: &Value, flag: SortFlag) -> Ordering {
    match flag {
        SortFlag::Regular => regular_cmp(a, b),
        SortFlag::Numeric => float_cmp(numeric_form(a), numeric_form(b)),
        SortFlag::String => string_form(a).cmp(&string_form(b)),
        SortFlag::CaseInsensitive => string_form(a)
            .to_lowercase()
            .cmp(&string_form(b).to_lowercase()),
        SortFlag::Natural => natural_cmp(&string_form(a), &string_form(b)),
        SortFlag::NaturalCaseInsensitive => natural_cmp(
            &string_form(a).to_lowercase(),
            &string_form(b).to_lowercase(),
        ),
    }
}

/// String form of a value: null and false are empty, true is `"1"`,
/// integral floats print without a fraction, lists and records are
/// `"Array"`.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => float_text(*f),
        Value::Text(s) => s.clone(),
        Value::List(_) | Value::Record(_) => "Array".to_string(),
        Value::Entity(e) => e.container().type_name().to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Numeric form of a value.
///
/// Text contributes its leading numeric prefix (`"12abc"` is 12, `"abc"`
/// is 0); lists and records are 0 when empty and 1 otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn numeric_form(value: &Value) -> f64 {
    match value {
        Value::Null | Value::Bool(false) => 0.0,
        Value::Bool(true) | Value::Entity(_) => 1.0,
        Value::Integer(n) => *n as f64,
        Value::Float(f) => *f,
        Value::Text(s) => numeric_prefix(s).unwrap_or(0.0),
        Value::List(items) => f64::from(u8::from(!items.is_empty())),
        Value::Record(r) => f64::from(u8::from(!r.is_empty())),
    }
}

/// Parses `text` as a number if the whole string (ignoring surrounding
/// whitespace) is numeric.
pub fn numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (len, value) = scan_number(trimmed)?;
    (len == trimmed.len()).then_some(value)
}

fn numeric_prefix(text: &str) -> Option<f64> {
    scan_number(text.trim_start()).map(|(_, value)| value)
}

/// Scans the longest leading decimal number; returns its byte length and
/// value.
fn scan_number(text: &str) -> Option<(usize, f64)> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().map(|value| (end, value))
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    if a.is_nan() && b.is_nan() {
        Ordering::Equal
    } else if a.is_nan() {
        Ordering::Greater
    } else if b.is_nan() {
        Ordering::Less
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

/// A numeric value kept exact where it is an integer.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number_cmp(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.cmp(&y),
        (Number::Float(x), Number::Float(y)) => float_cmp(x, y),
        (Number::Int(i), Number::Float(f)) => int_float_cmp(i, f),
        (Number::Float(f), Number::Int(i)) => int_float_cmp(i, f).reverse(),
    }
}

/// Exact comparison of an integer with a float; NaN is above every number.
#[allow(clippy::cast_possible_truncation)]
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| float_cmp(whole, f))
}

/// Sort class of a value under [`SortFlag::Regular`].
enum Class<'a> {
    Null,
    Number(Number),
    Text(&'a str),
    Composite(Vec<&'a Value>),
    Entity,
}

impl<'a> Class<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Number(Number::Int(i64::from(*b))),
            Value::Integer(n) => Self::Number(Number::Int(*n)),
            Value::Float(f) => Self::Number(Number::Float(*f)),
            Value::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => Self::Number(Number::Int(n)),
                Err(_) => match numeric_text(s) {
                    Some(f) => Self::Number(Number::Float(f)),
                    None => Self::Text(s),
                },
            },
            Value::List(items) => Self::Composite(items.iter().collect()),
            Value::Record(r) => Self::Composite(r.values().collect()),
            Value::Entity(_) => Self::Entity,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Composite(_) => 3,
            Self::Entity => 4,
        }
    }
}

/// Loose comparison used by [`SortFlag::Regular`].
///
/// Values fall into ordered classes: null, then numbers, then other text,
/// then lists and records, then entities. Numbers are booleans (as 0 and
/// 1), integers, floats and numeric strings, all compared by numeric value
/// with NaN last. Non-numeric text compares bytewise. Lists and records
/// order by size, then element by element. Entities are all equal.
pub fn regular_cmp(a: &Value, b: &Value) -> Ordering {
    match (Class::of(a), Class::of(b)) {
        (Class::Number(x), Class::Number(y)) => number_cmp(x, y),
        (Class::Text(x), Class::Text(y)) => x.cmp(y),
        (Class::Composite(x), Class::Composite(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(&y)
                .map(|(l, r)| regular_cmp(l, r))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

/// Natural ordering: runs of ASCII digits compare by numeric value, all
/// other characters compare one by one.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digits(&mut left);
                let run_b = take_digits(&mut right);
                let ordering = digit_run_cmp(&run_a, &run_b);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}

fn digit_run_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordkit_value::Record;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn regular_numbers_and_numeric_strings() {
        assert_eq!(regular_cmp(&Value::Integer(2), &Value::Integer(10)), Ordering::Less);
        assert_eq!(regular_cmp(&text("10"), &text("9")), Ordering::Greater);
        assert_eq!(regular_cmp(&text("abc"), &text("abd")), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Float(2.5), &Value::Integer(2)), Ordering::Greater);
        assert_eq!(regular_cmp(&text("3"), &Value::Integer(20)), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Integer(20), &text("3")), Ordering::Greater);
    }

    #[test]
    fn regular_mixed_types() {
        assert_eq!(regular_cmp(&Value::Null, &Value::Integer(-5)), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Integer(5), &text("apple")), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Bool(true), &Value::Integer(1)), Ordering::Equal);
        assert_eq!(regular_cmp(&Value::Bool(true), &Value::Integer(7)), Ordering::Less);
        assert_eq!(regular_cmp(&text("10a"), &Value::Integer(9)), Ordering::Greater);
        assert_eq!(regular_cmp(&text("10"), &text("10a")), Ordering::Less);
        let list = Value::from(vec![1]);
        assert_eq!(regular_cmp(&list, &Value::Integer(100)), Ordering::Greater);
        assert_eq!(
            regular_cmp(&Value::from(vec![1, 2]), &Value::from(vec![9])),
            Ordering::Greater
        );
        assert_eq!(
            regular_cmp(
                &Value::Record(Record::from([("a", 1)])),
                &Value::Record(Record::from([("a", 2)]))
            ),
            Ordering::Less
        );
    }

    fn mixed_values() -> Vec<Value> {
        vec![
            Value::Null,
            Value::Bool(false),
            Value::Bool(true),
            Value::Integer(3),
            Value::Integer(7),
            Value::Integer(9),
            Value::Integer(i64::MAX),
            Value::Float(2.5),
            Value::Float(-0.5),
            Value::Float(9_223_372_036_854_775_807.0),
            Value::Float(f64::NAN),
            text("10"),
            text("10a"),
            text("9"),
            text(" 7 "),
            text("1e3"),
            text("abc"),
            text("Abc"),
            text(""),
            text("-"),
            text("0019aZ.-"),
            Value::from(vec![1, 2]),
            Value::from(vec![9]),
            Value::Record(Record::from([("a", 1)])),
        ]
    }

    #[test]
    fn every_mode_is_a_total_order() {
        let values = mixed_values();
        for flag in [
            SortFlag::Regular,
            SortFlag::Numeric,
            SortFlag::String,
            SortFlag::CaseInsensitive,
            SortFlag::Natural,
            SortFlag::NaturalCaseInsensitive,
        ] {
            for a in &values {
                assert_eq!(compare(a, a, flag), Ordering::Equal, "{flag:?} {a:?}");
                for b in &values {
                    let ab = compare(a, b, flag);
                    assert_eq!(ab, compare(b, a, flag).reverse(), "{flag:?} {a:?} {b:?}");
                    for c in &values {
                        let bc = compare(b, c, flag);
                        if ab != Ordering::Greater && bc != Ordering::Greater {
                            assert_ne!(
                                compare(a, c, flag),
                                Ordering::Greater,
                                "{flag:?} {a:?} {b:?} {c:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn regular_integers_and_floats_compare_exactly() {
        let big = Value::Integer(i64::MAX);
        let rounded = Value::Float(9_223_372_036_854_775_807.0);
        assert_eq!(regular_cmp(&big, &rounded), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Integer(-3), &Value::Float(-2.5)), Ordering::Less);
        assert_eq!(regular_cmp(&Value::Float(f64::NAN), &big), Ordering::Greater);
        assert_eq!(regular_cmp(&text(" 7 "), &Value::Integer(7)), Ordering::Equal);
    }

    #[test]
    fn numeric_mode_uses_prefixes() {
        assert_eq!(numeric_form(&text("12abc")), 12.0);
        assert_eq!(numeric_form(&text("  -1.5e2x")), -150.0);
        assert_eq!(numeric_form(&text("abc")), 0.0);
        assert_eq!(numeric_form(&text(".5")), 0.5);
        assert_eq!(compare(&text("10"), &text("9"), SortFlag::Numeric), Ordering::Greater);
    }

    #[test]
    fn numeric_text_needs_whole_string() {
        assert_eq!(numeric_text(" 42 "), Some(42.0));
        assert_eq!(numeric_text("1e3"), Some(1000.0));
        assert_eq!(numeric_text("42abc"), None);
        assert_eq!(numeric_text("inf"), None);
        assert_eq!(numeric_text(""), None);
        assert_eq!(numeric_text("."), None);
    }

    #[test]
    fn string_modes() {
        assert_eq!(compare(&text("10"), &text("9"), SortFlag::String), Ordering::Less);
        assert_eq!(compare(&text("B"), &text("a"), SortFlag::String), Ordering::Less);
        assert_eq!(
            compare(&text("B"), &text("a"), SortFlag::CaseInsensitive),
            Ordering::Greater
        );
        assert_eq!(string_form(&Value::Float(3.0)), "3");
        assert_eq!(string_form(&Value::Bool(true)), "1");
        assert_eq!(string_form(&Value::Null), "");
    }

    #[test]
    fn natural_ordering() {
        assert_eq!(natural_cmp("img12.png", "img10.png"), Ordering::Greater);
        assert_eq!(natural_cmp("img2.png", "img10.png"), Ordering::Less);
        assert_eq!(natural_cmp("a", "a1"), Ordering::Less);
        assert_eq!(natural_cmp("x007", "x7"), Ordering::Equal);
        assert_eq!(
            compare(&text("File2"), &text("file10"), SortFlag::NaturalCaseInsensitive),
            Ordering::Less
        );
        assert_eq!(
            compare(&text("File2"), &text("file10"), SortFlag::Natural),
            Ordering::Less
        );
    }
}
