//! Coercion rules for the scalar schema kinds.
//!
//! Every function here implements the same contract: interpret a raw value —
//! which may already be the correct native kind, or may be a text or byte
//! string representation of it — as the native kind, and return
//! `Value::NotUnserializable` on any failure. Failures are values, never
//! errors.

use crate::value::Value;

/// The character encoding used when coercing between text and byte strings.
///
/// Configured per schema with
/// [`Schema::with_encoding`](struct.Schema.html#method.with_encoding).
/// Decoding or encoding failures surface as `NotUnserializable` rather than
/// panics or errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    Utf8,
    Ascii,
    Latin1,
}

impl Default for Encoding {
    fn default() -> Encoding {
        Encoding::Utf8
    }
}

impl Encoding {
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
            Encoding::Ascii => {
                if bytes.is_ascii() {
                    String::from_utf8(bytes.to_vec()).ok()
                } else {
                    None
                }
            }
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Encoding::Utf8 => Some(text.as_bytes().to_vec()),
            Encoding::Ascii => {
                if text.is_ascii() {
                    Some(text.as_bytes().to_vec())
                } else {
                    None
                }
            }
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    let code = c as u32;
                    if code < 256 {
                        Some(code as u8)
                    } else {
                        None
                    }
                })
                .collect(),
        }
    }
}

/// Booleans accept only the literal tokens `"True"` and `"False"`, in text
/// or byte-string form. Numeric truthiness is deliberately rejected.
pub(crate) fn boolean(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    fn token(s: &str) -> Value {
        match s {
            "True" => Value::Bool(true),
            "False" => Value::Bool(false),
            _ => Value::NotUnserializable,
        }
    }

    match raw {
        Value::Bool(b) => Value::Bool(*b),
        _ if strict => Value::NotUnserializable,
        Value::Text(s) => token(s),
        Value::Bytes(b) => match encoding.decode(b) {
            Some(s) => token(&s),
            None => Value::NotUnserializable,
        },
        _ => Value::NotUnserializable,
    }
}

pub(crate) fn integer(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    fn parse(s: &str) -> Value {
        match s.trim().parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::NotUnserializable,
        }
    }

    match raw {
        Value::Int(i) => Value::Int(*i),
        _ if strict => Value::NotUnserializable,
        Value::Bool(b) => Value::Int(*b as i64),
        // floats truncate toward zero, as the usual int() coercion does
        Value::Float(f) => {
            if f.is_finite() && *f >= i64::min_value() as f64 && *f <= i64::max_value() as f64 {
                Value::Int(f.trunc() as i64)
            } else {
                Value::NotUnserializable
            }
        }
        Value::Text(s) => parse(s),
        Value::Bytes(b) => match encoding.decode(b) {
            Some(s) => parse(&s),
            None => Value::NotUnserializable,
        },
        _ => Value::NotUnserializable,
    }
}

pub(crate) fn float(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    fn parse(s: &str) -> Value {
        match s.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => Value::NotUnserializable,
        }
    }

    match raw {
        Value::Float(f) => Value::Float(*f),
        _ if strict => Value::NotUnserializable,
        Value::Int(i) => Value::Float(*i as f64),
        Value::Bool(b) => Value::Float(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => parse(s),
        Value::Bytes(b) => match encoding.decode(b) {
            Some(s) => parse(&s),
            None => Value::NotUnserializable,
        },
        _ => Value::NotUnserializable,
    }
}

pub(crate) fn complex(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    fn parse(s: &str) -> Value {
        match parse_complex(s) {
            Some((re, im)) => Value::Complex(re, im),
            None => Value::NotUnserializable,
        }
    }

    match raw {
        Value::Complex(re, im) => Value::Complex(*re, *im),
        _ if strict => Value::NotUnserializable,
        Value::Int(i) => Value::Complex(*i as f64, 0.0),
        Value::Float(f) => Value::Complex(*f, 0.0),
        Value::Bool(b) => Value::Complex(if *b { 1.0 } else { 0.0 }, 0.0),
        Value::Text(s) => parse(s),
        Value::Bytes(b) => match encoding.decode(b) {
            Some(s) => parse(&s),
            None => Value::NotUnserializable,
        },
        _ => Value::NotUnserializable,
    }
}

pub(crate) fn text(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    match raw {
        Value::Text(s) => Value::Text(s.clone()),
        _ if strict => Value::NotUnserializable,
        Value::Bytes(b) => match encoding.decode(b) {
            Some(s) => Value::Text(s),
            None => Value::NotUnserializable,
        },
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Complex(..) => {
            Value::Text(raw.to_string())
        }
        _ => Value::NotUnserializable,
    }
}

pub(crate) fn bytes(raw: &Value, encoding: Encoding, strict: bool) -> Value {
    match raw {
        Value::Bytes(b) => Value::Bytes(b.clone()),
        _ if strict => Value::NotUnserializable,
        Value::Text(s) => match encoding.encode(s) {
            Some(b) => Value::Bytes(b),
            None => Value::NotUnserializable,
        },
        _ => Value::NotUnserializable,
    }
}

/// Parse the `a+bj` notation for complex numbers: `"3"`, `"1j"`, `"1+2j"`,
/// `"-1.5-2e3j"`, `"(1+2j)"`, and the bare `"j"`/`"+j"`/`"-j"` forms.
fn parse_complex(input: &str) -> Option<(f64, f64)> {
    let mut s = input.trim();
    if s.starts_with('(') && s.ends_with(')') {
        s = s[1..s.len() - 1].trim();
    }
    if s.is_empty() || s.contains(char::is_whitespace) {
        return None;
    }

    if !s.ends_with('j') && !s.ends_with('J') {
        return s.parse::<f64>().ok().map(|re| (re, 0.0));
    }
    let body = &s[..s.len() - 1];

    // Split before the sign of the imaginary part, skipping exponent signs
    // and a leading sign on the real part.
    let mut split = None;
    let mut previous = None;
    for (i, c) in body.char_indices() {
        if i > 0 && (c == '+' || c == '-') && previous != Some('e') && previous != Some('E') {
            split = Some(i);
        }
        previous = Some(c);
    }

    fn signed_part(part: &str) -> Option<f64> {
        match part {
            "" | "+" => Some(1.0),
            "-" => Some(-1.0),
            _ => part.parse::<f64>().ok(),
        }
    }

    match split {
        None => signed_part(body).map(|im| (0.0, im)),
        Some(i) => {
            let re = body[..i].parse::<f64>().ok()?;
            let im = signed_part(&body[i..])?;
            Some((re, im))
        }
    }
}
