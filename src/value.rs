//! The dynamic value model shared by raw and native data.
//!
//! Untrusted input and coerced output are both represented by
//! [`Value`](enum.Value.html), a self-describing enum. The two sentinel
//! variants, `Unspecified` and `NotUnserializable`, make "nothing was
//! submitted" and "something unusable was submitted" first-class values: both
//! are falsy, both display as the empty string, and they are distinguishable
//! from each other and from every real value.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A raw or native value.
///
/// Mappings are stored as insertion-ordered key/value pairs rather than a
/// hash map so that element trees built from them have a deterministic
/// iteration order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value was ever provided.
    Unspecified,

    /// A value was provided but could not be coerced to the expected type.
    NotUnserializable,

    Bool(bool),
    Int(i64),
    Float(f64),

    /// A complex number as `(real, imaginary)`.
    Complex(f64, f64),

    Text(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Is this the `Unspecified` sentinel?
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Value::Unspecified)
    }

    /// Is this the `NotUnserializable` sentinel?
    pub fn is_not_unserializable(&self) -> bool {
        matches!(self, Value::NotUnserializable)
    }

    /// Is this one of the two sentinels?
    pub fn is_sentinel(&self) -> bool {
        self.is_unspecified() || self.is_not_unserializable()
    }

    /// Truthiness in the scripting-language sense: sentinels, `false`,
    /// numeric zero, and empty strings/containers are falsy, everything
    /// else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Unspecified | Value::NotUnserializable => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Complex(re, im) => *re != 0.0 || *im != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::Seq(items) => !items.is_empty(),
            Value::Map(pairs) => !pairs.is_empty(),
        }
    }

    /// The number of items in a sized value: characters for text, bytes for
    /// byte strings, entries for sequences and mappings. `None` for
    /// everything else.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// Look up `key` in a `Map` value.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// A total order over all values, used for deterministic assembly of
    /// unordered mappings and by the ordering validators. Values of
    /// different kinds order by kind; `Int` and `Float` compare numerically
    /// with each other; floats use `f64::total_cmp`.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        use Value::*;

        fn rank(value: &Value) -> u8 {
            match value {
                Unspecified => 0,
                NotUnserializable => 1,
                Bool(_) => 2,
                Int(_) | Float(_) => 3,
                Complex(..) => 4,
                Text(_) => 5,
                Bytes(_) => 6,
                Seq(_) => 7,
                Map(_) => 8,
            }
        }

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Complex(ar, ai), Complex(br, bi)) => {
                ar.total_cmp(br).then_with(|| ai.total_cmp(bi))
            }
            (Text(a), Text(b)) => a.cmp(b),
            (Bytes(a), Bytes(b)) => a.cmp(b),
            (Seq(a), Seq(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ordering = x.total_cmp(y);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Map(a), Map(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ordering = ka.total_cmp(kb).then_with(|| va.total_cmp(vb));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Unspecified | Value::NotUnserializable => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Complex(re, im) => {
                if *re == 0.0 {
                    write!(f, "{}j", im)
                } else if *im < 0.0 || im.is_sign_negative() {
                    write!(f, "({}{}j)", re, im)
                } else {
                    write!(f, "({}+{}j)", re, im)
                }
            }
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Value {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Value {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Value {
        Value::Seq(value)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(value: Vec<(Value, Value)>) -> Value {
        Value::Map(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Unspecified | Value::NotUnserializable => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Complex(..) => serializer.serialize_str(&self.to_string()),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                if value <= i64::max_value() as u64 {
                    Ok(Value::Int(value as i64))
                } else {
                    Ok(Value::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Text(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Text(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bytes(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Unspecified)
            }

            fn visit_none<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Unspecified)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Seq(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    pairs.push(entry);
                }
                Ok(Value::Map(pairs))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinels_are_distinct_and_falsy() {
        assert_ne!(Value::Unspecified, Value::NotUnserializable);
        assert!(!Value::Unspecified.is_truthy());
        assert!(!Value::NotUnserializable.is_truthy());
        assert_eq!(Value::Unspecified.to_string(), "");
        assert_eq!(Value::NotUnserializable.to_string(), "");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(!Value::Seq(vec![]).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Complex(0.0, 1.0).is_truthy());
    }

    #[test]
    fn length() {
        assert_eq!(Value::from("abc").length(), Some(3));
        assert_eq!(Value::Bytes(vec![1, 2]).length(), Some(2));
        assert_eq!(Value::Seq(vec![Value::Int(1)]).length(), Some(1));
        assert_eq!(Value::Int(7).length(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Complex(0.0, 1.0).to_string(), "1j");
        assert_eq!(Value::Complex(1.0, 2.0).to_string(), "(1+2j)");
        assert_eq!(Value::Complex(1.0, -2.0).to_string(), "(1-2j)");
    }

    #[test]
    fn total_cmp_orders_numbers_across_kinds() {
        assert_eq!(Value::Int(1).total_cmp(&Value::Float(1.5)), Ordering::Less);
        assert_eq!(Value::Float(2.0).total_cmp(&Value::Int(1)), Ordering::Greater);
        assert_eq!(Value::from("a").total_cmp(&Value::from("b")), Ordering::Less);
        assert_eq!(Value::Int(9).total_cmp(&Value::from("a")), Ordering::Less);
    }

    #[test]
    fn deserialize_from_json() {
        let value: Value = serde_json::from_value(json!({
            "name": "Ann",
            "age": 30,
            "tags": ["a", "b"],
            "missing": null,
        }))
        .unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::from("age"), Value::Int(30)),
                (Value::from("missing"), Value::Unspecified),
                (Value::from("name"), Value::from("Ann")),
                (Value::from("tags"), Value::Seq(vec![Value::from("a"), Value::from("b")])),
            ])
        );
    }

    #[test]
    fn serialize_to_json() {
        let value = Value::Map(vec![
            (Value::from("ok"), Value::Bool(true)),
            (Value::from("n"), Value::Int(3)),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"ok": true, "n": 3})
        );
    }
}
