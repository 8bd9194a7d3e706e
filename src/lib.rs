//! `sieve` validates and coerces untrusted data against declared schemas,
//! keeping the raw input and the coerced result side by side.
//!
//! A [`Schema`](struct.Schema.html) describes a shape — scalars, sequences,
//! mappings, fixed-shape records ("forms") — and is used as a factory for
//! [`Element`](struct.Element.html) trees. Every element holds both the
//! `raw_value` exactly as it was received and the coerced `value`, and the
//! two stay consistent whichever side you mutate. Coercion failure is never
//! an error: it is the [`Value::NotUnserializable`](enum.Value.html) value,
//! deliberately distinct from [`Value::Unspecified`](enum.Value.html), so a
//! consumer can always tell "the user submitted nothing" apart from "the
//! user submitted garbage" and report both to a human instead of crashing on
//! either.
//!
//! # Validating data
//!
//! The most common use-case is ingesting some untrusted input — say, a
//! decoded web form — and checking it against a schema:
//!
//! ```
//! use serde_json::json;
//! use sieve::validation::{shared, Present};
//! use sieve::{Schema, Value};
//!
//! // Schemas are declared once and reused; deriving a variant (adding a
//! // validator, flipping an option) never mutates the original.
//! let schema = Schema::form(vec![
//!     ("name", Schema::text().validated_by(vec![shared(Present)])),
//!     ("age", Schema::integer()),
//!     ("phones", Schema::list(Schema::text())),
//! ]);
//!
//! let raw: Value = serde_json::from_value(json!({
//!     "name": "Ann",
//!     "age": "30",
//!     "phones": ["+44 1234567", "+44 2345678"],
//! }))
//! .unwrap();
//!
//! let mut element = schema.from_raw(raw);
//! assert!(element.validate());
//!
//! // The coerced value assembles the fields in declaration order; note
//! // that "30" became the integer 30 while the raw side still holds the
//! // original text.
//! assert_eq!(
//!     element.value(),
//!     Value::Map(vec![
//!         (Value::from("name"), Value::from("Ann")),
//!         (Value::from("age"), Value::Int(30)),
//!         (
//!             Value::from("phones"),
//!             Value::Seq(vec![Value::from("+44 1234567"), Value::from("+44 2345678")]),
//!         ),
//!     ])
//! );
//! assert_eq!(element.field("age").unwrap().value(), Value::Int(30));
//! ```
//!
//! When the input is bad, nothing throws — the failures are data, addressed
//! by path:
//!
//! ```
//! use serde_json::json;
//! use sieve::validation::{shared, Converted};
//! use sieve::{Schema, Value};
//!
//! let schema = Schema::form(vec![
//!     ("age", Schema::integer().validated_by(vec![shared(Converted)])),
//! ]);
//! let raw: Value = serde_json::from_value(json!({ "age": "abc" })).unwrap();
//! let mut element = schema.from_raw(raw);
//!
//! assert!(!element.validate());
//! assert_eq!(element.value(), Value::NotUnserializable);
//!
//! // traverse() flattens the tree into (path, element) entries; paths
//! // render as JSON pointers.
//! let report: Vec<(String, Vec<String>)> = element
//!     .traverse()
//!     .filter(|(_, element)| element.is_valid() == Some(false))
//!     .map(|(path, element)| (path.to_string(), element.errors().to_vec()))
//!     .collect();
//! assert_eq!(report, [("/age".to_owned(), vec!["Not a valid value.".to_owned()])]);
//! ```
//!
//! # Thread safety
//!
//! Schemas are immutable once derived and may be shared freely across
//! threads; the usual pattern is to declare them once at startup. Element
//! trees are single-threaded: build one per piece of input, validate it,
//! read the results, drop it.

pub mod element;
pub mod errors;
pub mod scalars;
pub mod schema;
pub mod traverse;
pub mod validation;
pub mod value;

pub use crate::element::{Context, Element, Pair};
pub use crate::errors::SieveError;
pub use crate::scalars::Encoding;
pub use crate::schema::Schema;
pub use crate::traverse::{Path, Step, Traverse};
pub use crate::validation::{SharedValidator, Validator};
pub use crate::value::Value;
