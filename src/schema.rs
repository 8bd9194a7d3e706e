//! Schema declaration and derivation.
//!
//! A [`Schema`](struct.Schema.html) is an immutable description of the shape
//! a family of elements will take: a kind (scalar, sequence, mapping or
//! record) plus configuration (strictness, encoding, default, validators,
//! properties). Deriving a variant — overriding the default, adding
//! validators, flipping the strict flag — always produces a new, independent
//! `Schema`; two derived schemas never share mutable configuration state, so
//! a published schema can be read concurrently from any number of threads
//! while element trees are built from it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::scalars::{self, Encoding};
use crate::validation::SharedValidator;
use crate::value::Value;

/// The shape a schema describes.
#[derive(Clone)]
pub(crate) enum Kind {
    /// Accepts any raw value unchanged.
    Any,
    Boolean,
    Integer,
    Float,
    Complex,
    Text,
    Bytes,

    /// Homogeneous, variable-length sequence.
    List(Schema),

    /// Fixed-arity, heterogeneous sequence.
    Tuple(Vec<Schema>),

    /// Homogeneous key/value mapping. `ordered` mappings preserve insertion
    /// order in their assembled value; unordered ones sort by key.
    Mapping {
        key: Schema,
        value: Schema,
        ordered: bool,
    },

    /// Fixed set of named, heterogeneously-typed fields in declaration
    /// order.
    Form(Vec<(String, Schema)>),
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Text => "text",
            Kind::Bytes => "bytes",
            Kind::List(_) => "list",
            Kind::Tuple(_) => "tuple",
            Kind::Mapping { ordered: false, .. } => "dict",
            Kind::Mapping { ordered: true, .. } => "ordered_dict",
            Kind::Form(_) => "form",
        }
    }
}

#[derive(Clone)]
struct Config {
    kind: Kind,
    strict: bool,
    encoding: Encoding,
    mutable: bool,
    default: Option<Value>,
    default_factory: Option<Arc<dyn Fn() -> Value + Send + Sync>>,
    serializer: Option<Arc<dyn Fn(&Value) -> Value + Send + Sync>>,
    validators: Vec<SharedValidator>,
    properties: HashMap<String, Value>,
}

/// An immutable schema describing the expected shape of data.
///
/// Schemas are constructed once with the kind constructors
/// ([`integer`](#method.integer), [`list`](#method.list),
/// [`form`](#method.form), …), optionally derived with the configuration
/// methods ([`strict`](#method.strict), [`validated_by`](#method.validated_by),
/// …), and then used any number of times as element factories
/// ([`create`](#method.create), [`from_raw`](#method.from_raw)).
#[derive(Clone)]
pub struct Schema {
    config: Arc<Config>,
}

impl Schema {
    fn of_kind(kind: Kind) -> Schema {
        Schema {
            config: Arc::new(Config {
                kind,
                strict: false,
                encoding: Encoding::default(),
                mutable: false,
                default: None,
                default_factory: None,
                serializer: None,
                validators: Vec::new(),
                properties: HashMap::new(),
            }),
        }
    }

    /// A schema that accepts any raw value unchanged.
    pub fn any() -> Schema {
        Schema::of_kind(Kind::Any)
    }

    /// A boolean schema. Accepts the literal text or byte-string tokens
    /// `"True"` and `"False"`; numeric truthiness is rejected.
    pub fn boolean() -> Schema {
        Schema::of_kind(Kind::Boolean)
    }

    /// An integer schema. Accepts base-10 text and byte-string
    /// representations as raw values.
    pub fn integer() -> Schema {
        Schema::of_kind(Kind::Integer)
    }

    /// A float schema. Accepts text and byte-string representations as raw
    /// values.
    pub fn float() -> Schema {
        Schema::of_kind(Kind::Float)
    }

    /// A complex-number schema. Accepts `a+bj` text notation as a raw
    /// value.
    pub fn complex() -> Schema {
        Schema::of_kind(Kind::Complex)
    }

    /// A text schema. Accepts byte strings decoded with the configured
    /// [`Encoding`](enum.Encoding.html).
    pub fn text() -> Schema {
        Schema::of_kind(Kind::Text)
    }

    /// A byte-string schema. Accepts text encoded with the configured
    /// [`Encoding`](enum.Encoding.html).
    pub fn bytes() -> Schema {
        Schema::of_kind(Kind::Bytes)
    }

    /// A homogeneous, variable-length sequence of `member` elements.
    pub fn list(member: Schema) -> Schema {
        Schema::of_kind(Kind::List(member))
    }

    /// A fixed-arity sequence with one schema per position. A raw sequence
    /// whose length differs from the declared arity is not unserializable.
    pub fn tuple(members: Vec<Schema>) -> Schema {
        Schema::of_kind(Kind::Tuple(members))
    }

    /// An unordered mapping from `key` elements to `value` elements. Its
    /// assembled value sorts entries by key; iteration order over the
    /// underlying elements is insertion order.
    pub fn dict(key: Schema, value: Schema) -> Schema {
        Schema::of_kind(Kind::Mapping {
            key,
            value,
            ordered: false,
        })
    }

    /// An insertion-ordered mapping from `key` elements to `value`
    /// elements.
    pub fn ordered_dict(key: Schema, value: Schema) -> Schema {
        Schema::of_kind(Kind::Mapping {
            key,
            value,
            ordered: true,
        })
    }

    /// A record with a fixed, ordered set of named fields.
    ///
    /// Field order is declaration order and is preserved by iteration,
    /// traversal and value assembly.
    pub fn form<N: Into<String>>(fields: Vec<(N, Schema)>) -> Schema {
        Schema::of_kind(Kind::Form(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        ))
    }

    fn derive<F: FnOnce(&mut Config)>(&self, configure: F) -> Schema {
        let mut config = (*self.config).clone();
        configure(&mut config);
        Schema {
            config: Arc::new(config),
        }
    }

    /// Derive a schema that only accepts raw values already of the native
    /// kind, disabling all string coercions.
    pub fn strict(&self, strict: bool) -> Schema {
        self.derive(|config| config.strict = strict)
    }

    /// Derive a schema with a different text/bytes character encoding.
    pub fn with_encoding(&self, encoding: Encoding) -> Schema {
        self.derive(|config| config.encoding = encoding)
    }

    /// Derive a schema whose elements start out holding `default` as their
    /// native value (propagated to the raw side) instead of unspecified.
    pub fn with_default<V: Into<Value>>(&self, default: V) -> Schema {
        let default = default.into();
        self.derive(move |config| config.default = Some(default))
    }

    /// Like [`with_default`](#method.with_default), but the default is
    /// produced by a factory at element construction time.
    pub fn with_default_factory<F>(&self, factory: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let factory: Arc<dyn Fn() -> Value + Send + Sync> = Arc::new(factory);
        self.derive(move |config| config.default_factory = Some(factory))
    }

    /// Derive a schema with `validators` appended to the already-attached
    /// ones. Validators run in attachment order and are never
    /// short-circuited.
    pub fn validated_by(&self, validators: Vec<SharedValidator>) -> Schema {
        self.derive(move |config| config.validators.extend(validators))
    }

    /// Derive a schema whose raw projection is produced by `serializer`
    /// instead of the identity when an element is set from a native value.
    pub fn serialized_by<F>(&self, serializer: F) -> Schema
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let serializer: Arc<dyn Fn(&Value) -> Value + Send + Sync> = Arc::new(serializer);
        self.derive(move |config| config.serializer = Some(serializer))
    }

    /// Derive a mapping schema whose elements permit per-item mutation
    /// (`insert`/`remove`) after construction.
    pub fn mutable(&self, mutable: bool) -> Schema {
        self.derive(|config| config.mutable = mutable)
    }

    /// Derive a schema with `key` added to the inheritable properties bag.
    /// Properties carry application-specific metadata; validation never
    /// reads them.
    pub fn with_property<K: Into<String>, V: Into<Value>>(&self, key: K, value: V) -> Schema {
        let (key, value) = (key.into(), value.into());
        self.derive(move |config| {
            config.properties.insert(key, value);
        })
    }

    /// Derive a form schema with an extra validator attached to the named
    /// field's schema.
    ///
    /// # Panics
    ///
    /// Panics immediately if this schema is not a form or `field` was never
    /// declared — both are programmer errors and are surfaced at derivation
    /// time rather than at validation time.
    pub fn with_field_validator(&self, field: &str, validator: SharedValidator) -> Schema {
        self.derive(|config| match &mut config.kind {
            Kind::Form(fields) => {
                match fields.iter_mut().find(|(name, _)| name == field) {
                    Some((_, schema)) => {
                        let derived = schema.validated_by(vec![validator]);
                        *schema = derived;
                    }
                    None => panic!("no such field: {}", field),
                }
            }
            _ => panic!("field validators require a form schema"),
        })
    }

    /// Construct an element holding the configured default, or no value at
    /// all.
    pub fn create(&self) -> Element {
        let mut element = Element::new(self.clone());
        if let Some(default) = &self.config.default {
            element.set_from_native(default.clone());
        } else if let Some(factory) = &self.config.default_factory {
            let default = factory();
            element.set_from_native(default);
        }
        element
    }

    /// Construct an element from a raw value, as received from an untrusted
    /// source. Passing `Value::Unspecified` is equivalent to
    /// [`create`](#method.create).
    pub fn from_raw<V: Into<Value>>(&self, raw: V) -> Element {
        let raw = raw.into();
        if raw.is_unspecified() {
            self.create()
        } else {
            let mut element = Element::new(self.clone());
            element.set_from_raw(raw);
            element
        }
    }

    /// Construct an element from an already-typed native value.
    pub fn from_native<V: Into<Value>>(&self, value: V) -> Element {
        let mut element = Element::new(self.clone());
        element.set_from_native(value.into());
        element
    }

    /// Attempt to coerce `raw` to this schema's native kind, returning
    /// `Value::NotUnserializable` on failure. Container schemas coerce
    /// recursively.
    pub fn unserialize(&self, raw: &Value) -> Value {
        let strict = self.config.strict;
        let encoding = self.config.encoding;
        match &self.config.kind {
            Kind::Any => raw.clone(),
            Kind::Boolean => scalars::boolean(raw, encoding, strict),
            Kind::Integer => scalars::integer(raw, encoding, strict),
            Kind::Float => scalars::float(raw, encoding, strict),
            Kind::Complex => scalars::complex(raw, encoding, strict),
            Kind::Text => scalars::text(raw, encoding, strict),
            Kind::Bytes => scalars::bytes(raw, encoding, strict),
            Kind::List(_) | Kind::Tuple(_) | Kind::Mapping { .. } | Kind::Form(_) => {
                self.from_raw(raw.clone()).value()
            }
        }
    }

    /// Produce the raw projection of a native value: the configured custom
    /// serializer if one was derived, the identity otherwise.
    pub fn serialize(&self, value: &Value) -> Value {
        match &self.config.serializer {
            Some(serializer) => serializer(value),
            None => value.clone(),
        }
    }

    /// The inheritable properties bag.
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.config.properties
    }

    /// Whether only already-native raw values are accepted.
    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    /// Whether per-item mutation is permitted (mappings only).
    pub fn is_mutable(&self) -> bool {
        self.config.mutable
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.config.kind
    }

    pub(crate) fn validators(&self) -> &[SharedValidator] {
        &self.config.validators
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.config.kind.name())
            .field("strict", &self.config.strict)
            .field("validators", &self.config.validators.len())
            .finish()
    }
}
