//! The runtime element tree.
//!
//! An [`Element`](struct.Element.html) is one node of validated data: it
//! holds the raw value exactly as it was received, the native value the raw
//! value coerced to, the tri-state validation verdict, and the validation
//! error messages. Container elements additionally own child elements — one
//! per item, key/value pair, or declared field.
//!
//! The raw and native sides are two views of the same logical content.
//! Setting one recomputes the other: [`set_from_raw`] runs the schema's
//! coercion ("unserialization") and [`set_from_native`] runs serialization
//! (the identity unless the schema derived a custom serializer). Coercion
//! failure is never an error — it is the `NotUnserializable` value, distinct
//! from `Unspecified` ("nothing was submitted"), and it propagates upward:
//! any container whose child fails to coerce has a `NotUnserializable` value
//! itself, while the siblings stay independently inspectable.
//!
//! [`set_from_raw`]: struct.Element.html#method.set_from_raw
//! [`set_from_native`]: struct.Element.html#method.set_from_native

use std::collections::HashMap;

use crate::errors::SieveError;
use crate::schema::{Kind, Schema};
use crate::traverse::{Path, Traverse};
use crate::validation::SharedValidator;
use crate::value::Value;

/// Out-of-band state passed through a whole validation pass and handed to
/// every validator.
pub type Context = HashMap<String, Value>;

/// The populated-ness of a container, tracked separately because a
/// container's value is computed from its children and the unset/invalid
/// cases must short-circuit that computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Unset,
    Invalid,
    Populated,
}

/// A key element together with its value element. Keys are elements too, so
/// an invalid key is reported through the same machinery as an invalid
/// value.
#[derive(Debug)]
pub struct Pair {
    key: Element,
    value: Element,
}

impl Pair {
    /// The coerced key element.
    pub fn key(&self) -> &Element {
        &self.key
    }

    /// The value element stored under the key.
    pub fn value(&self) -> &Element {
        &self.value
    }
}

#[derive(Debug)]
enum Children {
    None,
    Items(Vec<Element>),
    Pairs(Vec<Pair>),
    Fields(Vec<(String, Element)>),
}

/// A schema-node instance holding a raw value and its coerced counterpart.
///
/// Elements are constructed from a [`Schema`](struct.Schema.html)
/// ([`create`](struct.Schema.html#method.create),
/// [`from_raw`](struct.Schema.html#method.from_raw),
/// [`from_native`](struct.Schema.html#method.from_native)), mutated freely
/// with the `set_from_*` methods, validated with
/// [`validate`](#method.validate), and inspected through
/// [`value`](#method.value), [`errors`](#method.errors) and
/// [`traverse`](#method.traverse). They hold no external resources and are
/// simply dropped when done with; sharing one tree across threads is not
/// supported.
#[derive(Debug)]
pub struct Element {
    schema: Schema,
    raw: Value,
    native: Value,
    state: State,
    children: Children,
    is_valid: Option<bool>,
    errors: Vec<String>,
}

fn as_pairs(raw: &Value, strict: bool) -> Option<Vec<(Value, Value)>> {
    match raw {
        Value::Map(pairs) => Some(pairs.clone()),
        Value::Seq(items) if !strict => {
            let mut pairs = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Seq(pair) if pair.len() == 2 => {
                        pairs.push((pair[0].clone(), pair[1].clone()))
                    }
                    _ => return None,
                }
            }
            Some(pairs)
        }
        _ => None,
    }
}

impl Element {
    pub(crate) fn new(schema: Schema) -> Element {
        let children = match schema.kind() {
            Kind::List(_) => Children::Items(Vec::new()),
            // tuple and form children exist from birth and are never
            // replaced, only re-set in place
            Kind::Tuple(members) => {
                Children::Items(members.iter().map(|member| member.create()).collect())
            }
            Kind::Mapping { .. } => Children::Pairs(Vec::new()),
            Kind::Form(fields) => Children::Fields(
                fields
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.create()))
                    .collect(),
            ),
            _ => Children::None,
        };
        Element {
            schema,
            raw: Value::Unspecified,
            native: Value::Unspecified,
            state: State::Unset,
            children,
            is_valid: None,
            errors: Vec::new(),
        }
    }

    /// The schema this element was constructed from.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The schema's inheritable properties bag.
    pub fn properties(&self) -> &HashMap<String, Value> {
        self.schema.properties()
    }

    /// The raw value exactly as it was last set, `Unspecified` if it never
    /// was. Kept verbatim even when it could not be coerced, so that
    /// diagnostics can echo what was actually received.
    pub fn raw_value(&self) -> &Value {
        &self.raw
    }

    /// The coerced value: `Unspecified` if nothing was set,
    /// `NotUnserializable` if coercion failed anywhere below, the assembled
    /// native value otherwise. Containers compute this by folding over
    /// their children.
    pub fn value(&self) -> Value {
        match self.schema.kind() {
            Kind::Any
            | Kind::Boolean
            | Kind::Integer
            | Kind::Float
            | Kind::Complex
            | Kind::Text
            | Kind::Bytes => self.native.clone(),
            Kind::List(_) | Kind::Tuple(_) => match self.state {
                State::Unset => Value::Unspecified,
                State::Invalid => Value::NotUnserializable,
                State::Populated => {
                    let items = match &self.children {
                        Children::Items(items) => items,
                        _ => return Value::NotUnserializable,
                    };
                    let mut out = Vec::with_capacity(items.len());
                    for child in items {
                        let value = child.value();
                        if value.is_not_unserializable() {
                            return Value::NotUnserializable;
                        }
                        out.push(value);
                    }
                    Value::Seq(out)
                }
            },
            Kind::Mapping { ordered, .. } => match self.state {
                State::Unset => Value::Unspecified,
                State::Invalid => Value::NotUnserializable,
                State::Populated => {
                    let pairs = match &self.children {
                        Children::Pairs(pairs) => pairs,
                        _ => return Value::NotUnserializable,
                    };
                    let mut out: Vec<(Value, Value)> = Vec::with_capacity(pairs.len());
                    for pair in pairs {
                        let key = pair.key.value();
                        let value = pair.value.value();
                        if key.is_not_unserializable() || value.is_not_unserializable() {
                            return Value::NotUnserializable;
                        }
                        match out.iter().position(|(existing, _)| *existing == key) {
                            Some(index) => out[index].1 = value,
                            None => out.push((key, value)),
                        }
                    }
                    if !*ordered {
                        out.sort_by(|a, b| a.0.total_cmp(&b.0));
                    }
                    Value::Map(out)
                }
            },
            Kind::Form(_) => match self.state {
                State::Unset => Value::Unspecified,
                State::Invalid => Value::NotUnserializable,
                State::Populated => {
                    let fields = match &self.children {
                        Children::Fields(fields) => fields,
                        _ => return Value::NotUnserializable,
                    };
                    let mut out = Vec::with_capacity(fields.len());
                    for (name, child) in fields {
                        let value = child.value();
                        // a declared field the raw input never covered is as
                        // unusable as one that failed to coerce
                        if value.is_sentinel() {
                            return Value::NotUnserializable;
                        }
                        out.push((Value::Text(name.clone()), value));
                    }
                    Value::Map(out)
                }
            },
        }
    }

    /// The verdict of the last [`validate`](#method.validate) pass: `None`
    /// until validated, and reset to `None` by every `set_from_*` call.
    pub fn is_valid(&self) -> Option<bool> {
        self.is_valid
    }

    /// Messages appended by validators during the last validation pass.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Append a validation failure message. Called by validators.
    pub fn add_error<S: Into<String>>(&mut self, message: S) {
        self.errors.push(message.into());
    }

    /// Install `raw` verbatim and recompute the native value through the
    /// schema's coercion. This is the entry point for untrusted external
    /// input. Resets the validation verdict.
    ///
    /// Setting `Value::Unspecified` clears the element (and every child)
    /// back to the unset state.
    pub fn set_from_raw<V: Into<Value>>(&mut self, raw: V) {
        let raw = raw.into();
        let schema = self.schema.clone();
        self.is_valid = None;
        match schema.kind() {
            Kind::Any
            | Kind::Boolean
            | Kind::Integer
            | Kind::Float
            | Kind::Complex
            | Kind::Text
            | Kind::Bytes => {
                self.native = if raw.is_unspecified() {
                    Value::Unspecified
                } else {
                    schema.unserialize(&raw)
                };
                self.raw = raw;
            }
            Kind::List(member) => {
                if raw.is_unspecified() {
                    self.children = Children::Items(Vec::new());
                    self.state = State::Unset;
                } else if let Value::Seq(items) = &raw {
                    // children are rebuilt from scratch on every set, no
                    // diffing and no identity preserved
                    self.children = Children::Items(
                        items.iter().map(|item| member.from_raw(item.clone())).collect(),
                    );
                    self.state = State::Populated;
                } else {
                    self.children = Children::Items(Vec::new());
                    self.state = State::Invalid;
                }
                self.raw = raw;
            }
            Kind::Tuple(members) => {
                if raw.is_unspecified() {
                    self.reset_items();
                    self.state = State::Unset;
                } else {
                    let arity_matches =
                        matches!(&raw, Value::Seq(items) if items.len() == members.len());
                    if arity_matches {
                        if let (Children::Items(children), Value::Seq(items)) =
                            (&mut self.children, &raw)
                        {
                            for (child, item) in children.iter_mut().zip(items.iter()) {
                                child.set_from_raw(item.clone());
                            }
                        }
                        self.state = State::Populated;
                    } else {
                        self.reset_items();
                        self.state = State::Invalid;
                    }
                }
                self.raw = raw;
            }
            Kind::Mapping {
                key: key_schema,
                value: value_schema,
                ..
            } => {
                if raw.is_unspecified() {
                    self.children = Children::Pairs(Vec::new());
                    self.state = State::Unset;
                } else {
                    match as_pairs(&raw, schema.is_strict()) {
                        Some(raw_pairs) => {
                            let mut pairs: Vec<Pair> = Vec::with_capacity(raw_pairs.len());
                            for (raw_key, raw_value) in raw_pairs {
                                let pair = Pair {
                                    key: key_schema.from_raw(raw_key.clone()),
                                    value: value_schema.from_raw(raw_value),
                                };
                                // a repeated raw key replaces the earlier entry
                                match pairs
                                    .iter()
                                    .position(|existing| *existing.key.raw_value() == raw_key)
                                {
                                    Some(index) => pairs[index] = pair,
                                    None => pairs.push(pair),
                                }
                            }
                            self.children = Children::Pairs(pairs);
                            self.state = State::Populated;
                        }
                        None => {
                            self.children = Children::Pairs(Vec::new());
                            self.state = State::Invalid;
                        }
                    }
                }
                self.raw = raw;
            }
            Kind::Form(_) => {
                if raw.is_unspecified() {
                    self.reset_fields();
                    self.state = State::Unset;
                } else {
                    match as_pairs(&raw, schema.is_strict()) {
                        Some(raw_pairs) => {
                            if let Children::Fields(fields) = &mut self.children {
                                for (raw_key, raw_value) in raw_pairs {
                                    if let Value::Text(name) = &raw_key {
                                        if let Some((_, child)) =
                                            fields.iter_mut().find(|(field, _)| field == name)
                                        {
                                            child.set_from_raw(raw_value);
                                        }
                                    }
                                }
                            }
                            self.state = State::Populated;
                        }
                        // fields keep their previous values; the raw payload
                        // is still recorded for diagnostics
                        None => self.state = State::Invalid,
                    }
                }
                self.raw = raw;
            }
        }
    }

    /// Install `value` verbatim as the native value and recompute the raw
    /// projection through the schema's serialization. This is the entry
    /// point for already-typed application data. Resets the validation
    /// verdict.
    pub fn set_from_native<V: Into<Value>>(&mut self, value: V) {
        let value = value.into();
        if value.is_unspecified() {
            self.set_from_raw(Value::Unspecified);
            return;
        }
        let schema = self.schema.clone();
        self.is_valid = None;
        let raw = schema.serialize(&value);
        match schema.kind() {
            Kind::Any
            | Kind::Boolean
            | Kind::Integer
            | Kind::Float
            | Kind::Complex
            | Kind::Text
            | Kind::Bytes => {
                self.native = value;
                self.raw = raw;
            }
            Kind::List(member) => {
                if let Value::Seq(items) = &value {
                    self.children = Children::Items(
                        items
                            .iter()
                            .map(|item| member.from_native(item.clone()))
                            .collect(),
                    );
                    self.state = State::Populated;
                } else {
                    self.children = Children::Items(Vec::new());
                    self.state = State::Invalid;
                }
                self.raw = raw;
            }
            Kind::Tuple(members) => {
                let arity_matches =
                    matches!(&value, Value::Seq(items) if items.len() == members.len());
                if arity_matches {
                    if let (Children::Items(children), Value::Seq(items)) =
                        (&mut self.children, &value)
                    {
                        for (child, item) in children.iter_mut().zip(items.iter()) {
                            child.set_from_native(item.clone());
                        }
                    }
                    self.state = State::Populated;
                } else {
                    self.reset_items();
                    self.state = State::Invalid;
                }
                self.raw = raw;
            }
            Kind::Mapping {
                key: key_schema,
                value: value_schema,
                ..
            } => {
                match as_pairs(&value, true) {
                    Some(native_pairs) => {
                        let mut pairs: Vec<Pair> = Vec::with_capacity(native_pairs.len());
                        for (native_key, native_value) in native_pairs {
                            let pair = Pair {
                                key: key_schema.from_native(native_key.clone()),
                                value: value_schema.from_native(native_value),
                            };
                            match pairs
                                .iter()
                                .position(|existing| existing.key.value() == native_key)
                            {
                                Some(index) => pairs[index] = pair,
                                None => pairs.push(pair),
                            }
                        }
                        self.children = Children::Pairs(pairs);
                        self.state = State::Populated;
                    }
                    None => {
                        self.children = Children::Pairs(Vec::new());
                        self.state = State::Invalid;
                    }
                }
                self.raw = raw;
            }
            Kind::Form(_) => {
                match as_pairs(&value, true) {
                    Some(native_pairs) => {
                        if let Children::Fields(fields) = &mut self.children {
                            for (native_key, native_value) in native_pairs {
                                if let Value::Text(name) = &native_key {
                                    if let Some((_, child)) =
                                        fields.iter_mut().find(|(field, _)| field == name)
                                    {
                                        child.set_from_native(native_value);
                                    }
                                }
                            }
                        }
                        self.state = State::Populated;
                    }
                    None => self.state = State::Invalid,
                }
                self.raw = raw;
            }
        }
    }

    fn reset_items(&mut self) {
        if let Children::Items(children) = &mut self.children {
            for child in children {
                child.set_from_raw(Value::Unspecified);
            }
        }
    }

    fn reset_fields(&mut self) {
        if let Children::Fields(fields) = &mut self.children {
            for (_, child) in fields {
                child.set_from_raw(Value::Unspecified);
            }
        }
    }

    /// Validate with an empty context. See
    /// [`validate_in`](#method.validate_in).
    pub fn validate(&mut self) -> bool {
        self.validate_in(&Context::new())
    }

    /// Recursively validate this element and every descendant, in iteration
    /// order, never short-circuiting: every child is visited regardless of
    /// earlier failures so that `errors` is populated everywhere.
    ///
    /// An element with validators is valid iff all of them pass; one
    /// without is valid iff its value is neither `Unspecified` nor
    /// `NotUnserializable`. A container additionally requires all of its
    /// children to be valid.
    ///
    /// Each element's `errors` list is cleared at the start of the pass, so
    /// repeated calls replace messages rather than accumulate them. Sets
    /// and returns the verdict.
    pub fn validate_in(&mut self, context: &Context) -> bool {
        self.errors.clear();
        let mut valid = true;
        match &mut self.children {
            Children::None => {}
            Children::Items(items) => {
                for child in items {
                    valid &= child.validate_in(context);
                }
            }
            Children::Pairs(pairs) => {
                for pair in pairs {
                    valid &= pair.key.validate_in(context);
                    valid &= pair.value.validate_in(context);
                }
            }
            Children::Fields(fields) => {
                for (_, child) in fields {
                    valid &= child.validate_in(context);
                }
            }
        }
        let validators: Vec<SharedValidator> = self.schema.validators().to_vec();
        if validators.is_empty() {
            valid &= !self.value().is_sentinel();
        } else {
            for validator in &validators {
                valid &= validator.run(self, context);
            }
        }
        self.is_valid = Some(valid);
        valid
    }

    /// Lazily enumerate every element below this one, depth-first and
    /// left-to-right, as `(path, element)` entries. Mapping entries
    /// contribute the key element at path `…/i/0` and the value element at
    /// `…/i/1` so that an invalid key and an invalid value are separately
    /// addressable. The walk reflects the tree's current state; call again
    /// for a fresh walk.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse::new(self, Path::new())
    }

    /// Like [`traverse`](#method.traverse), with all paths prefixed.
    pub fn traverse_from(&self, prefix: Path) -> Traverse<'_> {
        Traverse::new(self, prefix)
    }

    pub(crate) fn is_container(&self) -> bool {
        !matches!(self.children, Children::None)
    }

    pub(crate) fn traverse_children(&self, base: &Path) -> Vec<(Path, &Element)> {
        use crate::traverse::Step;
        match &self.children {
            Children::None => Vec::new(),
            Children::Items(items) => items
                .iter()
                .enumerate()
                .map(|(i, child)| (base.child(Step::Index(i)), child))
                .collect(),
            Children::Pairs(pairs) => pairs
                .iter()
                .enumerate()
                .flat_map(|(i, pair)| {
                    let entry = base.child(Step::Index(i));
                    vec![
                        (entry.child(Step::Index(0)), &pair.key),
                        (entry.child(Step::Index(1)), &pair.value),
                    ]
                })
                .collect(),
            Children::Fields(fields) => fields
                .iter()
                .map(|(name, child)| (base.child(Step::Field(name.clone())), child))
                .collect(),
        }
    }

    /// The number of children: items for sequences, entries for mappings,
    /// declared fields for forms. Zero for scalars.
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Items(items) => items.len(),
            Children::Pairs(pairs) => pairs.len(),
            Children::Fields(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item elements of a sequence, in order. Empty for other kinds.
    pub fn elements(&self) -> &[Element] {
        match &self.children {
            Children::Items(items) => items,
            _ => &[],
        }
    }

    /// The item element at `index` of a sequence.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements().get(index)
    }

    /// The key/value pairs of a mapping, in insertion order. Empty for
    /// other kinds.
    pub fn pairs(&self) -> &[Pair] {
        match &self.children {
            Children::Pairs(pairs) => pairs,
            _ => &[],
        }
    }

    /// The pair whose key element coerced to `key`.
    pub fn entry(&self, key: &Value) -> Option<&Pair> {
        self.pairs().iter().find(|pair| pair.key.value() == *key)
    }

    /// Whether a mapping has an entry under `key`.
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entry(key).is_some()
    }

    /// The named fields of a form, in declaration order. Empty for other
    /// kinds.
    pub fn fields(&self) -> &[(String, Element)] {
        match &self.children {
            Children::Fields(fields) => fields,
            _ => &[],
        }
    }

    /// The field element declared under `name`.
    pub fn field(&self, name: &str) -> Option<&Element> {
        self.fields()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, child)| child)
    }

    /// Whether a form declares a field named `name`.
    pub fn contains_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether any item of a sequence coerced to `value`.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.elements().iter().any(|child| child.value() == *value)
    }

    /// The position of the first sequence item that coerced to `value`.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.elements().iter().position(|child| child.value() == *value)
    }

    /// How many items of a sequence coerced to `value`.
    pub fn count_of(&self, value: &Value) -> usize {
        self.elements()
            .iter()
            .filter(|child| child.value() == *value)
            .count()
    }

    /// Insert (or replace) one entry of a mutable mapping, leaving all
    /// other entries untouched. The stored raw value is re-assembled from
    /// the entries' raw values.
    ///
    /// Fails on non-mappings and on mappings not derived with
    /// `mutable(true)` — wholesale `set_from_raw` is the only mutation path
    /// for read-only mappings.
    pub fn insert<K, V>(&mut self, raw_key: K, raw_value: V) -> Result<(), SieveError>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let schema = self.schema.clone();
        let (key_schema, value_schema) = match schema.kind() {
            Kind::Mapping { key, value, .. } => (key, value),
            _ => return Err(SieveError::NotAMapping),
        };
        if !schema.is_mutable() {
            return Err(SieveError::Immutable);
        }
        let raw_key = raw_key.into();
        let pair = Pair {
            key: key_schema.from_raw(raw_key.clone()),
            value: value_schema.from_raw(raw_value.into()),
        };
        if let Children::Pairs(pairs) = &mut self.children {
            match pairs
                .iter()
                .position(|existing| *existing.key.raw_value() == raw_key)
            {
                Some(index) => pairs[index] = pair,
                None => pairs.push(pair),
            }
        }
        self.state = State::Populated;
        self.is_valid = None;
        self.sync_raw_from_children();
        Ok(())
    }

    /// Remove the entry whose key coerced to `key` from a mutable mapping,
    /// returning its value element.
    pub fn remove(&mut self, key: &Value) -> Result<Element, SieveError> {
        let schema = self.schema.clone();
        if !matches!(schema.kind(), Kind::Mapping { .. }) {
            return Err(SieveError::NotAMapping);
        }
        if !schema.is_mutable() {
            return Err(SieveError::Immutable);
        }
        let removed = match &mut self.children {
            Children::Pairs(pairs) => match pairs.iter().position(|pair| pair.key.value() == *key) {
                Some(index) => pairs.remove(index),
                None => {
                    return Err(SieveError::NoSuchKey {
                        key: key.to_string(),
                    })
                }
            },
            _ => return Err(SieveError::NotAMapping),
        };
        self.is_valid = None;
        self.sync_raw_from_children();
        Ok(removed.value)
    }

    /// Re-set one field of a form from a raw value, leaving the other
    /// fields untouched. The stored raw value is re-assembled from the
    /// fields' raw values.
    pub fn set_field_raw<V: Into<Value>>(&mut self, name: &str, raw: V) -> Result<(), SieveError> {
        self.set_field(name, raw.into(), false)
    }

    /// Re-set one field of a form from a native value.
    pub fn set_field_native<V: Into<Value>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), SieveError> {
        self.set_field(name, value.into(), true)
    }

    fn set_field(&mut self, name: &str, value: Value, native: bool) -> Result<(), SieveError> {
        if !matches!(self.schema.kind(), Kind::Form(_)) {
            return Err(SieveError::NotAForm);
        }
        match &mut self.children {
            Children::Fields(fields) => {
                match fields.iter_mut().find(|(field, _)| field == name) {
                    Some((_, child)) => {
                        if native {
                            child.set_from_native(value);
                        } else {
                            child.set_from_raw(value);
                        }
                    }
                    None => {
                        return Err(SieveError::NoSuchField {
                            field: name.to_owned(),
                        })
                    }
                }
            }
            _ => return Err(SieveError::NotAForm),
        }
        self.state = State::Populated;
        self.is_valid = None;
        self.sync_raw_from_children();
        Ok(())
    }

    fn sync_raw_from_children(&mut self) {
        let assembled = match &self.children {
            Children::Pairs(pairs) => Some(Value::Map(
                pairs
                    .iter()
                    .map(|pair| (pair.key.raw.clone(), pair.value.raw.clone()))
                    .collect(),
            )),
            Children::Fields(fields) => Some(Value::Map(
                fields
                    .iter()
                    .filter(|(_, child)| !child.raw.is_unspecified())
                    .map(|(name, child)| (Value::Text(name.clone()), child.raw.clone()))
                    .collect(),
            )),
            _ => None,
        };
        if let Some(raw) = assembled {
            self.raw = raw;
        }
    }
}
