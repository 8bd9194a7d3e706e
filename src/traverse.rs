//! Flattened, path-keyed views of an element tree.
//!
//! [`Traverse`](struct.Traverse.html) enumerates every leaf-level element of
//! a tree together with its [`Path`](struct.Path.html) from the root, for
//! generic consumers such as error renderers. Paths convert to standard JSON
//! pointers:
//!
//! ```
//! use sieve::{Schema, Value};
//!
//! let schema = Schema::form(vec![
//!     ("name", Schema::text()),
//!     ("phones", Schema::list(Schema::text())),
//! ]);
//! let mut element = schema.from_raw(Value::Map(vec![
//!     (Value::from("name"), Value::from("Ann")),
//!     (
//!         Value::from("phones"),
//!         Value::Seq(vec![Value::from("+44 1234567"), Value::Seq(vec![])]),
//!     ),
//! ]));
//! element.validate();
//!
//! let invalid: Vec<String> = element
//!     .traverse()
//!     .filter(|(_, element)| element.is_valid() == Some(false))
//!     .map(|(path, _)| path.to_string())
//!     .collect();
//! assert_eq!(invalid, ["/phones/1"]);
//! ```

use std::fmt;

use json_pointer::JsonPointer;

use crate::element::Element;

/// One step of a path: a sequence/mapping index or a form field name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Step {
    Index(usize),
    Field(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Index(index) => write!(f, "{}", index),
            Step::Field(name) => f.write_str(name),
        }
    }
}

/// The accumulated index/key path from the root of a traversal to an
/// element.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path(Vec<Step>);

impl Path {
    /// The empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// This path extended by one step.
    pub fn child(&self, step: Step) -> Path {
        let mut steps = self.0.clone();
        steps.push(step);
        Path(steps)
    }

    /// The individual steps.
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// This path as a JSON pointer, e.g. `/phones/1`.
    pub fn pointer(&self) -> JsonPointer<String, Vec<String>> {
        JsonPointer::new(self.0.iter().map(|step| step.to_string()).collect::<Vec<_>>())
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Path {
        Path(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pointer())
    }
}

/// A lazy depth-first, left-to-right walk over an element tree.
///
/// Containers are expanded into their children rather than yielded
/// themselves; a scalar root yields itself once. Each call to
/// [`Element::traverse`](struct.Element.html#method.traverse) produces a
/// fresh, single-pass walk over the tree's current state.
pub struct Traverse<'a> {
    stack: Vec<(Path, &'a Element)>,
}

impl<'a> Traverse<'a> {
    pub(crate) fn new(root: &'a Element, prefix: Path) -> Traverse<'a> {
        Traverse {
            stack: vec![(prefix, root)],
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (Path, &'a Element);

    fn next(&mut self) -> Option<(Path, &'a Element)> {
        while let Some((path, element)) = self.stack.pop() {
            if element.is_container() {
                let mut children = element.traverse_children(&path);
                children.reverse();
                self.stack.extend(children);
            } else {
                return Some((path, element));
            }
        }
        None
    }
}
