//! An error type for misuse of the element mutation APIs.

use failure::Fail;

/// An enum of possible errors that can emerge from this crate.
///
/// Note that coercion failures and validation failures are *not* errors:
/// they are represented as data (`Value::NotUnserializable` and
/// `Element::errors` respectively) so that malformed input can be inspected
/// and reported rather than aborting. The variants here all indicate a
/// caller bypassing an element's declared capabilities.
#[derive(Debug, Fail, PartialEq, Clone, Eq, Hash)]
pub enum SieveError {
    /// A mapping-only operation was invoked on a non-mapping element.
    #[fail(display = "element is not a mapping")]
    NotAMapping,

    /// A form-only operation was invoked on a non-form element.
    #[fail(display = "element is not a form")]
    NotAForm,

    /// An item mutation was attempted on a mapping whose schema was not
    /// derived with `mutable(true)`. Read-only mappings can only be set
    /// wholesale through `set_from_raw`/`set_from_native`.
    #[fail(display = "mapping is not mutable")]
    Immutable,

    /// A form field name that was never declared on the schema.
    #[fail(display = "no such field: {}", field)]
    NoSuchField { field: String },

    /// A mapping key with no corresponding entry.
    #[fail(display = "no such key: {}", key)]
    NoSuchKey { key: String },
}
