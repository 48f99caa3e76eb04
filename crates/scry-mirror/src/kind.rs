//! Debuggee object kinds
//!
//! Every object mirror carries a kind tag identifying the runtime category of
//! the underlying debuggee value. The tag is assigned when the mirror is
//! created and never changes, even if the debuggee later mutates the object.

use std::fmt;

/// Runtime category of a debuggee object.
///
/// Kinds mirror the class names a JavaScript engine reports for its objects.
/// Class names outside the known set are preserved verbatim in
/// [`ObjectKind::Other`] so display code can still show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Base `Error` objects
    Error,
    /// `EvalError` objects
    EvalError,
    /// `RangeError` objects
    RangeError,
    /// `ReferenceError` objects
    ReferenceError,
    /// `SyntaxError` objects
    SyntaxError,
    /// `TypeError` objects
    TypeError,
    /// `URIError` objects
    UriError,
    /// `Boolean` wrapper objects
    Boolean,
    /// Functions
    Function,
    /// `Number` wrapper objects
    Number,
    /// Regular expressions
    RegExp,
    /// `String` wrapper objects
    String,
    /// Arrays
    Array,
    /// `DOMException` objects
    DomException,
    /// A value whose backing store has been collected or is otherwise
    /// inaccessible
    DeadObject,
    /// Plain objects
    Object,
    /// Any class name outside the known set (`Date`, `Map`, ...)
    Other(Box<str>),
}

impl ObjectKind {
    /// Parse a debuggee class name into a kind.
    pub fn from_class(class: &str) -> Self {
        match class {
            "Error" => Self::Error,
            "EvalError" => Self::EvalError,
            "RangeError" => Self::RangeError,
            "ReferenceError" => Self::ReferenceError,
            "SyntaxError" => Self::SyntaxError,
            "TypeError" => Self::TypeError,
            "URIError" => Self::UriError,
            "Boolean" => Self::Boolean,
            "Function" => Self::Function,
            "Number" => Self::Number,
            "RegExp" => Self::RegExp,
            "String" => Self::String,
            "Array" => Self::Array,
            "DOMException" => Self::DomException,
            "DeadObject" => Self::DeadObject,
            "Object" => Self::Object,
            other => Self::Other(other.into()),
        }
    }

    /// The class name as the debuggee spells it (inverse of
    /// [`ObjectKind::from_class`]).
    pub fn name(&self) -> &str {
        match self {
            Self::Error => "Error",
            Self::EvalError => "EvalError",
            Self::RangeError => "RangeError",
            Self::ReferenceError => "ReferenceError",
            Self::SyntaxError => "SyntaxError",
            Self::TypeError => "TypeError",
            Self::UriError => "URIError",
            Self::Boolean => "Boolean",
            Self::Function => "Function",
            Self::Number => "Number",
            Self::RegExp => "RegExp",
            Self::String => "String",
            Self::Array => "Array",
            Self::DomException => "DOMException",
            Self::DeadObject => "DeadObject",
            Self::Object => "Object",
            Self::Other(name) => name,
        }
    }

    /// Whether this kind is `Error` or one of its named subtypes.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Error
                | Self::EvalError
                | Self::RangeError
                | Self::ReferenceError
                | Self::SyntaxError
                | Self::TypeError
                | Self::UriError
        )
    }

    /// Whether this kind is a builtin wrapper whose default string coercion
    /// the backend can read without running debuggee code.
    pub fn is_builtin_coercible(&self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Function | Self::Number | Self::RegExp | Self::String
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
