//! Scry mirror layer
//!
//! Read-only reflection over values living in a debuggee execution context.
//! A mirror exposes what inspection needs (a kind tag, own-property
//! descriptors, prototype links, safe builtin coercions) and nothing that
//! could run debuggee code.

#![warn(missing_docs)]

pub mod diag;
pub mod error;
pub mod kind;
pub mod object;
pub mod snapshot;
pub mod value;

pub use diag::{CollectSink, Diagnostic, DiagnosticSink, NullSink};
pub use error::MirrorError;
pub use kind::ObjectKind;
pub use object::{
    get_property, get_property_with, MirrorId, ObjectHandle, ObjectMirror, PropertyDescriptor,
    PROTO_CHAIN_LIMIT,
};
pub use snapshot::Snapshot;
pub use value::{number_to_string, MirrorValue, Primitive};
