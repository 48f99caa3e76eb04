//! Object mirrors
//!
//! An [`ObjectMirror`] is a read-only proxy to one object living in the
//! debuggee. Backends implement the trait; everything above it (property
//! walks, stringification) stays backend-agnostic. The surface exposes
//! reflection only. Nothing here can call into debuggee code, so inspecting
//! a value can neither trigger side effects nor trip debuggee traps.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::diag::{DiagnosticSink, NullSink};
use crate::error::MirrorError;
use crate::kind::ObjectKind;
use crate::value::MirrorValue;

/// Stable identity token for a debuggee object.
///
/// Two handles referring to the same underlying object must report the same
/// id. Cycle detection during stringification keys on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MirrorId(
    /// Raw identity token
    pub u64,
);

/// Own-property descriptor as reflection reports it.
///
/// `value` is `None` for accessor descriptors: reading a getter would execute
/// debuggee code, so reflection treats such properties as `undefined`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// The data value, absent for accessor descriptors
    pub value: Option<MirrorValue>,
    /// `enumerable` flag
    pub enumerable: bool,
    /// `writable` flag (meaningful for data descriptors only)
    pub writable: bool,
    /// `configurable` flag
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// A plain data descriptor with default flags.
    pub fn data(value: impl Into<MirrorValue>) -> Self {
        Self {
            value: Some(value.into()),
            enumerable: true,
            writable: true,
            configurable: true,
        }
    }

    /// An accessor descriptor. Its value cannot be read without running
    /// debuggee code.
    pub fn accessor() -> Self {
        Self {
            value: None,
            enumerable: true,
            writable: false,
            configurable: true,
        }
    }
}

/// Read-only reflection over one debuggee object.
pub trait ObjectMirror: Send + Sync {
    /// The runtime category of the underlying object. Never changes.
    fn kind(&self) -> ObjectKind;

    /// Stable identity of the underlying object.
    fn id(&self) -> MirrorId;

    /// Look up an own-property descriptor by name.
    fn own_property(&self, key: &str) -> Option<PropertyDescriptor>;

    /// Look up an own-property descriptor by array index.
    fn own_element(&self, index: u32) -> Option<PropertyDescriptor> {
        self.own_property(&index.to_string())
    }

    /// The prototype link, if any.
    fn proto(&self) -> Option<ObjectHandle> {
        None
    }

    /// The builtin type's default string coercion for wrapper kinds
    /// (`Boolean`, `Function`, `Number`, `RegExp`, `String`), bypassing any
    /// user-redefined `toString`/`valueOf`. `None` for other kinds, or for
    /// backends without the capability.
    fn native_coercion(&self) -> Option<String> {
        None
    }
}

/// Shared handle to an object mirror.
///
/// Clones are cheap and refer to the same mirror. Equality and hashing use
/// the mirror's [`MirrorId`], i.e. identity of the underlying debuggee
/// object.
#[derive(Clone)]
pub struct ObjectHandle(Arc<dyn ObjectMirror>);

impl ObjectHandle {
    /// Wrap a mirror implementation in a shared handle.
    pub fn new(mirror: impl ObjectMirror + 'static) -> Self {
        Self(Arc::new(mirror))
    }

    /// Wrap an already-shared mirror.
    pub fn from_arc(mirror: Arc<dyn ObjectMirror>) -> Self {
        Self(mirror)
    }
}

impl Deref for ObjectHandle {
    type Target = dyn ObjectMirror;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("kind", &self.kind())
            .field("id", &self.id())
            .finish()
    }
}

/// Longest prototype chain reflection will follow before giving up.
///
/// Real engines keep chains acyclic and short; only a misbehaving backend
/// can exceed this.
pub const PROTO_CHAIN_LIMIT: usize = 64;

/// Read a property through the prototype chain, discarding diagnostics.
pub fn get_property(obj: &ObjectHandle, key: &str) -> MirrorValue {
    get_property_with(obj, key, &NullSink)
}

/// Read a property through the prototype chain without running debuggee
/// code.
///
/// Returns the first own descriptor's value walking from `obj` up its
/// prototype links. Accessor descriptors and exhausted chains read as
/// `undefined`. A chain longer than [`PROTO_CHAIN_LIMIT`] links is treated
/// as malformed: the walk stops, reports to `sink`, and reads as
/// `undefined`.
pub fn get_property_with(
    obj: &ObjectHandle,
    key: &str,
    sink: &dyn DiagnosticSink,
) -> MirrorValue {
    let mut current = obj.clone();
    for _ in 0..PROTO_CHAIN_LIMIT {
        if let Some(desc) = current.own_property(key) {
            return desc.value.unwrap_or_else(MirrorValue::undefined);
        }
        match current.proto() {
            Some(proto) => current = proto,
            None => return MirrorValue::undefined(),
        }
    }
    sink.report(
        "get_property",
        &MirrorError::ProtoChainTooLong {
            limit: PROTO_CHAIN_LIMIT,
        },
    );
    MirrorValue::undefined()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectSink;
    use crate::snapshot::Snapshot;
    use crate::value::Primitive;

    #[test]
    fn test_descriptor_constructors() {
        let data = PropertyDescriptor::data(1.0);
        assert_eq!(data.value, Some(MirrorValue::Primitive(Primitive::Number(1.0))));
        assert!(data.writable);

        let accessor = PropertyDescriptor::accessor();
        assert_eq!(accessor.value, None);
        assert!(!accessor.writable);
    }

    #[test]
    fn test_handle_identity() {
        let a = Snapshot::new(ObjectKind::Object);
        let b = Snapshot::new(ObjectKind::Object);
        assert_eq!(a.handle(), a.handle());
        assert_ne!(a.handle(), b.handle());
    }

    #[test]
    fn test_get_property_own_shadows_proto() {
        let proto = Snapshot::new(ObjectKind::Object);
        proto.set("name", "from proto");
        proto.set("shadowed", "proto");

        let obj = Snapshot::new(ObjectKind::Object);
        obj.set("shadowed", "own");
        obj.set_proto(proto.handle());

        assert_eq!(get_property(&obj.handle(), "shadowed"), MirrorValue::from("own"));
        assert_eq!(get_property(&obj.handle(), "name"), MirrorValue::from("from proto"));
        assert_eq!(get_property(&obj.handle(), "missing"), MirrorValue::undefined());
    }

    #[test]
    fn test_get_property_accessor_reads_undefined() {
        let obj = Snapshot::new(ObjectKind::Object);
        obj.set_descriptor("getter", PropertyDescriptor::accessor());
        assert_eq!(get_property(&obj.handle(), "getter"), MirrorValue::undefined());
    }

    #[test]
    fn test_get_property_cyclic_proto_chain() {
        let a = Snapshot::new(ObjectKind::Object);
        let b = Snapshot::new(ObjectKind::Object);
        a.set_proto(b.handle());
        b.set_proto(a.handle());

        let sink = CollectSink::new();
        let result = get_property_with(&a.handle(), "missing", &sink);
        assert_eq!(result, MirrorValue::undefined());

        let reports = sink.take();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, "get_property");
        assert_eq!(
            reports[0].error,
            MirrorError::ProtoChainTooLong {
                limit: PROTO_CHAIN_LIMIT
            }
        );
    }
}
