//! In-memory mirror backend
//!
//! [`Snapshot`] is an owned object graph implementing [`ObjectMirror`], for
//! tests and for embedders that capture debuggee state eagerly rather than
//! proxying a live session. Kind and identity are fixed at construction;
//! properties stay mutable behind an `RwLock` so graphs with cycles can be
//! built in two steps (create, then wire).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::kind::ObjectKind;
use crate::object::{MirrorId, ObjectHandle, ObjectMirror, PropertyDescriptor};
use crate::value::{MirrorValue, Primitive};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Default)]
struct SnapshotState {
    props: FxHashMap<Box<str>, PropertyDescriptor>,
    elements: FxHashMap<u32, PropertyDescriptor>,
    array_len: u32,
    proto: Option<ObjectHandle>,
    coercion: Option<String>,
}

struct SnapshotObject {
    id: MirrorId,
    kind: ObjectKind,
    state: RwLock<SnapshotState>,
}

/// An owned, buildable object mirror.
///
/// Cloning shares the underlying object: both clones see later mutations,
/// matching handle semantics elsewhere. Arrays synthesize a numeric `length`
/// own property from their highest populated index unless one was set
/// explicitly, so a test can also simulate a proxy misreporting `length`.
#[derive(Clone)]
pub struct Snapshot {
    inner: Arc<SnapshotObject>,
}

impl Snapshot {
    /// Create an object of the given kind.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            inner: Arc::new(SnapshotObject {
                id: MirrorId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
                kind,
                state: RwLock::new(SnapshotState::default()),
            }),
        }
    }

    /// Create an `Array` object.
    pub fn array() -> Self {
        Self::new(ObjectKind::Array)
    }

    /// Create a dead-object sentinel.
    pub fn dead() -> Self {
        Self::new(ObjectKind::DeadObject)
    }

    /// Create a builtin wrapper carrying its safe native coercion.
    pub fn builtin(kind: ObjectKind, coercion: impl Into<String>) -> Self {
        let snapshot = Self::new(kind);
        snapshot.inner.state.write().coercion = Some(coercion.into());
        snapshot
    }

    /// The shareable handle for this object.
    pub fn handle(&self) -> ObjectHandle {
        ObjectHandle::from_arc(self.inner.clone())
    }

    /// Set a named data property.
    pub fn set(&self, key: &str, value: impl Into<MirrorValue>) {
        self.set_descriptor(key, PropertyDescriptor::data(value));
    }

    /// Set a named property with an explicit descriptor.
    pub fn set_descriptor(&self, key: &str, descriptor: PropertyDescriptor) {
        self.inner.state.write().props.insert(key.into(), descriptor);
    }

    /// Set an indexed element, growing the synthesized length to cover it.
    pub fn set_element(&self, index: u32, value: impl Into<MirrorValue>) {
        self.set_element_descriptor(index, PropertyDescriptor::data(value));
    }

    /// Set an indexed element with an explicit descriptor.
    pub fn set_element_descriptor(&self, index: u32, descriptor: PropertyDescriptor) {
        let mut state = self.inner.state.write();
        state.elements.insert(index, descriptor);
        if index >= state.array_len {
            state.array_len = index.saturating_add(1);
        }
    }

    /// Append an element at the current length.
    pub fn push(&self, value: impl Into<MirrorValue>) {
        let index = self.inner.state.read().array_len;
        self.set_element(index, value);
    }

    /// Leave a hole at the current length: the length grows, no descriptor
    /// appears at the index.
    pub fn push_hole(&self) {
        let mut state = self.inner.state.write();
        state.array_len = state.array_len.saturating_add(1);
    }

    /// Set the prototype link.
    pub fn set_proto(&self, proto: ObjectHandle) {
        self.inner.state.write().proto = Some(proto);
    }
}

impl ObjectMirror for SnapshotObject {
    fn kind(&self) -> ObjectKind {
        self.kind.clone()
    }

    fn id(&self) -> MirrorId {
        self.id
    }

    fn own_property(&self, key: &str) -> Option<PropertyDescriptor> {
        let state = self.state.read();
        if let Some(descriptor) = state.props.get(key) {
            return Some(descriptor.clone());
        }
        if self.kind == ObjectKind::Array {
            if key == "length" {
                return Some(PropertyDescriptor::data(Primitive::Number(
                    state.array_len as f64,
                )));
            }
            if let Ok(index) = key.parse::<u32>() {
                return state.elements.get(&index).cloned();
            }
        }
        None
    }

    fn own_element(&self, index: u32) -> Option<PropertyDescriptor> {
        let state = self.state.read();
        if let Some(descriptor) = state.elements.get(&index) {
            return Some(descriptor.clone());
        }
        state.props.get(index.to_string().as_str()).cloned()
    }

    fn proto(&self) -> Option<ObjectHandle> {
        self.state.read().proto.clone()
    }

    fn native_coercion(&self) -> Option<String> {
        self.state.read().coercion.clone()
    }
}
