//! Opaque handles identifying collector-managed objects.
//!
//! A handle stands in for a raw pointer: hosts store and exchange handles,
//! and the collector resolves them to object storage internally. Handles
//! are minted from a monotonically increasing counter and are never reused
//! within the lifetime of a single collector instance.

use std::fmt;

/// An opaque identifier for a collector-managed object.
///
/// Handles are cheap to copy, hashable, and totally ordered. The ordering
/// reflects allocation order because the underlying counter only increases.
///
/// # Example
///
/// ```
/// use collector::{Collectable, Gc, Handle};
///
/// #[derive(Default)]
/// struct Leaf;
///
/// impl Collectable for Leaf {
///     fn references(&self) -> Vec<Handle> {
///         Vec::new()
///     }
/// }
///
/// let mut gc = Gc::new();
/// let first = gc.allocate::<Leaf>();
/// let second = gc.allocate::<Leaf>();
/// assert!(first < second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    /// Wraps a raw counter value. Only the handle table mints handles.
    pub(crate) fn from_raw(raw: usize) -> Self {
        Handle(raw)
    }

    /// Returns the raw integer value.
    ///
    /// Intended for diagnostics and logging only; the value carries no
    /// meaning beyond identity and allocation order.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
