//! The contract every collector-managed object type must satisfy.

use std::any::Any;

use crate::Handle;

/// Trait implemented by any type the host wants the collector to manage.
///
/// The collector discovers the reference graph by querying `references` at
/// mark time and notifies objects of their release through `finalize`. The
/// `Any` supertrait lets `dereference` recover the concrete type with a
/// checked downcast instead of an unchecked cast.
///
/// # Example
///
/// ```
/// use collector::{Collectable, Handle};
///
/// /// A node holding references to two other managed objects.
/// #[derive(Default)]
/// struct Pair {
///     left: Option<Handle>,
///     right: Option<Handle>,
/// }
///
/// impl Collectable for Pair {
///     fn references(&self) -> Vec<Handle> {
///         self.left.into_iter().chain(self.right).collect()
///     }
/// }
/// ```
pub trait Collectable: Any {
    /// Returns every handle this object currently holds a reference to,
    /// in any order.
    ///
    /// Called by the mark phase, possibly several times over the object's
    /// lifetime. Implementations must not mutate object state and must not
    /// call back into the collector; allocating or dereferencing during
    /// marking is a contract violation.
    fn references(&self) -> Vec<Handle>;

    /// One-time cleanup hook, invoked immediately before the object's
    /// storage is released.
    ///
    /// Called exactly once per object, either when a sweep finds the object
    /// unreachable or during full teardown. Implementations must not
    /// resurrect the object by handing its handle to another live object.
    fn finalize(&mut self) {}
}
