//! Stop-the-world mark-and-sweep collection over the handle table.
//!
//! This module implements the classic two-phase tracing scheme:
//! - Mark: reset every reachability flag, then walk the reference graph
//!   from the host-supplied root set with an explicit worklist
//! - Sweep: finalize and release every record the walk did not reach
//!
//! A small state machine guards the phases so a sweep can never run
//! against undefined reachability flags.

use crate::{Collectable, GcError, GcResult, Handle, HandleTable};

/// Lifecycle state of the collector.
///
/// The state tracks whether the reachability flags in the handle table are
/// currently meaningful: they are valid only in `Marked`, between a
/// `set_root_set` call and the next mutation of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcState {
    /// No objects have been allocated (or everything was torn down).
    Empty,
    /// Objects exist but reachability flags are stale or unset.
    Populated,
    /// Reachability flags are valid for the most recent root set.
    Marked,
}

/// Summary statistics for a collector instance.
///
/// Informational only; none of these values affect collection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcStats {
    /// Number of live object records.
    pub object_count: usize,
    /// Sum of the recorded allocation sizes of live records, in bytes.
    pub live_bytes: usize,
    /// Number of completed `collect` and `collect_all` passes.
    pub collection_count: usize,
}

/// A tracing garbage collector managing objects through opaque handles.
///
/// Hosts allocate objects with [`Gc::allocate`], wire references between
/// them through [`Gc::dereference`], declare entry points with
/// [`Gc::set_root_set`], and reclaim everything unreachable with
/// [`Gc::collect`]. Collection is single-threaded and stop-the-world:
/// every operation runs to completion before returning.
///
/// # Example
///
/// ```
/// use collector::{Collectable, Gc, Handle};
///
/// #[derive(Default)]
/// struct Node {
///     refs: Vec<Handle>,
/// }
///
/// impl Collectable for Node {
///     fn references(&self) -> Vec<Handle> {
///         self.refs.clone()
///     }
/// }
///
/// let mut gc = Gc::new();
/// let a = gc.allocate::<Node>();
/// let b = gc.allocate::<Node>();
/// let root = gc.allocate::<Node>();
/// gc.dereference::<Node>(root).unwrap().refs = vec![a];
///
/// gc.set_root_set(&[root]);
/// gc.collect().unwrap();
///
/// // `b` was unreachable and has been released.
/// assert_eq!(gc.all_ids(), vec![a, root]);
/// assert!(!gc.contains(b));
/// ```
pub struct Gc {
    table: HandleTable,
    state: GcState,
    collection_count: usize,
}

impl Gc {
    /// Creates a new, empty collector.
    pub fn new() -> Self {
        Gc {
            table: HandleTable::new(),
            state: GcState::Empty,
            collection_count: 0,
        }
    }

    /// Allocates a new default-initialized `T` owned by the collector and
    /// returns its handle.
    ///
    /// The new object starts unmarked, so any previous mark is invalidated
    /// and the collector drops back to `Populated`: a `set_root_set` is
    /// required before the next `collect`.
    pub fn allocate<T: Collectable + Default>(&mut self) -> Handle {
        let handle = self.table.allocate::<T>();
        self.state = GcState::Populated;
        handle
    }

    /// Returns a mutable reference to the object for `handle`, downcast to
    /// its concrete type `T`.
    ///
    /// Fails with [`GcError::InvalidHandle`] if the handle has been swept
    /// or never existed, and with [`GcError::TypeMismatch`] if the object
    /// was allocated as a different type.
    pub fn dereference<T: Collectable>(&mut self, handle: Handle) -> GcResult<&mut T> {
        self.table.dereference::<T>(handle)
    }

    /// Replaces the root set and recomputes reachability (the mark phase).
    ///
    /// Every record reachable from `roots` through the objects'
    /// `references()` edges ends flagged reachable; every other record ends
    /// flagged unreachable. Handles in `roots` (or returned by a
    /// `references()` call) that are no longer in the table are skipped,
    /// so dangling references never fail a mark.
    ///
    /// The walk uses an explicit worklist with the reachability flag as the
    /// visited set, so cycles terminate and arbitrarily deep chains cannot
    /// overflow the call stack.
    pub fn set_root_set(&mut self, roots: &[Handle]) {
        self.table.clear_marks();

        let mut worklist: Vec<Handle> = roots.to_vec();
        while let Some(handle) = worklist.pop() {
            // First visit only; repeat visits and dangling handles fall out here.
            if self.table.mark_reachable(handle) {
                if let Some(refs) = self.table.references_of(handle) {
                    worklist.extend(refs);
                }
            }
        }

        self.state = GcState::Marked;
    }

    /// Finalizes and releases every record left unmarked by the most
    /// recent mark phase (the sweep phase).
    ///
    /// Requires the collector to be in `Marked` state; calling `collect`
    /// without a preceding `set_root_set` (or twice in a row) fails with
    /// [`GcError::InvalidState`] rather than sweeping against undefined
    /// flags. After a successful sweep the survivors' flags are stale and
    /// the collector returns to `Populated`.
    pub fn collect(&mut self) -> GcResult<()> {
        if self.state != GcState::Marked {
            return Err(GcError::InvalidState(
                "collect requires a marked heap; call set_root_set first",
            ));
        }

        let dead = self.table.unreachable_ids();
        self.table.release_set(&dead);

        self.state = GcState::Populated;
        self.collection_count += 1;
        Ok(())
    }

    /// Finalizes and releases every record unconditionally (full teardown).
    ///
    /// Valid from any state; each object's `finalize` runs exactly once.
    /// The collector returns to `Empty`.
    pub fn collect_all(&mut self) {
        self.table.release_all();
        self.state = GcState::Empty;
        self.collection_count += 1;
    }

    /// Returns a snapshot of every live handle, sorted ascending.
    pub fn all_ids(&self) -> Vec<Handle> {
        self.table.all_ids()
    }

    /// Returns the handles currently flagged reachable, sorted ascending.
    ///
    /// Only meaningful in `Marked` state; otherwise the flags are stale
    /// and the call fails with [`GcError::InvalidState`].
    pub fn reachable_ids(&self) -> GcResult<Vec<Handle>> {
        if self.state != GcState::Marked {
            return Err(GcError::InvalidState(
                "reachable_ids requires a marked heap; call set_root_set first",
            ));
        }
        Ok(self.table.reachable_ids())
    }

    /// Returns whether `handle` currently refers to a live record.
    pub fn contains(&self, handle: Handle) -> bool {
        self.table.contains(handle)
    }

    /// Returns the number of live object records.
    pub fn object_count(&self) -> usize {
        self.table.len()
    }

    /// Returns the collector's current lifecycle state.
    pub fn state(&self) -> GcState {
        self.state
    }

    /// Returns summary statistics for this collector instance.
    pub fn stats(&self) -> GcStats {
        GcStats {
            object_count: self.table.len(),
            live_bytes: self.table.live_bytes(),
            collection_count: self.collection_count,
        }
    }
}

impl Default for Gc {
    fn default() -> Self {
        Self::new()
    }
}
