//! Handle table mapping opaque handles to collector-owned object records.
//!
//! The table is the single owner of every managed object: hosts interact
//! with objects only through handles, and storage is released only through
//! the table's release paths (which run the object's `finalize` hook first).

use std::any::Any;
use std::collections::HashMap;
use std::mem;

use crate::{Collectable, GcError, GcResult, Handle};

/// A single entry in the handle table.
///
/// Owns exactly one managed object, records the allocation size of its
/// concrete type (informational), and carries the reachability flag the
/// mark and sweep phases communicate through.
pub(crate) struct ObjectRecord {
    /// The managed object, exclusively owned by the table.
    object: Box<dyn Collectable>,
    /// `size_of` the concrete type at allocation time, in bytes.
    size: usize,
    /// Reachability flag; only meaningful between a mark and the next sweep.
    reachable: bool,
}

/// Maps opaque handles to object records.
///
/// Handles are minted from a monotonically increasing counter, so no two
/// handles from the same table ever collide, including handles whose
/// objects have long been released.
#[derive(Default)]
pub struct HandleTable {
    records: HashMap<Handle, ObjectRecord>,
    next_handle: usize,
}

impl HandleTable {
    /// Creates an empty handle table.
    pub fn new() -> Self {
        HandleTable {
            records: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Allocates a new default-initialized `T` owned by the table and
    /// returns its freshly minted handle.
    ///
    /// Out-of-memory during the boxed allocation aborts the process via the
    /// global allocator before any table state is touched, so a partial
    /// handle is never issued.
    pub fn allocate<T: Collectable + Default>(&mut self) -> Handle {
        let object: Box<dyn Collectable> = Box::new(T::default());
        let handle = Handle::from_raw(self.next_handle);
        self.records.insert(
            handle,
            ObjectRecord {
                object,
                size: mem::size_of::<T>(),
                reachable: false,
            },
        );
        self.next_handle += 1;
        handle
    }

    /// Returns a mutable reference to the object for `handle`, downcast to
    /// its concrete type `T`.
    ///
    /// The downcast is checked: requesting the wrong type yields
    /// `GcError::TypeMismatch` rather than undefined behavior, and a handle
    /// no longer in the table yields `GcError::InvalidHandle`. Handles are
    /// invalidated by any sweep that releases their object, so holding the
    /// returned reference across a collection is prevented by borrowing.
    pub fn dereference<T: Collectable>(&mut self, handle: Handle) -> GcResult<&mut T> {
        let record = self
            .records
            .get_mut(&handle)
            .ok_or(GcError::InvalidHandle(handle))?;
        let object: &mut dyn Any = record.object.as_mut();
        object.downcast_mut::<T>().ok_or(GcError::TypeMismatch(handle))
    }

    /// Returns whether `handle` currently has a record in the table.
    pub fn contains(&self, handle: Handle) -> bool {
        self.records.contains_key(&handle)
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a snapshot of every live handle, sorted ascending.
    ///
    /// Sorting gives a deterministic order for diagnostics; the contract
    /// only requires a stable order for an unmodified table.
    pub fn all_ids(&self) -> Vec<Handle> {
        let mut ids: Vec<Handle> = self.records.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Finalizes and releases each record named in `handles`.
    ///
    /// Handles not present in the table are skipped, so releasing is
    /// idempotent and tolerates duplicates within `handles`.
    pub fn release_set(&mut self, handles: &[Handle]) {
        for &handle in handles {
            if let Some(mut record) = self.records.remove(&handle) {
                record.object.finalize();
                // record dropped here, releasing the object's storage
            }
        }
    }

    /// Finalizes and releases every record, leaving the table empty.
    pub fn release_all(&mut self) {
        for (_, mut record) in self.records.drain() {
            record.object.finalize();
        }
    }

    /// Sum of the recorded allocation sizes of all live records, in bytes.
    pub(crate) fn live_bytes(&self) -> usize {
        self.records.values().map(|record| record.size).sum()
    }

    /// Resets every record's reachability flag to false.
    pub(crate) fn clear_marks(&mut self) {
        for record in self.records.values_mut() {
            record.reachable = false;
        }
    }

    /// Marks the record for `handle` reachable.
    ///
    /// Returns true only if the record exists and was not already marked;
    /// the mark phase uses this as its visited check, which is what makes
    /// cycles and diamonds terminate.
    pub(crate) fn mark_reachable(&mut self, handle: Handle) -> bool {
        match self.records.get_mut(&handle) {
            Some(record) if !record.reachable => {
                record.reachable = true;
                true
            }
            _ => false,
        }
    }

    /// Returns the handles referenced by the object for `handle`, or None
    /// if the handle is dangling.
    pub(crate) fn references_of(&self, handle: Handle) -> Option<Vec<Handle>> {
        self.records
            .get(&handle)
            .map(|record| record.object.references())
    }

    /// Handles of every record currently flagged reachable, sorted.
    pub(crate) fn reachable_ids(&self) -> Vec<Handle> {
        let mut ids: Vec<Handle> = self
            .records
            .iter()
            .filter(|(_, record)| record.reachable)
            .map(|(&handle, _)| handle)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Handles of every record currently flagged unreachable, sorted.
    pub(crate) fn unreachable_ids(&self) -> Vec<Handle> {
        let mut ids: Vec<Handle> = self
            .records
            .iter()
            .filter(|(_, record)| !record.reachable)
            .map(|(&handle, _)| handle)
            .collect();
        ids.sort_unstable();
        ids
    }
}
