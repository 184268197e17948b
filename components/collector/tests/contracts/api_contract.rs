//! Contract tests verifying the collector API matches the contract specification.
//! These tests ensure all exported types and functions exist with correct signatures.

use collector::{Collectable, Gc, GcError, GcState, GcStats, Handle, HandleTable};

/// Minimal managed type used to exercise the API shape.
#[derive(Default)]
struct Probe {
    refs: Vec<Handle>,
}

impl Collectable for Probe {
    fn references(&self) -> Vec<Handle> {
        self.refs.clone()
    }
}

/// Test Gc contract: new() -> Self
#[test]
fn contract_gc_new() {
    let gc = Gc::new();
    assert_eq!(gc.state(), GcState::Empty);
}

/// Test Gc contract: allocate::<T>() -> Handle
#[test]
fn contract_gc_allocate() {
    let mut gc = Gc::new();
    let handle: Handle = gc.allocate::<Probe>();
    assert!(gc.contains(handle));
}

/// Test Gc contract: dereference::<T>(Handle) -> GcResult<&mut T>
#[test]
fn contract_gc_dereference() {
    let mut gc = Gc::new();
    let handle = gc.allocate::<Probe>();
    let probe: &mut Probe = gc.dereference::<Probe>(handle).unwrap();
    assert!(probe.refs.is_empty());
}

/// Test Gc contract: set_root_set(&[Handle]) -> ()
#[test]
fn contract_gc_set_root_set() {
    let mut gc = Gc::new();
    let handle = gc.allocate::<Probe>();
    gc.set_root_set(&[handle]);
    assert_eq!(gc.state(), GcState::Marked);
}

/// Test Gc contract: collect() -> GcResult<()>
#[test]
fn contract_gc_collect() {
    let mut gc = Gc::new();
    let handle = gc.allocate::<Probe>();
    gc.set_root_set(&[handle]);
    gc.collect().unwrap();
    assert_eq!(gc.state(), GcState::Populated);
}

/// Test Gc contract: collect() outside Marked fails with InvalidState
#[test]
fn contract_gc_collect_invalid_state() {
    let mut gc = Gc::new();
    gc.allocate::<Probe>();
    assert!(matches!(gc.collect(), Err(GcError::InvalidState(_))));
}

/// Test Gc contract: collect_all() -> ()
#[test]
fn contract_gc_collect_all() {
    let mut gc = Gc::new();
    gc.allocate::<Probe>();
    gc.collect_all();
    assert_eq!(gc.state(), GcState::Empty);
    assert_eq!(gc.object_count(), 0);
}

/// Test Gc contract: all_ids() -> Vec<Handle>
#[test]
fn contract_gc_all_ids() {
    let mut gc = Gc::new();
    let a = gc.allocate::<Probe>();
    let b = gc.allocate::<Probe>();
    assert_eq!(gc.all_ids(), vec![a, b]);
}

/// Test Gc contract: reachable_ids() -> GcResult<Vec<Handle>>
#[test]
fn contract_gc_reachable_ids() {
    let mut gc = Gc::new();
    let handle = gc.allocate::<Probe>();
    gc.set_root_set(&[handle]);
    assert_eq!(gc.reachable_ids().unwrap(), vec![handle]);
}

/// Test Gc contract: stats() -> GcStats
#[test]
fn contract_gc_stats() {
    let gc = Gc::new();
    let stats: GcStats = gc.stats();
    assert_eq!(stats.object_count, 0);
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(stats.collection_count, 0);
}

/// Test HandleTable contract: the table is usable standalone
#[test]
fn contract_handle_table_standalone() {
    let mut table = HandleTable::new();
    let handle = table.allocate::<Probe>();
    assert_eq!(table.all_ids(), vec![handle]);

    table.release_set(&[handle]);
    assert!(table.is_empty());
}

/// Test Handle contract: Copy, Ord, Display
#[test]
fn contract_handle_traits() {
    let mut gc = Gc::new();
    let a = gc.allocate::<Probe>();
    let b = a; // Copy
    assert_eq!(a, b);
    assert!(!a.to_string().is_empty());
}

/// Test Collectable contract: finalize has a default implementation
#[test]
fn contract_collectable_default_finalize() {
    let mut probe = Probe::default();
    probe.finalize();
}
