//! Collector - Tracing garbage collection behind opaque handles
//!
//! This component provides:
//! - Opaque integer handles standing in for raw pointers
//! - A handle table that exclusively owns every managed object
//! - Stop-the-world mark-and-sweep over a host-supplied root set
//! - Checked typed dereference of managed objects
//! - Introspection of live and reachable handles

pub mod collectable;
pub mod error;
pub mod gc;
pub mod handle;
pub mod table;

// Re-export main types
pub use collectable::Collectable;
pub use error::{GcError, GcResult};
pub use gc::{Gc, GcState, GcStats};
pub use handle::Handle;
pub use table::HandleTable;
