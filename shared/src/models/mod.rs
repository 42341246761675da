//! Data models
//!
//! Records returned by the Fisho backend. All IDs are strings (the backend
//! emits Mongo-style `_id`, accepted as an alias of `id`).

pub mod category;
pub mod inventory;
pub mod store;

// Re-exports
pub use category::*;
pub use inventory::*;
pub use store::*;

/// Soft-delete / visibility flags carried by catalog records.
///
/// Callers never check the two flags separately; [`Activatable::is_live`]
/// is the one predicate applied when a list leaves the resolver.
pub trait Activatable {
    fn is_active(&self) -> bool;

    fn is_deleted(&self) -> bool;

    /// Active and not soft-deleted
    fn is_live(&self) -> bool {
        self.is_active() && !self.is_deleted()
    }
}

pub(crate) fn default_true() -> bool {
    true
}
