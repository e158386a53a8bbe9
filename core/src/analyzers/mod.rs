//! Scope information supplied by the front end's symbol-table analysis, and
//! the tracker that walks it in step with lowering.

pub mod err;
pub mod output;
pub mod table;

pub use err::ScopeError;
pub use output::{ScopeKind, ScopeNode};
pub use table::ScopeTracker;
