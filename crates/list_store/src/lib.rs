//! # List Store
//!
//! Session-scoped todo lists: validation, mutation and the derived state a
//! page needs to display them. The caller owns the [`ListCollection`] (one
//! per session) and passes it into every operation.
//!
//! Lists and todos are identified by position only. There is no locking
//! here; two requests racing on the same session with indices taken from
//! an older page can address the wrong element after a deletion.

pub mod error;
pub mod store;
pub mod structs;
pub mod view;

// Re-exports
pub use error::{ListStoreError, NameKind, Result};
pub use store::{validate_name, MAX_NAME_LEN, MIN_NAME_LEN};
pub use structs::{Item, ListCollection, TodoList};
pub use view::{display_order, Completable, DisplayOrder};
