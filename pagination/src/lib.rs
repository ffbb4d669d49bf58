//! Client-side loading of paginated lists.
//!
//! [`PaginatedLoader`] drives an opaque page fetch and accumulates the pages
//! into a [`ListState`] for a UI layer to render. It supports a restart when
//! the list's dependencies (filters) change, an explicit reload, "load more",
//! and optimistic local edits through `set_items`.

mod loader;
pub mod state;

pub use loader::PaginatedLoader;
pub use state::{FALLBACK_ERROR, ListState, LoadKind};
