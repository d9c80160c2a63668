#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Pagination model for repository-style data access.
//!
//! Requests position a page either by numeric offset or by a keyset cursor
//! of last-seen sort-key values; responses report back enough state to
//! request the adjacent pages without the caller re-deriving cursors.
//! Keyset traversal derives its navigation from boundary-row cursors, which
//! keeps it immune to the insert/delete skew that corrupts offset
//! pagination. All types are immutable values; cursor wire tokens are
//! version-tagged JSON in base64url.

pub mod cursor;
pub mod cursored;
pub mod errors;
pub mod limit;
pub mod page;
pub mod request;

pub use cursor::{CursorToken, PageCursor, Traversal};
pub use cursored::CursoredPage;
pub use errors::Error;
pub use limit::Limit;
pub use page::Page;
pub use request::{PageMode, PageRequest};
