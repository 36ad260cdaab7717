//! Entry Store
//!
//! An ordered collection of directory entries. Entries are inserted in
//! ascending path order, can be regrouped by depth with a stable re-sort, and
//! are read back either directly or as leveled `(depth, ordinal, path)` rows.

mod entry;
mod levels;
mod list;

pub use entry::Entry;
pub use levels::{Level, Levels};
pub use list::{EntryList, Iter};
