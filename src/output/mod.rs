//! Listing output
//!
//! Renders an `EntryList` as `<depth>:<ordinal>:<path>` lines, either into any
//! writer or straight into a file that is truncated first.

mod listing;

pub use listing::{write_listing, write_listing_file};
