//! Leveled listing output
//!
//! One line per entry: `<depth>:<ordinal>:<path>`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::EntryList;

/// Write every entry of `list` as a listing line, in sequence order.
pub fn write_listing<W: Write>(list: &EntryList, out: W) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for level in list.levels() {
        writeln!(out, "{}", level)?;
    }
    out.flush()
}

/// Create (or truncate) `path` and write the listing into it.
pub fn write_listing_file(list: &EntryList, path: &Path) -> Result<()> {
    let to_output_error = |source| Error::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_output_error)?;
    write_listing(list, file).map_err(to_output_error)?;
    debug!(path = %path.display(), lines = list.len(), "listing written");
    Ok(())
}
