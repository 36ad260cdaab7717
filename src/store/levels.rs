//! Depth-run ordinal projection over an `EntryList`

use std::fmt;
use std::iter::FusedIterator;

use super::entry::Entry;
use super::list::Iter;

/// One output row: depth, 1-based position inside the current run of equal
/// depths, and the entry's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level<'a> {
    pub depth: usize,
    pub ordinal: usize,
    pub path: &'a str,
}

impl fmt::Display for Level<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.depth, self.ordinal, self.path)
    }
}

/// Iterator returned by `EntryList::levels`.
pub struct Levels<'a> {
    entries: Iter<'a>,
    prev_depth: Option<usize>,
    ordinal: usize,
}

impl<'a> Levels<'a> {
    pub(super) fn new(entries: Iter<'a>) -> Self {
        Self {
            entries,
            prev_depth: None,
            ordinal: 0,
        }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = Level<'a>;

    fn next(&mut self) -> Option<Level<'a>> {
        let entry: &'a Entry = self.entries.next()?;
        let depth = entry.depth();
        self.ordinal = if self.prev_depth == Some(depth) {
            self.ordinal + 1
        } else {
            1
        };
        self.prev_depth = Some(depth);
        Some(Level {
            depth,
            ordinal: self.ordinal,
            path: entry.path(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Levels<'_> {}

impl FusedIterator for Levels<'_> {}
