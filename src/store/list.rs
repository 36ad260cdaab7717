//! EntryList - ordered, doubly-linked collection of entries
//!
//! Nodes live in an arena (`Vec<Node>`) and link to each other by index, so
//! moving an entry never invalidates another node's links. The arena only
//! grows; unlinking a node and relinking it elsewhere reuses its slot.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::Result;

use super::entry::Entry;
use super::levels::Levels;

#[derive(Debug, Clone)]
struct Node {
    entry: Entry,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered sequence of entries.
///
/// Built with `insert_sorted`, the sequence is in ascending byte-wise order of
/// path, with equal paths kept in arrival order. `reorder_by_depth` then
/// regroups it by depth without disturbing the order inside each depth.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list by sorted insertion of every entry in `entries`.
    pub fn from_unsorted<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut list = Self::new();
        for entry in entries {
            list.insert_sorted(entry)?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&Entry> {
        self.head.map(|i| &self.nodes[i].entry)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.tail.map(|i| &self.nodes[i].entry)
    }

    /// Insert keeping ascending path order.
    ///
    /// The new entry lands after every entry whose path is less than or equal
    /// to its own, so duplicates stay in arrival order. Appending past the
    /// current tail is checked first, which makes already-sorted input O(1)
    /// per insertion.
    pub fn insert_sorted(&mut self, entry: Entry) -> Result<()> {
        let at = match self.tail {
            Some(t) if self.nodes[t].entry.path() <= entry.path() => None,
            _ => self.first_after(entry.path()),
        };
        let idx = self.alloc(entry)?;
        match at {
            Some(at) => self.link_before(idx, at),
            None => self.link_back(idx),
        }
        Ok(())
    }

    /// Append at the tail without looking at the path.
    ///
    /// Mixing this with `insert_sorted` gives up the sorted-path ordering.
    pub fn push_back(&mut self, entry: Entry) -> Result<()> {
        let idx = self.alloc(entry)?;
        self.link_back(idx);
        Ok(())
    }

    /// Stable insertion sort on depth.
    ///
    /// Each entry moves left past every predecessor with a strictly greater
    /// depth and stops at the first one with depth <= its own. Entries of
    /// equal depth never pass each other.
    pub fn reorder_by_depth(&mut self) {
        let mut cursor = self.head.and_then(|h| self.nodes[h].next);
        while let Some(idx) = cursor {
            cursor = self.nodes[idx].next;
            let depth = self.nodes[idx].entry.depth();

            let mut scan = self.nodes[idx].prev;
            let mut moved = false;
            while let Some(p) = scan {
                if self.nodes[p].entry.depth() <= depth {
                    break;
                }
                scan = self.nodes[p].prev;
                moved = true;
            }

            if moved {
                self.unlink(idx);
                match scan {
                    Some(p) => self.link_after(idx, p),
                    None => self.link_front(idx),
                }
            }
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    /// `(depth, depth-run ordinal, path)` for each entry in sequence order.
    ///
    /// The ordinal restarts at 1 whenever the depth differs from the previous
    /// entry's depth. It is only a per-depth count once `reorder_by_depth` has
    /// made each depth contiguous.
    pub fn levels(&self) -> Levels<'_> {
        Levels::new(self.iter())
    }

    /// Consume the list, returning entries in sequence order.
    pub fn into_entries(self) -> Vec<Entry> {
        let order: Vec<usize> = LinkOrder::new(&self.nodes, self.head).collect();
        let mut slots: Vec<Option<Entry>> =
            self.nodes.into_iter().map(|n| Some(n.entry)).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }

    fn first_after(&self, path: &str) -> Option<usize> {
        LinkOrder::new(&self.nodes, self.head).find(|&i| self.nodes[i].entry.path() > path)
    }

    fn alloc(&mut self, entry: Entry) -> Result<usize> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node {
            entry,
            prev: None,
            next: None,
        });
        Ok(self.nodes.len() - 1)
    }

    fn link_before(&mut self, idx: usize, at: usize) {
        let prev = self.nodes[at].prev;
        self.nodes[idx].prev = prev;
        self.nodes[idx].next = Some(at);
        self.nodes[at].prev = Some(idx);
        match prev {
            Some(p) => self.nodes[p].next = Some(idx),
            None => self.head = Some(idx),
        }
    }

    fn link_after(&mut self, idx: usize, at: usize) {
        let next = self.nodes[at].next;
        self.nodes[idx].prev = Some(at);
        self.nodes[idx].next = next;
        self.nodes[at].next = Some(idx);
        match next {
            Some(n) => self.nodes[n].prev = Some(idx),
            None => self.tail = Some(idx),
        }
    }

    fn link_front(&mut self, idx: usize) {
        match self.head {
            Some(h) => self.link_before(idx, h),
            None => self.link_only(idx),
        }
    }

    fn link_back(&mut self, idx: usize) {
        match self.tail {
            Some(t) => self.link_after(idx, t),
            None => self.link_only(idx),
        }
    }

    fn link_only(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
        self.head = Some(idx);
        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev.take();
        let next = self.nodes[idx].next.take();
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }
}

/// Renders `(path, depth)->(path, depth)...` followed by the element count.
impl fmt::Display for EntryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "->")?;
            }
            write!(f, "{}", entry)?;
        }
        writeln!(f)?;
        write!(f, "The list contains {} elements.", self.len())
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Node indices in link order, head to tail.
struct LinkOrder<'a> {
    nodes: &'a [Node],
    cursor: Option<usize>,
}

impl<'a> LinkOrder<'a> {
    fn new(nodes: &'a [Node], head: Option<usize>) -> Self {
        Self {
            nodes,
            cursor: head,
        }
    }
}

impl Iterator for LinkOrder<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        self.cursor = self.nodes[idx].next;
        Some(idx)
    }
}

/// Borrowing iterator over an `EntryList` in sequence order.
pub struct Iter<'a> {
    nodes: &'a [Node],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.entry)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn paths(list: &EntryList) -> Vec<&str> {
        list.iter().map(Entry::path).collect()
    }

    fn pairs(list: &EntryList) -> Vec<(String, usize)> {
        list.iter().map(|e| (e.path().to_string(), e.depth())).collect()
    }

    /// Walks the links in both directions and checks they agree.
    fn assert_links_consistent(list: &EntryList) {
        let forward: Vec<&Entry> = list.iter().collect();
        let mut backward: Vec<&Entry> = list.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
        assert_eq!(list.first(), forward.first().copied());
        assert_eq!(list.last(), forward.last().copied());
    }

    /// Seeded random paths (depth = segment count), shuffled before insertion.
    fn shuffled_entries(count: usize, seed: u64) -> Vec<Entry> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut entries: Vec<Entry> = (0..count)
            .map(|_| {
                let depth = rng.gen_range(1..=5);
                let segments: Vec<String> = (0..depth)
                    .map(|_| char::from(rng.gen_range(b'a'..=b'd')).to_string())
                    .collect();
                Entry::new(format!("/{}", segments.join("/")), depth)
            })
            .collect();
        entries.shuffle(&mut rng);
        entries
    }

    #[test]
    fn test_insert_into_empty() {
        let mut list = EntryList::new();
        list.insert_sorted(Entry::new("/a", 1)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.first(), list.last());
        assert_links_consistent(&list);
    }

    #[test]
    fn test_insert_new_head_and_tail() {
        let mut list = EntryList::new();
        list.insert_sorted(Entry::new("/m", 1)).unwrap();
        list.insert_sorted(Entry::new("/a", 1)).unwrap();
        list.insert_sorted(Entry::new("/z", 1)).unwrap();
        assert_eq!(paths(&list), vec!["/a", "/m", "/z"]);
        assert_eq!(list.first().unwrap().path(), "/a");
        assert_eq!(list.last().unwrap().path(), "/z");
        assert_links_consistent(&list);
    }

    #[test]
    fn test_insert_before_head_repeatedly() {
        // Every insertion goes in front of a node with no predecessor.
        let mut list = EntryList::new();
        for name in ["/e", "/d", "/c", "/b", "/a"] {
            list.insert_sorted(Entry::new(name, 1)).unwrap();
            assert_links_consistent(&list);
        }
        assert_eq!(paths(&list), vec!["/a", "/b", "/c", "/d", "/e"]);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut list = EntryList::new();
        for name in ["/a", "/c", "/e", "/b", "/d"] {
            list.insert_sorted(Entry::new(name, 1)).unwrap();
        }
        assert_eq!(paths(&list), vec!["/a", "/b", "/c", "/d", "/e"]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_duplicates_keep_arrival_order() {
        let mut list = EntryList::new();
        list.insert_sorted(Entry::new("/b", 1)).unwrap();
        list.insert_sorted(Entry::new("/a", 1)).unwrap();
        list.insert_sorted(Entry::new("/a", 2)).unwrap();
        list.insert_sorted(Entry::new("/a", 3)).unwrap();
        assert_eq!(
            pairs(&list),
            vec![
                ("/a".to_string(), 1),
                ("/a".to_string(), 2),
                ("/a".to_string(), 3),
                ("/b".to_string(), 1),
            ]
        );
        assert_links_consistent(&list);
    }

    #[test]
    fn test_byte_wise_ordering() {
        // '/' (0x2f) sorts before letters, '-' (0x2d) before '/', 'B' before 'a'.
        let list = EntryList::from_unsorted([
            Entry::new("/a/b", 2),
            Entry::new("/a-b", 1),
            Entry::new("/B", 1),
            Entry::new("/a", 1),
        ])
        .unwrap();
        assert_eq!(paths(&list), vec!["/B", "/a", "/a-b", "/a/b"]);
    }

    #[test]
    fn test_sorted_insertion_over_shuffled_input() {
        for seed in 0..20 {
            let list = EntryList::from_unsorted(shuffled_entries(60, seed)).unwrap();
            let got = paths(&list);
            let mut expected = got.clone();
            expected.sort();
            assert_eq!(got, expected, "seed {}", seed);
            assert_links_consistent(&list);
        }
    }

    #[test]
    fn test_reorder_scenario() {
        let mut list = EntryList::from_unsorted([
            Entry::new("/a/x", 2),
            Entry::new("/a", 1),
            Entry::new("/a/b/y", 3),
            Entry::new("/a/b", 2),
        ])
        .unwrap();
        assert_eq!(paths(&list), vec!["/a", "/a/b", "/a/b/y", "/a/x"]);

        list.reorder_by_depth();
        assert_eq!(paths(&list), vec!["/a", "/a/b", "/a/x", "/a/b/y"]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_reorder_moves_to_new_head() {
        let mut list = EntryList::new();
        list.push_back(Entry::new("/r/deep/er", 3)).unwrap();
        list.push_back(Entry::new("/r/deep", 2)).unwrap();
        list.push_back(Entry::new("/r", 1)).unwrap();
        list.reorder_by_depth();
        assert_eq!(paths(&list), vec!["/r", "/r/deep", "/r/deep/er"]);
        assert_eq!(list.first().unwrap().path(), "/r");
        assert_eq!(list.last().unwrap().path(), "/r/deep/er");
        assert_links_consistent(&list);
    }

    #[test]
    fn test_reorder_keeps_tail_in_place() {
        let mut list = EntryList::new();
        list.push_back(Entry::new("/r/x", 2)).unwrap();
        list.push_back(Entry::new("/r", 1)).unwrap();
        list.push_back(Entry::new("/r/x/y", 3)).unwrap();
        list.reorder_by_depth();
        assert_eq!(paths(&list), vec!["/r", "/r/x", "/r/x/y"]);
        assert_eq!(list.last().unwrap().path(), "/r/x/y");
        assert_links_consistent(&list);
    }

    #[test]
    fn test_reorder_is_stable() {
        let mut list = EntryList::new();
        for (path, depth) in [("d2-a", 2), ("d1-a", 1), ("d2-b", 2), ("d1-b", 1), ("d2-c", 2)] {
            list.push_back(Entry::new(path, depth)).unwrap();
        }
        list.reorder_by_depth();
        assert_eq!(paths(&list), vec!["d1-a", "d1-b", "d2-a", "d2-b", "d2-c"]);
    }

    #[test]
    fn test_reorder_properties_over_shuffled_input() {
        for seed in 0..20 {
            let mut list = EntryList::from_unsorted(shuffled_entries(80, seed)).unwrap();
            let before = pairs(&list);

            list.reorder_by_depth();
            let after = pairs(&list);

            // Non-decreasing depth.
            assert!(after.windows(2).all(|w| w[0].1 <= w[1].1), "seed {}", seed);

            // Stable: within each depth, the prior relative order survives.
            for depth in 1..=5 {
                let prior: Vec<_> = before.iter().filter(|p| p.1 == depth).collect();
                let now: Vec<_> = after.iter().filter(|p| p.1 == depth).collect();
                assert_eq!(prior, now, "seed {} depth {}", seed, depth);
            }

            // Same multiset, same length.
            let mut a = before.clone();
            let mut b = after.clone();
            a.sort();
            b.sort();
            assert_eq!(a, b);

            // Idempotent.
            list.reorder_by_depth();
            assert_eq!(pairs(&list), after, "seed {}", seed);
            assert_links_consistent(&list);
        }
    }

    #[test]
    fn test_reorder_empty_and_single() {
        let mut list = EntryList::new();
        list.reorder_by_depth();
        assert!(list.is_empty());

        list.push_back(Entry::new("/only", 1)).unwrap();
        list.reorder_by_depth();
        assert_eq!(paths(&list), vec!["/only"]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_iter_double_ended() {
        let list = EntryList::from_unsorted([
            Entry::new("/c", 1),
            Entry::new("/a", 1),
            Entry::new("/b", 1),
        ])
        .unwrap();
        let mut it = list.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next().unwrap().path(), "/a");
        assert_eq!(it.next_back().unwrap().path(), "/c");
        assert_eq!(it.next().unwrap().path(), "/b");
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }

    #[test]
    fn test_into_entries_follows_links() {
        let mut list = EntryList::from_unsorted([
            Entry::new("/a/x", 2),
            Entry::new("/a", 1),
            Entry::new("/a/b", 2),
            Entry::new("/a/b/y", 3),
        ])
        .unwrap();
        list.reorder_by_depth();
        let expected: Vec<Entry> = list.iter().cloned().collect();
        assert_eq!(list.into_entries(), expected);
    }

    #[test]
    fn test_display_dump() {
        let list =
            EntryList::from_unsorted([Entry::new("/a/b", 2), Entry::new("/a", 1)]).unwrap();
        assert_eq!(
            list.to_string(),
            "(/a, 1)->(/a/b, 2)\nThe list contains 2 elements."
        );
        assert_eq!(EntryList::new().to_string(), "\nThe list contains 0 elements.");
    }
}
