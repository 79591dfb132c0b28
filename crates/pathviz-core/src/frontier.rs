//! Indexed priority frontier for cost-ordered searches.
//!
//! Entries live in a binary min-heap keyed by `(priority, sequence)`.
//! Lower priorities are popped first; ties are broken by the sequence
//! number, which is assigned on insertion and refreshed on every successful
//! [`decrease_key`](IndexedHeap::decrease_key). An item→slot map makes
//! membership tests O(1) and decrease-key O(log n).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// A priority value with a total order.
pub trait Priority: Copy {
    fn cmp_priority(&self, other: &Self) -> Ordering;
}

impl Priority for f64 {
    #[inline]
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Lexicographic: first component, then second.
impl Priority for (f64, f64) {
    #[inline]
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.0
            .total_cmp(&other.0)
            .then_with(|| self.1.total_cmp(&other.1))
    }
}

/// An entry in the heap.
#[derive(Debug, Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
    /// Monotonically increasing tie-breaker. Lower = older.
    seq: u64,
}

impl<T, P: Priority> Entry<T, P> {
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp_priority(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A binary min-heap with decrease-key.
///
/// Items must be cheap to copy and hashable: they act as their own handle
/// into the heap.
#[derive(Debug, Clone)]
pub struct IndexedHeap<T, P = f64> {
    heap: Vec<Entry<T, P>>,
    positions: HashMap<T, usize>,
    /// Next sequence number; always greater than every assigned one.
    next_seq: u64,
}

impl<T, P> IndexedHeap<T, P>
where
    T: Copy + Eq + Hash,
    P: Priority,
{
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `item` is currently queued.
    #[inline]
    pub fn has(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// The item that [`extract_min`](Self::extract_min) would return.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|e| &e.item)
    }

    /// The stored priority of `item`, if queued.
    pub fn priority(&self, item: &T) -> Option<P> {
        self.positions.get(item).map(|&i| self.heap[i].priority)
    }

    /// The stored sequence number of `item`, if queued.
    pub fn sequence(&self, item: &T) -> Option<u64> {
        self.positions.get(item).map(|&i| self.heap[i].seq)
    }

    /// Queue `item` with a fresh sequence number.
    ///
    /// If the item is already queued this behaves like
    /// [`decrease_key`](Self::decrease_key) and returns `false`.
    pub fn insert(&mut self, item: T, priority: P) -> bool {
        if self.has(&item) {
            self.decrease_key(item, priority);
            return false;
        }
        let seq = self.bump();
        self.heap.push(Entry {
            item,
            priority,
            seq,
        });
        let idx = self.heap.len() - 1;
        self.positions.insert(item, idx);
        self.sift_up(idx);
        true
    }

    /// Lower the priority of a queued item.
    ///
    /// Does nothing and returns `false` if the item is absent or if
    /// `new_priority` is not strictly less than the stored one. On success
    /// the entry gets a new sequence number, greater than any other.
    pub fn decrease_key(&mut self, item: T, new_priority: P) -> bool {
        let Some(&idx) = self.positions.get(&item) else {
            return false;
        };
        if new_priority.cmp_priority(&self.heap[idx].priority) != Ordering::Less {
            return false;
        }
        let seq = self.bump();
        let entry = &mut self.heap[idx];
        entry.priority = new_priority;
        entry.seq = seq;
        self.sift_up(idx);
        true
    }

    /// Remove and return the item with the smallest `(priority, sequence)`.
    pub fn extract_min(&mut self) -> Option<T> {
        self.extract_min_with_priority().map(|(item, _)| item)
    }

    /// Like [`extract_min`](Self::extract_min), also returning the priority.
    pub fn extract_min_with_priority(&mut self) -> Option<(T, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        self.positions.remove(&root.item);
        if !self.heap.is_empty() {
            self.positions.insert(self.heap[0].item, 0);
            self.sift_down(0);
        }
        Some((root.item, root.priority))
    }

    /// Remove every entry. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    #[inline]
    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].key_cmp(&self.heap[parent]) == Ordering::Less {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.heap[left].key_cmp(&self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < n && self.heap[right].key_cmp(&self.heap[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i].item, i);
        self.positions.insert(self.heap[j].item, j);
    }
}

impl<T, P> Default for IndexedHeap<T, P>
where
    T: Copy + Eq + Hash,
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small deterministic generator so the model test needs no extra crates.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            self.0 >> 33
        }
    }

    #[test]
    fn test_basic_insert_extract() {
        let mut h = IndexedHeap::new();
        h.insert('a', 3.0);
        h.insert('b', 1.0);
        h.insert('c', 2.0);

        assert_eq!(h.peek(), Some(&'b'));
        assert_eq!(h.extract_min(), Some('b'));
        assert_eq!(h.extract_min(), Some('c'));
        assert_eq!(h.extract_min(), Some('a'));
        assert_eq!(h.extract_min(), None);
    }

    #[test]
    fn test_fifo_same_priority() {
        let mut h = IndexedHeap::new();
        h.insert("first", 1.0);
        h.insert("second", 1.0);
        h.insert("third", 1.0);

        assert_eq!(h.extract_min(), Some("first"));
        assert_eq!(h.extract_min(), Some("second"));
        assert_eq!(h.extract_min(), Some("third"));
    }

    #[test]
    fn test_decrease_key_reorders() {
        let mut h = IndexedHeap::new();
        h.insert(1, 5.0);
        h.insert(2, 4.0);
        h.insert(3, 3.0);

        assert!(h.decrease_key(1, 1.0));
        assert_eq!(h.priority(&1), Some(1.0));
        assert_eq!(h.extract_min(), Some(1));
        assert_eq!(h.extract_min(), Some(3));
        assert_eq!(h.extract_min(), Some(2));
    }

    #[test]
    fn test_decrease_key_rejects_equal_or_larger() {
        let mut h = IndexedHeap::new();
        h.insert(7, 2.0);
        let seq = h.sequence(&7);

        assert!(!h.decrease_key(7, 2.0));
        assert!(!h.decrease_key(7, 9.0));
        assert_eq!(h.priority(&7), Some(2.0));
        assert_eq!(h.sequence(&7), seq);
    }

    #[test]
    fn test_decrease_key_absent_is_noop() {
        let mut h: IndexedHeap<u32> = IndexedHeap::new();
        assert!(!h.decrease_key(42, 0.0));
        assert!(h.is_empty());
    }

    #[test]
    fn test_decrease_key_bumps_sequence() {
        let mut h = IndexedHeap::new();
        h.insert('x', 5.0);
        h.insert('y', 2.0);
        // 'x' relaxed to the same priority as 'y' now sorts after it.
        assert!(h.decrease_key('x', 2.0));
        assert!(h.sequence(&'x') > h.sequence(&'y'));
        assert_eq!(h.extract_min(), Some('y'));
        assert_eq!(h.extract_min(), Some('x'));
    }

    #[test]
    fn test_insert_existing_acts_as_decrease_key() {
        let mut h = IndexedHeap::new();
        assert!(h.insert(1, 3.0));
        assert!(!h.insert(1, 1.0));
        assert_eq!(h.len(), 1);
        assert_eq!(h.priority(&1), Some(1.0));
        assert!(!h.insert(1, 8.0));
        assert_eq!(h.priority(&1), Some(1.0));
    }

    #[test]
    fn test_has_tracks_membership() {
        let mut h = IndexedHeap::new();
        h.insert(1, 1.0);
        h.insert(2, 2.0);
        assert!(h.has(&1));
        h.extract_min();
        assert!(!h.has(&1));
        assert!(h.has(&2));
        h.clear();
        assert!(!h.has(&2));
        assert!(h.is_empty());
        assert_eq!(h.peek(), None);
    }

    #[test]
    fn test_tuple_priority_breaks_ties_on_second() {
        let mut h: IndexedHeap<char, (f64, f64)> = IndexedHeap::new();
        h.insert('a', (6.0, 3.0));
        h.insert('b', (6.0, 1.0));
        h.insert('c', (5.0, 5.0));
        assert_eq!(h.extract_min(), Some('c'));
        assert_eq!(h.extract_min(), Some('b'));
        assert_eq!(h.extract_min(), Some('a'));
    }

    #[test]
    fn test_infinite_priorities_sort_last() {
        let mut h = IndexedHeap::new();
        h.insert(0, f64::INFINITY);
        h.insert(1, 100.0);
        assert_eq!(h.extract_min_with_priority(), Some((1, 100.0)));
        assert_eq!(h.extract_min_with_priority(), Some((0, f64::INFINITY)));
    }

    #[test]
    fn test_matches_naive_model() {
        // Model: (item, priority, seq) list, min found by linear scan.
        let mut rng = Lcg(0x5eed);
        let mut h: IndexedHeap<u32, f64> = IndexedHeap::new();
        let mut model: Vec<(u32, f64, u64)> = Vec::new();
        let mut seq = 0u64;

        for _ in 0..2000 {
            match rng.next() % 3 {
                0 => {
                    let item = (rng.next() % 64) as u32;
                    let prio = (rng.next() % 20) as f64;
                    if let Some(e) = model.iter_mut().find(|e| e.0 == item) {
                        if prio < e.1 {
                            e.1 = prio;
                            e.2 = seq;
                            seq += 1;
                        }
                    } else {
                        model.push((item, prio, seq));
                        seq += 1;
                    }
                    h.insert(item, prio);
                }
                1 => {
                    if model.is_empty() {
                        assert_eq!(h.extract_min(), None);
                        continue;
                    }
                    let (pos, _) = model
                        .iter()
                        .enumerate()
                        .min_by(|(_, a), (_, b)| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)))
                        .unwrap();
                    let expected = model.remove(pos);
                    assert_eq!(h.extract_min(), Some(expected.0));
                }
                _ => {
                    let item = (rng.next() % 64) as u32;
                    let prio = (rng.next() % 20) as f64;
                    let expected = match model.iter_mut().find(|e| e.0 == item) {
                        Some(e) if prio < e.1 => {
                            e.1 = prio;
                            e.2 = seq;
                            seq += 1;
                            true
                        }
                        _ => false,
                    };
                    assert_eq!(h.decrease_key(item, prio), expected);
                }
            }
            assert_eq!(h.len(), model.len());
        }
    }
}
