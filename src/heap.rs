//! Array-backed binary min-heap of weighted entries.
//!
//! The forward-decay reservoir needs two things a generic priority queue
//! hides: cheap eviction of the smallest key, and bulk extraction of every
//! entry so keys can be rescaled and reinserted. Entries live in one `Vec`;
//! the children of slot `i` are `2i + 1` and `2i + 2`.

/// A retained observation and its priority key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEntry {
    /// Priority; smaller keys are evicted first.
    pub key: f64,
    /// The observation.
    pub value: f64,
}

/// Min-heap ordered by [`WeightedEntry::key`].
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    entries: Vec<WeightedEntry>,
}

impl MinHeap {
    /// Empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the smallest key, if any.
    pub fn peek(&self) -> Option<&WeightedEntry> {
        self.entries.first()
    }

    /// Insert an entry, restoring heap order.
    pub fn push(&mut self, entry: WeightedEntry) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop(&mut self) -> Option<WeightedEntry> {
        let last = self.entries.len().checked_sub(1)?;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        self.sift_down(0);
        min
    }

    /// Entries in heap (not sorted) order.
    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    /// Values in heap order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Remove every entry, returning them in heap order.
    ///
    /// Keeps the allocation for the returned `Vec`; the heap itself restarts
    /// with the same reserved capacity.
    pub fn take_all(&mut self) -> Vec<WeightedEntry> {
        let capacity = self.entries.capacity();
        std::mem::replace(&mut self.entries, Vec::with_capacity(capacity))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.entries[child].key >= self.entries[parent].key {
                break;
            }
            self.entries.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let n = self.entries.len();
        loop {
            let left = 2 * parent + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < n && self.entries[right].key < self.entries[left].key {
                smallest = right;
            }
            if self.entries[smallest].key >= self.entries[parent].key {
                break;
            }
            self.entries.swap(parent, smallest);
            parent = smallest;
        }
    }
}
