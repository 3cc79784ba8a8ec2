//! Binary min-heap backed by a `Vec`.

use super::types::Prioritized;

/// A binary min-heap keyed by [`Prioritized::priority`].
///
/// 0-indexed storage: parent of `i` is `(i - 1) / 2`, children are
/// `2i + 1` and `2i + 2`. Every operation leaves the heap property
/// intact: no node has a lower priority than its parent.
///
/// # Examples
///
/// ```
/// use hostel_alloc::queue::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.insert(3.0);
/// heap.insert(1.0);
/// heap.insert(2.0);
///
/// assert_eq!(heap.extract_min(), Some(1.0));
/// assert_eq!(heap.peek(), Some(&2.0));
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Prioritized> MinHeap<T> {
    /// Creates a new, empty heap.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts an item, sifting it up to its rank position. O(log n).
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the minimum-priority item. O(log n).
    ///
    /// Returns `None` when the heap is empty.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        if self.items.len() == 1 {
            return self.items.pop();
        }

        // Swap root with last, pop the old root, restore the property.
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        self.sift_down(0);
        min
    }

    /// Returns the minimum-priority item without removing it. O(1).
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// All queued items in heap-internal order.
    ///
    /// The internal order is NOT sorted; it only guarantees the heap
    /// property. Use [`ranked`](Self::ranked) for a priority-ordered view.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// All queued items sorted by ascending priority, without draining.
    ///
    /// The relative order of equal priorities is unspecified.
    pub fn ranked(&self) -> Vec<&T> {
        let mut view: Vec<&T> = self.items.iter().collect();
        view.sort_by(|a, b| {
            a.priority()
                .partial_cmp(&b.priority())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        view
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Moves the item at `index` up until its parent is no larger.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[parent].priority() > self.items[index].priority() {
                self.items.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the item at `index` down, swapping with its smaller child
    /// until neither child is strictly smaller.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.items[left].priority() < self.items[smallest].priority() {
                smallest = left;
            }
            if right < len && self.items[right].priority() < self.items[smallest].priority() {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Prioritized> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
