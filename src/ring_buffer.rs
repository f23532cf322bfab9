//! Fixed-capacity circular queue.
//!
//! `RingBuffer` keeps at most `capacity` items. Enqueuing into a full buffer
//! discards the oldest item instead of failing, which makes it usable as a
//! bounded "last N" history as well as a plain FIFO queue.

use std::iter::FusedIterator;

use thiserror::Error;

/// Returned when a buffer is created with no room for any item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ring buffer capacity must be greater than zero")]
pub struct CapacityError;

/// Fixed-capacity ring buffer with overwrite-on-full semantics.
///
/// # Example
///
/// ```rust
/// use ring_snake::RingBuffer;
///
/// let mut buffer = RingBuffer::new(3).unwrap();
/// buffer.extend([1, 2, 3]);
/// assert!(buffer.is_full());
///
/// // Oldest item is dropped to make room
/// buffer.enqueue(4);
/// assert_eq!(buffer.to_vec(), vec![2, 3, 4]);
/// assert_eq!(buffer.dequeue(), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    // Invariant: exactly the `size` slots starting at `tail` (wrapping) are `Some`
    slots: Vec<Option<T>>,
    /// Slot the next enqueue writes to
    head: usize,
    /// Slot holding the oldest item, when non-empty
    tail: usize,
    size: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer able to hold `capacity` items.
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            head: 0,
            tail: 0,
            size: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    /// Append `item` as the newest element.
    ///
    /// When the buffer is full the oldest element is discarded and the
    /// length stays at capacity.
    pub fn enqueue(&mut self, item: T) {
        if self.is_full() {
            self.tail = self.advance(self.tail);
        } else {
            self.size += 1;
        }

        self.slots[self.head] = Some(item);
        self.head = self.advance(self.head);
    }

    /// Remove and return the oldest element, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.tail].take();
        self.tail = self.advance(self.tail);
        self.size -= 1;
        item
    }

    /// Oldest element, without removing it.
    pub fn peek_tail(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.tail].as_ref()
    }

    /// Newest element, without removing it.
    pub fn peek_head(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let newest = (self.head + self.capacity() - 1) % self.capacity();
        self.slots[newest].as_ref()
    }

    /// Iterate from oldest to newest without consuming the buffer.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
            back: self.size,
        }
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.tail = 0;
        self.size = 0;
    }

    /// Element at logical offset `index` from the oldest.
    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        self.slots[(self.tail + index) % self.capacity()].as_ref()
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Ordered copy of the contents, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`RingBuffer`], oldest to newest.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.buffer.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
