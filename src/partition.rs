//! Bounded batching of arbitrary items.
//!
//! [`Partitioner`] accumulates items into a [`BoundedQueue`] and hands the
//! queue to a batch consumer every time it fills, which keeps memory bounded
//! when whatever follows ingestion is slower than ingestion itself.
//!
//! - [`Partitioner::consume`] drives a sequential iterator.
//! - [`Partitioner::consume_par`] drives a rayon parallel iterator. Each
//!   producer fills its own queue; partial queues are merged left to right,
//!   draining the right into the left and flushing the left whenever it fills.
//!
//! In both modes the consumer is called with full batches only, except for one
//! final call with whatever is left. That final call always happens, even when
//! nothing is left.

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A queue that refuses items past a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedQueue<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// An empty queue holding at most `capacity` items (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append `item`, or give it back if the queue is full.
    pub fn offer(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Append `item` to a queue known to have room.
    ///
    /// # Panics
    /// If the queue is full. Callers flush on every fill, so this indicates a
    /// bookkeeping bug rather than an input problem.
    pub fn force_offer(&mut self, item: T) {
        assert!(
            !self.is_full(),
            "forced offer into a full queue of capacity {}",
            self.capacity
        );
        self.items.push(item);
    }

    /// Items currently queued.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next [`offer`](Self::offer) would be refused.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// The fixed upper bound on queued items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Room left before the queue is full.
    ///
    /// ```
    /// use cellstream::BoundedQueue;
    ///
    /// let mut q = BoundedQueue::with_capacity(3);
    /// q.offer('a').unwrap();
    /// assert_eq!(q.remaining(), 2);
    /// ```
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// The queued items in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Borrowing iterator in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove and yield every queued item in insertion order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }

    /// Drop every queued item. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Feeds items to a batch consumer in groups of a fixed size.
///
/// ```
/// use cellstream::Partitioner;
///
/// let mut sizes = Vec::new();
/// let total = Partitioner::new(4).consume(0..10, |batch| sizes.push(batch.len()));
/// assert_eq!(sizes, [4, 4, 2]);
/// assert_eq!(total, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    capacity: usize,
}

impl Partitioner {
    /// Batches of `capacity` items; `0` is treated as `1`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Batch a sequential source. Returns the number of items dispatched.
    ///
    /// The consumer may drain the queue it is handed; whatever it leaves is
    /// discarded before the next batch.
    pub fn consume<T, I, F>(&self, items: I, mut consumer: F) -> usize
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&mut BoundedQueue<T>),
    {
        let mut queue = BoundedQueue::with_capacity(self.capacity);
        let mut total = 0;
        for item in items {
            queue.force_offer(item);
            if queue.is_full() {
                total += dispatch(&mut queue, &mut consumer);
            }
        }
        total + dispatch(&mut queue, &mut consumer)
    }

    /// Batch a parallel source. Returns the number of items dispatched.
    ///
    /// Consumer calls are serialized; each sees one complete batch.
    pub fn consume_par<T, I, F>(&self, items: I, consumer: F) -> usize
    where
        T: Send,
        I: IntoParallelIterator<Item = T>,
        F: FnMut(&mut BoundedQueue<T>) + Send,
    {
        let capacity = self.capacity;
        let sink = SharedSink {
            consumer: Mutex::new(consumer),
            total: AtomicUsize::new(0),
        };
        let mut rest = items
            .into_par_iter()
            .fold(
                || BoundedQueue::with_capacity(capacity),
                |mut queue, item| {
                    queue.force_offer(item);
                    if queue.is_full() {
                        sink.flush(&mut queue);
                    }
                    queue
                },
            )
            .reduce(
                || BoundedQueue::with_capacity(capacity),
                |left, right| sink.merge(left, right),
            );
        sink.flush(&mut rest);
        sink.total.into_inner()
    }
}

fn dispatch<T, F>(queue: &mut BoundedQueue<T>, consumer: &mut F) -> usize
where
    F: FnMut(&mut BoundedQueue<T>),
{
    let n = queue.len();
    consumer(queue);
    queue.clear();
    n
}

struct SharedSink<F> {
    consumer: Mutex<F>,
    total: AtomicUsize,
}

impl<F> SharedSink<F> {
    fn flush<T>(&self, queue: &mut BoundedQueue<T>)
    where
        F: FnMut(&mut BoundedQueue<T>),
    {
        let mut consumer = self.consumer.lock().unwrap_or_else(PoisonError::into_inner);
        let n = dispatch(queue, &mut *consumer);
        self.total.fetch_add(n, Ordering::Relaxed);
    }

    fn merge<T>(&self, mut left: BoundedQueue<T>, mut right: BoundedQueue<T>) -> BoundedQueue<T>
    where
        F: FnMut(&mut BoundedQueue<T>),
    {
        for item in right.drain() {
            left.force_offer(item);
            if left.is_full() {
                self.flush(&mut left);
            }
        }
        left
    }
}
