//! Bounded producer-tracking queue: the only coordination primitive
//! between pipeline stages.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex};

/// Error returned by [`TrackedQueue::push`] when the queue was stopped
/// before the item found space. Gives the item back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct Stopped<T>(pub T);

impl<T> fmt::Display for Stopped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue stopped before the item could be enqueued")
    }
}

impl<T: fmt::Debug> std::error::Error for Stopped<T> {}

struct State<T> {
    /// Circular buffer. A slot is `Some` exactly when it holds an
    /// unconsumed item; `len` counts those slots.
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
    /// Registered, not-yet-unregistered producers. While this is above
    /// zero an empty queue means "wait", not "finished".
    producers: usize,
    stopped: bool,
}

/// Fixed-capacity FIFO queue shared by multiple producer and consumer
/// threads, with live-producer counting.
///
/// Emptiness is a ternary signal: has data ([`pop`](Self::pop) returns an
/// item), will have data (producers registered, `pop` blocks), will never
/// have data (no producers left, `pop` returns `None`). Producers declare
/// themselves with [`register_producer`](Self::register_producer) /
/// [`unregister_producer`](Self::unregister_producer), or let a
/// [`Producer`] handle pair the two calls automatically. There is no
/// explicit close: the last unregistration is what releases waiting
/// consumers.
pub struct TrackedQueue<T> {
    state: Mutex<State<T>>,
    cond: Condvar,
}

impl<T> TrackedQueue<T> {
    /// Create a queue with a fixed capacity.
    ///
    /// Panics when `capacity` is zero: a zero-slot queue could never
    /// complete a push.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        TrackedQueue {
            state: Mutex::new(State {
                slots: slots.into_boxed_slice(),
                head: 0,
                tail: 0,
                len: 0,
                producers: 0,
                stopped: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// The fixed capacity this queue was created with.
    pub fn capacity(&self) -> usize {
        self.state.lock().unwrap().slots.len()
    }

    /// Number of buffered items, read under the queue lock.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered producers right now.
    pub fn producers(&self) -> usize {
        self.state.lock().unwrap().producers
    }

    /// Claim that the calling thread may still push items. Must complete
    /// before any consumer could observe this queue producer-less, so
    /// call it (or create a [`Producer`]) before spawning the thread that
    /// pushes.
    pub fn register_producer(&self) {
        self.state.lock().unwrap().producers += 1;
    }

    /// Release a producer claim and wake all blocked consumers, since
    /// reaching zero may let them observe end-of-stream.
    ///
    /// Panics when no producer is registered: an unmatched unregister is
    /// a bug in the caller, not a runtime condition.
    pub fn unregister_producer(&self) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.producers > 0,
            "unregister_producer without a matching register_producer"
        );
        state.producers -= 1;
        self.cond.notify_all();
    }

    /// Insert at the tail, blocking while the queue is full. Never
    /// overwrites an unconsumed slot. Returns the item back as
    /// `Err(Stopped)` only when [`stop`](Self::stop) was called.
    pub fn push(&self, item: T) -> Result<(), Stopped<T>> {
        let mut state = self.state.lock().unwrap();
        while state.len == state.slots.len() && !state.stopped {
            state = self.cond.wait(state).unwrap();
        }
        if state.stopped {
            return Err(Stopped(item));
        }
        let tail = state.tail;
        state.slots[tail] = Some(item);
        state.tail = (tail + 1) % state.slots.len();
        state.len += 1;
        // A free slot and a producer-count change can each end either
        // side's wait, so every state change wakes all waiters.
        self.cond.notify_all();
        Ok(())
    }

    /// Remove and return the head item, blocking while the queue is empty
    /// but producers remain. Returns `None` when the queue is empty with
    /// no registered producers (end of stream), or immediately after
    /// [`stop`](Self::stop).
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        while state.len == 0 && state.producers > 0 && !state.stopped {
            state = self.cond.wait(state).unwrap();
        }
        if state.stopped || state.len == 0 {
            return None;
        }
        let head = state.head;
        let item = state.slots[head].take();
        debug_assert!(item.is_some(), "non-empty queue with a vacant head slot");
        state.head = (head + 1) % state.slots.len();
        state.len -= 1;
        self.cond.notify_all();
        item
    }

    /// Cooperative cancellation: wake every waiter and make further
    /// `push`/`pop` calls return immediately (`Err(Stopped)` / `None`).
    /// Idempotent. Buffered items are dropped with the queue, not
    /// delivered.
    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.stopped = true;
        self.cond.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }
}

/// Owned producer registration for a [`TrackedQueue`].
///
/// Holds one producer claim from creation until drop, so the
/// register/unregister pairing survives early returns and panics in the
/// worker that owns it.
pub struct Producer<T> {
    queue: Arc<TrackedQueue<T>>,
}

impl<T> Producer<T> {
    /// Register a producer on `queue` and wrap the claim in an owned
    /// handle that unregisters exactly once when dropped, even if the
    /// owning thread panics. Create the handle before spawning the
    /// pushing thread.
    pub fn new(queue: &Arc<TrackedQueue<T>>) -> Self {
        queue.register_producer();
        Producer {
            queue: Arc::clone(queue),
        }
    }

    /// Push through this registration. See [`TrackedQueue::push`].
    pub fn push(&self, item: T) -> Result<(), Stopped<T>> {
        self.queue.push(item)
    }

    /// The queue this producer feeds.
    pub fn queue(&self) -> &TrackedQueue<T> {
        &self.queue
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.queue.unregister_producer();
    }
}
