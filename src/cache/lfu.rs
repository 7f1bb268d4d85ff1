//! LFU Policy Module
//!
//! Least Frequently Used eviction with O(1) amortized operations.
//!
//! Entries live in frequency buckets: every bucket holds the nodes that
//! currently share one access count, and buckets are chained in strictly
//! ascending frequency order. A sentinel bucket for frequency 0 is always
//! present (even when empty) as the insertion point for new entries, so the
//! lowest-frequency bucket is reachable in O(1). Eviction takes the tail of
//! the lowest non-empty bucket: frequency is the primary eviction key,
//! recency within a frequency is the tie-break.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::EvictionPolicy;

/// Index value meaning "no node / no bucket".
const NIL: usize = usize::MAX;

// == LFU Node ==
#[derive(Debug)]
struct Node<T> {
    key: String,
    value: T,
    freq: u64,
    /// Bucket this node is physically stored in
    bucket: usize,
    /// Neighbors within the bucket's node list
    prev: usize,
    next: usize,
}

// == Frequency Bucket ==
/// Holds all nodes currently at one frequency, linked among its peers in
/// ascending frequency order.
#[derive(Debug)]
struct Bucket {
    freq: u64,
    /// Node list: front = most recently promoted, back = eviction candidate
    head: usize,
    tail: usize,
    /// Neighbors in the ascending bucket chain
    prev: usize,
    next: usize,
}

// == LFU State ==
/// Internal indexes, guarded as a unit by the policy's lock.
///
/// Invariants: every node's `freq` matches its bucket; non-sentinel buckets
/// are dropped the moment they become empty; the bucket chain is strictly
/// ascending with the frequency-0 sentinel at its head.
#[derive(Debug)]
struct LfuState<T> {
    index: HashMap<String, usize>,
    freq_index: HashMap<u64, usize>,
    nodes: Vec<Option<Node<T>>>,
    node_free: Vec<usize>,
    buckets: Vec<Option<Bucket>>,
    bucket_free: Vec<usize>,
    /// Head of the ascending bucket chain (always the frequency-0 sentinel)
    chain_head: usize,
}

impl<T> LfuState<T> {
    /// Creates empty state with the frequency-0 sentinel seeded.
    fn new() -> Self {
        let mut state = Self {
            index: HashMap::new(),
            freq_index: HashMap::new(),
            nodes: Vec::new(),
            node_free: Vec::new(),
            buckets: Vec::new(),
            bucket_free: Vec::new(),
            chain_head: NIL,
        };
        let sentinel = state.alloc_bucket(0);
        state.chain_head = sentinel;
        state.freq_index.insert(0, sentinel);
        state
    }

    fn node(&self, i: usize) -> &Node<T> {
        self.nodes[i].as_ref().expect("linked node slot is occupied")
    }

    fn node_mut(&mut self, i: usize) -> &mut Node<T> {
        self.nodes[i].as_mut().expect("linked node slot is occupied")
    }

    fn bucket(&self, b: usize) -> &Bucket {
        self.buckets[b].as_ref().expect("linked bucket slot is occupied")
    }

    fn bucket_mut(&mut self, b: usize) -> &mut Bucket {
        self.buckets[b].as_mut().expect("linked bucket slot is occupied")
    }

    fn alloc_node(&mut self, node: Node<T>) -> usize {
        match self.node_free.pop() {
            Some(i) => {
                self.nodes[i] = Some(node);
                i
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release_node(&mut self, i: usize) -> Node<T> {
        self.node_free.push(i);
        self.nodes[i].take().expect("linked node slot is occupied")
    }

    fn alloc_bucket(&mut self, freq: u64) -> usize {
        let bucket = Bucket {
            freq,
            head: NIL,
            tail: NIL,
            prev: NIL,
            next: NIL,
        };
        match self.bucket_free.pop() {
            Some(b) => {
                self.buckets[b] = Some(bucket);
                b
            }
            None => {
                self.buckets.push(Some(bucket));
                self.buckets.len() - 1
            }
        }
    }

    /// Unlinks a node from its bucket's node list.
    fn bucket_detach(&mut self, i: usize) {
        let (bucket, prev, next) = {
            let node = self.node(i);
            (node.bucket, node.prev, node.next)
        };
        if prev != NIL {
            self.node_mut(prev).next = next;
        } else {
            self.bucket_mut(bucket).head = next;
        }
        if next != NIL {
            self.node_mut(next).prev = prev;
        } else {
            self.bucket_mut(bucket).tail = prev;
        }
    }

    /// Links a node at the front of a bucket's node list.
    fn bucket_push_front(&mut self, b: usize, i: usize) {
        let old_head = self.bucket(b).head;
        {
            let node = self.node_mut(i);
            node.bucket = b;
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.node_mut(old_head).prev = i;
        } else {
            self.bucket_mut(b).tail = i;
        }
        self.bucket_mut(b).head = i;
    }

    fn bucket_is_empty(&self, b: usize) -> bool {
        self.bucket(b).head == NIL
    }

    /// Unlinks a bucket from the ascending chain and releases its slot.
    fn drop_bucket(&mut self, b: usize) {
        let (freq, prev, next) = {
            let bucket = self.bucket(b);
            (bucket.freq, bucket.prev, bucket.next)
        };
        if prev != NIL {
            self.bucket_mut(prev).next = next;
        } else {
            self.chain_head = next;
        }
        if next != NIL {
            self.bucket_mut(next).prev = prev;
        }
        self.freq_index.remove(&freq);
        self.bucket_free.push(b);
        self.buckets[b] = None;
    }

    /// Inserts a freshly allocated bucket into the chain right after `anchor`.
    fn chain_insert_after(&mut self, b: usize, anchor: usize) {
        let next = self.bucket(anchor).next;
        {
            let bucket = self.bucket_mut(b);
            bucket.prev = anchor;
            bucket.next = next;
        }
        self.bucket_mut(anchor).next = b;
        if next != NIL {
            self.bucket_mut(next).prev = b;
        }
    }

    /// Moves a node from its current bucket to the bucket for `freq + 1`,
    /// creating that bucket in place if it does not exist yet.
    ///
    /// The insertion anchor is captured before an emptied bucket is dropped,
    /// so ascending chain order holds even when the node was its bucket's
    /// sole occupant.
    fn promote(&mut self, i: usize) {
        let (old_bucket, freq) = {
            let node = self.node(i);
            (node.bucket, node.freq)
        };

        self.bucket_detach(i);

        let mut anchor = old_bucket;
        if self.bucket_is_empty(old_bucket) && freq != 0 {
            anchor = self.bucket(old_bucket).prev;
            self.drop_bucket(old_bucket);
        }

        let new_freq = freq + 1;
        self.node_mut(i).freq = new_freq;

        let target = match self.freq_index.get(&new_freq) {
            Some(&b) => b,
            None => {
                let b = self.alloc_bucket(new_freq);
                self.chain_insert_after(b, anchor);
                self.freq_index.insert(new_freq, b);
                b
            }
        };
        self.bucket_push_front(target, i);

        trace!(key = %self.node(i).key, freq = new_freq, "lfu: promoted entry");
    }

    /// Evicts the tail of the lowest non-empty bucket, returning its key.
    ///
    /// The chain head is the frequency-0 sentinel; if it is momentarily
    /// empty the next bucket holds the lowest frequency in use.
    fn evict_least_frequent(&mut self) -> Option<String> {
        let mut b = self.chain_head;
        if self.bucket_is_empty(b) {
            b = self.bucket(b).next;
        }
        if b == NIL {
            return None;
        }

        let victim = self.bucket(b).tail;
        self.bucket_detach(victim);
        let node = self.release_node(victim);
        self.index.remove(&node.key);

        if self.bucket_is_empty(b) && self.bucket(b).freq != 0 {
            self.drop_bucket(b);
        }
        Some(node.key)
    }

    /// Detaches a node from its bucket and releases it, dropping the bucket
    /// if it became empty and is not the sentinel.
    fn detach_and_release(&mut self, i: usize) {
        let bucket = self.node(i).bucket;
        self.bucket_detach(i);
        self.release_node(i);
        if self.bucket_is_empty(bucket) && self.bucket(bucket).freq != 0 {
            self.drop_bucket(bucket);
        }
    }
}

// == LFU Policy ==
/// Least Frequently Used eviction policy with O(1) amortized operations.
///
/// All internal indexes are guarded by a single `Mutex`; lookups mutate the
/// frequency bookkeeping, so there is no shared-read path.
#[derive(Debug)]
pub struct LfuPolicy<T> {
    capacity: usize,
    state: Mutex<LfuState<T>>,
}

impl<T> LfuPolicy<T> {
    // == Constructor ==
    /// Creates a new LFU policy with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(LfuState::new()),
        }
    }
}

impl<T: Clone + Send + Sync> EvictionPolicy<T> for LfuPolicy<T> {
    fn put(&self, key: &str, value: T) {
        let mut state = self.state.lock();

        // Existing key: overwrite, then promote. An update counts as a use.
        if let Some(&i) = state.index.get(key) {
            state.node_mut(i).value = value;
            state.promote(i);
            return;
        }

        if state.index.len() >= self.capacity {
            if let Some(evicted) = state.evict_least_frequent() {
                debug!(key = %evicted, "lfu: evicted least frequently used entry");
            }
        }

        // New entries start at frequency 0 in the sentinel bucket.
        let i = state.alloc_node(Node {
            key: key.to_string(),
            value,
            freq: 0,
            bucket: NIL,
            prev: NIL,
            next: NIL,
        });
        let sentinel = state.chain_head;
        state.bucket_push_front(sentinel, i);
        state.index.insert(key.to_string(), i);
    }

    fn get(&self, key: &str) -> Option<T> {
        let mut state = self.state.lock();

        let i = *state.index.get(key)?;
        state.promote(i);
        Some(state.node(i).value.clone())
    }

    fn remove(&self, key: &str) -> bool {
        let mut state = self.state.lock();

        let i = match state.index.remove(key) {
            Some(i) => i,
            None => return false,
        };

        state.detach_and_release(i);
        true
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        *state = LfuState::new();
    }

    fn len(&self) -> usize {
        self.state.lock().index.len()
    }
}
