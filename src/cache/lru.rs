//! LRU Policy Module
//!
//! Least Recently Used eviction backed by a key→node index and a
//! recency-ordered doubly-linked list (front = most recently used,
//! back = least recently used). All operations are O(1).

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::EvictionPolicy;

/// Index value meaning "no node".
const NIL: usize = usize::MAX;

// == List Node ==
#[derive(Debug)]
struct Node<T> {
    key: String,
    value: T,
    prev: usize,
    next: usize,
}

// == LRU State ==
/// Internal indexes, guarded as a unit by the policy's lock.
///
/// The linked list lives in a slot arena: `slots` holds nodes, `free` holds
/// reusable slot indices, and `prev`/`next` link occupied slots. The key
/// index and the list are always in bijection.
#[derive(Debug)]
struct LruState<T> {
    index: HashMap<String, usize>,
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<T> LruState<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    fn node(&self, i: usize) -> &Node<T> {
        self.slots[i].as_ref().expect("linked slot is occupied")
    }

    fn node_mut(&mut self, i: usize) -> &mut Node<T> {
        self.slots[i].as_mut().expect("linked slot is occupied")
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(node);
                i
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, i: usize) -> Node<T> {
        self.free.push(i);
        self.slots[i].take().expect("linked slot is occupied")
    }

    /// Unlinks a node from the recency list without releasing its slot.
    fn detach(&mut self, i: usize) {
        let (prev, next) = {
            let node = self.node(i);
            (node.prev, node.next)
        };
        if prev != NIL {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Links a node at the front of the recency list (most recently used).
    fn push_front(&mut self, i: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(i);
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.node_mut(old_head).prev = i;
        } else {
            self.tail = i;
        }
        self.head = i;
    }

    /// Removes the least recently used node, returning its key.
    fn evict_oldest(&mut self) -> Option<String> {
        let tail = self.tail;
        if tail == NIL {
            return None;
        }
        self.detach(tail);
        let node = self.release(tail);
        self.index.remove(&node.key);
        Some(node.key)
    }
}

// == LRU Policy ==
/// Least Recently Used eviction policy.
///
/// Internal state is guarded by a single `RwLock`; `len` takes the read
/// lock, every other operation (including `get`, which repositions the
/// looked-up node) takes the write lock.
#[derive(Debug)]
pub struct LruPolicy<T> {
    capacity: usize,
    state: RwLock<LruState<T>>,
}

impl<T> LruPolicy<T> {
    // == Constructor ==
    /// Creates a new LRU policy with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: RwLock::new(LruState::new()),
        }
    }
}

impl<T: Clone + Send + Sync> EvictionPolicy<T> for LruPolicy<T> {
    fn put(&self, key: &str, value: T) {
        let mut state = self.state.write();

        // Existing key: overwrite in place and mark as most recently used.
        if let Some(&i) = state.index.get(key) {
            state.node_mut(i).value = value;
            state.detach(i);
            state.push_front(i);
            return;
        }

        if state.index.len() >= self.capacity {
            if let Some(evicted) = state.evict_oldest() {
                debug!(key = %evicted, "lru: evicted least recently used entry");
            }
        }

        let i = state.alloc(Node {
            key: key.to_string(),
            value,
            prev: NIL,
            next: NIL,
        });
        state.push_front(i);
        state.index.insert(key.to_string(), i);
    }

    fn get(&self, key: &str) -> Option<T> {
        let mut state = self.state.write();

        let i = *state.index.get(key)?;
        state.detach(i);
        state.push_front(i);
        Some(state.node(i).value.clone())
    }

    fn remove(&self, key: &str) -> bool {
        let mut state = self.state.write();

        match state.index.remove(key) {
            Some(i) => {
                state.detach(i);
                state.release(i);
                true
            }
            None => false,
        }
    }

    fn clear(&self) {
        let mut state = self.state.write();
        *state = LruState::new();
    }

    fn len(&self) -> usize {
        self.state.read().index.len()
    }
}
