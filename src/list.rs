//! Fixed-capacity doubly linked list stored in a slab.
//!
//! Nodes live in a `Vec` of slots and link to each other by index, so the
//! list needs no raw pointers and no per-node allocation. Removed slots are
//! threaded onto a free list and reused by the next `add`.
//!
//! ```text
//!   slots
//!   ┌────┬──────────────────────────────────────────┐
//!   │ id │ Slot                                     │
//!   ├────┼──────────────────────────────────────────┤
//!   │ 0  │ Occupied { val: A, prev: None, next: 2 } │  ◄── head (front)
//!   │ 1  │ Vacant { next_free: None }               │  ◄── free
//!   │ 2  │ Occupied { val: B, prev: 0, next: None } │  ◄── tail (back)
//!   └────┴──────────────────────────────────────────┘
//! ```
//!
//! The front of the list is the most recently added or promoted node.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::num::NonZeroUsize;

/// Stable handle to a node. Valid until the node is removed or the list is cleared.
pub(crate) type NodeId = usize;

struct Node<T> {
    val: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<NodeId> },
}

/// A doubly linked list with a fixed maximum length.
pub(crate) struct List<T> {
    cap: NonZeroUsize,
    len: usize,
    slots: Vec<Slot<T>>,
    free: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> List<T> {
    /// Creates an empty list that holds at most `cap` items.
    ///
    /// Slot storage grows on demand up to `cap` and is never shrunk.
    pub(crate) fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Returns the value stored at `id`.
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.val)
    }

    /// Returns a mutable reference to the value stored at `id`.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.val)
    }

    /// Id of the front (most recently used) node.
    pub(crate) fn front(&self) -> Option<NodeId> {
        self.head
    }

    /// Id of the back (least recently used) node.
    pub(crate) fn back(&self) -> Option<NodeId> {
        self.tail
    }

    /// Adds a value at the front of the list.
    ///
    /// Returns the new node's id, or `None` without storing `v` if the list is full.
    pub(crate) fn add(&mut self, v: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let node = Node {
            val: v,
            prev: None,
            next: None,
        };
        let id = match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => None,
                };
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };
        self.attach(id);
        self.len += 1;
        Some(id)
    }

    /// Unlinks `id` from its neighbours, leaving the slot occupied.
    fn detach(&mut self, id: NodeId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links a detached node in front of the current head.
    fn attach(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Moves `id` to the front of the list. No-op for unknown ids.
    pub(crate) fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) || self.node(id).is_none() {
            return;
        }
        self.detach(id);
        self.attach(id);
    }

    /// Removes the node `id` and returns its value.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id)?;
        self.detach(id);
        let slot = mem::replace(
            &mut self.slots[id],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(id);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => Some(node.val),
            Slot::Vacant { .. } => None,
        }
    }

    /// Removes the back (least recently used) node and returns its value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let id = self.back()?;
        self.remove(id)
    }

    /// Iterates values from front to back.
    pub(crate) fn iter(&self) -> ListIter<'_, T> {
        ListIter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Drops every node and releases slot storage.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("cap", &self.cap)
            .field("len", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct ListIter<'a, T> {
    list: &'a List<T>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ListIter<'_, T> {}

impl<T> Clone for ListIter<'_, T> {
    fn clone(&self) -> Self {
        ListIter {
            list: self.list,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn list(cap: usize) -> List<u32> {
        List::new(NonZeroUsize::new(cap).unwrap())
    }

    fn values(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_add_is_front_first() {
        let mut l = list(3);
        l.add(1);
        l.add(2);
        l.add(3);
        assert_eq!(values(&l), vec![3, 2, 1]);
        assert_eq!(l.len(), 3);
        assert!(l.is_full());
    }

    #[test]
    fn test_add_when_full() {
        let mut l = list(2);
        assert!(l.add(10).is_some());
        assert!(l.add(20).is_some());
        assert!(l.add(30).is_none());
        assert_eq!(values(&l), vec![20, 10]);
    }

    #[test]
    fn test_remove_endpoints_and_middle() {
        let mut l = list(4);
        let a = l.add(1).unwrap();
        let b = l.add(2).unwrap();
        let c = l.add(3).unwrap();
        assert_eq!(l.remove(b), Some(2));
        assert_eq!(values(&l), vec![3, 1]);
        assert_eq!(l.remove(c), Some(3));
        assert_eq!(values(&l), vec![1]);
        assert_eq!(l.front(), Some(a));
        assert_eq!(l.back(), Some(a));
        assert_eq!(l.remove(a), Some(1));
        assert!(l.is_empty());
        assert_eq!(l.front(), None);
        assert_eq!(l.back(), None);
        assert_eq!(l.remove(a), None);
    }

    #[test]
    fn test_remove_last() {
        let mut l = list(3);
        l.add(1);
        l.add(2);
        assert_eq!(l.remove_last(), Some(1));
        assert_eq!(l.remove_last(), Some(2));
        assert_eq!(l.remove_last(), None);
    }

    #[test]
    fn test_move_to_front() {
        let mut l = list(3);
        let a = l.add(1).unwrap();
        l.add(2);
        l.add(3);
        l.move_to_front(a);
        assert_eq!(values(&l), vec![1, 3, 2]);
        l.move_to_front(a);
        assert_eq!(values(&l), vec![1, 3, 2]);
        assert_eq!(l.remove_last(), Some(2));
    }

    #[test]
    fn test_slot_reuse() {
        let mut l = list(2);
        let a = l.add(1).unwrap();
        l.add(2);
        l.remove(a);
        let c = l.add(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(l.get(c), Some(&3));
        assert_eq!(values(&l), vec![3, 2]);
    }

    #[test]
    fn test_get_mut() {
        let mut l = list(2);
        let a = l.add(1).unwrap();
        *l.get_mut(a).unwrap() = 7;
        assert_eq!(l.get(a), Some(&7));
    }

    #[test]
    fn test_clear() {
        let mut l = list(3);
        l.add(1);
        l.add(2);
        l.clear();
        assert!(l.is_empty());
        assert_eq!(values(&l), Vec::<u32>::new());
        l.add(5);
        assert_eq!(values(&l), vec![5]);
    }
}
