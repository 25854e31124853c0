use alloc::vec::Vec;
use core::iter::FusedIterator;

/// Stable address of a slot inside an [`Arena`].
pub(crate) type SlotIndex = usize;

/// Slot of the head sentinel. `slots[HEAD].next` is the front of the list.
const HEAD: SlotIndex = 0;

/// Slot of the tail sentinel. `slots[TAIL].prev` is the back of the list.
const TAIL: SlotIndex = 1;

/// A slot in the arena.
///
/// `val` is `None` for the two sentinels and for slots sitting on the free
/// list; every linked, non-sentinel slot holds `Some`.
struct Slot<T> {
    val: Option<T>,
    prev: SlotIndex,
    next: SlotIndex,
}

impl<T> Slot<T> {
    fn sentinel() -> Self {
        Slot {
            val: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A doubly linked list whose nodes live in a single `Vec` and link to each
/// other by index.
///
/// Two sentinel slots bound the list so insertion and removal at either end
/// never special-case an empty or single-element list. Removed slots go onto
/// a free list and are handed out again by the next [`push_front`].
///
/// The arena never hands sentinel indices to callers, and every method that
/// takes a [`SlotIndex`] ignores indices that do not refer to an occupied
/// slot.
///
/// [`push_front`]: Arena::push_front
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<SlotIndex>,
    len: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena with room for `entries` nodes plus the two
    /// sentinels.
    pub(crate) fn with_capacity(entries: usize) -> Self {
        let mut slots = Vec::with_capacity(entries.saturating_add(2));
        slots.push(Slot::sentinel());
        slots.push(Slot::sentinel());
        Arena {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn is_occupied(&self, idx: SlotIndex) -> bool {
        idx > TAIL && self.slots.get(idx).is_some_and(|slot| slot.val.is_some())
    }

    /// Stores `val` in a free slot, links it right after the head sentinel
    /// and returns its index.
    pub(crate) fn push_front(&mut self, val: T) -> SlotIndex {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].val = Some(val);
                idx
            }
            None => {
                self.slots.push(Slot {
                    val: Some(val),
                    prev: HEAD,
                    next: TAIL,
                });
                self.slots.len() - 1
            }
        };
        self.attach_front(idx);
        self.len += 1;
        idx
    }

    /// Moves an occupied slot to the front of the list.
    pub(crate) fn move_to_front(&mut self, idx: SlotIndex) {
        if !self.is_occupied(idx) || self.slots[HEAD].next == idx {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    /// Unlinks a slot, returns its value and puts the slot on the free list.
    pub(crate) fn remove(&mut self, idx: SlotIndex) -> Option<T> {
        if !self.is_occupied(idx) {
            return None;
        }
        self.detach(idx);
        self.free.push(idx);
        self.len -= 1;
        self.slots[idx].val.take()
    }

    /// Index of the slot adjacent to the tail sentinel.
    #[inline]
    pub(crate) fn back(&self) -> Option<SlotIndex> {
        let idx = self.slots[TAIL].prev;
        (idx != HEAD).then_some(idx)
    }

    /// Removes the slot adjacent to the tail sentinel.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let idx = self.back()?;
        self.remove(idx)
    }

    #[inline]
    pub(crate) fn get(&self, idx: SlotIndex) -> Option<&T> {
        self.slots.get(idx).and_then(|slot| slot.val.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(|slot| slot.val.as_mut())
    }

    /// Drops every value and relinks the sentinels. Allocated storage is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD] = Slot::sentinel();
        self.slots[TAIL] = Slot::sentinel();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates values front (most recently attached) to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    fn detach(&mut self, idx: SlotIndex) {
        let Slot { prev, next, .. } = self.slots[idx];
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    fn attach_front(&mut self, idx: SlotIndex) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    /// Number of allocated slots, sentinels included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Walks the list in both directions and checks it against `len` and
    /// the free list.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut forward = 0;
        let mut idx = self.slots[HEAD].next;
        let mut prev = HEAD;
        while idx != TAIL {
            assert!(self.is_occupied(idx), "linked slot {idx} is not occupied");
            assert_eq!(self.slots[idx].prev, prev, "broken back link at {idx}");
            prev = idx;
            idx = self.slots[idx].next;
            forward += 1;
            assert!(forward <= self.len, "cycle in forward links");
        }
        assert_eq!(self.slots[TAIL].prev, prev);
        assert_eq!(forward, self.len);
        assert_eq!(self.slots.len() - 2, self.len + self.free.len());
        for &slot in &self.free {
            assert!(self.slots[slot].val.is_none(), "free slot {slot} holds a value");
        }
    }
}

/// Front-to-back iterator over an [`Arena`].
pub(crate) struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: SlotIndex,
    back: SlotIndex,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.arena.slots[self.front];
        self.front = slot.next;
        self.remaining -= 1;
        slot.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.arena.slots[self.back];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.val.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}
