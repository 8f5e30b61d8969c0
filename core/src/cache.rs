use alloc::vec;
use alloc::vec::Vec;

/// Fixed-size hash-slot table that forgets freely.
///
/// Each key owns exactly one slot (`key % capacity`) and an insert always overwrites it, so a
/// lookup can miss an entry that was evicted by a colliding key. A hit only ever returns a value
/// stored for that exact key during the current epoch. [`clear`](Self::clear) bumps the epoch
/// instead of touching memory.
#[derive(Clone, Debug)]
pub struct ApproximateMap<V> {
    slots: Vec<Slot<V>>,
    epoch: u32,
}

#[derive(Copy, Clone, Debug, Default)]
struct Slot<V> {
    epoch: u32,
    key: u64,
    value: V,
}

impl<V: Copy + Default> ApproximateMap<V> {
    /// A table of `capacity` slots, at least one.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity.max(1)],
            epoch: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn slot_index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    pub fn insert(&mut self, key: u64, value: V) {
        let index = self.slot_index(key);
        self.slots[index] = Slot {
            epoch: self.epoch,
            key,
            value,
        };
    }

    pub fn get(&self, key: u64) -> Option<V> {
        let slot = &self.slots[self.slot_index(key)];
        if slot.epoch == self.epoch && slot.key == key {
            Some(slot.value)
        } else {
            None
        }
    }

    /// Invalidates every entry in O(1), unless the epoch counter runs out and the slots have to be
    /// wiped.
    pub fn clear(&mut self) {
        match self.epoch.checked_add(1) {
            Some(epoch) => self.epoch = epoch,
            None => {
                log::debug!(
                    "Approximate map epoch wrapped, wiping {} slots",
                    self.slots.len()
                );
                self.slots.fill(Slot::default());
                self.epoch = 1;
            }
        }
    }
}
