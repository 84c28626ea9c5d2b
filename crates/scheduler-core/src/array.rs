//! Contiguous, capacity-managed event collection.
//!
//! Storage is a fixed run of slots: `[0, len)` hold live events in stored order
//! and `[len, capacity)` are empty placeholders. Inserting into a full buffer
//! doubles the slot count (minimum one extra slot); deleting never shrinks it.

use crate::collection::{
    conflict_error, conflict_excluding, out_of_range, DeleteTarget, EventCollection,
};
use crate::config::{SchedulerConfig, DEFAULT_CAPACITY, INITIAL_ID};
use crate::error::{Result, ScheduleError};
use crate::event::Event;
use crate::search::SearchAlgorithm;
use crate::sort::SortAlgorithm;

/// An array-based list of events.
#[derive(Debug, Clone)]
pub struct ArrayEventCollection {
    slots: Vec<Option<Event>>,
    size: usize,
    next_id: u64,
}

impl ArrayEventCollection {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_initial_id(capacity, INITIAL_ID)
    }

    pub fn with_capacity_and_initial_id(capacity: usize, initial_id: u64) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        Self {
            slots,
            size: 0,
            next_id: initial_id,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::with_capacity_and_initial_id(config.initial_capacity, config.initial_id)
    }

    /// Number of allocated slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Every slot, including the empty placeholders past `len`.
    pub fn slots(&self) -> &[Option<Event>] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.slots[..self.size].iter().flatten()
    }

    /// Grow the buffer to at least `new_capacity` slots. Never shrinks.
    pub fn grow_to(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }
        tracing::debug!(from = self.capacity(), to = new_capacity, "growing event buffer");
        self.slots.resize_with(new_capacity, || None);
    }

    fn slot(&self, index: usize) -> Result<&Event> {
        self.slots[..self.size]
            .get(index)
            .and_then(Option::as_ref)
            .ok_or_else(|| out_of_range(index, self.size))
    }

    fn remove_at(&mut self, index: usize) -> Result<Event> {
        if index >= self.size {
            return Err(out_of_range(index, self.size));
        }
        let Some(removed) = self.slots[index].take() else {
            return Err(out_of_range(index, self.size));
        };
        // Close the gap; the emptied slot rotates to position `size - 1`.
        self.slots[index..self.size].rotate_left(1);
        self.size -= 1;
        tracing::debug!(id = ?removed.id(), index, size = self.size, "deleted event");
        Ok(removed)
    }

    fn remove_matching(&mut self, target: &Event) -> Vec<Event> {
        let mut removed = Vec::new();
        let mut write = 0;
        for read in 0..self.size {
            if self.slots[read].as_ref() == Some(target) {
                removed.extend(self.slots[read].take());
            } else {
                self.slots.swap(write, read);
                write += 1;
            }
        }
        self.size = write;
        tracing::debug!(removed = removed.len(), size = self.size, "deleted matching events");
        removed
    }
}

impl Default for ArrayEventCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCollection for ArrayEventCollection {
    fn len(&self) -> usize {
        self.size
    }

    fn next_id(&self) -> u64 {
        self.next_id
    }

    fn events(&self) -> Box<dyn Iterator<Item = &Event> + '_> {
        Box::new(self.iter())
    }

    fn insert(&mut self, mut event: Event, index: Option<usize>) -> Result<&Event> {
        if let Some(existing) = self.find_conflict(&event) {
            return Err(conflict_error(&event, existing));
        }
        let index = index.unwrap_or(self.size);
        if index > self.size {
            return Err(out_of_range(index, self.size));
        }
        let following_id = self
            .next_id
            .checked_add(1)
            .ok_or(ScheduleError::IdsExhausted(self.next_id))?;
        event.set_id(self.next_id)?;

        if self.size == self.capacity() {
            let doubled = self.capacity().saturating_mul(2);
            self.grow_to(doubled.max(self.capacity() + 1));
        }
        // Park the event in the first free slot, then rotate it into place,
        // shifting `[index, size)` right by one.
        self.slots[self.size] = Some(event);
        self.slots[index..=self.size].rotate_right(1);
        self.size += 1;
        tracing::debug!(id = self.next_id, index, size = self.size, "inserted event");
        self.next_id = following_id;
        self.slot(index)
    }

    fn delete(&mut self, target: DeleteTarget<'_>) -> Result<Vec<Event>> {
        match target {
            DeleteTarget::Last => match self.size.checked_sub(1) {
                Some(last) => self.remove_at(last).map(|event| vec![event]),
                None => Err(out_of_range(0, 0)),
            },
            DeleteTarget::Index(index) => self.remove_at(index).map(|event| vec![event]),
            DeleteTarget::Matching(target) => Ok(self.remove_matching(target)),
        }
    }

    fn get(&self, index: usize) -> Result<&Event> {
        self.slot(index)
    }

    fn set(&mut self, index: usize, event: Event) -> Result<Event> {
        self.slot(index)?;
        if let Some(existing) = conflict_excluding(self.iter(), &event, index) {
            return Err(conflict_error(&event, existing));
        }
        match self.slots[index].as_mut() {
            Some(current) => Ok(std::mem::replace(current, event)),
            None => Err(out_of_range(index, self.size)),
        }
    }

    fn search_by_id(&self, id: u64, algorithm: SearchAlgorithm) -> Result<&Event> {
        let mut snapshot: Vec<&Event> = self.iter().collect();
        if algorithm.requires_sorted() {
            snapshot = SortAlgorithm::Merge.sort(snapshot, |event| event.id());
        }
        algorithm
            .search(&snapshot, &Some(id), |event| event.id())
            .copied()
            .ok_or(ScheduleError::NotFound(id))
    }

    fn list_all(&self, order: Option<SortAlgorithm>) -> Vec<&Event> {
        let live: Vec<&Event> = self.iter().collect();
        match order {
            Some(algorithm) => algorithm.sort(live, |event| event.start_time()),
            None => live,
        }
    }

    fn sort(&mut self, algorithm: SortAlgorithm) {
        let placeholders = self.slots.split_off(self.size);
        let live = std::mem::take(&mut self.slots);
        self.slots = algorithm.sort(live, |slot| slot.as_ref().map(Event::start_time));
        self.slots.extend(placeholders);
        tracing::debug!(%algorithm, size = self.size, "sorted event buffer");
    }
}
