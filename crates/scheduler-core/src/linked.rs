//! Singly-linked event collection.
//!
//! Same contract as [`ArrayEventCollection`](crate::ArrayEventCollection), but
//! positional access walks from the head. Inserts and deletes splice by
//! rewriting a single predecessor link; a detached node has its own successor
//! cleared before it is handed back.

use crate::chain::{self, Link, Node};
use crate::collection::{
    conflict_error, conflict_excluding, out_of_range, DeleteTarget, EventCollection,
};
use crate::config::{SchedulerConfig, INITIAL_ID};
use crate::error::{Result, ScheduleError};
use crate::event::Event;
use crate::search::SearchAlgorithm;
use crate::sort::SortAlgorithm;

/// A singly linked list of events.
#[derive(Debug)]
pub struct LinkedEventCollection {
    head: Link<Event>,
    size: usize,
    next_id: u64,
}

impl LinkedEventCollection {
    pub fn new() -> Self {
        Self::with_initial_id(INITIAL_ID)
    }

    pub fn with_initial_id(initial_id: u64) -> Self {
        Self {
            head: None,
            size: 0,
            next_id: initial_id,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::with_initial_id(config.initial_id)
    }

    pub fn iter(&self) -> chain::Iter<'_, Event> {
        chain::iter(&self.head)
    }

    fn remove_at(&mut self, index: usize) -> Result<Event> {
        if index >= self.size {
            return Err(out_of_range(index, self.size));
        }
        // Index 0 rewrites `head`; otherwise the predecessor's `next`.
        let link = chain::cursor_mut(&mut self.head, index);
        let Some(mut node) = link.take() else {
            return Err(out_of_range(index, self.size));
        };
        *link = node.next.take();
        self.size -= 1;
        tracing::debug!(id = ?node.value.id(), index, size = self.size, "deleted event");
        Ok(node.value)
    }

    fn remove_matching(&mut self, target: &Event) -> Vec<Event> {
        let mut removed = Vec::new();
        let mut link = &mut self.head;
        loop {
            let matches = match link.as_deref() {
                Some(node) => node.value == *target,
                None => break,
            };
            if matches {
                if let Some(mut node) = link.take() {
                    *link = node.next.take();
                    removed.push(node.value);
                }
            } else if let Some(node) = link {
                link = &mut node.next;
            }
        }
        self.size -= removed.len();
        tracing::debug!(removed = removed.len(), size = self.size, "deleted matching events");
        removed
    }
}

impl Default for LinkedEventCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LinkedEventCollection {
    fn drop(&mut self) {
        chain::dispose(self.head.take());
    }
}

impl EventCollection for LinkedEventCollection {
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

        tracing::debug!(id = self.next_id, index, size = self.size + 1, "inserted event");
        self.size += 1;
        self.next_id = following_id;

        let link = chain::cursor_mut(&mut self.head, index);
        let mut node = Node::new(event);
        node.next = link.take();
        Ok(&link.insert(node).value)
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
        if index >= self.size {
            return Err(out_of_range(index, self.size));
        }
        chain::nth(&self.head, index)
            .map(|node| &node.value)
            .ok_or_else(|| out_of_range(index, self.size))
    }

    fn set(&mut self, index: usize, event: Event) -> Result<Event> {
        if index >= self.size {
            return Err(out_of_range(index, self.size));
        }
        if let Some(existing) = conflict_excluding(self.iter(), &event, index) {
            return Err(conflict_error(&event, existing));
        }
        match chain::cursor_mut(&mut self.head, index) {
            Some(node) => Ok(std::mem::replace(&mut node.value, event)),
            None => Err(out_of_range(index, self.size)),
        }
    }

    fn search_by_id(&self, id: u64, algorithm: SearchAlgorithm) -> Result<&Event> {
        let found = if algorithm.requires_sorted() {
            // Chain of references re-ordered by ID; the stored chain is untouched.
            let by_id =
                SortAlgorithm::Merge.sort_chain(chain::from_iter(self.iter()), |event| event.id());
            let found = algorithm
                .search_chain(&by_id, &Some(id), |event| event.id())
                .copied();
            chain::dispose(by_id);
            found
        } else {
            algorithm.search_chain(&self.head, &Some(id), Event::id)
        };
        found.ok_or(ScheduleError::NotFound(id))
    }

    fn list_all(&self, order: Option<SortAlgorithm>) -> Vec<&Event> {
        let snapshot = chain::from_iter(self.iter());
        let ordered = match order {
            Some(algorithm) => algorithm.sort_chain(snapshot, |event| event.start_time()),
            None => snapshot,
        };
        chain::into_vec(ordered)
    }

    fn sort(&mut self, algorithm: SortAlgorithm) {
        let head = self.head.take();
        self.head = algorithm.sort_chain(head, Event::start_time);
        tracing::debug!(%algorithm, size = self.size, "sorted event chain");
    }
}
