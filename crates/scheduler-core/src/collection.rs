//! The contract shared by both event collection representations.

use crate::error::{Result, ScheduleError};
use crate::event::Event;
use crate::search::SearchAlgorithm;
use crate::sort::SortAlgorithm;

/// Which events a [`EventCollection::delete`] call removes.
#[derive(Debug, Clone, Copy)]
pub enum DeleteTarget<'a> {
    /// The event at the last position.
    Last,
    /// The event at a position in `[0, len)`.
    Index(usize),
    /// Every event structurally equal to this one.
    Matching(&'a Event),
}

/// An ordered, conflict-free container of events.
///
/// Implementations own their events, assign IDs from a per-instance counter
/// on insert, and reject any insert or replacement whose interval overlaps a
/// live event. Every failing call leaves the collection unchanged.
pub trait EventCollection {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// ID the next successful insert will assign.
    fn next_id(&self) -> u64;

    /// Live events in stored order.
    fn events(&self) -> Box<dyn Iterator<Item = &Event> + '_>;

    /// First live event, in stored order, that overlaps `candidate`.
    fn find_conflict(&self, candidate: &Event) -> Option<&Event> {
        self.events().find(|existing| candidate.collides_with(existing))
    }

    /// Insert `event` at `index` (default: the end), assigning its ID.
    ///
    /// # Errors
    /// `Conflict` if it overlaps a live event, `IndexOutOfRange` if
    /// `index > len`, `IdsExhausted` if the ID counter cannot advance.
    fn insert(&mut self, event: Event, index: Option<usize>) -> Result<&Event>;

    /// Remove events, handing ownership back to the caller.
    ///
    /// # Errors
    /// `IndexOutOfRange` for a position outside `[0, len)`, including
    /// [`DeleteTarget::Last`] on an empty collection. `Matching` with no match
    /// succeeds with an empty vector.
    fn delete(&mut self, target: DeleteTarget<'_>) -> Result<Vec<Event>>;

    fn get(&self, index: usize) -> Result<&Event>;

    /// Replace the event at `index`, returning the previous one.
    ///
    /// The replacement is stored as given, ID included. It must not overlap
    /// any other live event.
    fn set(&mut self, index: usize, event: Event) -> Result<Event>;

    /// Find the event with `id`.
    ///
    /// Binary search runs over a snapshot sorted by ID; stored order is never
    /// changed by a search.
    fn search_by_id(&self, id: u64, algorithm: SearchAlgorithm) -> Result<&Event>;

    /// Live events, in stored order (`None`) or ascending by start time.
    fn list_all(&self, order: Option<SortAlgorithm>) -> Vec<&Event>;

    /// Reorder the stored events ascending by start time.
    fn sort(&mut self, algorithm: SortAlgorithm);
}

/// First event other than the one at `skip` that overlaps `candidate`.
pub(crate) fn conflict_excluding<'a>(
    events: impl Iterator<Item = &'a Event>,
    candidate: &Event,
    skip: usize,
) -> Option<&'a Event> {
    events
        .enumerate()
        .filter(|(position, _)| *position != skip)
        .map(|(_, existing)| existing)
        .find(|existing| candidate.collides_with(existing))
}

pub(crate) fn conflict_error(candidate: &Event, existing: &Event) -> ScheduleError {
    tracing::warn!(
        candidate = candidate.title(),
        existing = existing.title(),
        existing_id = ?existing.id(),
        "rejected overlapping event"
    );
    ScheduleError::Conflict {
        candidate: candidate.title().to_string(),
        existing: existing.title().to_string(),
    }
}

pub(crate) fn out_of_range(index: usize, len: usize) -> ScheduleError {
    ScheduleError::IndexOutOfRange { index, len }
}
