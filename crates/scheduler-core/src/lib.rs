//! # scheduler-core
//!
//! Conflict-checked calendar event collections for campus scheduling.
//!
//! Two interchangeable storage representations share one contract
//! ([`EventCollection`]): a capacity-managed contiguous buffer and a
//! singly-linked chain. Both reject inserts that overlap an existing event and
//! delegate ordering and lookup to pluggable strategies.
//!
//! ## Quick start
//!
//! ```rust
//! use scheduler_core::{ArrayEventCollection, Event, EventCollection, SearchAlgorithm, SortAlgorithm};
//!
//! let mut events = ArrayEventCollection::new();
//! events.insert(Event::new("Standup", "2025-10-15", "10:00", "Room 1").unwrap(), None).unwrap();
//! events.insert(Event::new("Lecture", "2025-10-15", "09:00", "Hall B").unwrap(), None).unwrap();
//!
//! // 09:30 overlaps the 09:00 lecture.
//! let clash = Event::new("Office hours", "2025-10-15", "09:30", "Room 2").unwrap();
//! assert!(events.insert(clash, None).is_err());
//!
//! let titles: Vec<_> = events
//!     .list_all(Some(SortAlgorithm::Merge))
//!     .into_iter()
//!     .map(|e| e.title().to_string())
//!     .collect();
//! assert_eq!(titles, ["Lecture", "Standup"]);
//!
//! let found = events.search_by_id(1, SearchAlgorithm::Binary).unwrap();
//! assert_eq!(found.title(), "Standup");
//! ```
//!
//! ## Modules
//!
//! - [`event`] — the `Event` value and its derived time interval
//! - [`collection`] — the shared `EventCollection` contract
//! - [`array`] — contiguous, capacity-doubling collection
//! - [`linked`] — singly-linked collection
//! - [`chain`] — generic owned singly-linked chain used by strategies
//! - [`sort`] — insertion, merge, and quick sort
//! - [`search`] — linear and binary search
//! - [`config`] — default capacity, event duration, initial ID
//! - [`error`] — error types

pub mod array;
pub mod chain;
pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod linked;
pub mod search;
pub mod sort;

pub use array::ArrayEventCollection;
pub use collection::{DeleteTarget, EventCollection};
pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use event::{Event, EventDraft};
pub use linked::LinkedEventCollection;
pub use search::SearchAlgorithm;
pub use sort::SortAlgorithm;
