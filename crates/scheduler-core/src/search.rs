//! Linear and binary search over contiguous and chained data.
//!
//! Both strategies match on a key-extraction function and return `None` on a
//! miss; turning a miss into `ScheduleError::NotFound` is the caller's job.
//!
//! Binary search requires the data to be sorted ascending by the *same* key it
//! searches on. On unsorted input it still terminates without panicking, but
//! whether it finds a present key is unspecified.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::chain::{self, Link};
use crate::error::ScheduleError;

/// Selector for one of the two search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchAlgorithm {
    Linear,
    #[default]
    Binary,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 2] = [Self::Linear, Self::Binary];

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Binary => "binary",
        }
    }

    /// Whether the input must already be sorted by the search key.
    pub fn requires_sorted(self) -> bool {
        matches!(self, Self::Binary)
    }

    pub fn search<'a, T, K, F>(self, data: &'a [T], target: &K, key: F) -> Option<&'a T>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        match self {
            Self::Linear => linear_search(data, target, key),
            Self::Binary => binary_search(data, target, key),
        }
    }

    pub fn search_chain<'a, T, K, F>(self, head: &'a Link<T>, target: &K, key: F) -> Option<&'a T>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        match self {
            Self::Linear => linear_search(chain::iter(head), target, key),
            Self::Binary => binary_search_chain(head, target, key),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "binary" => Ok(Self::Binary),
            _ => Err(ScheduleError::InvalidAlgorithm(format!(
                "{s} is an invalid or undefined search algorithm."
            ))),
        }
    }
}

/// Return the first item, in sequence order, whose key equals `target`.
pub fn linear_search<'a, T, K, F>(
    data: impl IntoIterator<Item = &'a T>,
    target: &K,
    key: F,
) -> Option<&'a T>
where
    T: 'a,
    F: Fn(&T) -> K,
    K: PartialEq,
{
    data.into_iter().find(|&item| key(item) == *target)
}

/// Classic halving search over a slice sorted ascending by `key`.
pub fn binary_search<'a, T, K, F>(data: &'a [T], target: &K, key: F) -> Option<&'a T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let mut low = 0;
    let mut high = data.len();
    while low < high {
        let mid = low + (high - low) / 2;
        let item = &data[mid];
        match key(item).cmp(target) {
            Ordering::Equal => return Some(item),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}

/// Halving search over a chain sorted ascending by `key`.
///
/// The length is counted once. Each probe walks forward from the node at the
/// current lower bound, so the total walk is O(n) hops over O(log n) probes.
pub fn binary_search_chain<'a, T, K, F>(head: &'a Link<T>, target: &K, key: F) -> Option<&'a T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let mut low = 0;
    let mut high = chain::len(head);
    let mut low_node = head.as_deref();
    while low < high {
        let mid = low + (high - low) / 2;
        let mut probe = low_node?;
        for _ in low..mid {
            probe = probe.next.as_deref()?;
        }
        match key(&probe.value).cmp(target) {
            Ordering::Equal => return Some(&probe.value),
            Ordering::Less => {
                low = mid + 1;
                low_node = probe.next.as_deref();
            }
            Ordering::Greater => high = mid,
        }
    }
    None
}
