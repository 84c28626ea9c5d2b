//! Insertion, merge, and quick sort over contiguous and chained data.
//!
//! Every algorithm takes a key-extraction function and orders ascending by its
//! result. Contiguous variants consume a `Vec<T>` and return it reordered;
//! chain variants consume a [`Link<T>`] and return the new head.
//!
//! | Algorithm | Cost                          | Stable |
//! |-----------|-------------------------------|--------|
//! | Insertion | O(n²) worst, O(n) presorted   | yes    |
//! | Merge     | O(n log n)                    | yes    |
//! | Quick     | O(n log n) avg, O(n²) worst   | no     |
//!
//! Quick sort picks the median of the first, middle, and last keys as pivot,
//! so presorted and reverse-sorted input stay at O(n log n). Keys equal to the
//! pivot go to their own bucket, which guarantees progress on long runs of
//! identical keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::chain::{self, Link, Node};
use crate::error::ScheduleError;

/// Selector for one of the three sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortAlgorithm {
    Insertion,
    Merge,
    #[default]
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [Self::Insertion, Self::Merge, Self::Quick];

    pub fn name(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
        }
    }

    /// Whether equal keys are guaranteed to keep their input order.
    pub fn is_stable(self) -> bool {
        !matches!(self, Self::Quick)
    }

    /// Sort contiguous data ascending by `key`.
    pub fn sort<T, K, F>(self, data: Vec<T>, key: F) -> Vec<T>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        match self {
            Self::Insertion => insertion_sort(data, key),
            Self::Merge => merge_sort(data, key),
            Self::Quick => quick_sort(data, key),
        }
    }

    /// Sort a chain ascending by `key`, returning the new head.
    pub fn sort_chain<T, K, F>(self, head: Link<T>, key: F) -> Link<T>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        match self {
            Self::Insertion => insertion_sort_chain(head, key),
            Self::Merge => merge_sort_chain(head, key),
            Self::Quick => quick_sort_chain(head, key),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(Self::Insertion),
            "merge" => Ok(Self::Merge),
            "quick" => Ok(Self::Quick),
            _ => Err(ScheduleError::InvalidAlgorithm(format!(
                "{s} is an invalid or undefined sorting algorithm."
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Contiguous
// ---------------------------------------------------------------------------

/// Insertion sort: shift each element left past strictly greater keys.
pub fn insertion_sort<T, K, F>(mut data: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    for i in 1..data.len() {
        let current = key(&data[i]);
        let mut slot = i;
        while slot > 0 && key(&data[slot - 1]) > current {
            slot -= 1;
        }
        data[slot..=i].rotate_right(1);
    }
    data
}

/// Top-down merge sort.
pub fn merge_sort<T, K, F>(data: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    merge_sort_vec(data, &key)
}

fn merge_sort_vec<T, K, F>(mut data: Vec<T>, key: &F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    if data.len() <= 1 {
        return data;
    }
    let right = data.split_off(data.len() / 2);
    let left = merge_sort_vec(data, key);
    let right = merge_sort_vec(right, key);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties go left to keep the sort stable.
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged
}

/// Three-way quick sort with a median-of-three pivot.
pub fn quick_sort<T, K, F>(data: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    quick_sort_vec(data, &key)
}

fn quick_sort_vec<T, K, F>(data: Vec<T>, key: &F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let n = data.len();
    if n <= 1 {
        return data;
    }
    let pivot = median_of_three(key(&data[0]), key(&data[n / 2]), key(&data[n - 1]));

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for item in data {
        match key(&item).cmp(&pivot) {
            Ordering::Less => less.push(item),
            Ordering::Equal => equal.push(item),
            Ordering::Greater => greater.push(item),
        }
    }

    let mut sorted = quick_sort_vec(less, key);
    sorted.append(&mut equal);
    sorted.extend(quick_sort_vec(greater, key));
    sorted
}

fn median_of_three<K: Ord>(a: K, b: K, c: K) -> K {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if c <= low {
        low
    } else if c >= high {
        high
    } else {
        c
    }
}

// ---------------------------------------------------------------------------
// Chained
// ---------------------------------------------------------------------------

/// Insertion sort by re-splicing nodes.
///
/// Nodes are collected in descending order, so ascending input prepends in
/// O(1) per node, and the result is reversed once at the end.
pub fn insertion_sort_chain<T, K, F>(mut head: Link<T>, key: F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let mut descending: Link<T> = None;
    while let Some(mut node) = head {
        head = node.next.take();
        let node_key = key(&node.value);

        // Skip strictly greater keys; a later equal key lands in front of an
        // earlier one here, which becomes behind it after the reversal.
        let mut cursor = &mut descending;
        while cursor.as_ref().is_some_and(|n| key(&n.value) > node_key) {
            if let Some(n) = cursor {
                cursor = &mut n.next;
            }
        }
        node.next = cursor.take();
        *cursor = Some(node);
    }
    chain::reverse(descending)
}

/// Merge sort that finds each midpoint with a slow/fast pointer walk.
pub fn merge_sort_chain<T, K, F>(head: Link<T>, key: F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    merge_sort_link(head, &key)
}

fn merge_sort_link<T, K, F>(mut head: Link<T>, key: &F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let Some(first) = head.as_deref() else {
        return head;
    };
    if first.next.is_none() {
        return head;
    }
    let hops = probe(first).middle_hops;
    let right = split_after(&mut head, hops);
    let left = merge_sort_link(head, key);
    let right = merge_sort_link(right, key);
    merge_links(left, right, key)
}

fn merge_links<T, K, F>(mut left: Link<T>, mut right: Link<T>, key: &F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let mut merged = None;
    let mut tail = &mut merged;
    loop {
        let take_left = match (left.as_deref(), right.as_deref()) {
            (Some(l), Some(r)) => key(&l.value) <= key(&r.value),
            _ => break,
        };
        let source = if take_left { &mut left } else { &mut right };
        if let Some(mut node) = source.take() {
            *source = node.next.take();
            tail = &mut tail.insert(node).next;
        }
    }
    *tail = left.or(right);
    merged
}

/// Quick sort partitioning nodes into less / equal / greater sub-chains.
pub fn quick_sort_chain<T, K, F>(head: Link<T>, key: F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    quick_sort_link(head, &key)
}

fn quick_sort_link<T, K, F>(mut head: Link<T>, key: &F) -> Link<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let Some(first) = head.as_deref() else {
        return head;
    };
    if first.next.is_none() {
        return head;
    }
    let Probe { middle, last, .. } = probe(first);
    let pivot = median_of_three(key(&first.value), key(&middle.value), key(&last.value));

    let mut less = None;
    let mut equal = None;
    let mut greater = None;
    let mut less_tail = &mut less;
    let mut equal_tail = &mut equal;
    let mut greater_tail = &mut greater;
    while let Some(mut node) = head {
        head = node.next.take();
        match key(&node.value).cmp(&pivot) {
            Ordering::Less => less_tail = &mut less_tail.insert(node).next,
            Ordering::Equal => equal_tail = &mut equal_tail.insert(node).next,
            Ordering::Greater => greater_tail = &mut greater_tail.insert(node).next,
        }
    }

    let sorted_less = quick_sort_link(less, key);
    let sorted_greater = quick_sort_link(greater, key);
    chain::concat(sorted_less, chain::concat(equal, sorted_greater))
}

struct Probe<'a, T> {
    /// Hops from the head to the last node of the left half.
    middle_hops: usize,
    middle: &'a Node<T>,
    last: &'a Node<T>,
}

/// One slow/fast walk: `slow` advances one node per two of `fast`.
fn probe<T>(head: &Node<T>) -> Probe<'_, T> {
    let mut slow = head;
    let mut last = head;
    let mut middle_hops = 0;
    let mut fast = head.next.as_deref();
    while let Some(ahead) = fast {
        last = ahead;
        let Some(after) = ahead.next.as_deref() else {
            break;
        };
        last = after;
        match slow.next.as_deref() {
            Some(next) => slow = next,
            None => break,
        }
        middle_hops += 1;
        fast = after.next.as_deref();
    }
    Probe {
        middle_hops,
        middle: slow,
        last,
    }
}

/// Detach everything after the node `hops` steps past `head`.
fn split_after<T>(head: &mut Link<T>, hops: usize) -> Link<T> {
    match chain::cursor_mut(head, hops) {
        Some(node) => node.next.take(),
        None => None,
    }
}
