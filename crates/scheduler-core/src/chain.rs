//! Owned singly-linked chains.
//!
//! A chain is a `Link<T>`: either empty or a boxed [`Node`] that exclusively
//! owns its successor. Ownership makes cycles unrepresentable, and every splice
//! is a single `Option::take` plus one assignment.
//!
//! The sort and search strategies operate on `Link<T>` directly, so they never
//! see the collection that owns the chain.

/// One element of a chain.
#[derive(Debug)]
pub struct Node<T> {
    pub value: T,
    pub next: Link<T>,
}

/// Exclusive reference to the rest of a chain.
pub type Link<T> = Option<Box<Node<T>>>;

impl<T> Node<T> {
    pub fn new(value: T) -> Box<Self> {
        Box::new(Self { value, next: None })
    }
}

/// Build a chain preserving iteration order.
pub fn from_iter<T>(values: impl IntoIterator<Item = T>) -> Link<T> {
    let mut head = None;
    let mut tail = &mut head;
    for value in values {
        tail = &mut tail.insert(Node::new(value)).next;
    }
    head
}

/// Drain a chain into a vector without recursion.
pub fn into_vec<T>(mut link: Link<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(mut node) = link {
        link = node.next.take();
        values.push(node.value);
    }
    values
}

/// Drop a chain node by node.
///
/// The default drop glue for `Box<Node<T>>` recurses once per node.
pub fn dispose<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

/// Reverse a chain in place by re-pointing every node.
pub fn reverse<T>(mut link: Link<T>) -> Link<T> {
    let mut reversed = None;
    while let Some(mut node) = link {
        link = node.next.take();
        node.next = reversed;
        reversed = Some(node);
    }
    reversed
}

/// Number of nodes reachable from `link`.
pub fn len<T>(link: &Link<T>) -> usize {
    iter(link).count()
}

/// Borrowing iterator over chain values.
pub fn iter<T>(link: &Link<T>) -> Iter<'_, T> {
    Iter {
        next: link.as_deref(),
    }
}

/// The node `hops` steps past `link`, if the chain is that long.
pub fn nth<T>(link: &Link<T>, hops: usize) -> Option<&Node<T>> {
    let mut node = link.as_deref()?;
    for _ in 0..hops {
        node = node.next.as_deref()?;
    }
    Some(node)
}

/// The link `hops` steps past `link`.
///
/// Stops early at the end-of-chain marker, so callers validate `hops` first.
pub fn cursor_mut<T>(link: &mut Link<T>, hops: usize) -> &mut Link<T> {
    let mut cursor = link;
    for _ in 0..hops {
        match cursor {
            Some(node) => cursor = &mut node.next,
            None => break,
        }
    }
    cursor
}

/// Append `tail` after the last node of `head`.
pub fn concat<T>(mut head: Link<T>, tail: Link<T>) -> Link<T> {
    let mut cursor = &mut head;
    while let Some(node) = cursor {
        cursor = &mut node.next;
    }
    *cursor = tail;
    head
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}
