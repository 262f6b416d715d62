//! Iteration over a failure and its `source()` predecessors.

use std::error::Error as StdError;
use std::iter::FusedIterator;

/// Iterator over an error followed by each of its `source()`s.
///
/// Yields the starting error first. Crosses freely between [`crate::Failure`]
/// nodes and foreign error types.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Chain<'a> {
    /// Start a walk at `head`.
    #[must_use]
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}
