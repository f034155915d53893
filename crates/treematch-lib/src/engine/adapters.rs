//! Lazy iterator adapters used by the evaluator.

use std::collections::HashSet;
use std::hash::Hash;

/// Drops items equal to one already produced, keeping first-seen order.
pub struct Distinct<I: Iterator> {
    iter: I,
    seen: HashSet<I::Item>,
}

impl<I> Distinct<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            seen: HashSet::new(),
        }
    }
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.iter.next()?;
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
    }
}

/// Yields `fallback` once if the wrapped iterator produced nothing at all.
pub struct OrElse<I: Iterator> {
    iter: I,
    fallback: Option<I::Item>,
    produced: bool,
}

impl<I: Iterator> OrElse<I> {
    pub fn new(iter: I, fallback: Option<I::Item>) -> Self {
        Self {
            iter,
            fallback,
            produced: false,
        }
    }
}

impl<I: Iterator> Iterator for OrElse<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.iter.next() {
            Some(item) => {
                self.produced = true;
                Some(item)
            }
            None if !self.produced => self.fallback.take(),
            None => None,
        }
    }
}
