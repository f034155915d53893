//! Replayable memoization of lazily produced sequences.
//!
//! A sub-search started from the same state always yields the same results,
//! but sibling branches of a container ask for it again and again. Wrapping
//! the one-shot iterator in a [`Replay`] lets every consumer read it from the
//! start: items already pulled come from the buffer, and only a consumer that
//! runs past the buffer pulls (and buffers) more from upstream.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared buffer in front of a one-shot iterator.
pub struct Replay<I: Iterator> {
    inner: Rc<RefCell<Buffered<I>>>,
}

struct Buffered<I: Iterator> {
    /// `None` once upstream is exhausted, which also drops it.
    source: Option<I>,
    items: Vec<I::Item>,
}

impl<I> Replay<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Wrap `source`. Nothing is pulled until a consumer asks for it.
    pub fn new(source: I) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Buffered {
                source: Some(source),
                items: Vec::new(),
            })),
        }
    }

    /// A fresh consumer starting at the first item.
    pub fn replay(&self) -> ReplayIter<I> {
        ReplayIter {
            inner: Rc::clone(&self.inner),
            pos: 0,
        }
    }

    /// Number of items pulled from upstream so far.
    pub fn buffered(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.borrow().source.is_none()
    }
}

impl<I: Iterator> Clone for Replay<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// One consumer of a [`Replay`].
pub struct ReplayIter<I: Iterator> {
    inner: Rc<RefCell<Buffered<I>>>,
    pos: usize,
}

impl<I> Iterator for ReplayIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut inner = self.inner.borrow_mut();

        if let Some(item) = inner.items.get(self.pos) {
            let item = item.clone();
            self.pos += 1;
            return Some(item);
        }

        let pulled = inner.source.as_mut()?.next();
        match pulled {
            Some(item) => {
                inner.items.push(item.clone());
                self.pos += 1;
                Some(item)
            }
            None => {
                inner.source = None;
                None
            }
        }
    }
}
