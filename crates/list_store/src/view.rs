//! Derived, read-only view state: counts, completion and display order.

use crate::structs::{Item, TodoList};
use std::iter::FusedIterator;

impl TodoList {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// An empty list is never complete.
    pub fn is_complete(&self) -> bool {
        self.item_count() > 0 && self.remaining_count() == 0
    }
}

/// Anything that sorts into the "done" bucket of [`display_order`].
pub trait Completable {
    fn is_done(&self) -> bool;
}

impl Completable for Item {
    fn is_done(&self) -> bool {
        self.completed
    }
}

impl Completable for TodoList {
    fn is_done(&self) -> bool {
        self.is_complete()
    }
}

/// Lazily yield `elements` with unfinished ones first, each paired with its
/// position in `elements`.
///
/// Relative order inside each bucket is preserved. The positions are only
/// valid until the next insertion or deletion.
pub fn display_order<T: Completable>(elements: &[T]) -> DisplayOrder<'_, T> {
    DisplayOrder {
        elements,
        pos: 0,
        done_pass: false,
    }
}

/// Iterator returned by [`display_order`]. Clone it to restart.
#[derive(Debug)]
pub struct DisplayOrder<'a, T> {
    elements: &'a [T],
    pos: usize,
    done_pass: bool,
}

impl<T> Clone for DisplayOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements,
            pos: self.pos,
            done_pass: self.done_pass,
        }
    }
}

impl<'a, T: Completable> Iterator for DisplayOrder<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos == self.elements.len() {
                if self.done_pass {
                    return None;
                }
                self.done_pass = true;
                self.pos = 0;
                continue;
            }

            let index = self.pos;
            self.pos += 1;
            let element = &self.elements[index];
            if element.is_done() == self.done_pass {
                return Some((element, index));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.done_pass {
            self.elements.len() - self.pos
        } else {
            self.elements.len() * 2 - self.pos
        };
        (0, Some(left))
    }
}

impl<T: Completable> FusedIterator for DisplayOrder<'_, T> {}
