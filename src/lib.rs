// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-ended priority queue implemented with a bounded min-max heap.
//!
//! A `MinMaxHeap` gives access to both its smallest and its greatest item and
//! accepts custom comparators, while storing its items in a single contiguous
//! array whose capacity is fixed at construction. If you only need access to
//! one end and do not want a capacity bound, the standard library's
//! [`BinaryHeap`][bh] is more efficient.
//!
//! Insertion is `O(log n)`. Popping the smallest or greatest item is
//! `O(log n)`. Retrieving the smallest or greatest item is `O(1)`. Building a
//! heap from an arbitrary vector is `O(n)`.
//!
//! The structure is the min-max heap of Atkinson, Sack, Santoro and
//! Strothotte, "Min-max heaps and generalized priority queues",
//! Communications of the ACM 29(10), 1986.
//!
//! [bh]: https://doc.rust-lang.org/stable/std/collections/struct.BinaryHeap.html

extern crate compare;
#[cfg(test)] extern crate rand;

use std::error;
use std::fmt::{self, Debug};
use std::mem;

use compare::{Compare, Natural, natural};

// A min-max heap is a complete binary tree stored in a linear array, with the
// levels of the tree alternating between "min levels" and "max levels":
//
//                 0           <- min level
//               /   \
//              1     2        <- max level
//             / \   / \
//            3   4 5   6      <- min level
//
// An item on a min level is less than or equal to every item below it, and an
// item on a max level is greater than or equal to every item below it. This
// implies that the smallest item is at offset 0 and the greatest item is at
// offset 1 or 2 (whichever holds the larger of the two), or at offset 0 when
// the heap holds a single item.
//
// The repair primitives come in min-level/max-level pairs plus a dispatcher
// that picks the variant from the level parity of the index being repaired.
// The lookup helpers take the rightmost live index so they never read beyond
// the occupied range, and compare with strict `<`/`>` only: ties keep the
// earlier candidate in the fixed scan order.

fn parent(i: usize) -> usize { (i - 1) / 2 }

fn has_parent(i: usize) -> bool { i > 0 }

fn left(i: usize) -> usize { 2 * i + 1 }

fn right(i: usize) -> usize { 2 * i + 2 }

fn grandparent(i: usize) -> usize { parent(parent(i)) }

fn has_grandparent(i: usize) -> bool { i > 2 }

fn is_child_of(i: usize, c: usize) -> bool { c == left(i) || c == right(i) }

/// Returns `true` if `i` lies on a min level. The root is level 0, a min
/// level. Level parity is the parity of the integer log2 of the one-based
/// index, computed exactly; a floating-point log could misround next to a
/// power of two.
fn is_min_level(i: usize) -> bool {
    (i + 1).ilog2() % 2 == 0
}

/// Returns the index of the smaller child of `i`, or `None` if `i` has no
/// children within the live range `[0, right_index]`.
fn min_child<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C) -> Option<usize> {
    if left(i) > right_index { return None; }
    let mut m = left(i);
    if right(i) <= right_index && cmp.compares_lt(&v[right(i)], &v[m]) {
        m = right(i);
    }
    Some(m)
}

/// Returns the index of the smallest grandchild of `i`, or `None` if `i` has
/// no grandchildren within the live range. In a complete tree any grandchild
/// existing implies the first one exists, so only that slot is tested.
fn min_gchild<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C) -> Option<usize> {
    let l = left(i);
    let r = right(i);
    if left(l) > right_index { return None; }
    let mut m = left(l);
    if right(l) <= right_index && cmp.compares_lt(&v[right(l)], &v[m]) {
        m = right(l);
    }
    if left(r) <= right_index && cmp.compares_lt(&v[left(r)], &v[m]) {
        m = left(r);
    }
    if right(r) <= right_index && cmp.compares_lt(&v[right(r)], &v[m]) {
        m = right(r);
    }
    Some(m)
}

/// Returns the index holding the smallest value among the children and
/// grandchildren of `i`, or `None` if `i` has no children at all.
fn min_child_or_gchild<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C)
                                         -> Option<usize> {
    min_child(v, i, right_index, cmp).map(|m| {
        match min_gchild(v, i, right_index, cmp) {
            Some(g) if cmp.compares_lt(&v[g], &v[m]) => g,
            _ => m,
        }
    })
}

/// Returns the index of the larger child of `i`, or `None` if `i` has no
/// children within the live range `[0, right_index]`.
fn max_child<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C) -> Option<usize> {
    if left(i) > right_index { return None; }
    let mut m = left(i);
    if right(i) <= right_index && cmp.compares_gt(&v[right(i)], &v[m]) {
        m = right(i);
    }
    Some(m)
}

/// Returns the index of the largest grandchild of `i`, or `None` if `i` has
/// no grandchildren within the live range.
fn max_gchild<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C) -> Option<usize> {
    let l = left(i);
    let r = right(i);
    if left(l) > right_index { return None; }
    let mut m = left(l);
    if right(l) <= right_index && cmp.compares_gt(&v[right(l)], &v[m]) {
        m = right(l);
    }
    if left(r) <= right_index && cmp.compares_gt(&v[left(r)], &v[m]) {
        m = left(r);
    }
    if right(r) <= right_index && cmp.compares_gt(&v[right(r)], &v[m]) {
        m = right(r);
    }
    Some(m)
}

/// Returns the index holding the largest value among the children and
/// grandchildren of `i`, or `None` if `i` has no children at all.
fn max_child_or_gchild<T, C: Compare<T>>(v: &[T], i: usize, right_index: usize, cmp: &C)
                                         -> Option<usize> {
    max_child(v, i, right_index, cmp).map(|m| {
        match max_gchild(v, i, right_index, cmp) {
            Some(g) if cmp.compares_gt(&v[g], &v[m]) => g,
            _ => m,
        }
    })
}

/// Sifts the value at `sift_index` (on a min level) down its subtree. The
/// slice must satisfy the heap ordering everywhere except possibly at
/// `sift_index`.
fn sift_down_min<T, C: Compare<T>>(v: &mut [T], mut sift_index: usize, right_index: usize,
                                   cmp: &C) {
    while left(sift_index) <= right_index {
        let m = match min_child_or_gchild(v, sift_index, right_index, cmp) {
            Some(m) => m,
            None => break,
        };
        if is_child_of(sift_index, m) {
            // A child case settles in a single swap.
            if cmp.compares_lt(&v[m], &v[sift_index]) {
                v.swap(m, sift_index);
            }
            break;
        }
        // The smallest value below is a grandchild. After swapping it up, its
        // old parent sits on a max level and may now be smaller than the
        // value pushed down, so fix that pair before descending further.
        if !cmp.compares_lt(&v[m], &v[sift_index]) {
            break;
        }
        v.swap(m, sift_index);
        if cmp.compares_lt(&v[parent(m)], &v[m]) {
            v.swap(m, parent(m));
        }
        sift_index = m;
    }
}

/// Sifts the value at `sift_index` (on a max level) down its subtree.
fn sift_down_max<T, C: Compare<T>>(v: &mut [T], mut sift_index: usize, right_index: usize,
                                   cmp: &C) {
    while left(sift_index) <= right_index {
        let m = match max_child_or_gchild(v, sift_index, right_index, cmp) {
            Some(m) => m,
            None => break,
        };
        if is_child_of(sift_index, m) {
            if cmp.compares_lt(&v[sift_index], &v[m]) {
                v.swap(m, sift_index);
            }
            break;
        }
        if !cmp.compares_lt(&v[sift_index], &v[m]) {
            break;
        }
        v.swap(m, sift_index);
        if cmp.compares_lt(&v[m], &v[parent(m)]) {
            v.swap(m, parent(m));
        }
        sift_index = m;
    }
}

/// Sifts the value at `sift_index` down, picking the min-level or max-level
/// variant from the index's level parity.
fn sift_down<T, C: Compare<T>>(v: &mut [T], sift_index: usize, right_index: usize, cmp: &C) {
    if is_min_level(sift_index) {
        sift_down_min(v, sift_index, right_index, cmp);
    } else {
        sift_down_max(v, sift_index, right_index, cmp);
    }
}

/// Bubbles the value at `bubble_index` (on a min level) toward the root,
/// swapping with grandparents only: the immediate parent sits on the opposite
/// level and is never compared here.
fn bubble_up_min<T, C: Compare<T>>(v: &mut [T], mut bubble_index: usize, cmp: &C) {
    while has_grandparent(bubble_index) {
        let g = grandparent(bubble_index);
        if !cmp.compares_lt(&v[bubble_index], &v[g]) {
            break;
        }
        v.swap(bubble_index, g);
        bubble_index = g;
    }
}

/// Bubbles the value at `bubble_index` (on a max level) toward the root.
fn bubble_up_max<T, C: Compare<T>>(v: &mut [T], mut bubble_index: usize, cmp: &C) {
    while has_grandparent(bubble_index) {
        let g = grandparent(bubble_index);
        if !cmp.compares_gt(&v[bubble_index], &v[g]) {
            break;
        }
        v.swap(bubble_index, g);
        bubble_index = g;
    }
}

/// Bubbles the value at `bubble_index` toward the root. If the value violates
/// the ordering against its immediate parent, which sits on the opposite
/// level, it first crosses over with a single parent swap and continues with
/// the other variant from the parent's position.
fn bubble_up<T, C: Compare<T>>(v: &mut [T], bubble_index: usize, cmp: &C) {
    if is_min_level(bubble_index) {
        if has_parent(bubble_index)
            && cmp.compares_lt(&v[parent(bubble_index)], &v[bubble_index]) {
            v.swap(bubble_index, parent(bubble_index));
            bubble_up_max(v, parent(bubble_index), cmp);
        } else {
            bubble_up_min(v, bubble_index, cmp);
        }
    } else {
        if has_parent(bubble_index)
            && cmp.compares_lt(&v[bubble_index], &v[parent(bubble_index)]) {
            v.swap(bubble_index, parent(bubble_index));
            bubble_up_min(v, parent(bubble_index), cmp);
        } else {
            bubble_up_max(v, bubble_index, cmp);
        }
    }
}

/// Establishes the min-max heap ordering over the whole slice with Floyd's
/// bottom-up construction: every internal node is sifted down in turn,
/// starting from the last item's parent. Linear time.
fn make_heap<T, C: Compare<T>>(v: &mut [T], cmp: &C) {
    if v.len() > 1 {
        let last = v.len() - 1;
        for current in (0..parent(last) + 1).rev() {
            sift_down(v, current, last, cmp);
        }
    }
}

/// Checks whether the slice satisfies the min-max heap ordering.
///
/// Walks from the last item toward the front, testing each visited index's
/// parent as a subtree root: a min-level root must not exceed its smallest
/// child-or-grandchild and a max-level root must not fall below its largest,
/// with equal values accepted. Short-circuits on the first violation.
fn is_min_max_heap<T, C: Compare<T>>(v: &[T], cmp: &C) -> bool {
    if v.len() <= 1 {
        return true;
    }
    let last = v.len() - 1;
    let mut i = last;
    while has_parent(i) {
        let sub_root = parent(i);
        if is_min_level(sub_root) {
            if let Some(m) = min_child_or_gchild(v, sub_root, last, cmp) {
                if cmp.compares_lt(&v[m], &v[sub_root]) {
                    return false;
                }
            }
        } else {
            if let Some(m) = max_child_or_gchild(v, sub_root, last, cmp) {
                if cmp.compares_gt(&v[m], &v[sub_root]) {
                    return false;
                }
            }
        }
        i -= 1;
    }
    true
}

/// The ways a `MinMaxHeap` operation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operation needs at least one item, but the heap is empty.
    Empty,
    /// An insertion was attempted while the heap was at capacity.
    CapacityExceeded,
    /// The supplied index falls outside the occupied range.
    IndexOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Empty => write!(f, "heap is empty"),
            Error::CapacityExceeded => write!(f, "heap is at capacity"),
            Error::IndexOutOfRange => write!(f, "index beyond the occupied range of the heap"),
        }
    }
}

impl error::Error for Error {}

/// A double-ended priority queue implemented with a bounded min-max heap.
///
/// The heap's capacity is fixed when it is constructed and is never grown,
/// shrunk, or reallocated afterwards. An insertion into a full heap fails
/// with [`Error::CapacityExceeded`](enum.Error.html), while
/// [`push_circular`](struct.MinMaxHeap.html#method.push_circular) trades the
/// greatest item out instead.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the heap's
/// comparator, changes while it is in the heap. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct MinMaxHeap<T, C: Compare<T> = Natural<T>> {
    data: Vec<T>,
    cap: usize,
    cmp: C,
}

impl<T: Ord> MinMaxHeap<T> {
    /// Returns an empty heap with the given fixed capacity, ordered according
    /// to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use minmax_heap::MinMaxHeap;
    ///
    /// let heap = MinMaxHeap::<u32>::with_capacity(5);
    /// assert!(heap.is_empty());
    /// assert_eq!(heap.capacity(), 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> MinMaxHeap<T> {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<T: Ord> From<Vec<T>> for MinMaxHeap<T> {
    /// Returns a heap containing all the items of the given vector, ordered
    /// according to the natural order of its items. The heap's capacity
    /// equals the vector's length, so the heap starts out full.
    ///
    /// # Examples
    ///
    /// ```
    /// use minmax_heap::MinMaxHeap;
    ///
    /// let heap = MinMaxHeap::from(vec![5, 1, 6, 4]);
    /// assert_eq!(heap.len(), 4);
    /// assert_eq!(heap.peek_min(), Ok(&1));
    /// assert_eq!(heap.peek_max(), Ok(&6));
    /// ```
    fn from(vec: Vec<T>) -> MinMaxHeap<T> {
        Self::from_vec_and_comparator(vec, natural())
    }
}

impl<T, C: Compare<T>> MinMaxHeap<T, C> {
    /// Returns an empty heap with the given fixed capacity, ordered according
    /// to the given comparator.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> MinMaxHeap<T, C> {
        MinMaxHeap { data: Vec::with_capacity(capacity), cap: capacity, cmp: cmp }
    }

    /// Returns a heap containing all the items of the given vector, ordered
    /// according to the given comparator. The heap's capacity equals the
    /// vector's length, so the heap starts out full.
    pub fn from_vec_and_comparator(mut vec: Vec<T>, cmp: C) -> MinMaxHeap<T, C> {
        make_heap(&mut vec, &cmp);
        let cap = vec.len();
        let heap = MinMaxHeap { data: vec, cap: cap, cmp: cmp };
        debug_assert!(heap.is_heap());
        heap
    }

    /// Returns a reference to the smallest item in the heap.
    ///
    /// Fails with `Error::Empty` if the heap is empty.
    pub fn peek_min(&self) -> Result<&T, Error> {
        match self.data.len() {
            0 => Err(Error::Empty),
            _ => Ok(&self.data[0]),
        }
    }

    /// Returns a reference to the greatest item in the heap.
    ///
    /// Fails with `Error::Empty` if the heap is empty.
    pub fn peek_max(&self) -> Result<&T, Error> {
        match self.data.len() {
            0 => Err(Error::Empty),
            1 => Ok(&self.data[0]),
            n => match max_child(&self.data, 0, n - 1, &self.cmp) {
                Some(m) => Ok(&self.data[m]),
                None => Ok(&self.data[0]),
            },
        }
    }

    /// Removes the smallest item from the heap and returns it.
    ///
    /// Fails with `Error::Empty` if the heap is empty.
    pub fn pop_min(&mut self) -> Result<T, Error> {
        if self.data.is_empty() {
            return Err(Error::Empty);
        }
        let min = self.data.swap_remove(0);
        if !self.data.is_empty() {
            let last = self.data.len() - 1;
            sift_down(&mut self.data, 0, last, &self.cmp);
        }
        debug_assert!(self.is_heap());
        Ok(min)
    }

    /// Removes the greatest item from the heap and returns it.
    ///
    /// Fails with `Error::Empty` if the heap is empty.
    pub fn pop_max(&mut self) -> Result<T, Error> {
        if self.data.is_empty() {
            return Err(Error::Empty);
        }
        let last = self.data.len() - 1;
        let m = match max_child(&self.data, 0, last, &self.cmp) {
            Some(m) => m,
            None => 0,
        };
        self.remove_at(m)
    }

    /// Pushes an item onto the heap.
    ///
    /// Fails with `Error::CapacityExceeded`, leaving the heap untouched, if
    /// the heap is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use minmax_heap::{MinMaxHeap, Error};
    ///
    /// let mut heap = MinMaxHeap::with_capacity(2);
    /// assert_eq!(heap.push(3), Ok(()));
    /// assert_eq!(heap.push(1), Ok(()));
    /// assert_eq!(heap.push(2), Err(Error::CapacityExceeded));
    /// assert_eq!(heap.len(), 2);
    /// ```
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        if self.data.len() == self.cap {
            return Err(Error::CapacityExceeded);
        }
        self.data.push(item);
        let last = self.data.len() - 1;
        bubble_up(&mut self.data, last, &self.cmp);
        debug_assert!(self.is_heap());
        Ok(())
    }

    /// Pushes an item onto the heap, trading the greatest item out when the
    /// heap is full.
    ///
    /// Returns `None` if there was room and the item was simply inserted.
    /// Otherwise the heap was full: if the new item is smaller than the
    /// current greatest item, that greatest item is evicted and returned; if
    /// not, the heap is left untouched and the rejected item itself is
    /// returned. A heap with zero capacity rejects every item.
    ///
    /// A full heap fed through this method therefore always holds the
    /// smallest items seen so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use minmax_heap::MinMaxHeap;
    ///
    /// let mut heap = MinMaxHeap::from(vec![3, 1, 4, 1, 5]);
    /// assert_eq!(heap.push_circular(2), Some(5)); // full: the max is evicted
    /// assert_eq!(heap.push_circular(9), Some(9)); // full: 9 is not smaller than the max
    /// assert_eq!(heap.peek_max(), Ok(&4));
    /// ```
    pub fn push_circular(&mut self, item: T) -> Option<T> {
        if self.data.len() < self.cap {
            self.data.push(item);
            let last = self.data.len() - 1;
            bubble_up(&mut self.data, last, &self.cmp);
            debug_assert!(self.is_heap());
            return None;
        }
        if self.cap == 0 {
            return Some(item);
        }
        let last = self.cap - 1;
        let m = match max_child(&self.data, 0, last, &self.cmp) {
            Some(m) => m,
            None => 0,
        };
        if !self.cmp.compares_lt(&item, &self.data[m]) {
            return Some(item);
        }
        let evicted = mem::replace(&mut self.data[m], item);
        if self.cap > 1 {
            // The incoming item may be the new minimum; put it at the root
            // before settling it.
            if self.cmp.compares_lt(&self.data[m], &self.data[0]) {
                self.data.swap(0, m);
            }
            sift_down(&mut self.data, m, last, &self.cmp);
        }
        debug_assert!(self.is_heap());
        Some(evicted)
    }

    /// Replaces the item at `index` with a new item, returning the old one.
    ///
    /// Fails with `Error::Empty` if the heap is empty, or with
    /// `Error::IndexOutOfRange` if `index` is not within the occupied range
    /// `[0, len())`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minmax_heap::MinMaxHeap;
    ///
    /// let mut heap = MinMaxHeap::from(vec![2, 1, 3]);
    /// assert_eq!(heap.replace_at(0, 5), Ok(1));
    /// assert_eq!(heap.peek_min(), Ok(&2));
    /// assert_eq!(heap.peek_max(), Ok(&5));
    /// ```
    pub fn replace_at(&mut self, index: usize, item: T) -> Result<T, Error> {
        if self.data.is_empty() {
            return Err(Error::Empty);
        }
        if index >= self.data.len() {
            return Err(Error::IndexOutOfRange);
        }
        let old = mem::replace(&mut self.data[index], item);
        self.restore_at(index, &old);
        debug_assert!(self.is_heap());
        Ok(old)
    }

    /// Removes and returns the item at `index`.
    ///
    /// The last item takes the removed item's place and is then moved to
    /// where it belongs. Fails with `Error::Empty` if the heap is empty, or
    /// with `Error::IndexOutOfRange` if `index` is not within the occupied
    /// range `[0, len())`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, Error> {
        if self.data.is_empty() {
            return Err(Error::Empty);
        }
        if index >= self.data.len() {
            return Err(Error::IndexOutOfRange);
        }
        let removed = self.data.swap_remove(index);
        if index < self.data.len() {
            self.restore_at(index, &removed);
        }
        debug_assert!(self.is_heap());
        Ok(removed)
    }

    /// Restores the heap ordering around `index` after the item there has
    /// been replaced; `old` is the item that previously occupied the slot.
    ///
    /// A replacement moving toward the extreme of its own level only needs
    /// that level's bubble-up. Otherwise the new item may violate the
    /// opposite ordering at its parent (a single bubble-up crossover fixes
    /// that), and then sifts down from its slot.
    fn restore_at(&mut self, index: usize, old: &T) {
        let last = self.data.len() - 1;
        if is_min_level(index) {
            if self.cmp.compares_lt(&self.data[index], old) {
                bubble_up_min(&mut self.data, index, &self.cmp);
            } else {
                if has_parent(index)
                    && self.cmp.compares_lt(&self.data[parent(index)], &self.data[index]) {
                    bubble_up(&mut self.data, index, &self.cmp);
                }
                sift_down(&mut self.data, index, last, &self.cmp);
            }
        } else {
            if self.cmp.compares_lt(old, &self.data[index]) {
                bubble_up_max(&mut self.data, index, &self.cmp);
            } else {
                if has_parent(index)
                    && self.cmp.compares_lt(&self.data[index], &self.data[parent(index)]) {
                    bubble_up(&mut self.data, index, &self.cmp);
                }
                sift_down(&mut self.data, index, last, &self.cmp);
            }
        }
    }

    /// Checks whether the heap ordering holds for the current contents.
    ///
    /// Always `true` after the public operations; exposed so callers can
    /// validate data they have bulk-loaded or are about to trust.
    pub fn is_heap(&self) -> bool {
        is_min_max_heap(&self.data, &self.cmp)
    }

    /// Returns the fixed capacity of the heap.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the number of items in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap contains no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the heap holds as many items as its capacity.
    pub fn is_full(&self) -> bool {
        self.data.len() == self.cap
    }

    /// Consumes the heap and returns its items as a vector in arbitrary order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Debug, C: Compare<T>> Debug for MinMaxHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
