//! Property-based tests using proptest
//!
//! These tests generate random operation sequences and inputs and verify the
//! heap against a plain-vector oracle, checking that the min-max ordering is
//! maintained after every step.

extern crate minmax_heap;
extern crate proptest;

use proptest::prelude::*;

use minmax_heap::{Error, MinMaxHeap};

const CAP: usize = 32;

fn check_against_model(heap: &MinMaxHeap<i16>, model: &[i16]) -> Result<(), TestCaseError> {
    prop_assert!(heap.is_heap());
    prop_assert_eq!(heap.len(), model.len());
    prop_assert!(heap.len() <= heap.capacity());
    prop_assert_eq!(heap.peek_min().ok().cloned(), model.iter().cloned().min());
    prop_assert_eq!(heap.peek_max().ok().cloned(), model.iter().cloned().max());
    Ok(())
}

proptest! {
    #[test]
    fn op_sequences_preserve_heap(ops in prop::collection::vec((0u8..5, any::<i16>()), 1..200)) {
        let mut heap = MinMaxHeap::with_capacity(CAP);
        let mut model: Vec<i16> = Vec::new();

        for (op, value) in ops {
            match op {
                0 => match heap.push(value) {
                    Ok(()) => model.push(value),
                    Err(Error::CapacityExceeded) => prop_assert_eq!(model.len(), CAP),
                    Err(e) => prop_assert!(false, "unexpected push error {:?}", e),
                },
                1 => match (heap.pop_min(), model.iter().cloned().min()) {
                    (Ok(x), Some(expected)) => {
                        prop_assert_eq!(x, expected);
                        let pos = model.iter().position(|&v| v == x).unwrap();
                        model.remove(pos);
                    }
                    (Err(Error::Empty), None) => {}
                    other => prop_assert!(false, "pop_min mismatch {:?}", other),
                },
                2 => match (heap.pop_max(), model.iter().cloned().max()) {
                    (Ok(x), Some(expected)) => {
                        prop_assert_eq!(x, expected);
                        let pos = model.iter().position(|&v| v == x).unwrap();
                        model.remove(pos);
                    }
                    (Err(Error::Empty), None) => {}
                    other => prop_assert!(false, "pop_max mismatch {:?}", other),
                },
                3 => match heap.push_circular(value) {
                    None => {
                        prop_assert!(model.len() < CAP);
                        model.push(value);
                    }
                    Some(out) => {
                        prop_assert_eq!(model.len(), CAP);
                        let cur_max = *model.iter().max().unwrap();
                        if value < cur_max {
                            prop_assert_eq!(out, cur_max);
                            let pos = model.iter().position(|&v| v == cur_max).unwrap();
                            model.remove(pos);
                            model.push(value);
                        } else {
                            prop_assert_eq!(out, value);
                        }
                    }
                },
                _ => {
                    if model.is_empty() {
                        prop_assert_eq!(heap.remove_at(0), Err(Error::Empty));
                    } else {
                        let index = value.unsigned_abs() as usize % heap.len();
                        let x = heap.remove_at(index).unwrap();
                        let pos = model.iter().position(|&v| v == x).unwrap();
                        model.remove(pos);
                    }
                }
            }
            check_against_model(&heap, &model)?;
        }
    }

    #[test]
    fn heapify_then_pop_min_sorts(items in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut heap = MinMaxHeap::from(items.clone());
        prop_assert!(heap.is_heap());

        let mut drained = Vec::with_capacity(items.len());
        while let Ok(x) = heap.pop_min() {
            drained.push(x);
        }

        let mut expected = items;
        expected.sort();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn heapify_then_pop_max_sorts_descending(items in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut heap = MinMaxHeap::from(items.clone());
        prop_assert!(heap.is_heap());

        let mut drained = Vec::with_capacity(items.len());
        while let Ok(x) = heap.pop_max() {
            drained.push(x);
        }

        let mut expected = items;
        expected.sort();
        expected.reverse();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn circular_push_keeps_the_k_smallest(
        items in prop::collection::vec(any::<i32>(), 0..100),
        cap in 1usize..16,
    ) {
        let mut heap = MinMaxHeap::with_capacity(cap);
        for &x in &items {
            let _ = heap.push_circular(x);
            prop_assert!(heap.is_heap());
            prop_assert!(heap.len() <= cap);
        }

        let mut survivors = heap.into_vec();
        survivors.sort();
        let mut expected = items;
        expected.sort();
        expected.truncate(cap);
        prop_assert_eq!(survivors, expected);
    }

    #[test]
    fn replace_preserves_everything_else(
        items in prop::collection::vec(any::<i32>(), 1..50),
        replacement in any::<i32>(),
        index_seed in any::<usize>(),
    ) {
        let index = index_seed % items.len();
        let mut heap = MinMaxHeap::from(items.clone());

        let before = {
            let mut v = heap.clone().into_vec();
            v.sort();
            v
        };
        let old = heap.replace_at(index, replacement).unwrap();
        prop_assert!(heap.is_heap());
        prop_assert_eq!(heap.len(), items.len());

        let mut after = heap.into_vec();
        after.sort();
        let mut expected = before;
        let pos = expected.iter().position(|&v| v == old).unwrap();
        expected.remove(pos);
        expected.push(replacement);
        expected.sort();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn validator_accepts_heapified_input(items in prop::collection::vec(any::<i32>(), 0..200)) {
        prop_assert!(MinMaxHeap::from(items).is_heap());
    }
}

#[test]
fn validator_accepts_degenerate_shapes() {
    assert!(MinMaxHeap::<i32>::from(vec![]).is_heap());
    assert!(MinMaxHeap::from(vec![7]).is_heap());
    assert!(MinMaxHeap::from((0..64).collect::<Vec<i32>>()).is_heap());
    assert!(MinMaxHeap::from((0..64).rev().collect::<Vec<i32>>()).is_heap());
    assert!(MinMaxHeap::from(vec![3; 64]).is_heap());
}
