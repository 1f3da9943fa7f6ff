/*!
 * Circular Deque Model Tests
 * Property tests comparing CircularDeque against a VecDeque oracle
 */

use fairq::core::data_structures::CircularDeque;
use fairq::DequeError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    RemoveAt(usize),
    Set(usize, i32),
    InsertRange(usize, Vec<i32>),
    RemoveRange(usize, usize),
    SetCapacity(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        4 => any::<i32>().prop_map(Op::PushFront),
        3 => Just(Op::PopBack),
        3 => Just(Op::PopFront),
        3 => (0usize..24, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => (0usize..24).prop_map(Op::RemoveAt),
        1 => (0usize..24, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => (0usize..24, prop::collection::vec(any::<i32>(), 0..5))
            .prop_map(|(i, items)| Op::InsertRange(i, items)),
        1 => (0usize..24, 0usize..6).prop_map(|(i, n)| Op::RemoveRange(i, n)),
        1 => (0usize..40).prop_map(Op::SetCapacity),
        1 => Just(Op::Clear),
    ]
}

fn apply(deque: &mut CircularDeque<i32>, oracle: &mut VecDeque<i32>, op: Op) {
    match op {
        Op::PushBack(v) => {
            deque.push_back(v);
            oracle.push_back(v);
        }
        Op::PushFront(v) => {
            deque.push_front(v);
            oracle.push_front(v);
        }
        Op::PopBack => match oracle.pop_back() {
            Some(expected) => assert_eq!(deque.pop_back(), Ok(expected)),
            None => assert_eq!(deque.pop_back(), Err(DequeError::EmptyContainer)),
        },
        Op::PopFront => match oracle.pop_front() {
            Some(expected) => assert_eq!(deque.pop_front(), Ok(expected)),
            None => assert_eq!(deque.pop_front(), Err(DequeError::EmptyContainer)),
        },
        Op::Insert(index, v) => {
            let len = oracle.len();
            let result = deque.insert(index, v);
            if index <= len {
                assert_eq!(result, Ok(()));
                oracle.insert(index, v);
            } else {
                assert_eq!(result, Err(DequeError::IndexOutOfRange { index, len }));
            }
        }
        Op::RemoveAt(index) => {
            let len = oracle.len();
            match oracle.remove(index) {
                Some(expected) => assert_eq!(deque.remove_at(index), Ok(expected)),
                None => assert_eq!(
                    deque.remove_at(index),
                    Err(DequeError::IndexOutOfRange { index, len })
                ),
            }
        }
        Op::Set(index, v) => {
            let result = deque.set(index, v);
            match oracle.get_mut(index) {
                Some(slot) => assert_eq!(result, Ok(std::mem::replace(slot, v))),
                None => assert!(result.is_err()),
            }
        }
        Op::InsertRange(index, items) => {
            let result = deque.insert_range(index, items.clone());
            if index <= oracle.len() {
                assert_eq!(result, Ok(()));
                for (k, item) in items.into_iter().enumerate() {
                    oracle.insert(index + k, item);
                }
            } else {
                assert!(result.is_err());
            }
        }
        Op::RemoveRange(offset, count) => {
            let result = deque.remove_range(offset, count);
            if offset + count <= oracle.len() {
                let expected: Vec<i32> = oracle.drain(offset..offset + count).collect();
                assert_eq!(result, Ok(expected));
            } else {
                assert!(matches!(result, Err(DequeError::InvalidRange { .. })));
            }
        }
        Op::SetCapacity(capacity) => {
            let result = deque.set_capacity(capacity);
            if capacity == 0 {
                assert_eq!(result, Err(DequeError::InvalidCapacity));
            } else if capacity < oracle.len() {
                assert!(matches!(result, Err(DequeError::InvalidState { .. })));
            } else {
                assert_eq!(result, Ok(()));
                assert_eq!(deque.capacity(), capacity);
            }
        }
        Op::Clear => {
            deque.clear();
            oracle.clear();
        }
    }
}

proptest! {
    #[test]
    fn prop_matches_vecdeque_oracle(
        initial_capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut deque = CircularDeque::with_capacity(initial_capacity);
        let mut oracle = VecDeque::new();

        for op in ops {
            apply(&mut deque, &mut oracle, op);

            prop_assert!(deque.len() <= deque.capacity());
            prop_assert_eq!(deque.len(), oracle.len());
            prop_assert!(deque.iter().eq(oracle.iter()));
            prop_assert!(deque.iter().rev().eq(oracle.iter().rev()));
        }
    }

    #[test]
    fn prop_insert_then_remove_is_identity(
        prefix_pops in 0usize..8,
        items in prop::collection::vec(any::<i32>(), 1..32),
        index_seed in any::<usize>(),
        value in any::<i32>(),
    ) {
        // Pop a few from the front first so the live range starts mid-buffer
        let mut deque: CircularDeque<i32> = items.iter().copied().collect();
        for _ in 0..prefix_pops.min(deque.len() - 1) {
            deque.pop_front().unwrap();
            deque.push_back(value.wrapping_add(1));
        }
        let before: Vec<i32> = deque.iter().copied().collect();

        let index = index_seed % (deque.len() + 1);
        deque.insert(index, value).unwrap();
        prop_assert_eq!(deque.get(index), Ok(&value));
        prop_assert_eq!(deque.remove_at(index), Ok(value));

        let after: Vec<i32> = deque.iter().copied().collect();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn prop_capacity_never_below_len(
        pushes in 0usize..64,
        requested in 0usize..64,
    ) {
        let mut deque = CircularDeque::with_capacity(1);
        for i in 0..pushes {
            if i % 2 == 0 {
                deque.push_back(i);
            } else {
                deque.push_front(i);
            }
        }
        let _ = deque.set_capacity(requested);
        prop_assert!(deque.capacity() >= deque.len());
        prop_assert_eq!(deque.len(), pushes);
    }
}

#[test]
fn test_wrapped_growth_preserves_order() {
    let mut deque = CircularDeque::with_capacity(4);
    for e in ["e1", "e2", "e3", "e4"] {
        deque.push_back(e);
    }
    deque.pop_front().unwrap();
    deque.pop_front().unwrap();
    for e in ["e5", "e6", "e7"] {
        deque.push_back(e);
    }

    assert_eq!(deque.capacity(), 8);
    assert_eq!(
        deque.iter().copied().collect::<Vec<_>>(),
        vec!["e3", "e4", "e5", "e6", "e7"]
    );
}

#[test]
fn test_front_and_back_views() {
    let mut deque = CircularDeque::new();
    assert_eq!(deque.front(), None);
    assert_eq!(deque.back(), None);

    deque.push_back(2);
    deque.push_front(1);
    assert_eq!(deque.front(), Some(&1));
    assert_eq!(deque.back(), Some(&2));

    deque[0] = 10;
    assert_eq!(deque.front(), Some(&10));
}
