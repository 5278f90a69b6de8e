//! Model-based property tests.
//!
//! Every trace is replayed against a `VecDeque` model that implements the
//! overflow policies one element at a time.

use std::collections::VecDeque;

use circq_buffer::{OverflowPolicy, RingBuffer, RingConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(i32),
    Dequeue,
    Peek,
    BulkEnqueue(Vec<i32>),
    BulkDequeue(usize),
    Discard(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Enqueue),
        2 => Just(Op::Dequeue),
        1 => Just(Op::Peek),
        2 => prop::collection::vec(any::<i32>(), 0..24).prop_map(Op::BulkEnqueue),
        2 => (0usize..24).prop_map(Op::BulkDequeue),
        1 => (0usize..8).prop_map(Op::Discard),
    ]
}

fn policy_strategy() -> impl Strategy<Value = OverflowPolicy> {
    prop_oneof![
        Just(OverflowPolicy::Reject),
        Just(OverflowPolicy::Overwrite),
        Just(OverflowPolicy::Grow),
    ]
}

struct Model {
    items: VecDeque<i32>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl Model {
    fn enqueue(&mut self, value: i32) {
        if self.items.len() == self.capacity {
            match self.policy {
                OverflowPolicy::Reject => return,
                OverflowPolicy::Overwrite => {
                    self.items.pop_front();
                }
                OverflowPolicy::Grow => {
                    self.capacity = (self.capacity * 2).max(self.items.len() + 1);
                }
            }
        }
        self.items.push_back(value);
    }
}

/// Applies `op` to both and checks they agree.
fn step(buf: &RingBuffer<i32>, model: &mut Model, op: &Op) -> Result<(), TestCaseError> {
    match op {
        Op::Enqueue(v) => {
            buf.enqueue(*v).unwrap();
            model.enqueue(*v);
        }
        Op::Dequeue => {
            let expected = model.items.pop_front().unwrap_or_default();
            prop_assert_eq!(buf.dequeue().unwrap(), expected);
        }
        Op::Peek => {
            let expected = model.items.front().copied().unwrap_or_default();
            prop_assert_eq!(buf.peek().unwrap(), expected);
        }
        Op::BulkEnqueue(values) => {
            let before = model.items.len();
            for &v in values {
                model.enqueue(v);
            }
            let accepted = buf.bulk_enqueue(values).unwrap();
            match model.policy {
                OverflowPolicy::Reject => prop_assert_eq!(accepted, model.items.len() - before),
                OverflowPolicy::Overwrite => {
                    prop_assert_eq!(accepted, values.len().min(model.capacity))
                }
                OverflowPolicy::Grow => prop_assert_eq!(accepted, values.len()),
            }
        }
        Op::BulkDequeue(n) => {
            let count = (*n).min(model.items.len());
            let expected: Vec<i32> = model.items.drain(..count).collect();
            prop_assert_eq!(buf.bulk_dequeue(*n), expected);
        }
        Op::Discard(n) => {
            let count = (*n).min(model.items.len());
            model.items.drain(..count);
            prop_assert_eq!(buf.discard(*n), count);
        }
    }

    let snap = buf.snapshot();
    prop_assert!(snap.len() <= snap.capacity());
    prop_assert!(snap.head() < snap.capacity());
    prop_assert!(snap.tail() < snap.capacity());
    prop_assert_eq!(
        (snap.head() + snap.capacity() - snap.tail()) % snap.capacity(),
        snap.len() % snap.capacity()
    );
    let expected: Vec<i32> = model.items.iter().copied().collect();
    prop_assert_eq!(snap.iter().collect::<Vec<_>>(), expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_deque_model(
        capacity in 1usize..17,
        policy in policy_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let buf = RingBuffer::with_config(RingConfig::new(capacity).policy(policy)).unwrap();
        let mut model = Model { items: VecDeque::new(), capacity, policy };
        for op in &ops {
            step(&buf, &mut model, op)?;
        }
    }

    #[test]
    fn prop_bulk_equals_single(
        capacity in 1usize..17,
        policy in policy_strategy(),
        prefill in prop::collection::vec(any::<i32>(), 0..16),
        drain in 0usize..16,
        values in prop::collection::vec(any::<i32>(), 0..40),
    ) {
        let config = RingConfig::new(capacity).policy(policy);
        let bulk = RingBuffer::with_config(config).unwrap();
        let single = RingBuffer::with_config(config).unwrap();
        for buf in [&bulk, &single] {
            for &v in &prefill {
                buf.enqueue(v).unwrap();
            }
            buf.bulk_dequeue(drain);
        }

        bulk.bulk_enqueue(&values).unwrap();
        for &v in &values {
            single.enqueue(v).unwrap();
        }
        prop_assert_eq!(bulk.to_vec(), single.to_vec());
        if policy != OverflowPolicy::Grow {
            prop_assert_eq!(bulk.head(), single.head());
            prop_assert_eq!(bulk.tail(), single.tail());
        }

        let n = bulk.size();
        let by_bulk = bulk.bulk_dequeue(n);
        let by_single: Vec<i32> = (0..n).map(|_| single.dequeue().unwrap()).collect();
        prop_assert_eq!(by_bulk, by_single);
    }

    #[test]
    fn prop_power_of_two_matches_modulo(
        exponent in 1u32..5,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        // Same logical trace against 2^k and 2^k + 1 slots, kept within the
        // smaller capacity so no overflow handling differs.
        let pow2 = 1usize << exponent;
        let a = RingBuffer::<i32>::with_config(RingConfig::new(pow2).strict(true)).unwrap();
        let b = RingBuffer::<i32>::with_config(RingConfig::new(pow2 + 1).strict(true)).unwrap();

        for op in &ops {
            match op {
                Op::Enqueue(v) if a.free_space() > 0 => {
                    a.enqueue(*v).unwrap();
                    b.enqueue(*v).unwrap();
                }
                Op::BulkEnqueue(values) => {
                    let fit = &values[..values.len().min(a.free_space())];
                    prop_assert_eq!(a.bulk_enqueue(fit).unwrap(), b.bulk_enqueue(fit).unwrap());
                }
                Op::Dequeue if !a.is_empty() => {
                    prop_assert_eq!(a.dequeue().unwrap(), b.dequeue().unwrap());
                }
                Op::BulkDequeue(n) => prop_assert_eq!(a.bulk_dequeue(*n), b.bulk_dequeue(*n)),
                Op::Discard(n) => prop_assert_eq!(a.discard(*n), b.discard(*n)),
                _ => {}
            }
            prop_assert_eq!(a.to_vec(), b.to_vec());
        }
    }

    #[test]
    fn prop_resize_preserves_contents(
        capacity in 1usize..17,
        prefill in prop::collection::vec(any::<i32>(), 0..32),
        drain in 0usize..16,
        extra in 0usize..32,
    ) {
        let config = RingConfig::new(capacity).policy(OverflowPolicy::Grow).strict(true);
        let buf = RingBuffer::with_config(config).unwrap();
        buf.bulk_enqueue(&prefill).unwrap();
        buf.bulk_dequeue(drain);

        let before = buf.to_vec();
        let target = before.len() + extra;
        if target == 0 {
            prop_assert!(buf.resize(Some(target)).is_err());
        } else {
            buf.resize(Some(target)).unwrap();
            prop_assert_eq!(buf.capacity(), target);
            prop_assert_eq!(buf.tail(), 0);
        }
        prop_assert_eq!(buf.to_vec(), before);
        prop_assert_eq!(buf.size(), buf.to_vec().len());
    }
}
