use std::collections::VecDeque;

use oorandom::Rand32;

use crate::{
    error::{EmptyCollectionError, OutOfRangeError},
    interface::Sequence,
};

/// An operation applied by `check_against_model`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    Append,
    Prepend,
    Insert,
    PopFirst,
    PopLast,
    Erase,
    EraseRange,
    Overwrite,
}

impl Operation {
    pub(crate) const ALL: [Operation; 8] = [
        Operation::Append,
        Operation::Prepend,
        Operation::Insert,
        Operation::PopFirst,
        Operation::PopLast,
        Operation::Erase,
        Operation::EraseRange,
        Operation::Overwrite,
    ];
}

/// Applies `steps` operations drawn from `operations` to `sequence`, mirroring them on a `VecDeque`, and checks after
/// each step that both hold the same elements in the same order, walking forward and backward.
///
/// Positions are re-derived from `begin()` before each operation, since array positions do not survive reallocations.
pub(crate) fn check_against_model<S>(sequence: &mut S, seed: u64, steps: usize, operations: &[Operation])
where
    S: Sequence<Item = u32>,
{
    let mut prng = Rand32::new(seed);
    let mut model = VecDeque::new();

    check_contents(sequence, &model);

    for step in 0..steps {
        let operation = operations[pick(&mut prng, operations.len())];
        let value = prng.rand_u32();

        match operation {
            Operation::Append => {
                sequence.append(value);
                model.push_back(value);
            }
            Operation::Prepend => {
                sequence.prepend(value);
                model.push_front(value);
            }
            Operation::Insert => {
                let at = pick(&mut prng, model.len() + 1);

                let position = nth(sequence, at);

                let inserted = sequence.insert(position, value).unwrap();
                model.insert(at, value);

                assert_eq!(Ok(&value), sequence.get(inserted), "step {step}: {operation:?} at {at}");
            }
            Operation::PopFirst => {
                let expected = model.pop_front().ok_or(EmptyCollectionError::new("pop_first"));

                assert_eq!(expected, sequence.pop_first(), "step {step}: {operation:?}");
            }
            Operation::PopLast => {
                let expected = model.pop_back().ok_or(EmptyCollectionError::new("pop_last"));

                assert_eq!(expected, sequence.pop_last(), "step {step}: {operation:?}");
            }
            Operation::Erase => {
                //  Includes the end position, which cannot be erased.
                let at = pick(&mut prng, model.len() + 1);

                let position = nth(sequence, at);
                let expected = model.remove(at).ok_or(OutOfRangeError::new("erase"));

                assert_eq!(expected, sequence.erase(position), "step {step}: {operation:?} at {at}");
            }
            Operation::EraseRange => {
                let a = pick(&mut prng, model.len() + 1);
                let b = pick(&mut prng, model.len() + 1);
                let (first, last_excluded) = (a.min(b), a.max(b));

                let (first_position, last_position) = (nth(sequence, first), nth(sequence, last_excluded));

                sequence.erase_range(first_position, last_position).unwrap();
                model.drain(first..last_excluded).for_each(drop);
            }
            Operation::Overwrite => {
                if model.is_empty() {
                    continue;
                }

                let at = pick(&mut prng, model.len());

                let position = nth(sequence, at);

                *sequence.get_mut(position).unwrap() = value;
                model[at] = value;
            }
        }

        check_contents(sequence, &model);
    }
}

/// Checks that `sequence` holds the elements of `model`, in order, walking it both ways.
pub(crate) fn check_contents<S>(sequence: &S, model: &VecDeque<u32>)
where
    S: Sequence<Item = u32>,
{
    assert_eq!(model.len(), sequence.len());
    assert_eq!(model.is_empty(), sequence.is_empty());

    let mut forward = Vec::with_capacity(model.len());
    let mut position = sequence.begin();

    while position != sequence.end() {
        forward.push(*sequence.get(position).unwrap());
        position = sequence.next(position).unwrap();
    }

    assert!(sequence.get(position).is_err());
    assert!(sequence.next(position).is_err());
    assert!(model.iter().eq(forward.iter()), "{model:?} != {forward:?}");

    let mut backward = Vec::with_capacity(model.len());

    while let Ok(previous) = sequence.prev(position) {
        position = previous;
        backward.push(*sequence.get(position).unwrap());
    }

    assert_eq!(sequence.begin(), position);
    assert!(model.iter().rev().eq(backward.iter()), "{model:?} != reversed {backward:?}");
}

//  Draws an index in `0..bound`.
fn pick(prng: &mut Rand32, bound: usize) -> usize {
    prng.rand_range(0..bound as u32) as usize
}

//  Returns the position of the `n`-th element, or the end position if `n == len()`.
fn nth<S: Sequence>(sequence: &S, n: usize) -> S::Position {
    sequence.offset(sequence.begin(), n as isize).unwrap()
}
