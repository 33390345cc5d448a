//! A Dynamic Array.
//!
//! A contiguous buffer of `capacity` slots, of which the first `len()` hold elements. The capacity doubles whenever an
//! element is added to a full buffer.
//!
//! #   Position validity
//!
//! A position is an index, stamped with the epoch of the buffer it was issued for. Any reallocation of the buffer
//! starts a new epoch, invalidating every position issued before: growth, insertion in the middle, range erasure, and
//! `clone_from`. Using an invalidated position panics. Other operations, such as `pop_last`, `erase`, or `prepend`
//! without growth, keep positions valid as indices; whatever element now lives at that index is what they denote.
//!
//! #   Taking
//!
//! `Default` yields an array without any buffer, of capacity 0, which is what `mem::take` leaves behind; it does not
//! allocate. Its first insertion allocates a single slot, from which the capacity doubles as usual.

use alloc::vec::{self, Vec};
use core::{
    cmp, fmt,
    hash::{Hash, Hasher},
    mem, slice,
};

use crate::{
    collection::owner::Owner,
    error::{EmptyCollectionError, OutOfRangeError},
    interface::Sequence,
};

/// A dynamic array.
pub struct DynamicArray<T> {
    //  Type invariant:
    //  -   `self.elements.len() <= self.capacity`.
    //  -   `self.capacity > 0`, unless the array was built by `Default`, and nothing was inserted since.
    //  -   `self.elements.capacity() >= self.capacity`, so that `elements` never reallocates on its own.
    elements: Vec<T>,
    capacity: usize,
    //  Bumped on each reallocation.
    epoch: u64,
    owner: Owner,
}

/// A position within a `DynamicArray`.
///
/// Two positions are equal if issued by the same array for the same index, regardless of their epoch.
#[derive(Clone, Copy, Debug)]
pub struct ArrayPosition {
    owner: Owner,
    epoch: u64,
    index: usize,
}

impl ArrayPosition {
    /// Returns the index denoted by the position.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl cmp::PartialEq for ArrayPosition {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl cmp::Eq for ArrayPosition {}

impl Hash for ArrayPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl<T> DynamicArray<T> {
    /// Capacity of an array created by `new`.
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Factor by which the capacity of a full array grows.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates a new, empty, array with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new, empty, array with the specified capacity, or 1 if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::new(), capacity)
    }

    /// Returns whether the array is empty, or not.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements in the array.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the capacity of the array.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a slice of the elements of the array.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns a mutable slice of the elements of the array.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Clears the array, removing every element, and keeping its capacity.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns an iterator of references to the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns an iterator of mutable references to the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }
}

impl<T> DynamicArray<T> {
    /// Appends an element at the back of the array, growing it if full.
    ///
    /// Amortized O(1).
    pub fn append(&mut self, element: T) -> ArrayPosition {
        self.reserve_one();

        self.elements.push(element);

        self.position(self.len() - 1)
    }

    /// Prepends an element at the front of the array, growing it if full.
    ///
    /// O(n): every element is shifted by one slot.
    pub fn prepend(&mut self, element: T) -> ArrayPosition {
        self.reserve_one();

        self.elements.insert(0, element);

        self.position(0)
    }

    /// Inserts an element immediately before `position`, returning the position of the new element.
    ///
    /// Inserting at index 0 prepends, and inserting at index `len()` appends. Otherwise, the buffer is rebuilt, which
    /// invalidates every position.
    ///
    /// #   Errors
    ///
    /// If `position` lies past the end of the array.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn insert(&mut self, position: ArrayPosition, element: T) -> Result<ArrayPosition, OutOfRangeError> {
        let index = self.index(position);

        if index > self.len() {
            return Err(OutOfRangeError::new("insert"));
        }

        if index == 0 {
            return Ok(self.prepend(element));
        }

        if index == self.len() {
            return Ok(self.append(element));
        }

        let capacity = if self.len() == self.capacity {
            self.grown_capacity()
        } else {
            self.capacity
        };

        let mut buffer = Vec::with_capacity(capacity);
        let mut elements = mem::take(&mut self.elements).into_iter();

        buffer.extend(elements.by_ref().take(index));
        buffer.push(element);
        buffer.extend(elements);

        self.replace_buffer(buffer, capacity);

        Ok(self.position(index))
    }

    /// Removes and returns the first element.
    ///
    /// O(n): every remaining element is shifted by one slot.
    ///
    /// #   Errors
    ///
    /// If the array is empty.
    pub fn pop_first(&mut self) -> Result<T, EmptyCollectionError> {
        if self.is_empty() {
            return Err(EmptyCollectionError::new("pop_first"));
        }

        Ok(self.elements.remove(0))
    }

    /// Removes and returns the last element.
    ///
    /// #   Errors
    ///
    /// If the array is empty.
    pub fn pop_last(&mut self) -> Result<T, EmptyCollectionError> {
        self.elements.pop().ok_or(EmptyCollectionError::new("pop_last"))
    }

    /// Removes and returns the element at `position`, shifting the following elements by one slot.
    ///
    /// #   Errors
    ///
    /// If the array is empty, or `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn erase(&mut self, position: ArrayPosition) -> Result<T, OutOfRangeError> {
        self.erase_forward(position).map(|(element, _)| element)
    }

    /// Removes and returns the element at `position`, alongside the position of the element which followed it.
    ///
    /// Since the following elements are shifted, the returned position has the same index as `position`.
    ///
    /// #   Errors
    ///
    /// If the array is empty, or `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn erase_forward(&mut self, position: ArrayPosition) -> Result<(T, ArrayPosition), OutOfRangeError> {
        let index = self.index(position);

        if self.is_empty() || index >= self.len() {
            return Err(OutOfRangeError::new("erase"));
        }

        let element = self.elements.remove(index);

        Ok((element, self.position(index)))
    }

    /// Removes every element in `[first, last_excluded)`, rebuilding the buffer, which invalidates every position.
    ///
    /// A range whose end does not lie after its start is a no-op, whether the array is empty or not.
    ///
    /// #   Errors
    ///
    /// If the array is empty, or if `first` or `last_excluded` lies past the end of the array.
    ///
    /// #   Panics
    ///
    /// If either position was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn erase_range(&mut self, first: ArrayPosition, last_excluded: ArrayPosition) -> Result<(), OutOfRangeError> {
        let first = self.index(first);
        let last_excluded = self.index(last_excluded);

        if last_excluded <= first {
            return Ok(());
        }

        if self.is_empty() || first >= self.len() || last_excluded > self.len() {
            return Err(OutOfRangeError::new("erase_range"));
        }

        let mut buffer = Vec::with_capacity(self.capacity);
        let mut elements = mem::take(&mut self.elements);

        buffer.extend(elements.drain(..first));
        elements.drain(..last_excluded - first).for_each(drop);
        buffer.extend(elements);

        self.replace_buffer(buffer, self.capacity);

        log::trace!(
            "Erased {} elements from dynamic array {:?}",
            last_excluded - first,
            self.owner
        );

        Ok(())
    }
}

impl<T> DynamicArray<T> {
    /// Returns the position of the first element, or `end()` if the array is empty.
    pub fn begin(&self) -> ArrayPosition {
        self.position(0)
    }

    /// Returns the end position, at index `len()`.
    pub fn end(&self) -> ArrayPosition {
        self.position(self.len())
    }

    /// Returns a reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position, or lies past it.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn get(&self, position: ArrayPosition) -> Result<&T, OutOfRangeError> {
        let index = self.index(position);

        self.elements.get(index).ok_or(OutOfRangeError::new("get"))
    }

    /// Returns a mutable reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position, or lies past it.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn get_mut(&mut self, position: ArrayPosition) -> Result<&mut T, OutOfRangeError> {
        let index = self.index(position);

        self.elements.get_mut(index).ok_or(OutOfRangeError::new("get_mut"))
    }

    /// Returns the position following `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position, or lies past it.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn next(&self, position: ArrayPosition) -> Result<ArrayPosition, OutOfRangeError> {
        let index = self.index(position);

        if index >= self.len() {
            return Err(OutOfRangeError::new("next"));
        }

        Ok(self.position(index + 1))
    }

    /// Returns the position preceding `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is at index 0, or lies past the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn prev(&self, position: ArrayPosition) -> Result<ArrayPosition, OutOfRangeError> {
        let index = self.index(position);

        if index == 0 || index > self.len() {
            return Err(OutOfRangeError::new("prev"));
        }

        Ok(self.position(index - 1))
    }

    /// Returns the position `distance` slots away from `position`, forward if positive, backward if negative.
    ///
    /// O(1).
    ///
    /// #   Errors
    ///
    /// If the resulting index would exceed `len()`, or be negative.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another array, or has been invalidated.
    #[track_caller]
    pub fn offset(&self, position: ArrayPosition, distance: isize) -> Result<ArrayPosition, OutOfRangeError> {
        let index = self.index(position);

        let index = index
            .checked_add_signed(distance)
            .filter(|index| *index <= self.len())
            .ok_or(OutOfRangeError::new("offset"))?;

        Ok(self.position(index))
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut elements = Vec::with_capacity(self.capacity);

        elements.extend_from_slice(&self.elements);

        Self {
            elements,
            capacity: self.capacity,
            epoch: 0,
            owner: Owner::fresh(),
        }
    }

    //  Keeps the identity of `self`, but not its buffer.
    fn clone_from(&mut self, source: &Self) {
        let mut buffer = Vec::with_capacity(source.capacity);

        buffer.extend_from_slice(&source.elements);

        self.replace_buffer(buffer, source.capacity);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self).finish()
    }
}

impl<T> Default for DynamicArray<T> {
    /// Creates a new, empty, array without any buffer.
    ///
    /// Unlike `new`, does not allocate.
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            capacity: 0,
            epoch: 0,
            owner: Owner::fresh(),
        }
    }
}

impl<T> Sequence for DynamicArray<T> {
    type Item = T;
    type Position = ArrayPosition;

    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    fn is_empty(&self) -> bool {
        DynamicArray::is_empty(self)
    }

    fn append(&mut self, element: T) {
        DynamicArray::append(self, element);
    }

    fn prepend(&mut self, element: T) {
        DynamicArray::prepend(self, element);
    }

    fn insert(&mut self, position: ArrayPosition, element: T) -> Result<ArrayPosition, OutOfRangeError> {
        DynamicArray::insert(self, position, element)
    }

    fn pop_first(&mut self) -> Result<T, EmptyCollectionError> {
        DynamicArray::pop_first(self)
    }

    fn pop_last(&mut self) -> Result<T, EmptyCollectionError> {
        DynamicArray::pop_last(self)
    }

    fn erase_forward(&mut self, position: ArrayPosition) -> Result<(T, ArrayPosition), OutOfRangeError> {
        DynamicArray::erase_forward(self, position)
    }

    fn erase_range(&mut self, first: ArrayPosition, last_excluded: ArrayPosition) -> Result<(), OutOfRangeError> {
        DynamicArray::erase_range(self, first, last_excluded)
    }

    fn begin(&self) -> ArrayPosition {
        DynamicArray::begin(self)
    }

    fn end(&self) -> ArrayPosition {
        DynamicArray::end(self)
    }

    fn get(&self, position: ArrayPosition) -> Result<&T, OutOfRangeError> {
        DynamicArray::get(self, position)
    }

    fn get_mut(&mut self, position: ArrayPosition) -> Result<&mut T, OutOfRangeError> {
        DynamicArray::get_mut(self, position)
    }

    fn next(&self, position: ArrayPosition) -> Result<ArrayPosition, OutOfRangeError> {
        DynamicArray::next(self, position)
    }

    fn prev(&self, position: ArrayPosition) -> Result<ArrayPosition, OutOfRangeError> {
        DynamicArray::prev(self, position)
    }

    fn offset(&self, position: ArrayPosition, distance: isize) -> Result<ArrayPosition, OutOfRangeError> {
        DynamicArray::offset(self, position, distance)
    }
}

//
//  Comparison
//

impl<T: cmp::PartialEq> cmp::PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: cmp::Eq> cmp::Eq for DynamicArray<T> {}

//
//  Conversion
//

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(value: [T; N]) -> Self {
        Self::from_vec(Vec::from(value), N)
    }
}

//
//  Iteration
//

impl<'a, T: 'a + Clone> Extend<&'a T> for DynamicArray<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<T> = iter.into_iter().collect();
        let capacity = elements.len();

        Self::from_vec(elements, capacity)
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

//
//  Implementation
//

impl<T> DynamicArray<T> {
    //  Adopts `elements`, with at least `capacity` slots, and at least 1.
    fn from_vec(mut elements: Vec<T>, capacity: usize) -> Self {
        let capacity = cmp::max(cmp::max(capacity, elements.len()), 1);

        elements.reserve_exact(capacity - elements.len());

        Self {
            elements,
            capacity,
            epoch: 0,
            owner: Owner::fresh(),
        }
    }

    fn position(&self, index: usize) -> ArrayPosition {
        ArrayPosition {
            owner: self.owner,
            epoch: self.epoch,
            index,
        }
    }

    //  Returns the index of `position`, which may lie past the end.
    //
    //  #   Panics
    //
    //  If `position` was issued by another array, or before the latest reallocation.
    #[track_caller]
    fn index(&self, position: ArrayPosition) -> usize {
        self.owner.check(position.owner);

        if position.epoch != self.epoch {
            Self::invalidated_position(position)
        }

        position.index
    }

    fn grown_capacity(&self) -> usize {
        if self.capacity == 0 {
            return 1;
        }

        match self.capacity.checked_mul(Self::GROWTH_FACTOR) {
            Some(capacity) => capacity,
            None => Self::capacity_exceeded(),
        }
    }

    //  Grows the buffer if full, so that one more element fits.
    fn reserve_one(&mut self) {
        if self.len() < self.capacity {
            return;
        }

        let capacity = self.grown_capacity();

        let mut buffer = Vec::with_capacity(capacity);

        buffer.append(&mut self.elements);

        self.replace_buffer(buffer, capacity);
    }

    //  Replaces the buffer, starting a new epoch.
    fn replace_buffer(&mut self, buffer: Vec<T>, capacity: usize) {
        debug_assert!(buffer.len() <= capacity);
        debug_assert!(buffer.capacity() >= capacity);

        log::trace!(
            "Reallocated dynamic array {:?}: capacity {} -> {}, {} elements",
            self.owner,
            self.capacity,
            capacity,
            buffer.len()
        );

        self.elements = buffer;
        self.capacity = capacity;
        self.epoch += 1;
    }

    #[cold]
    #[inline(never)]
    fn capacity_exceeded() -> ! {
        panic!("New capacity exceeds usize::MAX elements")
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn invalidated_position(position: ArrayPosition) -> ! {
        panic!("{position:?} was invalidated by a reallocation")
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use crate::collection::utils::{self, Operation};

    use super::*;

    type TestArray = DynamicArray<String>;

    #[test]
    fn array_empty() {
        let array = TestArray::new();

        assert!(array.is_empty());
        assert_eq!(0, array.len());
        assert_eq!(DynamicArray::<String>::DEFAULT_CAPACITY, array.capacity());
        assert_eq!(array.begin(), array.end());
        assert_eq!(r#"[]"#, format!("{array:?}"));
    }

    #[test]
    fn array_capacity_is_never_zero() {
        assert_eq!(1, DynamicArray::<i32>::with_capacity(0).capacity());
        assert_eq!(1, DynamicArray::<i32>::from([]).capacity());
        assert_eq!(1, DynamicArray::<i32>::from_iter(None).capacity());
    }

    #[test]
    fn array_growth_doubles() {
        let mut array = DynamicArray::with_capacity(2);

        array.append(0);
        array.append(1);

        assert_eq!(2, array.capacity());

        array.append(2);

        assert_eq!(4, array.capacity());

        array.prepend(-1);

        assert_eq!(4, array.capacity());

        array.prepend(-2);

        assert_eq!(8, array.capacity());
        assert_eq!(&[-2, -1, 0, 1, 2], array.as_slice());
    }

    #[test]
    fn array_literal() {
        let mut array = DynamicArray::from([1, 2, 3, 4, 5]);

        assert_eq!(5, array.len());
        assert_eq!(5, array.capacity());

        array.append(6);

        assert_eq!(10, array.capacity());
    }

    #[test]
    fn array_pop() {
        let mut array = TestArray::new();

        array.append(String::from("a"));
        array.append(String::from("b"));

        assert_eq!(Ok("a"), array.pop_first().as_deref());
        assert_eq!(Ok("b"), array.pop_last().as_deref());
        assert!(array.is_empty());

        assert_eq!(Err(EmptyCollectionError::new("pop_first")), array.pop_first());
        assert_eq!(Err(EmptyCollectionError::new("pop_last")), array.pop_last());
    }

    #[test]
    fn array_scenario() {
        let mut array = DynamicArray::new();

        array.append(1);
        array.append(2);
        array.append(3);

        let second = array.offset(array.begin(), 1).unwrap();
        array.insert(second, 9).unwrap();

        assert_eq!(&[1, 9, 2, 3], array.as_slice());

        let third = array.offset(array.begin(), 2).unwrap();
        array.erase_range(array.begin(), third).unwrap();

        assert_eq!(&[2, 3], array.as_slice());
        assert_eq!(Ok(3), array.pop_last());
        assert_eq!(&[2], array.as_slice());
    }

    #[test]
    fn array_erase_range_literal() {
        let mut array = DynamicArray::from([1, 2, 3, 4, 5]);

        let first = array.offset(array.begin(), 1).unwrap();
        let last = array.offset(array.begin(), 3).unwrap();

        array.erase_range(first, last).unwrap();

        assert_eq!(&[1, 4, 5], array.as_slice());
        assert_eq!(5, array.capacity());
    }

    #[test]
    fn array_erase_range_edges() {
        let mut empty = DynamicArray::<i32>::new();

        //  Empty ranges, even on an empty array.
        empty.erase_range(empty.begin(), empty.end()).unwrap();
        empty.erase_range(empty.end(), empty.begin()).unwrap();

        let mut array = DynamicArray::from([1, 2, 3]);

        let third = array.offset(array.begin(), 2).unwrap();

        array.erase_range(third, array.begin()).unwrap();
        array.erase_range(array.end(), array.end()).unwrap();

        assert_eq!(&[1, 2, 3], array.as_slice());

        //  Past the end, following a `pop_last`.
        let end = array.end();
        let last = array.prev(end).unwrap();

        array.pop_last().unwrap();

        assert_eq!(Err(OutOfRangeError::new("erase_range")), array.erase_range(last, end));
        assert_eq!(&[1, 2], array.as_slice());

        array.erase_range(array.begin(), array.end()).unwrap();

        assert!(array.is_empty());
    }

    #[test]
    fn array_insert_edges() {
        let mut array = DynamicArray::from([2]);

        let one = array.insert(array.begin(), 1).unwrap();
        let three = array.insert(array.end(), 3).unwrap();

        assert_eq!(0, one.index());
        assert_eq!(2, three.index());
        assert_eq!(&[1, 2, 3], array.as_slice());

        let end = array.end();

        array.pop_last().unwrap();
        array.pop_last().unwrap();

        assert_eq!(Err(OutOfRangeError::new("insert")), array.insert(end, 4));
    }

    #[test]
    fn array_erase() {
        let mut array = DynamicArray::from([1, 2, 3]);

        assert_eq!(Err(OutOfRangeError::new("erase")), array.erase(array.end()));

        let begin = array.begin();

        assert_eq!(Ok(2), array.erase(array.next(begin).unwrap()));
        assert_eq!(Ok(&3), array.next(begin).and_then(|p| array.get(p)));

        array.clear();

        assert_eq!(Err(OutOfRangeError::new("erase")), array.erase(array.begin()));
    }

    #[test]
    fn array_deref_end() {
        let mut array = DynamicArray::<i32>::new();

        assert_eq!(Err(OutOfRangeError::new("get")), array.get(array.end()));

        array.append(1);

        assert_eq!(Err(OutOfRangeError::new("get")), array.get(array.end()));
        assert_eq!(Err(OutOfRangeError::new("get_mut")), array.get_mut(array.end()));
    }

    #[test]
    fn array_stepping() {
        let array = DynamicArray::from([1, 2, 3]);

        assert_eq!(Ok(&3), array.prev(array.end()).and_then(|p| array.get(p)));
        assert_eq!(Err(OutOfRangeError::new("next")), array.next(array.end()));
        assert_eq!(Err(OutOfRangeError::new("prev")), array.prev(array.begin()));

        assert_eq!(Ok(array.end()), array.offset(array.begin(), 3));
        assert_eq!(Ok(array.begin()), array.offset(array.end(), -3));
        assert_eq!(Err(OutOfRangeError::new("offset")), array.offset(array.begin(), 4));
        assert_eq!(Err(OutOfRangeError::new("offset")), array.offset(array.begin(), -1));
        assert_eq!(Err(OutOfRangeError::new("offset")), array.offset(array.end(), isize::MIN));
        assert_eq!(Err(OutOfRangeError::new("offset")), array.offset(array.end(), isize::MAX));
    }

    #[test]
    fn array_positions_survive_without_reallocation() {
        let mut array = DynamicArray::with_capacity(8);

        array.extend([1, 2, 3, 4]);

        let begin = array.begin();
        let second = array.next(begin).unwrap();

        array.append(5);
        array.prepend(0);
        array.erase(begin).unwrap();
        array.pop_last().unwrap();

        assert_eq!(Ok(&2), array.get(second));
    }

    #[test]
    #[should_panic(expected = "invalidated by a reallocation")]
    fn array_insert_invalidates() {
        let mut array = DynamicArray::from([1, 2, 3]);

        let begin = array.begin();
        let second = array.next(begin).unwrap();

        array.insert(second, 9).unwrap();

        let _ = array.get(begin);
    }

    #[test]
    #[should_panic(expected = "invalidated by a reallocation")]
    fn array_growth_invalidates() {
        let mut array = DynamicArray::with_capacity(1);

        array.append(1);

        let begin = array.begin();

        array.append(2);

        let _ = array.get(begin);
    }

    #[test]
    #[should_panic(expected = "invalidated by a reallocation")]
    fn array_erase_range_invalidates() {
        let mut array = DynamicArray::from([1, 2, 3]);

        let begin = array.begin();
        let end = array.end();

        array.erase_range(begin, end).unwrap();

        let _ = array.next(begin);
    }

    #[test]
    #[should_panic(expected = "used with collection")]
    fn array_foreign_position() {
        let array = DynamicArray::from([1, 2, 3]);
        let other = DynamicArray::from([1, 2, 3]);

        let _ = array.get(other.begin());
    }

    #[test]
    fn array_clone() {
        let mut array = TestArray::with_capacity(4);

        array.append(String::from("0"));
        array.append(String::from("1"));

        let mut clone = array.clone();

        assert_eq!(array, clone);
        assert_eq!(4, clone.capacity());
        assert_ne!(array.begin(), clone.begin());

        clone.append(String::from("2"));
        clone.get_mut(clone.begin()).unwrap().push('!');

        assert_eq!(r#"["0", "1"]"#, format!("{array:?}"));
        assert_eq!(r#"["0!", "1", "2"]"#, format!("{clone:?}"));
    }

    #[test]
    fn array_clone_from() {
        let source = DynamicArray::from([1, 2, 3]);
        let mut target = DynamicArray::from([7, 8, 9, 10]);

        let begin = target.begin();

        target.clone_from(&source);

        assert_eq!(source, target);
        assert_eq!(3, target.capacity());
        assert_eq!(begin, target.begin());
    }

    #[test]
    #[should_panic(expected = "invalidated by a reallocation")]
    fn array_clone_from_invalidates() {
        let source = DynamicArray::from([1, 2, 3]);
        let mut target = DynamicArray::from([7, 8, 9, 10]);

        let begin = target.begin();

        target.clone_from(&source);

        let _ = target.get(begin);
    }

    #[test]
    fn array_default_grows_from_nothing() {
        let mut array = DynamicArray::default();

        assert_eq!(0, array.capacity());
        assert_eq!(Err(OutOfRangeError::new("get")), array.get(array.begin()));
        assert_eq!(Err(EmptyCollectionError::new("pop_last")), array.pop_last());

        array.append(1);

        assert_eq!(1, array.capacity());

        array.prepend(0);
        array.append(2);

        assert_eq!(4, array.capacity());
        assert_eq!(&[0, 1, 2], array.as_slice());

        let clone = DynamicArray::<i32>::default().clone();

        assert_eq!(0, clone.capacity());
    }

    #[test]
    fn array_position_hash() {
        use std::collections::HashSet;

        let mut array = DynamicArray::with_capacity(1);

        array.append(1);

        let before = array.begin();

        array.append(2);

        //  Equal positions, from different epochs.
        let positions: HashSet<_> = [before, array.begin(), array.end()].into_iter().collect();

        assert_eq!(2, positions.len());
        assert!(positions.contains(&array.begin()));
    }

    #[test]
    fn array_take() {
        let mut array = DynamicArray::from([1, 2, 3]);

        let begin = array.begin();

        let taken = mem::take(&mut array);

        assert!(array.is_empty());
        assert_eq!(0, array.capacity());
        assert_eq!(array.begin(), array.end());
        assert_eq!(Ok(&1), taken.get(begin));

        //  Move-assignment.
        array = taken;

        assert_eq!(&[1, 2, 3], array.as_slice());
    }

    #[test]
    fn array_iterators() {
        let mut array: DynamicArray<_> = (1..=4).collect();

        for e in &mut array {
            *e *= 10;
        }

        assert_eq!(vec![40, 30, 20, 10], array.iter().rev().cloned().collect::<Vec<_>>());
        assert_eq!(vec![10, 20, 30, 40], array.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn array_random_operations() {
        for seed in 0..16 {
            let mut array = DynamicArray::with_capacity(1);

            utils::check_against_model(&mut array, seed, 200, &Operation::ALL);
        }
    }

    #[test]
    fn send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<DynamicArray<String>>();
        require_sync::<DynamicArray<String>>();
    }
} // mod tests
