//! A Linked List.
//!
//! A doubly-linked list whose nodes live in a `SlabStore`, terminated by a sentinel node. The sentinel holds no
//! element, is allocated with the list, and is never deallocated: it is the stable `end()` position.
//!
//! #   Position validity
//!
//! A position remains valid across any insertion or removal, except for the removal of the very node it denotes.
//! Using a position after its node has been erased panics, even if the node's slot has since been reused.

use alloc::vec::Vec;
use core::{cmp, fmt, iter};

use crate::{
    collection::owner::Owner,
    error::{EmptyCollectionError, OutOfRangeError},
    interface::Sequence,
    store::{SlabStore, SlotHandle},
};

/// A doubly-linked list.
pub struct LinkedList<T> {
    //  Invariant: number of nodes reachable from `head` until `tail`, exclusive.
    length: usize,
    //  First node, or `tail` if the list is empty.
    head: SlotHandle,
    //  Sentinel node; its `prev` is the last node, if any.
    tail: SlotHandle,
    nodes: SlabStore<Node<T>>,
    owner: Owner,
}

/// A position within a `LinkedList`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListPosition {
    owner: Owner,
    node: SlotHandle,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty, list.
    pub fn new() -> Self {
        Self::with_node_capacity(0)
    }

    /// Returns whether the list is empty, or not.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns whether the list contains `element`, or not.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == element)
    }

    /// Clears the list, removing every element.
    ///
    /// All positions but `end()` are invalidated.
    pub fn clear(&mut self) {
        let length = self.length;

        while self.head != self.tail {
            self.unlink(self.head);
        }

        log::trace!("Cleared {length} elements from linked list {:?}", self.owner);
    }

    /// Returns a reference to the front element, if any.
    pub fn front(&self) -> Option<&T> {
        self.nodes.resolve(self.head).element.as_ref()
    }

    /// Returns a mutable reference to the front element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.nodes.resolve_mut(self.head).element.as_mut()
    }

    /// Returns a reference to the back element, if any.
    pub fn back(&self) -> Option<&T> {
        let last = self.nodes.resolve(self.tail).prev?;

        self.nodes.resolve(last).element.as_ref()
    }

    /// Returns a mutable reference to the back element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.nodes.resolve(self.tail).prev?;

        self.nodes.resolve_mut(last).element.as_mut()
    }
}

impl<T> LinkedList<T> {
    /// Appends an element at the back of the list, immediately before the sentinel.
    pub fn append(&mut self, element: T) -> ListPosition {
        let node = self.link_before(self.tail, element);

        self.position(node)
    }

    /// Prepends an element at the front of the list.
    pub fn prepend(&mut self, element: T) -> ListPosition {
        let node = self.link_before(self.head, element);

        self.position(node)
    }

    /// Inserts an element immediately before `position`, returning the position of the new element.
    ///
    /// Inserting before `end()` appends, inserting before `begin()` prepends.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn insert(&mut self, position: ListPosition, element: T) -> ListPosition {
        let node = self.node(position);
        let node = self.link_before(node, element);

        self.position(node)
    }

    /// Removes and returns the first element.
    ///
    /// #   Errors
    ///
    /// If the list is empty.
    pub fn pop_first(&mut self) -> Result<T, EmptyCollectionError> {
        if self.is_empty() {
            return Err(EmptyCollectionError::new("pop_first"));
        }

        let (element, _) = self.unlink(self.head);

        Ok(element)
    }

    /// Removes and returns the last element.
    ///
    /// #   Errors
    ///
    /// If the list is empty.
    pub fn pop_last(&mut self) -> Result<T, EmptyCollectionError> {
        let Some(last) = self.nodes.resolve(self.tail).prev else {
            return Err(EmptyCollectionError::new("pop_last"));
        };

        let (element, _) = self.unlink(last);

        Ok(element)
    }

    /// Removes and returns the element at `position`.
    ///
    /// `position`, and all its copies, are invalidated; any other position remains valid.
    ///
    /// #   Errors
    ///
    /// If the list is empty, or `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has already been erased.
    #[track_caller]
    pub fn erase(&mut self, position: ListPosition) -> Result<T, OutOfRangeError> {
        self.erase_forward(position).map(|(element, _)| element)
    }

    /// Removes and returns the element at `position`, alongside the position of the element which followed it.
    ///
    /// #   Errors
    ///
    /// If the list is empty, or `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has already been erased.
    #[track_caller]
    pub fn erase_forward(&mut self, position: ListPosition) -> Result<(T, ListPosition), OutOfRangeError> {
        let node = self.node(position);

        if self.is_empty() || node == self.tail {
            return Err(OutOfRangeError::new("erase"));
        }

        let (element, next) = self.unlink(node);

        Ok((element, self.position(next)))
    }

    /// Removes every element in `[first, last_excluded)`, front to back.
    ///
    /// An empty range is a no-op. On error, the list is left unmodified.
    ///
    /// #   Errors
    ///
    /// If `last_excluded` cannot be reached from `first` by moving forward.
    ///
    /// #   Panics
    ///
    /// If either position was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn erase_range(&mut self, first: ListPosition, last_excluded: ListPosition) -> Result<(), OutOfRangeError> {
        let first = self.node(first);
        let last_excluded = self.node(last_excluded);

        //  Validate the whole range before unlinking anything.
        let mut count = 0;
        let mut node = first;

        while node != last_excluded {
            if node == self.tail {
                return Err(OutOfRangeError::new("erase_range"));
            }

            node = self.nodes.resolve(node).next;
            count += 1;
        }

        let mut node = first;

        for _ in 0..count {
            let (_, next) = self.unlink(node);

            node = next;
        }

        debug_assert_eq!(last_excluded, node);

        log::trace!("Erased {count} elements from linked list {:?}", self.owner);

        Ok(())
    }
}

impl<T> LinkedList<T> {
    /// Returns the position of the first element, or `end()` if the list is empty.
    pub fn begin(&self) -> ListPosition {
        self.position(self.head)
    }

    /// Returns the end position: the sentinel, one past the last element.
    pub fn end(&self) -> ListPosition {
        self.position(self.tail)
    }

    /// Returns a reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn get(&self, position: ListPosition) -> Result<&T, OutOfRangeError> {
        let node = self.node(position);

        self.nodes
            .resolve(node)
            .element
            .as_ref()
            .ok_or(OutOfRangeError::new("get"))
    }

    /// Returns a mutable reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn get_mut(&mut self, position: ListPosition) -> Result<&mut T, OutOfRangeError> {
        let node = self.node(position);

        self.nodes
            .resolve_mut(node)
            .element
            .as_mut()
            .ok_or(OutOfRangeError::new("get_mut"))
    }

    /// Returns the position following `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn next(&self, position: ListPosition) -> Result<ListPosition, OutOfRangeError> {
        let node = self.node(position);

        if node == self.tail {
            return Err(OutOfRangeError::new("next"));
        }

        Ok(self.position(self.nodes.resolve(node).next))
    }

    /// Returns the position preceding `position`.
    ///
    /// There is no position before the first element.
    ///
    /// #   Errors
    ///
    /// If `position` is the first position, including the end position of an empty list.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn prev(&self, position: ListPosition) -> Result<ListPosition, OutOfRangeError> {
        let node = self.node(position);

        if node == self.head {
            return Err(OutOfRangeError::new("prev"));
        }

        let prev = self.nodes.resolve(node).prev.ok_or(OutOfRangeError::new("prev"))?;

        Ok(self.position(prev))
    }

    /// Returns the position `distance` steps away from `position`, forward if positive, backward if negative.
    ///
    /// Takes O(|distance|) steps.
    ///
    /// #   Errors
    ///
    /// If a step would move past the end position, or before the first position.
    ///
    /// #   Panics
    ///
    /// If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    pub fn offset(&self, position: ListPosition, distance: isize) -> Result<ListPosition, OutOfRangeError> {
        let mut position = position;

        for _ in 0..distance.unsigned_abs() {
            position = if distance >= 0 {
                self.next(position)?
            } else {
                self.prev(position)?
            };
        }

        Ok(position)
    }
}

impl<T> LinkedList<T> {
    /// Returns an iterator of references to the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            length: self.length,
            front: self.head,
            back: self.nodes.resolve(self.tail).prev.unwrap_or(self.tail),
            nodes: &self.nodes,
        }
    }

    /// Returns an iterator of mutable references to the elements.
    ///
    /// Nodes are not laid out in list order within the store, hence the references are first gathered in list order,
    /// which takes O(n) time and memory.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let mut ranks: Vec<usize> = iter::repeat(usize::MAX).take(self.nodes.slot_count()).collect();
        let mut node = self.head;

        for rank in 0..self.length {
            ranks[node.index()] = rank;
            node = self.nodes.resolve(node).next;
        }

        let mut elements: Vec<Option<&mut T>> = iter::repeat_with(|| None).take(self.length).collect();

        for (handle, node) in self.nodes.iter_mut() {
            //  Skips the sentinel.
            if let Some(element) = node.element.as_mut() {
                elements[ranks[handle.index()]] = Some(element);
            }
        }

        IterMut(elements.into_iter().flatten())
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut result = Self::with_node_capacity(self.length);

        result.extend(self.iter().cloned());

        result
    }

    //  Keeps the identity, and sentinel, of `self`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self).finish()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type Position = ListPosition;

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn is_empty(&self) -> bool {
        LinkedList::is_empty(self)
    }

    fn append(&mut self, element: T) {
        LinkedList::append(self, element);
    }

    fn prepend(&mut self, element: T) {
        LinkedList::prepend(self, element);
    }

    fn insert(&mut self, position: ListPosition, element: T) -> Result<ListPosition, OutOfRangeError> {
        Ok(LinkedList::insert(self, position, element))
    }

    fn pop_first(&mut self) -> Result<T, EmptyCollectionError> {
        LinkedList::pop_first(self)
    }

    fn pop_last(&mut self) -> Result<T, EmptyCollectionError> {
        LinkedList::pop_last(self)
    }

    fn erase_forward(&mut self, position: ListPosition) -> Result<(T, ListPosition), OutOfRangeError> {
        LinkedList::erase_forward(self, position)
    }

    fn erase_range(&mut self, first: ListPosition, last_excluded: ListPosition) -> Result<(), OutOfRangeError> {
        LinkedList::erase_range(self, first, last_excluded)
    }

    fn begin(&self) -> ListPosition {
        LinkedList::begin(self)
    }

    fn end(&self) -> ListPosition {
        LinkedList::end(self)
    }

    fn get(&self, position: ListPosition) -> Result<&T, OutOfRangeError> {
        LinkedList::get(self, position)
    }

    fn get_mut(&mut self, position: ListPosition) -> Result<&mut T, OutOfRangeError> {
        LinkedList::get_mut(self, position)
    }

    fn next(&self, position: ListPosition) -> Result<ListPosition, OutOfRangeError> {
        LinkedList::next(self, position)
    }

    fn prev(&self, position: ListPosition) -> Result<ListPosition, OutOfRangeError> {
        LinkedList::prev(self, position)
    }

    fn offset(&self, position: ListPosition, distance: isize) -> Result<ListPosition, OutOfRangeError> {
        LinkedList::offset(self, position, distance)
    }
}

//
//  Comparison
//

impl<T: cmp::PartialEq> cmp::PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: cmp::Eq> cmp::Eq for LinkedList<T> {}

//
//  Conversion
//

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(value: [T; N]) -> Self {
        let mut result = Self::with_node_capacity(N);

        result.extend(value);

        result
    }
}

//
//  Iteration
//

impl<'a, T: 'a + Clone> Extend<&'a T> for LinkedList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = LinkedList::new();

        result.extend(iter);

        result
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over a linked list.
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// Iterator over a reference to a linked list.
pub struct Iter<'a, T> {
    //  Only `length` nodes remain, from `front` to `back`, inclusive.
    length: usize,
    front: SlotHandle,
    back: SlotHandle,
    nodes: &'a SlabStore<Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.length == 0 {
            return None;
        }

        let front = self.nodes.resolve(self.front);

        self.front = front.next;
        self.length -= 1;

        front.element.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.length == 0 {
            return None;
        }

        let back = self.nodes.resolve(self.back);

        //  The first node has no predecessor, and is necessarily the last one yielded.
        if let Some(prev) = back.prev {
            self.back = prev;
        }

        self.length -= 1;

        back.element.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            front: self.front,
            back: self.back,
            nodes: self.nodes,
        }
    }
}

/// Iterator over a mutable reference to a linked list.
pub struct IterMut<'a, T>(iter::Flatten<alloc::vec::IntoIter<Option<&'a mut T>>>);

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

//
//  Implementation
//

struct Node<T> {
    //  `None` in the sentinel only.
    element: Option<T>,
    //  `None` in the first node, and in the sentinel of an empty list.
    prev: Option<SlotHandle>,
    //  The sentinel links to itself.
    next: SlotHandle,
}

impl<T> LinkedList<T> {
    fn with_node_capacity(capacity: usize) -> Self {
        let mut nodes = SlabStore::with_capacity(capacity + 1);

        let tail = nodes.allocate_with(|sentinel| Node {
            element: None,
            prev: None,
            next: sentinel,
        });

        Self {
            length: 0,
            head: tail,
            tail,
            nodes,
            owner: Owner::fresh(),
        }
    }

    fn position(&self, node: SlotHandle) -> ListPosition {
        ListPosition {
            owner: self.owner,
            node,
        }
    }

    //  Returns the node of `position`.
    //
    //  #   Panics
    //
    //  If `position` was issued by another list, or its node has been erased.
    #[track_caller]
    fn node(&self, position: ListPosition) -> SlotHandle {
        self.owner.check(position.owner);

        if !self.nodes.contains(position.node) {
            Self::erased_position(position)
        }

        position.node
    }

    //  Links a new node holding `element` immediately before `next`, returning it.
    //
    //  `next` must be a valid node of `self`, possibly the sentinel.
    fn link_before(&mut self, next: SlotHandle, element: T) -> SlotHandle {
        let prev = self.nodes.resolve(next).prev;

        let node = self.nodes.allocate(Node {
            element: Some(element),
            prev,
            next,
        });

        self.nodes.resolve_mut(next).prev = Some(node);

        match prev {
            Some(prev) => self.nodes.resolve_mut(prev).next = node,
            None => self.head = node,
        }

        self.length += 1;

        node
    }

    //  Unlinks and deallocates `node`, returning its element and the node which followed it.
    //
    //  `node` must be a valid node of `self`, other than the sentinel.
    fn unlink(&mut self, node: SlotHandle) -> (T, SlotHandle) {
        debug_assert_ne!(self.tail, node);

        let Node { element, prev, next } = self.nodes.deallocate(node);

        self.nodes.resolve_mut(next).prev = prev;

        match prev {
            Some(prev) => self.nodes.resolve_mut(prev).next = next,
            None => self.head = next,
        }

        self.length -= 1;

        let Some(element) = element else {
            unreachable!("Only the sentinel holds no element")
        };

        (element, next)
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn erased_position(position: ListPosition) -> ! {
        panic!("{position:?} denotes an erased node")
    }
}

// mod tests
