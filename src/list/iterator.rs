use crate::list::{next_of, prev_of, List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The run of element nodes an iterator has not yielded yet: `front` up to,
/// but not including, `back`. A fresh span runs from the first element to
/// the ghost node.
struct Span<T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    len: usize,
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> Span<T> {
    fn of(list: &List<T>) -> Self {
        Self {
            front: list.front_node(),
            back: list.ghost_node(),
            #[cfg(feature = "length")]
            len: list.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.front == self.back
    }

    fn pop_front(&mut self) -> Option<NonNull<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        let node = self.front;
        // SAFETY: the span is not empty, so `front` is an element node of a
        // list that outlives the iterator.
        self.front = unsafe { next_of(node) };
        self.shrink();
        Some(node)
    }

    fn pop_back(&mut self) -> Option<NonNull<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the span is not empty, so the node before `back` is an
        // element node.
        self.back = unsafe { prev_of(self.back) };
        self.shrink();
        Some(self.back)
    }

    #[inline]
    fn shrink(&mut self) {
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[cfg(not(feature = "length"))]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_empty() {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

/// A borrowing iterator over a [`List`], from front to back.
///
/// Both ends can be consumed; the iterator is exhausted once they meet. The
/// list stays immutably borrowed for as long as the iterator lives.
pub struct Iter<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            span: self.span,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = Vec::from_iter(self.clone());
        f.debug_tuple("Iter").field(&remaining).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: the list is borrowed for `'a` and the node is an element.
        self.span
            .pop_front()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.span.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        // SAFETY: as in `next`.
        self.span
            .pop_back()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutably borrowing iterator over a [`List`], from front to back.
///
/// Each element is handed out at most once, from whichever end is consumed
/// first.
pub struct IterMut<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = Iter {
            span: self.span,
            _marker: PhantomData,
        };
        f.debug_tuple("IterMut")
            .field(&Vec::from_iter(remaining))
            .finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        // SAFETY: the list is mutably borrowed for `'a`, and a node leaves
        // the span once it is yielded, so no element is aliased.
        self.span
            .pop_front()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.span.size_hint()
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        // SAFETY: as in `next`.
        self.span
            .pop_back()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator that drains a [`List`] from either end.
///
/// Elements not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }

    fn last(mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

#[cfg(feature = "length")]
impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Collects into a deque, keeping the iteration order from front to back.
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Appends at the back.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
