use crate::list::{next_of, List};
use log::trace;
use std::hash::{Hash, Hasher};
use std::ptr;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

// bag operations
impl<T> List<T> {
    /// Adds an element to the bag. Elements are added at the front.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::List;
    ///
    /// let mut bag = List::new();
    /// bag.add(1);
    /// bag.add(2);
    /// assert_eq!(bag.front(), Some(&2));
    /// ```
    #[inline]
    pub fn add(&mut self, elt: T) {
        self.push_front(elt);
    }

    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Removes the first element equal to `x` and returns it, or returns
    /// `None` if no such element exists.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::List;
    ///
    /// let mut bag = List::from([3, 1, 3]);
    /// assert_eq!(bag.remove_item(&3), Some(3));
    /// assert_eq!(Vec::from_iter(bag.iter().copied()), vec![1, 3]);
    /// assert_eq!(bag.remove_item(&7), None);
    /// ```
    pub fn remove_item(&mut self, x: &T) -> Option<T>
    where
        T: PartialEq<T>,
    {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        while node != ghost {
            // SAFETY: `node` has not reached the ghost, so it is an element node.
            if unsafe { self.element(node) } == x {
                // SAFETY: `node` is an element node of this list.
                let node = unsafe { self.detach_node(node) };
                return Some(node.element);
            }
            node = unsafe { next_of(node) };
        }
        None
    }
}

impl<T> List<T> {
    /// Reverses the list in place.
    ///
    /// Every node, the ghost included, has its `next` and `prev` links
    /// swapped. No element is moved and nothing is allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![4, 3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        #[cfg(feature = "length")]
        trace!("reversing list of {} elements", self.len);
        #[cfg(not(feature = "length"))]
        trace!("reversing list");

        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            let raw = node.as_ptr();
            // SAFETY: `node` walks the cycle starting from the ghost, so it is
            // always a valid node of the list. Only the links are touched.
            unsafe {
                ptr::swap(ptr::addr_of_mut!((*raw).next), ptr::addr_of_mut!((*raw).prev));
                // The old `next` is now `prev`.
                node = (*raw).prev;
            }
            if node == ghost {
                break;
            }
        }
    }
}
