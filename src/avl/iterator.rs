use crate::avl::{AvlTree, Node, Tree};
use std::fmt;
use std::iter::FusedIterator;

/// An in-order iterator over the values of an [`AvlTree`].
///
/// It keeps the path of nodes whose left subtrees have been entered but
/// whose values are not yet yielded, so its memory is bounded by the height
/// of the tree.
pub struct Iter<'a, T: 'a> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend_left(tree.as_deref());
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning in-order iterator over the values of an [`AvlTree`].
///
/// This `struct` is created by the [`into_iter`] method on [`AvlTree`]
/// (provided by the `IntoIterator` trait). Nodes are freed as soon as their
/// values are yielded.
///
/// [`into_iter`]: AvlTree::into_iter
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    fn descend_left(&mut self, mut tree: Tree<T>) {
        while let Some(mut node) = tree {
            tree = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("pending", &self.stack.len())
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, right, .. } = *node;
        self.descend_left(right);
        Some(value)
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.descend_left(self.root.take());
        iter
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn iter_yields_in_order() {
        let tree = AvlTree::from([50, 20, 80, 10, 30, 70, 90, 20]);
        let mut iter = tree.iter();
        for expected in [10, 20, 20, 30, 50, 70, 80, 90] {
            assert_eq!(iter.next(), Some(&expected));
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None); // Fused
    }

    #[test]
    fn iter_stack_is_bounded_by_height() {
        let tree: AvlTree<u32> = (0..1024).collect();
        let iter = tree.iter();
        assert!(iter.stack.len() as isize <= tree.height() + 1);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let tree = AvlTree::from(["pear", "apple", "fig", "apple"]);
        let values: Vec<_> = tree.into_iter().collect();
        assert_eq!(values, vec!["apple", "apple", "fig", "pear"]);
    }

    #[test]
    fn borrowed_into_iter() {
        let tree = AvlTree::from([3, 1, 2]);
        let mut sum = 0;
        for value in &tree {
            sum += value;
        }
        assert_eq!(sum, 6);
    }

    #[test]
    fn empty_tree_iterates_nothing() {
        let tree = AvlTree::<i32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.into_iter().next(), None);
    }
}
