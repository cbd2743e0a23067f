use std::fmt::{self, Debug, Formatter};

use log::trace;

pub use self::iterator::{IntoIter, Iter};
pub use self::validate::{validate, Violation};

pub mod iterator;
mod validate;

/// An owned (sub)tree: `None` for an absent subtree, otherwise the boxed root
/// node which exclusively owns its children.
///
/// A tree is nothing more than its root. Every insertion may change the
/// identity of the root, so callers store back whatever [`insert`] returns.
pub type Tree<T> = Option<Box<Node<T>>>;

/// A node of an AVL tree.
///
/// The `height` field is a cache of `1 + max(height(left), height(right))`.
/// It is repaired bottom-up after every structural change beneath the node.
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Tree<T>,
    pub(crate) right: Tree<T>,
    pub(crate) height: isize,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// The cached height of the subtree rooted at this node. A leaf has
    /// height 0.
    #[inline]
    pub fn height(&self) -> isize {
        self.height
    }
}

/// Returns the height of `tree`: `-1` if it is absent, else the cached height
/// of its root.
///
/// # Complexity
///
/// This operation should compute in *O*(1) time.
///
/// # Examples
///
/// ```
/// use classic_collections::avl::{self, Tree};
///
/// let tree: Tree<i32> = None;
/// assert_eq!(avl::height(&tree), -1);
///
/// let tree = avl::insert(tree, 7);
/// assert_eq!(avl::height(&tree), 0);
/// ```
#[inline]
pub fn height<T>(tree: &Tree<T>) -> isize {
    tree.as_ref().map_or(-1, |node| node.height)
}

/// Inserts `value` into `tree` and returns the new root.
///
/// Values equal to an existing node go to its right subtree, so duplicates
/// are kept. Every node on the insertion path is rebalanced once as the
/// recursion unwinds.
///
/// # Complexity
///
/// This operation should compute in *O*(log *n*) time.
///
/// # Examples
///
/// ```
/// use classic_collections::avl;
///
/// let mut tree = None;
/// for value in [1, 2, 3] {
///     tree = avl::insert(tree, value);
/// }
/// let root = tree.as_deref().unwrap();
/// assert_eq!(root.value(), &2);
/// assert_eq!(root.left().map(|node| *node.value()), Some(1));
/// assert_eq!(root.right().map(|node| *node.value()), Some(3));
/// assert_eq!(avl::height(&tree), 1);
/// ```
pub fn insert<T: Ord>(tree: Tree<T>, value: T) -> Tree<T> {
    Some(insert_node(tree, value))
}

fn insert_node<T: Ord>(tree: Tree<T>, value: T) -> Box<Node<T>> {
    match tree {
        None => Box::new(Node::leaf(value)),
        Some(mut node) => {
            if value < node.value {
                node.left = Some(insert_node(node.left.take(), value));
            } else {
                node.right = Some(insert_node(node.right.take(), value));
            }
            rebalance(node)
        }
    }
}

/// Requires the cached heights of both children to be accurate.
fn recompute_height<T>(node: &mut Node<T>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn balance_factor<T>(node: &Node<T>) -> isize {
    height(&node.right) - height(&node.left)
}

/// Rotates `top` to the left, returning its former right child as the new
/// subtree root. A node without a right child is returned unchanged.
fn rotate_left<T>(mut top: Box<Node<T>>) -> Box<Node<T>> {
    let mut new_top = match top.right.take() {
        Some(node) => node,
        None => return top,
    };
    top.right = new_top.left.take();
    // `top` is now the child of `new_top`, so it must be repaired first.
    recompute_height(&mut top);
    new_top.left = Some(top);
    recompute_height(&mut new_top);
    new_top
}

/// Mirror of [`rotate_left`].
fn rotate_right<T>(mut top: Box<Node<T>>) -> Box<Node<T>> {
    let mut new_top = match top.left.take() {
        Some(node) => node,
        None => return top,
    };
    top.left = new_top.right.take();
    recompute_height(&mut top);
    new_top.right = Some(top);
    recompute_height(&mut new_top);
    new_top
}

/// Restores the balance of `node` after one of its subtrees grew by one
/// level, and repairs its height.
///
/// The balance factor of `node` is in `-2..=2` here. The sign of the heavy
/// child's own balance factor decides between a single and a double rotation.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let bf = balance_factor(&node);
    if bf < -1 {
        if node.left.as_deref().map_or(false, |left| balance_factor(left) > 0) {
            trace!("rebalance: left-right case, straightening left child");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!("rebalance: left-left case");
        }
        rotate_right(node)
    } else if bf > 1 {
        if node.right.as_deref().map_or(false, |right| balance_factor(right) < 0) {
            trace!("rebalance: right-left case, straightening right child");
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!("rebalance: right-right case");
        }
        rotate_left(node)
    } else {
        recompute_height(&mut node);
        node
    }
}

/// An ordered multiset backed by an AVL tree.
///
/// `AvlTree` is a thin owner of the root [`Tree`]; it keeps no other state.
/// Queries that would need a cached count, like [`AvlTree::len`], walk the
/// tree instead.
///
/// # Examples
///
/// ```
/// use classic_collections::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for value in [5, 3, 8, 10, 3] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.len(), 5);
/// assert!(tree.contains(&10));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 3, 5, 8, 10]);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Tree<T>,
}

impl<T> AvlTree<T> {
    /// Creates an empty `AvlTree`.
    #[inline]
    pub const fn new() -> Self {
        Self { root: None }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, `-1` if it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Provides a reference to the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Counts the values in the tree.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all values from the tree.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Provides a reference to the least value, or `None` if the tree is
    /// empty.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Provides a reference to the greatest value, or `None` if the tree is
    /// empty. Among equal values, the one inserted last is returned.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Provides an in-order iterator over the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::AvlTree;
    ///
    /// let tree = AvlTree::from_iter([4, 1, 3, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), Some(&4));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts a value, keeping the tree balanced. Duplicates are accepted.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(log *n*) time.
    pub fn insert(&mut self, value: T) {
        self.root = insert(self.root.take(), value);
    }

    /// Returns `true` if the tree contains a value equal to `value`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(log *n*) time.
    pub fn contains(&self, value: &T) -> bool {
        let mut tree = &self.root;
        while let Some(node) = tree {
            if *value < node.value {
                tree = &node.left;
            } else if *value > node.value {
                tree = &node.right;
            } else {
                return true;
            }
        }
        false
    }

    /// Checks the height cache, the balance and the ordering of every node.
    /// Returns the number of values on success.
    pub fn validate(&self) -> Result<usize, Violation> {
        validate(&self.root)
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.insert(value));
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTree<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

/// Renders a subtree sideways: the left branch above its parent, prefixed
/// with `┌`, the right branch below, prefixed with `└`.
struct Branch<'a, T>(&'a Tree<T>);

impl<T: Debug> Debug for Branch<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => write!(
                f,
                "{}\n({:?}, h={})\n{}",
                prefix_lines(&format!("{:?}", Branch(&node.left)), "┌    "),
                node.value,
                node.height,
                prefix_lines(&format!("{:?}", Branch(&node.right)), "└    "),
            ),
            None => write!(f, "-"),
        }
    }
}

fn prefix_lines(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<T: Debug> Debug for Node<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<T: Debug> Debug for AvlTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("nodes", &format_args!("\n{:?}\n", Branch(&self.root)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree_of<I: IntoIterator<Item = i32>>(values: I) -> Tree<i32> {
        values.into_iter().fold(None, insert)
    }

    fn shape(tree: &Tree<i32>) -> (i32, Option<i32>, Option<i32>, isize) {
        let root = tree.as_deref().expect("tree should not be empty");
        (
            root.value,
            root.left().map(|node| node.value),
            root.right().map(|node| node.value),
            root.height,
        )
    }

    #[test]
    fn insert_into_empty_creates_leaf() {
        let tree = insert(None, 42);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.value, 42);
        assert_eq!(root.height, 0);
        assert!(root.left.is_none());
        assert!(root.right.is_none());
    }

    #[test]
    fn single_left_rotation() {
        assert_eq!(shape(&tree_of([1, 2, 3])), (2, Some(1), Some(3), 1));
    }

    #[test]
    fn single_right_rotation() {
        assert_eq!(shape(&tree_of([3, 2, 1])), (2, Some(1), Some(3), 1));
    }

    #[test]
    fn left_right_rotation() {
        assert_eq!(shape(&tree_of([3, 1, 2])), (2, Some(1), Some(3), 1));
    }

    #[test]
    fn right_left_rotation() {
        assert_eq!(shape(&tree_of([1, 3, 2])), (2, Some(1), Some(3), 1));
    }

    #[test]
    fn rotation_below_root() {
        // 10 lands under 8 and unbalances it; the root 5 stays put.
        let tree = tree_of([5, 3, 8, 9, 10]);
        assert_eq!(shape(&tree), (5, Some(3), Some(9), 2));
        let right = tree.as_deref().and_then(Node::right).unwrap();
        assert_eq!(right.left().map(|node| node.value), Some(8));
        assert_eq!(right.right().map(|node| node.value), Some(10));
        assert_eq!(right.height, 1);
        assert_eq!(validate(&tree), Ok(5));
    }

    #[test]
    fn duplicates_go_right() {
        let tree = tree_of([5, 5]);
        let root = tree.as_deref().unwrap();
        assert!(root.left.is_none());
        assert_eq!(root.right().map(|node| node.value), Some(5));

        let tree = tree_of([5, 5, 5]);
        assert_eq!(shape(&tree), (5, Some(5), Some(5), 1));
        assert_eq!(validate(&tree), Ok(3));
    }

    #[test]
    fn duplicate_heavy_insertions_keep_every_value() {
        let mut tree = AvlTree::new();
        for value in (0..200).chain(0..200) {
            tree.insert(value);
        }
        assert_eq!(tree.validate(), Ok(400));
        assert_eq!(tree.len(), 400);
        assert!((0..200).all(|value| tree.contains(&value)));
        assert!(!tree.contains(&200));

        let mut expected = Vec::from_iter((0..200).chain(0..200));
        expected.sort();
        assert_eq!(Vec::from_iter(tree.iter().copied()), expected);

        // Interleaved runs of equal values.
        let tree = AvlTree::from_iter((0..100).flat_map(|value| [value % 7, value % 3, 1]));
        assert_eq!(tree.validate(), Ok(300));
        assert!((0..7).all(|value| tree.contains(&value)));
    }

    #[test]
    fn height_query_is_idempotent() {
        let tree = tree_of(0..100);
        let first = height(&tree);
        assert_eq!(height(&tree), first);
        assert_eq!(height::<i32>(&None), -1);
    }

    #[test]
    fn height_bound_for_ascending_input() {
        let mut tree = AvlTree::new();
        for n in 1..=1000 {
            tree.insert(n);
            let bound = 2.0 * ((n + 1) as f64).log2();
            assert!(
                tree.height() as f64 <= bound,
                "height {} exceeds bound {} at n = {}",
                tree.height(),
                bound,
                n
            );
        }
        assert_eq!(tree.validate(), Ok(1000));
    }

    #[test]
    fn first_last_and_contains() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert!(!tree.contains(&1));

        tree.extend([7, 2, 9, 4, 4]);
        assert_eq!(tree.first(), Some(&2));
        assert_eq!(tree.last(), Some(&9));
        assert!(tree.contains(&4));
        assert!(!tree.contains(&5));
        assert_eq!(tree.len(), 5);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn tree_eq_compares_contents() {
        let a = AvlTree::from([1, 2, 3, 4]);
        let b = AvlTree::from([4, 3, 2, 1]);
        assert_eq!(a, b);
        assert_ne!(a, AvlTree::from([1, 2, 3]));
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn debug_renders_sideways() {
        let tree = AvlTree::from([2, 1, 3]);
        let rendered = format!("{:?}", tree);
        assert!(rendered.contains("┌    (1, h=0)"));
        assert!(rendered.contains("(2, h=1)"));
        assert!(rendered.contains("└    (3, h=0)"));
        assert_eq!(format!("{:?}", AvlTree::<i32>::new()), "AvlTree { nodes: \n-\n }");
    }

    proptest! {
        #[test]
        fn prop_insert_keeps_invariants(values in prop::collection::vec(-50i32..50, 0..300)) {
            let mut tree = AvlTree::new();
            for (i, value) in values.iter().enumerate() {
                tree.insert(*value);
                prop_assert_eq!(tree.validate(), Ok(i + 1));
            }
        }

        #[test]
        fn prop_in_order_is_sorted(values in prop::collection::vec(any::<i16>(), 0..300)) {
            let tree = AvlTree::from_iter(values.iter().copied());
            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected.clone());
            prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn prop_height_is_logarithmic(values in prop::collection::vec(any::<u32>(), 1..500)) {
            let tree = AvlTree::from_iter(values.iter().copied());
            let bound = 1.44 * ((values.len() + 2) as f64).log2() - 0.328;
            prop_assert!((tree.height() as f64) <= bound);
        }
    }
}
