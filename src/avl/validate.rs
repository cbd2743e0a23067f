use crate::avl::Tree;
use derive_more::{Display, Error, IsVariant};

/// A broken invariant found by [`validate`].
#[derive(Debug, Display, Error, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[display("cached height {cached} does not match actual height {actual}")]
    StaleHeight { cached: isize, actual: isize },
    #[display("balance factor {balance_factor} is outside [-1, 1]")]
    Unbalanced { balance_factor: isize },
    #[display("in-order traversal decreases at position {position}")]
    OutOfOrder { position: usize },
}

/// Walks `tree` once and checks, for every node, that the cached height is
/// exact and that the balance factor lies in `[-1, 1]`, and that the values
/// read in order never decrease.
///
/// Equal values may sit on either side of each other: insertion sends them
/// right, but a later rotation can lift a right child above its equal parent.
///
/// Returns the number of nodes on success, or the first violation met.
///
/// # Examples
///
/// ```
/// use classic_collections::avl;
///
/// let tree = (0..64).chain(0..64).fold(None, avl::insert);
/// assert_eq!(avl::validate(&tree), Ok(128));
/// ```
pub fn validate<T: Ord>(tree: &Tree<T>) -> Result<usize, Violation> {
    let mut walk = Walk {
        previous: None,
        position: 0,
    };
    walk.check(tree)?;
    Ok(walk.position)
}

/// In-order walk state: the last value seen and how many values came
/// before the next one.
struct Walk<'a, T> {
    previous: Option<&'a T>,
    position: usize,
}

impl<'a, T: Ord> Walk<'a, T> {
    /// Returns the actual height of the subtree.
    fn check(&mut self, tree: &'a Tree<T>) -> Result<isize, Violation> {
        let node = match tree {
            Some(node) => node,
            None => return Ok(-1),
        };
        let left_height = self.check(&node.left)?;

        if self.previous.map_or(false, |previous| node.value < *previous) {
            return Err(Violation::OutOfOrder {
                position: self.position,
            });
        }
        self.previous = Some(&node.value);
        self.position += 1;

        let right_height = self.check(&node.right)?;

        let actual = 1 + left_height.max(right_height);
        if node.height != actual {
            return Err(Violation::StaleHeight {
                cached: node.height,
                actual,
            });
        }
        let balance_factor = right_height - left_height;
        if !(-1..=1).contains(&balance_factor) {
            return Err(Violation::Unbalanced { balance_factor });
        }
        Ok(actual)
    }
}
