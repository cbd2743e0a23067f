//! This crate provides two classic pointer-based data structures:
//!
//! - [`AvlTree`], an ordered multiset backed by an AVL tree with owned
//!   subtrees, kept balanced by rotations during insertion;
//! - [`List`], a doubly-linked deque with owned nodes, implemented as a
//!   cyclic list around a single ghost (sentinel) node.
//!
//! # AVL Tree
//!
//! The tree is nothing but its root. The free functions [`avl::insert`] and
//! [`avl::height`] work directly on an owned [`avl::Tree`], and [`AvlTree`]
//! wraps one root for convenience.
//!
//! ```
//! use classic_collections::avl;
//!
//! let mut tree = None;
//! for value in [3, 1, 2] {
//!     tree = avl::insert(tree, value);
//! }
//! // The left-right case is fixed by a double rotation.
//! let root = tree.as_deref().unwrap();
//! assert_eq!(root.value(), &2);
//! assert_eq!(avl::height(&tree), 1);
//! ```
//!
//! Every node caches the height of its subtree (`-1` for an absent subtree,
//! `0` for a leaf). After each insertion, for every node, the balance factor
//! `height(right) - height(left)` lies in `[-1, 1]` and the in-order
//! sequence of values never decreases. Insertion sends a value equal to a
//! node into its right subtree, but rotations may later leave equal values
//! on either side. [`avl::validate`] checks all of this.
//!
//! ## Memory Layout
//!
//! ```text
//!                  ╔═══════════╗
//!                  ║ value  T  ║
//!                  ╟───────────╢
//!                  ║ height    ║
//!                  ╟─────┬─────╢
//!                  ║left │right║
//!                  ╚══╤══╧══╤══╝
//!            ┌────────┘     └────────┐
//!            ↓ Box                   ↓ Box
//!      ╔═══════════╗           ╔═══════════╗
//!      ║  Node ... ║           ║  Node ... ║
//!      ╚═══════════╝           ╚═══════════╝
//! ```
//! Each node exclusively owns its children. There are no parent pointers;
//! rotations move boxes instead of aliasing them.
//!
//! # Cyclic List
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     List
//! ```
//! Initially, there is a ghost node in an empty list, of which the `next` and
//! `prev` pointer point to itself. The `len` field is kept only with the
//! `length` feature (enabled by default).
//!
//! The list serves as a deque, as a bag and can be reversed in place:
//!
//! ```
//! use classic_collections::List;
//!
//! let mut list = List::new();
//! list.push_back(2);
//! list.push_front(1);
//! list.add(0);
//! assert!(list.contains(&1));
//!
//! list.reverse();
//! assert_eq!(Vec::from_iter(list.iter().copied()), vec![2, 1, 0]);
//!
//! assert_eq!(list.remove_item(&1), Some(1));
//! assert_eq!(list.pop_front(), Some(2));
//! assert_eq!(list.pop_back(), Some(0));
//! assert_eq!(list.pop_back(), None);
//! ```
//!
//! # Logging
//!
//! Rebalancing cases and list reversals are reported at `trace` level through
//! the [`log`] facade. No logger is installed by this crate.

#[doc(inline)]
pub use avl::AvlTree;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod avl;
pub mod list;
