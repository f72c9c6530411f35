//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions, and that merges equal elements into a
//! single node carrying a multiplicity counter.

mod error;
mod node;
mod set;
mod tree;

pub use self::error::Error;
pub use self::set::{RbMultiset, RbMultisetIter};
