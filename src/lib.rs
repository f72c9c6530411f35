//! An ordered multiset backed by a red-black tree.
//!
//! Equal elements share one node and a multiplicity counter, so the tree holds
//! one node per distinct element while still reporting sizes, iteration order,
//! and ordered queries in multiset terms.

pub mod multiset;

pub use crate::multiset::{Error, RbMultiset};
