use crate::multiset::error::Error;
use crate::multiset::node::{NodeId, SENTINEL};
use crate::multiset::tree::RbTree;
use std::borrow::Borrow;
use std::iter::FromIterator;

/// An ordered multiset implemented using a red-black tree.
///
/// Repeated insertions of an equal element do not create duplicate nodes;
/// they increment a multiplicity counter on the single node holding that
/// element. The tree keeps every root-to-leaf path within the classic
/// red-black bounds, so all operations run in O(log n) time.
///
/// # Examples
///
/// ```
/// use rb_multiset::multiset::RbMultiset;
///
/// let mut set = RbMultiset::new();
/// set.insert(15);
/// set.insert(15);
/// set.insert(20);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.distinct_len(), 2);
/// assert_eq!(set.count(&15), 2);
///
/// assert_eq!(set.min(), Some(&15));
/// assert_eq!(set.successor(&15), Ok(Some(&20)));
///
/// assert!(set.remove(&15));
/// assert_eq!(set.count(&15), 1);
/// ```
pub struct RbMultiset<T> {
    tree: RbTree<T>,
}

impl<T> RbMultiset<T> {
    /// Constructs a new, empty `RbMultiset<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let set: RbMultiset<u32> = RbMultiset::new();
    /// ```
    pub fn new() -> Self {
        RbMultiset {
            tree: RbTree::new(),
        }
    }

    /// Inserts an element into the multiset. If an equal element is already
    /// present, its multiplicity is incremented and no node is created.
    /// Returns the number of order comparisons performed while placing the
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// assert_eq!(set.insert(1), 0);
    /// assert_eq!(set.insert(1), 1);
    /// assert_eq!(set.insert(2), 2);
    /// ```
    pub fn insert(&mut self, element: T) -> usize
    where
        T: Ord,
    {
        self.tree.insert(element)
    }

    /// Removes one occurrence of an element from the multiset. The node is
    /// only unlinked when its multiplicity drops to zero. Returns `true` if an
    /// occurrence was removed and `false` if the element was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<V>(&mut self, element: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(element)
    }

    /// Checks if an element exists in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, element: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.tree.search(element).is_sentinel()
    }

    /// Returns the multiplicity of an element, or 0 if it is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.count(&1), 2);
    /// assert_eq!(set.count(&2), 0);
    /// ```
    pub fn count<V>(&self, element: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.tree.search(element);
        if node.is_sentinel() {
            0
        } else {
            self.tree[node].count
        }
    }

    /// Returns the minimum element of the multiset. Returns `None` if the
    /// multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        if self.tree.root.is_sentinel() {
            None
        } else {
            Some(self.tree.element(self.tree.minimum(self.tree.root)))
        }
    }

    /// Returns the maximum element of the multiset. Returns `None` if the
    /// multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        if self.tree.root.is_sentinel() {
            None
        } else {
            Some(self.tree.element(self.tree.maximum(self.tree.root)))
        }
    }

    /// Returns the strictly previous element of `element` under the element
    /// order. The element itself must be stored in the multiset. Returns
    /// `Ok(None)` if `element` is the minimum, and `Err(Error::ElementNotFound)`
    /// if `element` is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::{Error, RbMultiset};
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.predecessor(&3), Ok(Some(&1)));
    /// assert_eq!(set.predecessor(&1), Ok(None));
    /// assert_eq!(set.predecessor(&2), Err(Error::ElementNotFound));
    /// ```
    pub fn predecessor<V>(&self, element: &V) -> Result<Option<&T>, Error>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.tree.search(element);
        if node.is_sentinel() {
            return Err(Error::ElementNotFound);
        }
        let predecessor = self.tree.predecessor(node);
        if predecessor.is_sentinel() {
            Ok(None)
        } else {
            Ok(Some(self.tree.element(predecessor)))
        }
    }

    /// Returns the strictly next element of `element` under the element
    /// order. The element itself must be stored in the multiset. Returns
    /// `Ok(None)` if `element` is the maximum, and `Err(Error::ElementNotFound)`
    /// if `element` is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::{Error, RbMultiset};
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.successor(&1), Ok(Some(&3)));
    /// assert_eq!(set.successor(&3), Ok(None));
    /// assert_eq!(set.successor(&2), Err(Error::ElementNotFound));
    /// ```
    pub fn successor<V>(&self, element: &V) -> Result<Option<&T>, Error>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.tree.search(element);
        if node.is_sentinel() {
            return Err(Error::ElementNotFound);
        }
        let successor = self.tree.successor(node);
        if successor.is_sentinel() {
            Ok(None)
        } else {
            Ok(Some(self.tree.element(successor)))
        }
    }

    /// Returns the black height of the tree: the number of black nodes on any
    /// root-to-sentinel path, the root included and the sentinel excluded.
    /// Returns -1 if the multiset is empty; a non-empty tree always has black
    /// height of at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// assert_eq!(set.black_height(), -1);
    /// set.insert(1);
    /// assert_eq!(set.black_height(), 1);
    /// ```
    pub fn black_height(&self) -> i32 {
        self.tree.black_height()
    }

    /// Returns the number of elements in the multiset, counting each element
    /// once per unit of multiplicity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.size
    }

    /// Returns the number of distinct elements in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.distinct_len(), 1);
    /// ```
    pub fn distinct_len(&self) -> usize {
        self.tree.node_count
    }

    /// Returns `true` if the multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let set: RbMultiset<u32> = RbMultiset::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.root.is_sentinel()
    }

    /// Clears the multiset, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns an iterator over the multiset. The iterator yields elements
    /// using in-order traversal, repeating each element once per unit of
    /// multiplicity, so the sequence is non-decreasing. Each call re-walks the
    /// tree from its minimum; the iterator is not a live view.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_multiset::multiset::RbMultiset;
    ///
    /// let mut set = RbMultiset::new();
    /// set.insert(3);
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RbMultisetIter<'_, T> {
        let node = if self.tree.root.is_sentinel() {
            SENTINEL
        } else {
            self.tree.minimum(self.tree.root)
        };
        RbMultisetIter {
            tree: &self.tree,
            node,
            occurrences: if node.is_sentinel() {
                0
            } else {
                self.tree[node].count
            },
            remaining: self.tree.size,
        }
    }
}

impl<'a, T> IntoIterator for &'a RbMultiset<T>
where
    T: 'a,
{
    type IntoIter = RbMultisetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RbMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields
/// immutable references, repeating each element once per unit of multiplicity.
pub struct RbMultisetIter<'a, T> {
    tree: &'a RbTree<T>,
    node: NodeId,
    occurrences: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RbMultisetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.node.is_sentinel() {
            return None;
        }
        let element = self.tree.element(self.node);
        self.occurrences -= 1;
        self.remaining -= 1;
        if self.occurrences == 0 {
            self.node = self.tree.successor(self.node);
            if !self.node.is_sentinel() {
                self.occurrences = self.tree[self.node].count;
            }
        }
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RbMultisetIter<'a, T> {}

impl<T> Default for RbMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for RbMultiset<T>
where
    T: Ord,
{
    /// Constructs a multiset seeded with a single element.
    fn from(element: T) -> Self {
        let mut set = RbMultiset::new();
        set.insert(element);
        set
    }
}

impl<T> FromIterator<T> for RbMultiset<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RbMultiset::new();
        for element in iter {
            set.insert(element);
        }
        set
    }
}
