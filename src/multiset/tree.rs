use crate::multiset::node::{Color, Node, NodeId, SENTINEL};
use slab::Slab;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// The arena-backed core of the red-black multiset.
///
/// Nodes live in a slab whose index 0 permanently holds the shared sentinel;
/// every absent child or parent link is `SENTINEL`, so color and child queries
/// are total at the tree fringe. `size` and `node_count` are maintained on
/// every mutation and are never recomputed by traversal.
pub struct RbTree<T> {
    nodes: Slab<Node<T>>,
    pub root: NodeId,
    pub size: usize,
    pub node_count: usize,
}

impl<T> Index<NodeId> for RbTree<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<T> IndexMut<NodeId> for RbTree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

impl<T> RbTree<T> {
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let index = nodes.insert(Node::sentinel());
        assert_eq!(index, SENTINEL.0);
        RbTree {
            nodes,
            root: SENTINEL,
            size: 0,
            node_count: 0,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        let index = self.nodes.insert(Node::sentinel());
        assert_eq!(index, SENTINEL.0);
        self.root = SENTINEL;
        self.size = 0;
        self.node_count = 0;
    }

    pub fn is_red(&self, id: NodeId) -> bool {
        self[id].color == Color::Red
    }

    pub fn is_black(&self, id: NodeId) -> bool {
        self[id].color == Color::Black
    }

    /// Returns the element of a real node.
    ///
    /// Panics if called on the sentinel; that is a bug in the caller, not a
    /// user error.
    pub fn element(&self, id: NodeId) -> &T {
        self[id]
            .element
            .as_ref()
            .expect("Expected a real node, found the sentinel.")
    }

    fn allocate(&mut self, node: Node<T>) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    // The sentinel's parent link is scratch space for the deletion fixup and
    // must not outlive the operation that wrote it.
    fn reset_sentinel(&mut self) {
        self[SENTINEL].parent = SENTINEL;
    }

    /// Returns the node holding an element equal to `element`, or the sentinel
    /// if no such node exists.
    pub fn search<V>(&self, element: &V) -> NodeId
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        while !current.is_sentinel() {
            match element.cmp(self.element(current).borrow()) {
                Ordering::Less => current = self[current].left,
                Ordering::Greater => current = self[current].right,
                Ordering::Equal => return current,
            }
        }
        SENTINEL
    }

    // precondition: the subtree rooted at `id` is non-empty
    pub fn minimum(&self, id: NodeId) -> NodeId {
        assert!(!id.is_sentinel(), "Expected a non-empty subtree.");
        let mut current = id;
        while !self[current].left.is_sentinel() {
            current = self[current].left;
        }
        current
    }

    // precondition: the subtree rooted at `id` is non-empty
    pub fn maximum(&self, id: NodeId) -> NodeId {
        assert!(!id.is_sentinel(), "Expected a non-empty subtree.");
        let mut current = id;
        while !self[current].right.is_sentinel() {
            current = self[current].right;
        }
        current
    }

    /// Returns the node holding the strictly next element, or the sentinel if
    /// `id` holds the maximum.
    pub fn successor(&self, id: NodeId) -> NodeId {
        if !self[id].right.is_sentinel() {
            return self.minimum(self[id].right);
        }
        let mut current = id;
        let mut parent = self[current].parent;
        while !parent.is_sentinel() && current == self[parent].right {
            current = parent;
            parent = self[parent].parent;
        }
        parent
    }

    /// Returns the node holding the strictly previous element, or the sentinel
    /// if `id` holds the minimum.
    pub fn predecessor(&self, id: NodeId) -> NodeId {
        if !self[id].left.is_sentinel() {
            return self.maximum(self[id].left);
        }
        let mut current = id;
        let mut parent = self[current].parent;
        while !parent.is_sentinel() && current == self[parent].left {
            current = parent;
            parent = self[parent].parent;
        }
        parent
    }

    /// Returns the number of black nodes on the leftmost root-to-sentinel
    /// path, the root included, or -1 if the tree is empty. Equal black height
    /// on every path makes the leftmost walk representative.
    pub fn black_height(&self) -> i32 {
        if self.root.is_sentinel() {
            return -1;
        }
        let mut height = 0;
        let mut current = self.root;
        while !current.is_sentinel() {
            if self.is_black(current) {
                height += 1;
            }
            current = self[current].left;
        }
        height
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self[x].right;
        assert!(
            !y.is_sentinel(),
            "Expected a right child to rotate into place."
        );
        let y_left = self[y].left;
        self[x].right = y_left;
        if !y_left.is_sentinel() {
            self[y_left].parent = x;
        }
        let x_parent = self[x].parent;
        self[y].parent = x_parent;
        if x_parent.is_sentinel() {
            self.root = y;
        } else if self[x_parent].left == x {
            self[x_parent].left = y;
        } else {
            self[x_parent].right = y;
        }
        self[y].left = x;
        self[x].parent = y;
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self[x].left;
        assert!(
            !y.is_sentinel(),
            "Expected a left child to rotate into place."
        );
        let y_right = self[y].right;
        self[x].left = y_right;
        if !y_right.is_sentinel() {
            self[y_right].parent = x;
        }
        let x_parent = self[x].parent;
        self[y].parent = x_parent;
        if x_parent.is_sentinel() {
            self.root = y;
        } else if self[x_parent].right == x {
            self[x_parent].right = y;
        } else {
            self[x_parent].left = y;
        }
        self[y].right = x;
        self[x].parent = y;
    }

    /// Inserts an element, merging into the multiplicity of an existing equal
    /// element. Returns the number of order comparisons performed.
    pub fn insert(&mut self, element: T) -> usize
    where
        T: Ord,
    {
        if self.root.is_sentinel() {
            let z = self.allocate(Node::new(element));
            self[z].color = Color::Black;
            self.root = z;
            self.node_count += 1;
            self.size += 1;
            return 0;
        }

        let mut comparisons = 0;
        let mut parent = SENTINEL;
        let mut current = self.root;
        while !current.is_sentinel() {
            parent = current;
            comparisons += 1;
            match element.cmp(self.element(current)) {
                Ordering::Less => current = self[current].left,
                Ordering::Greater => current = self[current].right,
                Ordering::Equal => {
                    self[current].count += 1;
                    self.size += 1;
                    return comparisons;
                }
            }
        }

        // one more comparison is charged for the final link direction
        comparisons += 1;
        let link_left = element < *self.element(parent);
        let z = self.allocate(Node::new(element));
        self[z].parent = parent;
        if link_left {
            self[parent].left = z;
        } else {
            self[parent].right = z;
        }
        self.node_count += 1;
        self.size += 1;
        self.insert_fixup(z);
        let root = self.root;
        self[root].color = Color::Black;
        comparisons
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self[z].parent) {
            let parent = self[z].parent;
            let grandparent = self[parent].parent;
            if parent == self[grandparent].left {
                let uncle = self[grandparent].right;
                if self.is_red(uncle) {
                    // red uncle: push the violation two levels up
                    self[parent].color = Color::Black;
                    self[uncle].color = Color::Black;
                    self[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self[parent].right {
                        // inner child: straighten into the outer case
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self[z].parent;
                    let grandparent = self[parent].parent;
                    self[parent].color = Color::Black;
                    self[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self[grandparent].left;
                if self.is_red(uncle) {
                    self[parent].color = Color::Black;
                    self[uncle].color = Color::Black;
                    self[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self[parent].left {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self[z].parent;
                    let grandparent = self[parent].parent;
                    self[parent].color = Color::Black;
                    self[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self[root].color = Color::Black;
    }

    // Splices the subtree rooted at `v` into the position of `u`. When `v` is
    // the sentinel its parent link is still written so the deletion fixup can
    // climb from it.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self[u].parent;
        if parent.is_sentinel() {
            self.root = v;
        } else if self[parent].left == u {
            self[parent].left = v;
        } else {
            self[parent].right = v;
        }
        self[v].parent = parent;
    }

    /// Removes one occurrence of an element. A multiplicity above 1 is only
    /// decremented; otherwise the node is unlinked and, when it had two real
    /// children, its in-order successor is relocated into its position rather
    /// than having elements copied between nodes.
    pub fn remove<V>(&mut self, element: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let z = self.search(element);
        if z.is_sentinel() {
            return false;
        }
        if self[z].count > 1 {
            self[z].count -= 1;
            self.size -= 1;
            return true;
        }

        let mut fixup_color = self[z].color;
        let cursor;
        if self[z].left.is_sentinel() {
            cursor = self[z].right;
            self.transplant(z, cursor);
        } else if self[z].right.is_sentinel() {
            cursor = self[z].left;
            self.transplant(z, cursor);
        } else {
            let successor = self.minimum(self[z].right);
            fixup_color = self[successor].color;
            cursor = self[successor].right;
            if self[successor].parent == z {
                // the cursor may be the sentinel; parent it to the successor
                // so the fixup climbs through the right node
                self[cursor].parent = successor;
            } else {
                self.transplant(successor, cursor);
                let z_right = self[z].right;
                self[successor].right = z_right;
                self[z_right].parent = successor;
            }
            self.transplant(z, successor);
            let z_left = self[z].left;
            self[successor].left = z_left;
            self[z_left].parent = successor;
            self[successor].color = self[z].color;
        }

        if fixup_color == Color::Black {
            self.remove_fixup(cursor);
        }
        self.reset_sentinel();
        self.nodes.remove(z.0);
        self.node_count -= 1;
        self.size -= 1;
        true
    }

    fn remove_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.is_black(x) {
            let parent = self[x].parent;
            if x == self[parent].left {
                let mut sibling = self[parent].right;
                if self.is_red(sibling) {
                    // red sibling: rotate it above the parent and retry with
                    // the new, black sibling
                    self[sibling].color = Color::Black;
                    self[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self[parent].right;
                }
                if self.is_black(self[sibling].left) && self.is_black(self[sibling].right) {
                    self[sibling].color = Color::Red;
                    x = parent;
                } else {
                    if self.is_black(self[sibling].right) {
                        let near = self[sibling].left;
                        self[near].color = Color::Black;
                        self[sibling].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self[parent].right;
                    }
                    self[sibling].color = self[parent].color;
                    self[parent].color = Color::Black;
                    let far = self[sibling].right;
                    self[far].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self[parent].left;
                if self.is_red(sibling) {
                    self[sibling].color = Color::Black;
                    self[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self[parent].left;
                }
                if self.is_black(self[sibling].right) && self.is_black(self[sibling].left) {
                    self[sibling].color = Color::Red;
                    x = parent;
                } else {
                    if self.is_black(self[sibling].left) {
                        let near = self[sibling].right;
                        self[near].color = Color::Black;
                        self[sibling].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self[parent].left;
                    }
                    self[sibling].color = self[parent].color;
                    self[parent].color = Color::Black;
                    let far = self[sibling].left;
                    self[far].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self[x].color = Color::Black;
    }
}

#[cfg(test)]
mod tests {
    use super::RbTree;
    use crate::multiset::node::{Color, NodeId, SENTINEL};
    use rand::Rng;
    use std::collections::BTreeMap;

    impl<T: Ord> RbTree<T> {
        fn validate(&self) {
            assert_eq!(self[SENTINEL].color, Color::Black);
            assert!(self[SENTINEL].parent.is_sentinel());
            if self.root.is_sentinel() {
                assert_eq!(self.size, 0);
                assert_eq!(self.node_count, 0);
                return;
            }
            assert!(self.is_black(self.root));
            assert!(self[self.root].parent.is_sentinel());

            let (black_height, size, node_count) = self.validate_subtree(self.root);
            assert_eq!(self.black_height(), black_height as i32);
            assert_eq!(self.size, size);
            assert_eq!(self.node_count, node_count);

            // in-order walk must be strictly increasing across distinct nodes
            let mut current = self.minimum(self.root);
            let mut next = self.successor(current);
            while !next.is_sentinel() {
                assert!(self.element(current) < self.element(next));
                current = next;
                next = self.successor(current);
            }
        }

        // returns (black_height, size, node_count) and asserts the color and
        // equal-black-height rules on the way up
        fn validate_subtree(&self, id: NodeId) -> (usize, usize, usize) {
            if id.is_sentinel() {
                return (0, 0, 0);
            }

            assert!(self[id].count >= 1);
            if self.is_red(id) {
                assert!(self.is_black(self[id].left));
                assert!(self.is_black(self[id].right));
            }
            for &child in &[self[id].left, self[id].right] {
                if !child.is_sentinel() {
                    assert_eq!(self[child].parent, id);
                }
            }

            let (left_height, left_size, left_node_count) = self.validate_subtree(self[id].left);
            let (right_height, right_size, right_node_count) =
                self.validate_subtree(self[id].right);
            assert_eq!(left_height, right_height);

            let own = if self.is_black(id) { 1 } else { 0 };
            (
                left_height + own,
                left_size + right_size + self[id].count,
                left_node_count + right_node_count + 1,
            )
        }
    }

    #[test]
    fn test_insert_ascending() {
        let mut tree = RbTree::new();
        for key in 0..256 {
            tree.insert(key);
            tree.validate();
        }
        assert_eq!(tree.size, 256);
        assert_eq!(tree.node_count, 256);
    }

    #[test]
    fn test_insert_descending() {
        let mut tree = RbTree::new();
        for key in (0..256).rev() {
            tree.insert(key);
            tree.validate();
        }
        assert_eq!(tree.size, 256);
        assert_eq!(tree.node_count, 256);
    }

    #[test]
    fn test_remove_ascending() {
        let mut tree = RbTree::new();
        for key in 0..256 {
            tree.insert(key);
        }
        for key in 0..256 {
            assert!(tree.remove(&key));
            tree.validate();
        }
        assert!(tree.root.is_sentinel());
    }

    #[test]
    fn test_remove_internal_two_child_node() {
        let mut tree = RbTree::new();
        for key in 1..=7 {
            tree.insert(key);
        }
        assert!(tree.remove(&4));
        tree.validate();
        assert_eq!(tree.size, 6);
        assert!(tree.search(&4).is_sentinel());
    }

    #[test]
    fn test_rotations_relink_root() {
        let mut tree = RbTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        tree.validate();
        assert_eq!(*tree.element(tree.root), 20);
        assert_eq!(tree.black_height(), 1);
    }

    #[test]
    fn test_random_operations() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RbTree::new();
        let mut expected: BTreeMap<u32, usize> = BTreeMap::new();

        for _ in 0..10_000 {
            let key = rng.gen_range(0, 500);
            if rng.gen::<bool>() {
                tree.insert(key);
                *expected.entry(key).or_insert(0) += 1;
            } else {
                let removed = tree.remove(&key);
                match expected.get_mut(&key) {
                    Some(count) => {
                        assert!(removed);
                        *count -= 1;
                        if *count == 0 {
                            expected.remove(&key);
                        }
                    },
                    None => assert!(!removed),
                }
            }
        }

        tree.validate();
        assert_eq!(tree.node_count, expected.len());
        assert_eq!(tree.size, expected.values().sum::<usize>());
        for (key, count) in &expected {
            let node = tree.search(key);
            assert!(!node.is_sentinel());
            assert_eq!(tree[node].count, *count);
        }
    }
}
