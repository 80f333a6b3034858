use std::collections::HashMap;

use indexmap::IndexMap;

use crate::node::Node;

/// Disjoint-set partition over canonical nodes.
///
/// Union-find with iterative path compression and union-by-size. Nodes are
/// created lazily: the first `find` or `union` touching a node initializes
/// it as its own singleton class. Node iteration order is first-touch order,
/// which cluster assembly relies on for deterministic emission.
///
/// Class membership is not maintained incrementally during unions; it is
/// built once by `classes()`, which buckets every node by its root. This
/// keeps path compression free to rewrite parent links at any time.
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    /// Node -> parent (self if root), in first-touch order.
    parent: IndexMap<Node, Node>,
    /// Root -> class size, for union-by-size.
    size: HashMap<Node, usize>,
}

impl DisjointSet {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when no node has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Registered nodes in first-touch order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.parent.keys()
    }

    fn ensure(&mut self, node: &Node) {
        if !self.parent.contains_key(node) {
            self.parent.insert(node.clone(), node.clone());
            self.size.insert(node.clone(), 1);
        }
    }

    /// Canonical representative of `node`'s class, registering the node if
    /// unseen. Applies two-pass path compression: walk to the root, then
    /// repoint every node on the path directly at it.
    pub fn find(&mut self, node: &Node) -> Node {
        self.ensure(node);

        let mut current = node.clone();
        while self.parent[&current] != current {
            current = self.parent[&current].clone();
        }
        let root = current;

        let mut current = node.clone();
        while self.parent[&current] != root {
            let next = self.parent[&current].clone();
            self.parent.insert(current, root.clone());
            current = next;
        }

        root
    }

    /// Merge the classes containing `left` and `right`, attaching the
    /// smaller class under the larger. Returns `true` when a merge actually
    /// occurred, `false` when the two were already joined.
    pub fn union(&mut self, left: &Node, right: &Node) -> bool {
        let root_left = self.find(left);
        let root_right = self.find(right);

        if root_left == root_right {
            return false;
        }

        let size_left = self.size[&root_left];
        let size_right = self.size[&root_right];
        let (winner, loser) = if size_left >= size_right {
            (root_left, root_right)
        } else {
            (root_right, root_left)
        };

        self.parent.insert(loser.clone(), winner.clone());
        self.size.remove(&loser);
        self.size.insert(winner, size_left + size_right);
        true
    }

    /// True when `left` and `right` are in the same class.
    pub fn connected(&mut self, left: &Node, right: &Node) -> bool {
        self.find(left) == self.find(right)
    }

    /// Bucket every registered node by its class root.
    ///
    /// Classes appear in the order their root is first encountered while
    /// walking nodes in first-touch order; members keep first-touch order
    /// inside each class.
    pub fn classes(&mut self) -> Vec<Vec<Node>> {
        let nodes: Vec<Node> = self.parent.keys().cloned().collect();
        let mut buckets: IndexMap<Node, Vec<Node>> = IndexMap::new();
        for node in nodes {
            let root = self.find(&node);
            buckets.entry(root).or_default().push(node);
        }
        buckets.into_values().collect()
    }
}
