//! Counted trees stored in an object graph.
//!
//! Interior nodes are dictionaries holding an ordered `/Kids` array of
//! references and a cached `/Count` of leaf descendants; every child points
//! back at its node through `/Parent`. The page tree is the canonical
//! instance ([`PageTreeLayout`]); other layouts plug in through
//! [`TreeLayout`].
//!
//! Mutations keep `count(node) == Σ (1 for a leaf, count(child) for a node)`
//! at every node: each one validates everything it will touch first, then
//! updates `/Count` along the path from the mutation site to the root.
//! Traversals trust `/Count` rather than the length of `/Kids`, so a
//! malformed tree can never make them run longer than its cached count.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::{CountedTree, Dictionary, ObjectGraph};
//!
//! let mut graph = ObjectGraph::new();
//! let mut tree = CountedTree::new(&mut graph);
//! let root = tree.new_node().unwrap();
//! let pages: Vec<_> = (0..3)
//!     .map(|_| tree.new_leaf(Dictionary::new()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! tree.append(root, &pages).unwrap();
//!
//! let extra = tree.new_leaf(Dictionary::new()).unwrap();
//! tree.insert(root, 1, extra).unwrap();
//!
//! assert_eq!(tree.count(root).unwrap(), 4);
//! assert_eq!(tree.get(root, 2).unwrap(), extra);
//! assert_eq!(tree.children(root).unwrap()[3], pages[2]);
//! ```

use crate::graph::Handle;
use crate::{Dictionary, Error, Name, Number, Object, ObjectGraph, Reference, Result};
use std::collections::HashSet;
use tracing::debug;

/// Whether a tree member is a leaf or an interior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Leaf,
    Node,
}

/// Where a counted tree keeps its links and how members are told apart.
pub trait TreeLayout {
    /// Array of child references on interior nodes.
    fn kids_key(&self) -> &str {
        "Kids"
    }

    /// Cached leaf count on interior nodes.
    fn count_key(&self) -> &str {
        "Count"
    }

    /// Back link from a child to its node.
    fn parent_key(&self) -> &str {
        "Parent"
    }

    /// A fresh, empty interior node.
    fn new_node(&self) -> Dictionary;

    /// Turns a payload dictionary into a leaf.
    fn new_leaf(&self, payload: Dictionary) -> Dictionary;

    /// Classifies a dictionary, or `None` if it cannot be a tree member.
    fn classify(&self, dict: &Dictionary) -> Option<ChildKind>;
}

/// `/Pages` nodes and `/Page` leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTreeLayout;

impl TreeLayout for PageTreeLayout {
    fn new_node(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("Type", Name::new("Pages"));
        dict.insert("Kids", Vec::<Object>::new());
        dict.insert("Count", 0);
        dict
    }

    fn new_leaf(&self, mut payload: Dictionary) -> Dictionary {
        payload.insert("Type", Name::new("Page"));
        payload
    }

    fn classify(&self, dict: &Dictionary) -> Option<ChildKind> {
        match dict.type_name() {
            Some("Pages") => Some(ChildKind::Node),
            Some("Page") => Some(ChildKind::Leaf),
            _ => None,
        }
    }
}

/// Counted-tree operations over the objects of one graph.
pub struct CountedTree<'g, L: TreeLayout = PageTreeLayout> {
    graph: &'g mut ObjectGraph,
    layout: L,
}

impl<'g> CountedTree<'g, PageTreeLayout> {
    pub fn new(graph: &'g mut ObjectGraph) -> Self {
        Self::with_layout(graph, PageTreeLayout)
    }
}

impl<'g, L: TreeLayout> CountedTree<'g, L> {
    pub fn with_layout(graph: &'g mut ObjectGraph, layout: L) -> Self {
        CountedTree { graph, layout }
    }

    #[must_use]
    pub fn graph(&self) -> &ObjectGraph {
        &*self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ObjectGraph {
        &mut *self.graph
    }

    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Registers an empty interior node.
    pub fn new_node(&mut self) -> Result<Handle> {
        let node = self.layout.new_node();
        self.graph.add(node)
    }

    /// Registers a leaf built from `payload`.
    pub fn new_leaf(&mut self, payload: Dictionary) -> Result<Handle> {
        let leaf = self.layout.new_leaf(payload);
        self.graph.add(leaf)
    }

    /// Copies a leaf from another graph into this one, without its `/Parent`
    /// link, so it can be attached here.
    pub fn import_leaf(&mut self, source: &ObjectGraph, leaf: Handle) -> Result<Handle> {
        source.check_owned(leaf)?;
        let mut dict = source
            .resolve(leaf.reference)?
            .as_dict()
            .cloned()
            .ok_or_else(|| Error::wrong_child_kind(leaf.reference, "not a dictionary"))?;
        if self.layout.classify(&dict) != Some(ChildKind::Leaf) {
            return Err(Error::wrong_child_kind(leaf.reference, "not a leaf"));
        }
        dict.remove(self.layout.parent_key());
        let copy = source.export(&Object::Dictionary(dict), &mut *self.graph)?;
        self.graph.add(copy)
    }

    fn dict(&self, reference: Reference) -> Result<&Dictionary> {
        self.graph
            .resolve(reference)?
            .as_dict()
            .ok_or_else(|| Error::wrong_child_kind(reference, "not a dictionary"))
    }

    fn kind(&self, reference: Reference) -> Result<ChildKind> {
        self.layout
            .classify(self.dict(reference)?)
            .ok_or_else(|| Error::wrong_child_kind(reference, "neither a leaf nor a node"))
    }

    fn require_node(&self, reference: Reference) -> Result<&Dictionary> {
        let dict = self.dict(reference)?;
        match self.layout.classify(dict) {
            Some(ChildKind::Node) => Ok(dict),
            _ => Err(Error::wrong_child_kind(reference, "not an interior node")),
        }
    }

    fn cached_count(&self, dict: &Dictionary) -> usize {
        dict.get(self.layout.count_key())
            .and_then(Object::as_number)
            .and_then(Number::as_usize)
            .unwrap_or(0)
    }

    fn kids(&self, reference: Reference, dict: &Dictionary) -> Result<Vec<Reference>> {
        match dict.get(self.layout.kids_key()) {
            None | Some(Object::Null) => Ok(Vec::new()),
            Some(Object::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_reference()
                        .ok_or_else(|| Error::wrong_child_kind(reference, "kid is not a reference"))
                })
                .collect(),
            Some(_) => Err(Error::wrong_child_kind(reference, "kids is not an array")),
        }
    }

    fn parent(&self, dict: &Dictionary) -> Option<Reference> {
        dict.get(self.layout.parent_key()).and_then(Object::as_reference)
    }

    /// The node itself followed by its ancestors up to the root.
    fn path_to_root(&self, node: Reference) -> Result<Vec<Reference>> {
        let mut path = vec![node];
        let mut current = self.require_node(node)?;
        while let Some(parent) = self.parent(current) {
            if path.contains(&parent) {
                return Err(Error::TreeCycle(parent));
            }
            current = self.require_node(parent)?;
            path.push(parent);
        }
        Ok(path)
    }

    /// Leaves this child would add to its new node.
    fn contribution(&self, child: Reference) -> Result<usize> {
        let dict = self.dict(child)?;
        match self.layout.classify(dict) {
            Some(ChildKind::Leaf) => Ok(1),
            Some(ChildKind::Node) => Ok(self.cached_count(dict)),
            None => Err(Error::wrong_child_kind(child, "neither a leaf nor a node")),
        }
    }

    /// A child may only be attached while it is not listed by another node.
    fn check_detached(&self, child: Reference) -> Result<()> {
        let Some(parent) = self.parent(self.dict(child)?) else {
            return Ok(());
        };
        let listed = match self.graph.resolve(parent)?.as_dict() {
            Some(dict) => self.kids(parent, dict).map(|kids| kids.contains(&child)).unwrap_or(false),
            None => false,
        };
        if listed {
            Err(Error::wrong_child_kind(child, &format!("already a child of {parent}")))
        } else {
            Ok(())
        }
    }

    fn node_mut(&mut self, reference: Reference) -> Result<&mut Dictionary> {
        self.graph
            .get_mut(reference)
            .and_then(Object::as_dict_mut)
            .ok_or(Error::UnresolvedReference(reference))
    }

    fn bump_counts(&mut self, path: &[Reference], delta: usize) -> Result<()> {
        for &reference in path {
            let count = self.cached_count(self.dict(reference)?) + delta;
            let key = self.layout.count_key().to_string();
            self.node_mut(reference)?.insert(key, count);
        }
        Ok(())
    }

    fn set_parent(&mut self, child: Reference, parent: Reference) -> Result<()> {
        let key = self.layout.parent_key().to_string();
        self.node_mut(child)?.insert(key, parent);
        Ok(())
    }

    /// The cached leaf count of `node`.
    pub fn count(&self, node: Handle) -> Result<usize> {
        self.graph.check_owned(node)?;
        Ok(self.cached_count(self.require_node(node.reference)?))
    }

    /// Counts leaves by walking every child list, ignoring cached counts.
    pub fn recount(&self, node: Handle) -> Result<usize> {
        self.graph.check_owned(node)?;
        let mut visited = HashSet::new();
        self.recount_from(node.reference, &mut visited)
    }

    fn recount_from(&self, node: Reference, visited: &mut HashSet<Reference>) -> Result<usize> {
        if !visited.insert(node) {
            return Err(Error::TreeCycle(node));
        }
        let dict = self.require_node(node)?;
        let mut total = 0;
        for kid in self.kids(node, dict)? {
            total += match self.kind(kid)? {
                ChildKind::Leaf => 1,
                ChildKind::Node => self.recount_from(kid, visited)?,
            };
        }
        Ok(total)
    }

    /// Whether every node under `node` caches the count of its own children.
    pub fn is_consistent(&self, node: Handle) -> Result<bool> {
        self.graph.check_owned(node)?;
        let mut stack = vec![node.reference];
        let mut visited = HashSet::new();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return Err(Error::TreeCycle(current));
            }
            let dict = self.require_node(current)?;
            let mut sum = 0;
            for kid in self.kids(current, dict)? {
                sum += self.contribution(kid)?;
                if self.kind(kid)? == ChildKind::Node {
                    stack.push(kid);
                }
            }
            if sum != self.cached_count(dict) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Appends children to `node`.
    ///
    /// Each child gets `node` as its parent and `/Count` grows by the leaves
    /// added, on `node` and on every ancestor.
    ///
    /// # Errors
    ///
    /// - `CrossGraphAttachment` if a child belongs to another graph
    /// - `WrongChildKind` if `node` is not an interior node, or a child is
    ///   neither kind or is already listed by a node
    /// - `TreeCycle` if a child is `node` or one of its ancestors
    ///
    /// Nothing is modified when an error is returned.
    pub fn append(&mut self, node: Handle, children: &[Handle]) -> Result<()> {
        self.graph.check_owned(node)?;
        let path = self.path_to_root(node.reference)?;

        let mut added = 0;
        let mut seen = HashSet::new();
        for child in children {
            self.graph.check_owned(*child)?;
            if path.contains(&child.reference) {
                return Err(Error::TreeCycle(child.reference));
            }
            if !seen.insert(child.reference) {
                return Err(Error::wrong_child_kind(child.reference, "appended twice"));
            }
            self.check_detached(child.reference)?;
            added += self.contribution(child.reference)?;
        }

        let kids_key = self.layout.kids_key().to_string();
        let dict = self.node_mut(node.reference)?;
        let mut kids = match dict.remove(&kids_key) {
            Some(Object::Array(items)) => items,
            _ => Vec::new(),
        };
        kids.extend(children.iter().map(|c| Object::Reference(c.reference)));
        dict.insert(kids_key, kids);

        for child in children {
            self.set_parent(child.reference, node.reference)?;
        }
        self.bump_counts(&path, added)?;
        debug!(node = %node.reference, children = children.len(), leaves = added, "appended to counted tree");
        Ok(())
    }

    /// Inserts a leaf so that it becomes leaf number `index` (0-based) under
    /// `node`.
    ///
    /// The leaf goes into the deepest node whose range strictly contains
    /// `index`; at a boundary between two children it is spliced into the
    /// current node itself.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > count(node)`, plus the errors of
    /// [`CountedTree::append`]. Nothing is modified when an error is returned.
    pub fn insert(&mut self, node: Handle, index: usize, leaf: Handle) -> Result<()> {
        self.graph.check_owned(node)?;
        self.graph.check_owned(leaf)?;
        let ancestors = self.path_to_root(node.reference)?;
        let count = self.cached_count(self.require_node(node.reference)?);
        if index > count {
            return Err(Error::IndexOutOfRange { index, count });
        }
        if self.kind(leaf.reference)? != ChildKind::Leaf {
            return Err(Error::wrong_child_kind(leaf.reference, "only leaves can be inserted"));
        }
        self.check_detached(leaf.reference)?;

        // Locate the target node and the position in its kids.
        let mut descent = Vec::new();
        let mut visited = HashSet::new();
        let mut current = node.reference;
        let mut remaining = index;
        let position = 'descend: loop {
            if !visited.insert(current) {
                return Err(Error::TreeCycle(current));
            }
            descent.push(current);
            let dict = self.require_node(current)?;
            let kids = self.kids(current, dict)?;
            let mut seen = 0;
            for (position, &kid) in kids.iter().enumerate() {
                if seen == remaining {
                    break 'descend position;
                }
                let kid_dict = self.dict(kid)?;
                match self.layout.classify(kid_dict) {
                    Some(ChildKind::Leaf) => seen += 1,
                    Some(ChildKind::Node) => {
                        let kid_count = self.cached_count(kid_dict);
                        if seen + kid_count > remaining {
                            remaining -= seen;
                            current = kid;
                            continue 'descend;
                        }
                        seen += kid_count;
                    }
                    None => return Err(Error::wrong_child_kind(kid, "neither a leaf nor a node")),
                }
            }
            if seen == remaining {
                break kids.len();
            }
            return Err(Error::IndexOutOfRange { index, count });
        };
        let target = current;

        let kids_key = self.layout.kids_key().to_string();
        let dict = self.node_mut(target)?;
        let mut kids = match dict.remove(&kids_key) {
            Some(Object::Array(items)) => items,
            _ => Vec::new(),
        };
        kids.insert(position, Object::Reference(leaf.reference));
        dict.insert(kids_key, kids);
        self.set_parent(leaf.reference, target)?;

        // Nodes below `node` on the way down, then `node` and its ancestors.
        let mut path: Vec<Reference> = descent.iter().skip(1).rev().copied().collect();
        path.extend(ancestors);
        self.bump_counts(&path, 1)?;
        debug!(node = %node.reference, index, target = %target, "inserted leaf into counted tree");
        Ok(())
    }

    /// Leaf number `n` (1-based) in depth-first order.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `n` is 0 or exceeds the cached count, or if the
    /// tree is too malformed to reach the leaf.
    pub fn get(&self, node: Handle, n: usize) -> Result<Handle> {
        self.graph.check_owned(node)?;
        let count = self.cached_count(self.require_node(node.reference)?);
        if n < 1 || n > count {
            return Err(Error::IndexOutOfRange { index: n, count });
        }

        let mut visited = HashSet::new();
        let mut current = node.reference;
        let mut remaining = n;
        'descend: loop {
            if !visited.insert(current) {
                return Err(Error::TreeCycle(current));
            }
            let dict = self.require_node(current)?;
            for kid in self.kids(current, dict)? {
                let kid_dict = self.dict(kid)?;
                match self.layout.classify(kid_dict) {
                    Some(ChildKind::Leaf) => {
                        remaining -= 1;
                        if remaining == 0 {
                            return Ok(self.graph.handle(kid));
                        }
                    }
                    Some(ChildKind::Node) => {
                        let kid_count = self.cached_count(kid_dict);
                        if kid_count < remaining {
                            remaining -= kid_count;
                        } else {
                            current = kid;
                            continue 'descend;
                        }
                    }
                    None => return Err(Error::wrong_child_kind(kid, "neither a leaf nor a node")),
                }
            }
            return Err(Error::IndexOutOfRange { index: n, count });
        }
    }

    /// Lazy in-order iterator over the leaves under `node`.
    ///
    /// Calling it again starts a fresh traversal.
    pub fn leaves(&self, node: Handle) -> Leaves<'_, 'g, L> {
        Leaves {
            tree: self,
            root: Some(node),
            stack: Vec::new(),
            visited: HashSet::new(),
            done: false,
        }
    }

    /// Every leaf under `node`, in order.
    pub fn children(&self, node: Handle) -> Result<Vec<Handle>> {
        self.leaves(node).collect()
    }

    /// Calls `f` on every leaf under `node`, in order.
    pub fn each_leaf(&self, node: Handle, mut f: impl FnMut(Handle)) -> Result<()> {
        for leaf in self.leaves(node) {
            f(leaf?);
        }
        Ok(())
    }
}

struct Frame {
    kids: Vec<Reference>,
    next: usize,
    /// Leaves this node may still yield, from its cached count.
    budget: usize,
}

/// Iterator returned by [`CountedTree::leaves`].
///
/// A node yields at most its cached count of leaves, and never more than
/// its ancestors may still yield. Empty subtrees are skipped. Yields an
/// error and stops on a malformed tree.
pub struct Leaves<'t, 'g, L: TreeLayout> {
    tree: &'t CountedTree<'g, L>,
    root: Option<Handle>,
    stack: Vec<Frame>,
    visited: HashSet<Reference>,
    done: bool,
}

impl<'t, 'g, L: TreeLayout> Leaves<'t, 'g, L> {
    /// Pushes a frame for `node`, allowed at most `cap` leaves.
    fn enter(&mut self, node: Reference, cap: usize) -> Result<()> {
        if !self.visited.insert(node) {
            return Err(Error::TreeCycle(node));
        }
        let dict = self.tree.require_node(node)?;
        let budget = self.tree.cached_count(dict).min(cap);
        let kids = self.tree.kids(node, dict)?;
        self.stack.push(Frame {
            kids,
            next: 0,
            budget,
        });
        Ok(())
    }

    fn step(&mut self) -> Result<Option<Handle>> {
        if let Some(root) = self.root.take() {
            self.tree.graph.check_owned(root)?;
            self.enter(root.reference, usize::MAX)?;
        }
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };
            if frame.budget == 0 || frame.next >= frame.kids.len() {
                self.stack.pop();
                continue;
            }
            let kid = frame.kids[frame.next];
            frame.next += 1;
            let remaining = frame.budget;
            match self.tree.kind(kid)? {
                ChildKind::Leaf => {
                    for frame in &mut self.stack {
                        frame.budget = frame.budget.saturating_sub(1);
                    }
                    return Ok(Some(self.tree.graph.handle(kid)));
                }
                ChildKind::Node => self.enter(kid, remaining)?,
            }
        }
    }
}

impl<'t, 'g, L: TreeLayout> Iterator for Leaves<'t, 'g, L> {
    type Item = Result<Handle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(leaf)) => Some(Ok(leaf)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &mut CountedTree<'_>, label: i64) -> Handle {
        let mut payload = Dictionary::new();
        payload.insert("Label", label);
        tree.new_leaf(payload).unwrap()
    }

    fn label(tree: &CountedTree<'_>, handle: Handle) -> i64 {
        tree.graph()
            .resolve(handle.reference)
            .unwrap()
            .as_dict()
            .and_then(|d| d.get("Label"))
            .and_then(Object::as_i64)
            .unwrap()
    }

    #[test]
    fn test_nested_counts_propagate() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let inner = tree.new_node().unwrap();
        tree.append(root, &[inner]).unwrap();

        let a = leaf(&mut tree, 1);
        let b = leaf(&mut tree, 2);
        tree.append(inner, &[a, b]).unwrap();
        assert_eq!(tree.count(inner).unwrap(), 2);
        assert_eq!(tree.count(root).unwrap(), 2);
        assert_eq!(tree.recount(root).unwrap(), 2);
        assert!(tree.is_consistent(root).unwrap());
    }

    #[test]
    fn test_insert_at_boundaries() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let inner = tree.new_node().unwrap();
        let first = leaf(&mut tree, 1);
        let second = leaf(&mut tree, 2);
        tree.append(inner, &[first, second]).unwrap();
        let last = leaf(&mut tree, 3);
        tree.append(root, &[inner, last]).unwrap();

        // Strictly inside the subtree: goes into `inner`.
        let mid = leaf(&mut tree, 10);
        tree.insert(root, 1, mid).unwrap();
        assert_eq!(tree.count(inner).unwrap(), 3);

        // At the boundary after the subtree: spliced into `root`.
        let boundary = leaf(&mut tree, 20);
        tree.insert(root, 3, boundary).unwrap();
        assert_eq!(tree.count(inner).unwrap(), 3);

        // At the very end.
        let end = leaf(&mut tree, 30);
        tree.insert(root, 5, end).unwrap();

        let labels: Vec<i64> = tree
            .children(root)
            .unwrap()
            .into_iter()
            .map(|h| label(&tree, h))
            .collect();
        assert_eq!(labels, vec![1, 10, 2, 20, 3, 30]);
        assert_eq!(tree.count(root).unwrap(), 6);
        assert!(tree.is_consistent(root).unwrap());
    }

    #[test]
    fn test_insert_out_of_range_changes_nothing() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let page = leaf(&mut tree, 1);
        assert_eq!(
            tree.insert(root, 1, page),
            Err(Error::IndexOutOfRange { index: 1, count: 0 })
        );
        assert_eq!(tree.count(root).unwrap(), 0);
        assert!(tree
            .graph()
            .resolve(page.reference)
            .unwrap()
            .as_dict()
            .unwrap()
            .get("Parent")
            .is_none());
    }

    #[test]
    fn test_get_bounds() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let page = leaf(&mut tree, 1);
        tree.append(root, &[page]).unwrap();
        assert_eq!(tree.get(root, 1).unwrap(), page);
        assert!(matches!(tree.get(root, 0), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(tree.get(root, 2), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_cycles_rejected() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let inner = tree.new_node().unwrap();
        tree.append(root, &[inner]).unwrap();
        assert_eq!(tree.append(inner, &[root]), Err(Error::TreeCycle(root.reference)));
        assert_eq!(tree.append(root, &[root]), Err(Error::TreeCycle(root.reference)));
    }

    #[test]
    fn test_wrong_kinds() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let page = leaf(&mut tree, 1);
        let stray = tree.graph_mut().add(Dictionary::new()).unwrap();

        assert!(matches!(tree.append(page, &[root]), Err(Error::WrongChildKind { .. })));
        assert!(matches!(tree.append(root, &[stray]), Err(Error::WrongChildKind { .. })));
        assert!(matches!(tree.insert(root, 0, root), Err(Error::WrongChildKind { .. })));

        tree.append(root, &[page]).unwrap();
        let other = tree.new_node().unwrap();
        assert!(matches!(tree.append(other, &[page]), Err(Error::WrongChildKind { .. })));
    }

    #[test]
    fn test_traversal_trusts_count() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let pages: Vec<Handle> = (1..=3).map(|i| leaf(&mut tree, i)).collect();
        tree.append(root, &pages).unwrap();

        // Corrupt the cached count.
        tree.graph_mut()
            .get_mut(root.reference)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .insert("Count", 2);

        assert_eq!(tree.children(root).unwrap(), pages[..2].to_vec());
        assert_eq!(tree.recount(root).unwrap(), 3);
        assert!(!tree.is_consistent(root).unwrap());
    }

    #[test]
    fn test_traversal_skips_empty_subtrees() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let empty = tree.new_node().unwrap();
        let page = leaf(&mut tree, 1);
        tree.append(root, &[empty, page]).unwrap();

        assert_eq!(tree.count(root).unwrap(), 1);
        assert_eq!(tree.children(root).unwrap(), vec![page]);
        assert_eq!(tree.get(root, 1).unwrap(), page);
    }

    #[test]
    fn test_inflated_subtree_count_is_capped_by_parent() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let inner = tree.new_node().unwrap();
        let pages: Vec<Handle> = (1..=3).map(|i| leaf(&mut tree, i)).collect();
        tree.append(inner, &pages).unwrap();
        let last = leaf(&mut tree, 4);
        tree.append(root, &[inner, last]).unwrap();

        // The root claims two leaves; its child still claims three.
        tree.graph_mut()
            .get_mut(root.reference)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .insert("Count", 2);

        assert_eq!(tree.children(root).unwrap(), pages[..2].to_vec());
    }

    #[test]
    fn test_traversal_detects_cycles() {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let inner = tree.new_node().unwrap();
        tree.append(root, &[inner]).unwrap();
        let page = leaf(&mut tree, 1);
        tree.append(inner, &[page]).unwrap();

        // Splice `root` into its own subtree behind the tree's back.
        let inner_dict = tree
            .graph_mut()
            .get_mut(inner.reference)
            .and_then(Object::as_dict_mut)
            .unwrap();
        inner_dict.insert("Kids", vec![Object::Reference(root.reference)]);

        let result: Result<Vec<Handle>> = tree.children(root);
        assert_eq!(result, Err(Error::TreeCycle(root.reference)));
        assert_eq!(tree.recount(root), Err(Error::TreeCycle(root.reference)));
    }
}
