// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, reparenting, and property access.

use alloc::vec::Vec;

use crate::types::{NodeId, NodeKind, Property, Props, Value};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Retained node tree.
///
/// Nodes without a parent are roots. Detaching a node (reparenting to `None`)
/// keeps it and its subtree alive so it can be attached again later; only
/// [`Tree::remove`] frees slots.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

/// Derived rotation: `target.rotation = clamp(source.progress * 360, min, max)`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct RotationBinding {
    target: NodeId,
    min: f64,
    max: f64,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    props: Props,
    bindings: Vec<RotationBinding>,
}

impl Node {
    fn new(generation: u32, kind: NodeKind, props: Props) -> Self {
        Self {
            generation,
            kind,
            parent: None,
            children: Vec::new(),
            props,
            bindings: Vec::new(),
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, kind: NodeKind, props: Props) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind, props));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId slots are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind, props)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId slots are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`, or detach it when `None`.
    ///
    /// Reparenting under a stale parent or under one of the node's own
    /// descendants leaves the node detached.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent
            && self.is_alive(p)
            && p != id
            && !self.is_descendant_of(p, id)
        {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if the tree holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node, in insertion order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `ancestor` appears on the parent chain of `id`.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// First direct child of `parent` with the given name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.props(*c).is_some_and(|p| p.name == name))
    }

    /// Properties of a live node.
    pub fn props(&self, id: NodeId) -> Option<&Props> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Mutable properties of a live node.
    ///
    /// Writes to [`Props::progress`] through this accessor do not update
    /// rotation bindings; use [`Tree::set_value`] for that.
    pub fn props_mut(&mut self, id: NodeId) -> Option<&mut Props> {
        self.node_opt_mut(id).map(|n| &mut n.props)
    }

    /// Current value of an animatable property.
    pub fn value(&self, id: NodeId, property: Property) -> Option<Value> {
        let p = self.props(id)?;
        Some(match property {
            Property::BackgroundTransparency => Value::Scalar(p.background_transparency),
            Property::ImageTransparency => Value::Scalar(p.image_transparency),
            Property::TextTransparency => Value::Scalar(p.text_transparency),
            Property::Size => Value::Dim(p.size),
            Property::Scale => Value::Scalar(p.scale),
            Property::Rotation => Value::Scalar(p.rotation),
            Property::Progress => Value::Scalar(p.progress),
        })
    }

    /// Update an animatable property. Mismatched value kinds are ignored.
    pub fn set_value(&mut self, id: NodeId, property: Property, value: Value) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let p = &mut n.props;
        match (property, value) {
            (Property::BackgroundTransparency, Value::Scalar(v)) => p.background_transparency = v,
            (Property::ImageTransparency, Value::Scalar(v)) => p.image_transparency = v,
            (Property::TextTransparency, Value::Scalar(v)) => p.text_transparency = v,
            (Property::Size, Value::Dim(v)) => p.size = v,
            (Property::Scale, Value::Scalar(v)) => p.scale = v,
            (Property::Rotation, Value::Scalar(v)) => p.rotation = v,
            (Property::Progress, Value::Scalar(v)) => {
                p.progress = v;
                let bindings = n.bindings.clone();
                for b in bindings {
                    let rotation = (v * 360.0).clamp(0.0, 360.0).clamp(b.min, b.max);
                    self.set_value(b.target, Property::Rotation, Value::Scalar(rotation));
                }
            }
            _ => {}
        }
    }

    /// Drive `target`'s rotation from `source`'s progress, clamped to `[min, max]` degrees.
    ///
    /// The binding is applied immediately with the current progress.
    pub fn bind_rotation(&mut self, source: NodeId, target: NodeId, min: f64, max: f64) {
        if !self.is_alive(target) {
            return;
        }
        let Some(n) = self.node_opt_mut(source) else {
            return;
        };
        n.bindings.push(RotationBinding { target, min, max });
        let progress = n.props.progress;
        self.set_value(source, Property::Progress, Value::Scalar(progress));
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UDim2;

    fn frame(tree: &mut Tree, parent: Option<NodeId>) -> NodeId {
        tree.insert(parent, NodeKind::Frame, Props::default())
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = frame(&mut tree, None);
        let a = frame(&mut tree, Some(root));

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.children(root).is_empty(), "removed child must unlink");

        // Reuse slot by inserting a new node; old id must remain stale; new id is live.
        let b = frame(&mut tree, Some(root));
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn remove_frees_whole_subtree() {
        let mut tree = Tree::new();
        let root = frame(&mut tree, None);
        let mid = frame(&mut tree, Some(root));
        let leaf = frame(&mut tree, Some(mid));
        tree.remove(root);
        assert!(!tree.is_alive(mid));
        assert!(!tree.is_alive(leaf));
        assert!(tree.is_empty());
    }

    #[test]
    fn detach_keeps_node_alive_for_reattach() {
        let mut tree = Tree::new();
        let root = frame(&mut tree, None);
        let slot = frame(&mut tree, Some(root));
        tree.reparent(slot, None);
        assert!(tree.is_alive(slot));
        assert_eq!(tree.parent(slot), None);
        assert!(tree.children(root).is_empty());

        tree.reparent(slot, Some(root));
        assert_eq!(tree.parent(slot), Some(root));
        assert_eq!(tree.children(root), &[slot]);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = Tree::new();
        let root = frame(&mut tree, None);
        let child = frame(&mut tree, Some(root));
        tree.reparent(root, Some(child));
        assert_eq!(tree.parent(root), None, "a node cannot move under its own descendant");
        assert!(tree.is_descendant_of(child, root));
    }

    #[test]
    fn stale_ids_are_ignored_by_mutators() {
        let mut tree = Tree::new();
        let n = frame(&mut tree, None);
        tree.remove(n);
        tree.set_value(n, Property::Scale, Value::Scalar(2.0));
        tree.reparent(n, None);
        assert_eq!(tree.value(n, Property::Scale), None);
        assert!(tree.props_mut(n).is_none());
    }

    #[test]
    fn value_round_trip_and_kind_mismatch() {
        let mut tree = Tree::new();
        let n = frame(&mut tree, None);
        tree.set_value(n, Property::Size, Value::Dim(UDim2::from_scale(0.5, 1.0)));
        assert_eq!(
            tree.value(n, Property::Size),
            Some(Value::Dim(UDim2::from_scale(0.5, 1.0)))
        );
        // Scalar written to a dimension property is ignored.
        tree.set_value(n, Property::Size, Value::Scalar(3.0));
        assert_eq!(
            tree.value(n, Property::Size),
            Some(Value::Dim(UDim2::from_scale(0.5, 1.0)))
        );
    }

    #[test]
    fn progress_drives_bound_rotations() {
        let mut tree = Tree::new();
        let bar = frame(&mut tree, None);
        let left = frame(&mut tree, Some(bar));
        let right = frame(&mut tree, Some(bar));
        tree.bind_rotation(bar, left, 180.0, 360.0);
        tree.bind_rotation(bar, right, 0.0, 180.0);

        let rot = |tree: &Tree, id| tree.props(id).unwrap().rotation;
        assert_eq!(rot(&tree, left), 180.0);
        assert_eq!(rot(&tree, right), 0.0);

        tree.set_value(bar, Property::Progress, Value::Scalar(0.25));
        assert_eq!(rot(&tree, left), 180.0);
        assert_eq!(rot(&tree, right), 90.0);

        tree.set_value(bar, Property::Progress, Value::Scalar(0.75));
        assert_eq!(rot(&tree, left), 270.0);
        assert_eq!(rot(&tree, right), 180.0);

        tree.set_value(bar, Property::Progress, Value::Scalar(1.5));
        assert_eq!(rot(&tree, left), 360.0);
    }

    #[test]
    fn find_child_by_name() {
        let mut tree = Tree::new();
        let root = frame(&mut tree, None);
        let named = tree.insert(
            Some(root),
            NodeKind::Text,
            Props {
                name: "ActionText".into(),
                ..Default::default()
            },
        );
        assert_eq!(tree.find_child(root, "ActionText"), Some(named));
        assert_eq!(tree.find_child(root, "Missing"), None);
    }
}
