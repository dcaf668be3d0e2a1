// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, mutation, membership, split and merge.

use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect};
use tracing::{debug, error, trace};

use crate::config::{QuadTreeConfig, SplitPolicy};
use crate::error::MergeError;
use crate::region::Region;
use crate::spatial::{ObjectKind, Spatial};
use crate::types::{Containment, NodeId, Quadrant};

/// Adaptive region quadtree over externally owned objects.
///
/// The tree holds shared references to objects and never owns them. Every node is
/// either a leaf storing objects in insertion order, or split into exactly four
/// children quartering its region at its center.
///
/// - Inserting past `capacity` into a leaf splits it.
/// - Removing from a split node whose subtree drops to `capacity` or fewer objects
///   collapses its children back into it, one level at a time.
///
/// Dropping the tree releases every node; the indexed objects are not touched.
pub struct QuadTree<'a, T: Spatial + ?Sized> {
    nodes: Vec<Option<Node<'a, T>>>, // slots
    generations: Vec<u32>,           // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    kind: ObjectKind,
    config: QuadTreeConfig,
}

pub(crate) struct Node<'a, T: ?Sized> {
    generation: u32,
    pub(crate) region: Region,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) objects: Vec<&'a T>,
    // Objects in the whole subtree.
    pub(crate) total: usize,
}

impl<'a, T: ?Sized> Node<'a, T> {
    fn new(generation: u32, region: Region, depth: u32, parent: Option<NodeId>) -> Self {
        Self {
            generation,
            region,
            depth,
            parent,
            children: None,
            objects: Vec::new(),
            total: 0,
        }
    }
}

impl<T: Spatial + ?Sized> core::fmt::Debug for QuadTree<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("QuadTree")
            .field("kind", &self.kind)
            .field("config", &self.config)
            .field("region", &self.node(self.root).region)
            .field("len", &self.len())
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

/// Address identity. Two distinct objects may share a position, or even compare equal.
#[inline]
pub(crate) fn same_object<T: ?Sized>(a: &T, b: &T) -> bool {
    core::ptr::addr_eq(a as *const T, b as *const T)
}

impl<'a, T: Spatial + ?Sized> QuadTree<'a, T> {
    /// Create an empty tree indexing `kind` objects inside `bounds`, splitting
    /// leaves that exceed `capacity` objects.
    ///
    /// Panics if `capacity` is zero or `bounds` is not finite.
    pub fn new(kind: ObjectKind, bounds: Rect, capacity: usize) -> Self {
        Self::with_config(kind, bounds, QuadTreeConfig::with_capacity(capacity))
    }

    /// Create an empty tree with explicit configuration.
    ///
    /// Panics if `config.capacity` is zero or if `bounds` has a NaN or infinite corner.
    pub fn with_config(kind: ObjectKind, bounds: Rect, config: QuadTreeConfig) -> Self {
        assert!(config.capacity > 0, "quadtree capacity must be at least 1");
        assert!(bounds.is_finite(), "quadtree bounds must be finite, got {bounds:?}");
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            kind,
            config,
        };
        tree.root = tree.alloc(Region::from_rect(bounds), 0, None);
        tree
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The object kind this tree accepts.
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Leaf capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Construction parameters.
    #[inline]
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of indexed objects (the root's maintained total).
    #[inline]
    pub fn len(&self) -> usize {
        self.node(self.root).total
    }

    /// Whether no objects are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `obj`.
    ///
    /// Returns `false` without changing anything when the object lies outside the
    /// root region. Panics if `obj` is not of the tree's [`kind`](Self::kind).
    ///
    /// At a split node the object goes to the quadrant [`Region::quadrant_of`]
    /// picks, so a position on a dividing line lands east or north, exactly as a
    /// split would place it.
    pub fn insert(&mut self, obj: &'a T) -> bool {
        self.check_kind(obj);
        let pos = obj.position();
        self.insert_at(self.root, obj, pos)
    }

    /// Remove `obj`, matched by address identity.
    ///
    /// Returns `false` when the object is outside the root region or not indexed.
    /// Panics if `obj` is not of the tree's [`kind`](Self::kind).
    pub fn remove(&mut self, obj: &T) -> bool {
        self.check_kind(obj);
        let pos = obj.position();
        self.remove_at(self.root, obj, pos)
    }

    /// Whether `obj` is indexed, searching from the root.
    ///
    /// With [`Containment::Local`] only the root's own objects are searched.
    pub fn contains(&self, obj: &T, mode: Containment) -> bool {
        self.contains_in(self.root, obj, mode)
    }

    /// Whether `obj` is stored at node `id` ([`Containment::Local`]) or anywhere
    /// in its subtree ([`Containment::Recursive`]).
    ///
    /// Objects outside the node's region are rejected without searching.
    /// Stale ids contain nothing.
    pub fn contains_in(&self, id: NodeId, obj: &T, mode: Containment) -> bool {
        self.check_kind(obj);
        match self.node_opt(id) {
            Some(node) => self.contains_at(node, obj, obj.position(), mode),
            None => false,
        }
    }

    /// Recount the objects in the subtree of `id` by visiting every leaf.
    ///
    /// This is the ground truth for [`total_count`](Self::total_count). Stale ids count zero.
    pub fn count(&self, id: NodeId) -> usize {
        let Some(node) = self.node_opt(id) else {
            return 0;
        };
        match node.children {
            Some(children) => children.into_iter().map(|c| self.count(c)).sum(),
            None => node.objects.len(),
        }
    }

    /// The maintained number of objects in the subtree of `id`. Stale ids count zero.
    pub fn total_count(&self, id: NodeId) -> usize {
        self.node_opt(id).map_or(0, |n| n.total)
    }

    /// Collapse the four children of `id` into it.
    ///
    /// Children are drained in quadrant order, each keeping its own object order,
    /// and released. Refused without mutation when `id` is a leaf, when a child is
    /// still split, or when the merged leaf would exceed capacity.
    pub fn try_merge(&mut self, id: NodeId) -> Result<(), MergeError> {
        let node = self.node_opt(id).ok_or(MergeError::StaleNode(id))?;
        let children = node.children.ok_or(MergeError::NotSplit)?;
        for (q, c) in Quadrant::ALL.into_iter().zip(children) {
            if self.node(c).children.is_some() {
                return Err(MergeError::ChildSplit(q));
            }
        }
        let total = self.count(id);
        if total > self.config.capacity {
            return Err(MergeError::OverCapacity {
                total,
                capacity: self.config.capacity,
            });
        }

        let mut objects = Vec::with_capacity(total);
        for c in children {
            objects.extend(self.release(c).objects);
        }
        let node = self.node_mut(id);
        node.objects = objects;
        node.children = None;
        node.total = total;
        trace!(depth = node.depth, total, "merged quadtree node");
        Ok(())
    }

    /// Drop every object and node, leaving a single empty root with the same region.
    ///
    /// All previously obtained [`NodeId`]s become stale.
    pub fn clear(&mut self) {
        let region = self.node(self.root).region;
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.root = self.alloc(region, 0, None);
    }

    // --- node inspection ---

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Region covered by node `id`.
    pub fn region(&self, id: NodeId) -> Option<Region> {
        self.node_opt(id).map(|n| n.region)
    }

    /// Distance of node `id` from the root (the root has depth 0).
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.node_opt(id).map(|n| n.depth)
    }

    /// Parent of node `id`; `None` for the root and for stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Whether node `id` has children.
    pub fn is_split(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.children.is_some())
    }

    /// The four children of `id` in quadrant order, if it is split.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        self.node_opt(id).and_then(|n| n.children)
    }

    /// The child of `id` covering quadrant `q`, if `id` is split.
    pub fn child(&self, id: NodeId, q: Quadrant) -> Option<NodeId> {
        self.children(id).map(|c| c[q.index()])
    }

    /// Objects stored directly on node `id`, in insertion order.
    ///
    /// Empty for split nodes and stale ids.
    pub fn objects(&self, id: NodeId) -> &[&'a T] {
        match self.node_opt(id) {
            Some(n) => &n.objects,
            None => &[],
        }
    }

    // --- internals ---

    #[inline]
    fn check_kind(&self, obj: &T) {
        let kind = obj.kind();
        assert!(
            kind == self.kind,
            "quadtree indexes {:?} objects, got a {:?}",
            self.kind,
            kind
        );
    }

    fn insert_at(&mut self, id: NodeId, obj: &'a T, pos: Point) -> bool {
        let node = self.node(id);
        if !node.region.contains(pos) {
            return false;
        }
        if let Some(children) = node.children {
            let preferred = node.region.quadrant_of(pos);
            let Some(child) = self.accepting_child(children, preferred, pos) else {
                error!(?pos, depth = node.depth, "no child accepts an in-bounds object");
                panic!("quadtree is inconsistent: no child of a split node accepts {pos:?}");
            };
            let inserted = self.insert_at(child, obj, pos);
            debug_assert!(inserted, "accepting child rejected the object");
            self.node_mut(id).total += 1;
            return true;
        }

        let node = self.node_mut(id);
        node.objects.push(obj);
        node.total += 1;
        if self.is_overfull(id) {
            self.split(id);
        }
        true
    }

    fn remove_at(&mut self, id: NodeId, obj: &T, pos: Point) -> bool {
        let node = self.node(id);
        if !node.region.contains(pos) {
            return false;
        }
        if let Some(children) = node.children {
            let removed = children
                .into_iter()
                .any(|c| self.remove_at(c, obj, pos));
            let node = self.node_mut(id);
            if removed {
                node.total -= 1;
            }
            let total = node.total;
            if total <= self.config.capacity {
                debug_assert_eq!(total, self.count(id), "maintained total drifted");
                if let Err(err) = self.try_merge(id) {
                    debug!(%err, "opportunistic quadtree merge skipped");
                }
            }
            return removed;
        }

        let node = self.node_mut(id);
        let Some(at) = node.objects.iter().position(|o| same_object(*o, obj)) else {
            return false;
        };
        node.objects.remove(at);
        node.total -= 1;
        true
    }

    fn contains_at(&self, node: &Node<'a, T>, obj: &T, pos: Point, mode: Containment) -> bool {
        if !node.region.contains(pos) {
            return false;
        }
        match (node.children, mode) {
            (Some(children), Containment::Recursive) => children
                .into_iter()
                .any(|c| self.contains_at(self.node(c), obj, pos, mode)),
            _ => node.objects.iter().any(|o| same_object(*o, obj)),
        }
    }

    /// The child that takes `pos`: the tie-broken quadrant, or failing that the
    /// first child in quadrant order whose region contains it.
    fn accepting_child(
        &self,
        children: [NodeId; 4],
        preferred: Quadrant,
        pos: Point,
    ) -> Option<NodeId> {
        let first = children[preferred.index()];
        if self.node(first).region.contains(pos) {
            return Some(first);
        }
        children
            .into_iter()
            .find(|&c| self.node(c).region.contains(pos))
    }

    fn is_overfull(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.children.is_none()
            && node.objects.len() > self.config.capacity
            && node.depth < self.config.max_depth
    }

    fn split(&mut self, id: NodeId) {
        let (region, depth, objects) = {
            let node = self.node_mut(id);
            (node.region, node.depth, mem::take(&mut node.objects))
        };
        let children = Quadrant::ALL.map(|q| self.alloc(region.quadrant(q), depth + 1, Some(id)));
        for obj in objects {
            let q = region.quadrant_of(obj.position());
            let child = self.node_mut(children[q.index()]);
            child.objects.push(obj);
            child.total += 1;
        }
        self.node_mut(id).children = Some(children);
        trace!(depth, total = self.node(id).total, "split quadtree node");

        if self.config.split_policy == SplitPolicy::Cascade {
            for c in children {
                if self.is_overfull(c) {
                    self.split(c);
                }
            }
        }
    }

    fn alloc(&mut self, region: Region, depth: u32, parent: Option<NodeId>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, region, depth, parent));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(Node::new(generation, region, depth, parent)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        NodeId::new(idx as u32, generation)
    }

    fn release(&mut self, id: NodeId) -> Node<'a, T> {
        let node = self.nodes[id.idx()].take().expect("dangling NodeId");
        self.free_list.push(id.idx());
        node
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node<'a, T>> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.generation())
    }

    /// Access a live node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node<'a, T> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<'a, T> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn live_nodes(&self) -> impl Iterator<Item = (NodeId, &Node<'a, T>)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                (NodeId::new(i as u32, n.generation), n)
            })
        })
    }
}
