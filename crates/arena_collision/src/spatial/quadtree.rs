//! Quadtree spatial partitioning structure
//!
//! Divides a 2D region into hierarchical quadrants for broad-phase queries.
//! A node holds up to `capacity` entries; the next insertion subdivides it
//! into four children (NE, NW, SE, SW) and later entries are offered to the
//! children in that order. Entries already held by a node stay there after
//! subdivision, so internal nodes keep up to `capacity` entries too.
//!
//! Subdivision is driven by capacity alone, so no leaf ever holds more than
//! `capacity` entries. The flip side is that coincident entries deepen the
//! tree by one level per `capacity` of them.
//!
//! The tree is meant to be rebuilt every tick with [`QuadTree::clear`]
//! followed by fresh inserts; there is no removal API.

use crate::physics::primitives::{Collidable, Region};

/// Child slot of the north-east quadrant
pub const NE: usize = 0;
/// Child slot of the north-west quadrant
pub const NW: usize = 1;
/// Child slot of the south-east quadrant
pub const SE: usize = 2;
/// Child slot of the south-west quadrant
pub const SW: usize = 3;

/// Collidable stored in the tree together with the caller's key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<K> {
    /// Hit volume used for containment at insert time
    pub shape: Collidable,
    /// Caller-supplied association back to the owning entity
    pub key: K,
}

/// Single node in the quadtree hierarchy
#[derive(Debug, Clone)]
pub struct QuadTreeNode<K> {
    /// World-space bounds of this node
    region: Region,

    /// Entries held before this node subdivided
    capacity: usize,

    /// Entries stored directly in this node
    entries: Vec<Entry<K>>,

    /// Child quadrants in NE, NW, SE, SW order, None while this is a leaf
    children: Option<Box<[QuadTreeNode<K>; 4]>>,

    /// Depth in the tree (0 = root)
    depth: u32,
}

impl<K: Copy> QuadTreeNode<K> {
    /// Create a new empty leaf
    pub fn new(region: Region, capacity: usize) -> Self {
        Self::with_depth(region, capacity, 0)
    }

    fn with_depth(region: Region, capacity: usize, depth: u32) -> Self {
        Self {
            region,
            capacity,
            entries: Vec::with_capacity(capacity),
            children: None,
            depth,
        }
    }

    /// Bounds of this node
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Entries this node holds before subdividing
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries stored directly in this node
    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child quadrants in NE, NW, SE, SW order
    pub fn children(&self) -> Option<&[QuadTreeNode<K>; 4]> {
        self.children.as_deref()
    }

    /// Subdivide this node into 4 empty children with the same capacity
    ///
    /// Does nothing on a node that is already subdivided.
    pub fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let depth = self.depth + 1;
        let capacity = self.capacity;
        let children = self
            .region
            .quadrants()
            .map(|quadrant| QuadTreeNode::with_depth(quadrant, capacity, depth));

        self.children = Some(Box::new(children));
    }

    /// Insert a collidable into this node or one of its descendants
    ///
    /// Returns false when the shape does not fit inside this node's region,
    /// or when it fits here but straddles every child quadrant.
    pub fn insert(&mut self, shape: Collidable, key: K) -> bool {
        if !self.region.contains(&shape) {
            return false;
        }

        if self.is_leaf() && self.entries.len() < self.capacity {
            self.entries.push(Entry { shape, key });
            return true;
        }

        self.subdivide();

        match self.children.as_deref_mut() {
            Some(children) => children.iter_mut().any(|child| child.insert(shape, key)),
            None => false,
        }
    }

    /// Drop every entry and every child, leaving an empty leaf
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children = None;
    }

    /// Collect every entry of every node the query circle touches
    ///
    /// The result is a superset of the entries that actually overlap the
    /// query and must be narrowed down by an exact test.
    pub fn retrieve(&self, query: &Collidable, found: &mut Vec<Entry<K>>) {
        if !self.region.intersects(query) {
            return;
        }

        found.extend_from_slice(&self.entries);

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.retrieve(query, found);
            }
        }
    }

    /// Get all leaf nodes
    pub fn get_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a QuadTreeNode<K>>) {
        match self.children {
            None => leaves.push(self),
            Some(ref children) => {
                for child in children.iter() {
                    child.get_all_leaves(leaves);
                }
            }
        }
    }

    /// Count total entries in this node and all children
    pub fn count_entities(&self) -> usize {
        let mut count = self.entries.len();

        if let Some(ref children) = self.children {
            for child in children.iter() {
                count += child.count_entities();
            }
        }

        count
    }

    /// Deepest node depth below and including this one
    pub fn max_depth(&self) -> u32 {
        self.children
            .as_ref()
            .map_or(self.depth, |children| {
                children.iter().map(QuadTreeNode::max_depth).max().unwrap_or(self.depth)
            })
    }
}

/// Quadtree spatial partitioning structure
///
/// Owns the root node. `K` is whatever the caller needs to map a result back
/// to its entity, typically an index into the tick's entity list.
#[derive(Debug, Clone)]
pub struct QuadTree<K> {
    /// Root node covering the entire world region
    root: QuadTreeNode<K>,

    /// Inserts accepted since the last clear
    accepted: usize,

    /// Inserts rejected since the last clear
    rejected: usize,
}

impl<K: Copy> QuadTree<K> {
    /// Create a new quadtree over the given world bounds
    pub fn new(world_bounds: Region, capacity: usize) -> Self {
        Self {
            root: QuadTreeNode::new(world_bounds, capacity),
            accepted: 0,
            rejected: 0,
        }
    }

    /// Root node, for inspection and debug drawing
    pub fn root(&self) -> &QuadTreeNode<K> {
        &self.root
    }

    /// World bounds covered by the tree
    pub fn region(&self) -> &Region {
        self.root.region()
    }

    /// Per-node capacity
    pub fn capacity(&self) -> usize {
        self.root.capacity()
    }

    /// Insert a collidable, returning false if no node accepted it
    pub fn insert(&mut self, shape: Collidable, key: K) -> bool {
        let inserted = self.root.insert(shape, key);
        if inserted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
        inserted
    }

    /// Collect broad-phase candidates for a query circle into `found`
    pub fn retrieve(&self, query: &Collidable, found: &mut Vec<Entry<K>>) {
        self.root.retrieve(query, found);
    }

    /// Broad-phase candidates for a query circle
    pub fn query(&self, query: &Collidable) -> Vec<Entry<K>> {
        let mut found = Vec::new();
        self.root.retrieve(query, &mut found);
        found
    }

    /// Clear the quadtree back to a single empty leaf
    pub fn clear(&mut self) {
        self.root.clear();
        self.accepted = 0;
        self.rejected = 0;
    }

    /// Get all leaf nodes
    pub fn get_all_leaves(&self) -> Vec<&QuadTreeNode<K>> {
        let mut leaves = Vec::new();
        self.root.get_all_leaves(&mut leaves);
        leaves
    }

    /// Get total entry count
    pub fn entity_count(&self) -> usize {
        self.root.count_entities()
    }

    /// Depth of the deepest node (0 while the root is a leaf)
    pub fn depth(&self) -> u32 {
        self.root.max_depth()
    }

    /// Inserts accepted since the last clear
    pub fn accepted_count(&self) -> usize {
        self.accepted
    }

    /// Inserts rejected since the last clear
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }
}
