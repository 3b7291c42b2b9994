use std::ops::{Index, IndexMut};

use glam::Vec2;
use slotmap::{SlotMap, new_key_type};

use crate::diag::{ShapeError, ShapeWarning, Status, reject};

use super::{Family, ShapeNode, StyleState};

new_key_type! {
    /// Handle to a node in a [`ShapeTree`].
    pub struct ShapeId;
}

/// Arena owning every shape node.
///
/// Parents own their children through the arena: removing a child from its
/// parent releases the child's whole subtree. Parent links are plain ids.
/// Names are registered in the table of the hierarchy root.
#[derive(Debug, Default)]
pub struct ShapeTree {
    nodes: SlotMap<ShapeId, ShapeNode>,
}

impl ShapeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a detached node into the arena.
    pub fn insert(&mut self, mut node: ShapeNode) -> ShapeId {
        node.parent = None;
        node.children.clear();
        node.name_table.clear();
        self.nodes.insert(node)
    }

    pub fn create(&mut self, family: Family) -> ShapeId {
        self.insert(ShapeNode::new(family))
    }

    /// Creates a node starting from `style`, typically a renderer's
    /// [`current_style`](crate::render::Renderer::current_style).
    pub fn create_with_style(&mut self, family: Family, style: StyleState) -> ShapeId {
        self.insert(ShapeNode::with_style(family, style))
    }

    #[inline]
    pub fn get(&self, id: ShapeId) -> Option<&ShapeNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut ShapeNode> {
        self.nodes.get_mut(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── hierarchy ─────────────────────────────────────────────────────────

    pub fn add_child(&mut self, parent: ShapeId, child: ShapeId) -> Status {
        let at = self.nodes.get(parent).map_or(0, |p| p.children.len());
        self.add_child_at(parent, child, at)
    }

    /// Inserts `child` at `index`, shifting later children right.
    /// `index == child_count` appends.
    pub fn add_child_at(&mut self, parent: ShapeId, child: ShapeId, index: usize) -> Status {
        let (Some(p), Some(c)) = (self.nodes.get(parent), self.nodes.get(child)) else {
            return reject(ShapeWarning::StaleHandle);
        };
        if p.family == Family::Primitive {
            return reject(ShapeWarning::NoChildren);
        }
        if c.parent.is_some() {
            return reject(ShapeWarning::AlreadyParented);
        }
        if index > p.children.len() {
            return reject(ShapeWarning::NoSuchChild { op: "addChild()", index });
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return reject(ShapeWarning::CyclicChild);
        }

        let name = c.name.clone();
        self.nodes[parent].children.insert(index, child);
        self.nodes[child].parent = Some(parent);

        // Names collected while the child was a root move up to the new root.
        let moved = std::mem::take(&mut self.nodes[child].name_table);
        let root = self.root(parent);
        let table = &mut self.nodes[root].name_table;
        table.extend(moved);
        if let Some(name) = name {
            table.insert(name, child);
        }
        Status::Applied
    }

    /// Removes the child at `index` and releases its subtree.
    pub fn remove_child(&mut self, parent: ShapeId, index: usize) -> Status {
        let Some(p) = self.nodes.get_mut(parent) else {
            return reject(ShapeWarning::StaleHandle);
        };
        if index >= p.children.len() {
            return reject(ShapeWarning::NoSuchChild { op: "removeChild()", index });
        }
        let child = p.children.remove(index);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }

        let gone = self.subtree(child);
        let root = self.root(parent);
        self.nodes[root].name_table.retain(|_, id| !gone.contains(id));
        for id in gone {
            self.nodes.remove(id);
        }
        Status::Applied
    }

    /// Detaches `id` from its parent, if any, and releases its subtree.
    pub fn release(&mut self, id: ShapeId) {
        let parent = self.nodes.get(id).and_then(|n| n.parent);
        match parent.and_then(|p| self.child_index(p, id).map(|i| (p, i))) {
            Some((p, i)) => {
                self.remove_child(p, i);
            }
            None => {
                for n in self.subtree(id) {
                    self.nodes.remove(n);
                }
            }
        }
    }

    pub fn child_index(&self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        self.nodes.get(parent)?.children.iter().position(|&c| c == child)
    }

    pub fn child(&self, parent: ShapeId, index: usize) -> Option<ShapeId> {
        self.nodes.get(parent)?.children.get(index).copied()
    }

    pub fn children(&self, parent: ShapeId) -> &[ShapeId] {
        self.nodes.get(parent).map(|p| p.children.as_slice()).unwrap_or_default()
    }

    pub fn child_count(&self, parent: ShapeId) -> usize {
        self.children(parent).len()
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.nodes.get(id)?.parent
    }

    /// Topmost ancestor of `id` (itself if it has no parent).
    pub fn root(&self, id: ShapeId) -> ShapeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    // ── names ─────────────────────────────────────────────────────────────

    /// Registers `target` under `name` in the root table of `id`'s hierarchy.
    pub fn add_name(&mut self, id: ShapeId, name: impl Into<String>, target: ShapeId) -> Status {
        if !self.nodes.contains_key(id) || !self.nodes.contains_key(target) {
            return reject(ShapeWarning::StaleHandle);
        }
        let root = self.root(id);
        self.nodes[root].name_table.insert(name.into(), target);
        Status::Applied
    }

    /// Depth-first search from `id`: its own name, the name table it holds,
    /// then each child's subtree.
    pub fn get_child_by_name(&self, id: ShapeId, name: &str) -> Option<ShapeId> {
        let node = self.nodes.get(id)?;
        if node.name.as_deref() == Some(name) {
            return Some(id);
        }
        if let Some(&found) = node.name_table.get(name) {
            if self.nodes.contains_key(found) {
                return Some(found);
            }
        }
        node.children.iter().find_map(|&c| self.get_child_by_name(c, name))
    }

    /// Like [`get_child_by_name`](Self::get_child_by_name), starting from the hierarchy root.
    pub fn find_child(&self, id: ShapeId, name: &str) -> Option<ShapeId> {
        self.get_child_by_name(self.root(id), name)
    }

    // ── style ─────────────────────────────────────────────────────────────

    /// Makes `id` and its subtree replay their own style when drawn.
    pub fn enable_style(&mut self, id: ShapeId) {
        self.set_honor_style(id, true);
    }

    /// Makes `id` and its subtree draw with the renderer's ambient style.
    pub fn disable_style(&mut self, id: ShapeId) {
        self.set_honor_style(id, false);
    }

    fn set_honor_style(&mut self, id: ShapeId, on: bool) {
        for n in self.subtree(id) {
            self.nodes[n].honor_style = on;
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Point containment in the parent's coordinate space.
    ///
    /// PATH nodes use the even-odd rule over their vertices; GROUP nodes
    /// contain the point if any child does. Other families return
    /// [`ShapeError::ContainsUnsupported`]. A singular transform contains
    /// nothing.
    pub fn contains(&self, id: ShapeId, x: f32, y: f32) -> Result<bool, ShapeError> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(false);
        };
        if !matches!(node.family, Family::Path | Family::Group) {
            return Err(ShapeError::ContainsUnsupported { family: node.family });
        }

        let mut p = Vec2::new(x, y);
        if let Some(m) = &node.matrix {
            match m.inverse() {
                Some(inv) => p = inv.transform_point(p),
                None => return Ok(false),
            }
        }

        if node.family == Family::Group {
            for &c in &node.children {
                if self.contains(c, p.x, p.y)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }
        Ok(even_odd(node, p))
    }

    // ── copy ──────────────────────────────────────────────────────────────

    /// Recreates `id` (and, for groups, its subtree) as a new detached root.
    ///
    /// Geometry, style, transform, name and the bound image handle are
    /// copied; the copy gets fresh hierarchy links.
    pub fn deep_copy(&mut self, id: ShapeId) -> Option<ShapeId> {
        let src = self.nodes.get(id)?;
        let copy = src.clone();
        let children = src.children.clone();

        let new_id = self.insert(copy);
        if self.nodes[new_id].family == Family::Group {
            for c in children {
                if let Some(cc) = self.deep_copy(c) {
                    self.add_child(new_id, cc);
                }
            }
        }
        Some(new_id)
    }

    // ── traversal ─────────────────────────────────────────────────────────

    fn ancestors(&self, id: ShapeId) -> impl Iterator<Item = ShapeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// `id` and every descendant, pre-order.
    fn subtree(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let Some(node) = self.nodes.get(n) else { continue };
            out.push(n);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

impl Index<ShapeId> for ShapeTree {
    type Output = ShapeNode;

    fn index(&self, id: ShapeId) -> &ShapeNode {
        &self.nodes[id]
    }
}

impl IndexMut<ShapeId> for ShapeTree {
    fn index_mut(&mut self, id: ShapeId) -> &mut ShapeNode {
        &mut self.nodes[id]
    }
}

/// Ray-cast crossing test over the node's vertices.
fn even_odd(node: &ShapeNode, p: Vec2) -> bool {
    let verts = node.path.vertices();
    let mut inside = false;
    let mut j = verts.len().wrapping_sub(1);
    for (i, vi) in verts.iter().enumerate() {
        let vj = &verts[j];
        if (vi.y() > p.y) != (vj.y() > p.y)
            && p.x < (vj.x() - vi.x()) * (p.y - vi.y()) / (vj.y() - vi.y()) + vi.x()
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
