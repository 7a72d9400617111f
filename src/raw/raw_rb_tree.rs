use core::borrow::Borrow;
use core::cmp::Ordering;

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::{Color, RemovalFixup};

/// Explicit stack for in-order walks; depth is logarithmic so this rarely spills.
type WalkStack = SmallVec<[Handle; 64]>;

/// The red-black engine backing `OSRBTree`.
#[derive(Clone)]
pub(crate) struct RawOSRBTree<T> {
    /// Arena owning every live node.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of keys in the tree, always equal to the root's subtree count.
    len: usize,
    /// When to repair a removal that unlinked a black node.
    removal_fixup: RemovalFixup,
}

impl<T> RawOSRBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(removal_fixup: RemovalFixup) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            removal_fixup,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, removal_fixup: RemovalFixup) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            removal_fixup,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn removal_fixup(&self) -> RemovalFixup {
        self.removal_fixup
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Subtree count of an optional link; an absent child counts zero.
    fn count(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).count())
    }

    /// Absent children are black.
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).color().is_red())
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// Recomputes one node's count from its children's current counts.
    fn recount(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let count = 1 + self.count(node.left()) + self.count(node.right());
        self.nodes.get_mut(handle).set_count(count);
    }

    /// Recomputes counts from `from` up to and including the root.
    ///
    /// Every structural change that alters subtree membership above a node ends
    /// with a call to this helper.
    fn recount_to_root(&mut self, from: Option<Handle>) {
        let mut current = from;
        while let Some(handle) = current {
            self.recount(handle);
            current = self.nodes.get(handle).parent();
        }
    }

    /// Hangs `child` from `parent` on `side` and points the child back at its parent.
    fn link(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }

    /// Replaces `old` with `new` in `parent`'s child link, or at the root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self
                    .nodes
                    .get(parent)
                    .side_of(old)
                    .expect("`RawOSRBTree::replace_child()` - `old` is not a child of `parent`!");
                self.nodes.get_mut(parent).set_child(side, new);
            }
        }
    }

    /// Rotates `x` down toward `side`; its child on the opposite side takes its place.
    ///
    /// `rotate(x, Side::Left)` is the textbook left rotation and requires `x.right`.
    /// Counts of the two nodes whose subtrees changed are recomputed, lower one first;
    /// counts above are unaffected since the rotated subtree keeps the same members.
    pub(crate) fn rotate(&mut self, x: Handle, side: Side) {
        let rising = side.opposite();
        let y = self
            .nodes
            .get(x)
            .child(rising)
            .expect("`RawOSRBTree::rotate()` - `x` has no child to rotate up!");

        let inner = self.nodes.get(y).child(side);
        self.link(x, rising, inner);

        let parent = self.nodes.get(x).parent();
        self.replace_child(parent, x, Some(y));
        self.nodes.get_mut(y).set_parent(parent);
        self.link(y, side, Some(x));

        self.recount(x);
        self.recount(y);
    }

    /// Puts the subtree rooted at `new` where `old` hangs. `old`'s own links are left alone.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.nodes.get(old).parent();
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }
    }

    /// The leftmost node of the subtree rooted at `handle`.
    pub(crate) fn minimum(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        current
    }

    /// Returns the `k`-th smallest key, 1-indexed.
    pub(crate) fn select(&self, k: usize) -> Option<&T> {
        if k == 0 || k > self.len {
            return None;
        }

        let mut current = self.root;
        let mut remaining = k;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let rank = self.count(node.left()) + 1;
            current = match remaining.cmp(&rank) {
                Ordering::Equal => return Some(node.key()),
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    remaining -= rank;
                    node.right()
                }
            };
        }

        None
    }

    /// Visits every node in key order, stopping at the first error.
    pub(crate) fn try_for_each_in_order<'a, E>(
        &'a self,
        mut visit: impl FnMut(&'a Node<T>) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut stack = WalkStack::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else {
                return Ok(());
            };
            let node = self.nodes.get(handle);
            visit(node)?;
            current = node.right();
        }
    }
}

impl<T: Ord> RawOSRBTree<T> {
    /// Returns the first node with a key equal to `key` on the search path.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Returns the 1-based rank of the leftmost key equal to `key`.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut preceding = 0;
        let mut found = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let rank = preceding + self.count(node.left()) + 1;
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Equal => {
                    // Equal keys may also sit further left.
                    found = Some(rank);
                    node.left()
                }
                Ordering::Greater => {
                    preceding = rank;
                    node.right()
                }
            };
        }
        found
    }

    /// Inserts `key`. Equal keys descend right, so duplicates keep insertion order.
    pub(crate) fn insert(&mut self, key: T) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = if key < *node.key() { Side::Left } else { Side::Right };
            parent = Some(handle);
            current = node.child(side);
        }

        let inserted = self.nodes.alloc(Node::new(key, parent));
        match parent {
            None => self.root = Some(inserted),
            Some(parent) => self.nodes.get_mut(parent).set_child(side, Some(inserted)),
        }
        self.recount_to_root(parent);
        self.len += 1;

        self.insert_fixup(inserted);
    }

    fn insert_fixup(&mut self, inserted: Handle) {
        let mut node = inserted;
        while let Some(mut parent) = self.nodes.get(node).parent().filter(|&p| self.is_red(Some(p))) {
            let grandparent = self
                .nodes
                .get(parent)
                .parent()
                .expect("`RawOSRBTree::insert_fixup()` - red parent has no parent!");
            let side = self
                .nodes
                .get(grandparent)
                .side_of(parent)
                .expect("`RawOSRBTree::insert_fixup()` - broken parent link!");
            let uncle = self.nodes.get(grandparent).child(side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.is_red(Some(u))) {
                trace!("insert fixup: red uncle, recoloring");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.nodes.get(parent).child(side.opposite()) == Some(node) {
                trace!("insert fixup: inner child, rotating parent");
                self.rotate(parent, side);
                core::mem::swap(&mut node, &mut parent);
            }
            trace!("insert fixup: outer child, rotating grandparent");
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Removes the first node equal to `key` found on the search path and returns its key.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = self.find(key) else {
            debug!("remove: key not present, tree unchanged");
            return None;
        };
        Some(self.unlink(handle))
    }

    /// Detaches `z` from the tree, restores the invariants and frees its slot.
    fn unlink(&mut self, z: Handle) -> T {
        let (z_left, z_right, z_color) = {
            let node = self.nodes.get(z);
            (node.left(), node.right(), node.color())
        };

        // `x` takes the place of the node physically removed from its position;
        // `x_parent` is where the double-black point hangs when `x` is absent.
        let (x, x_parent, removed_color) = match (z_left, z_right) {
            (None, only) | (only, None) => {
                let parent = self.nodes.get(z).parent();
                self.transplant(z, only);
                (only, parent, z_color)
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                let (successor_color, x) = {
                    let node = self.nodes.get(successor);
                    (node.color(), node.right())
                };

                let x_parent = if successor == right {
                    Some(successor)
                } else {
                    let successor_parent = self.nodes.get(successor).parent();
                    self.transplant(successor, x);
                    self.link(successor, Side::Right, Some(right));
                    successor_parent
                };

                self.transplant(z, Some(successor));
                self.link(successor, Side::Left, Some(left));
                self.set_color(successor, z_color);
                (x, x_parent, successor_color)
            }
        };

        self.recount_to_root(x_parent);
        self.len -= 1;
        let key = self.nodes.take(z).into_key();
        debug_assert_eq!(self.nodes.len(), self.len, "`RawOSRBTree::unlink()` - arena and len disagree!");

        if removed_color.is_black() {
            match self.removal_fixup {
                RemovalFixup::Always => self.remove_fixup(x, x_parent),
                RemovalFixup::ChildPresent if x.is_some() => self.remove_fixup(x, x_parent),
                RemovalFixup::ChildPresent => {}
            }
        }

        key
    }

    fn remove_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let p = parent.expect("`RawOSRBTree::remove_fixup()` - double-black node below the root has no parent!");
            let side = if self.nodes.get(p).left() == x { Side::Left } else { Side::Right };
            let far = side.opposite();

            let mut sibling = self.nodes.get(p).child(far);
            if let Some(w) = sibling.filter(|&w| self.is_red(Some(w))) {
                trace!("remove fixup: red sibling, rotating parent");
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.nodes.get(p).child(far);
            }

            // Only reachable once skipped fixups have already unbalanced black-heights.
            let Some(mut w) = sibling else {
                debug_assert!(
                    self.removal_fixup == RemovalFixup::ChildPresent,
                    "`RawOSRBTree::remove_fixup()` - double-black node has no sibling!"
                );
                x = Some(p);
                parent = self.nodes.get(p).parent();
                continue;
            };

            let near_child = self.nodes.get(w).child(side);
            let far_child = self.nodes.get(w).child(far);
            if !self.is_red(near_child) && !self.is_red(far_child) {
                trace!("remove fixup: black nephews, pushing double-black up");
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.nodes.get(p).parent();
                continue;
            }

            // With both nephews red, `ChildPresent` still turns the sibling first.
            let turn_sibling = match self.removal_fixup {
                RemovalFixup::Always => !self.is_red(far_child),
                RemovalFixup::ChildPresent => self.is_red(near_child),
            };
            if turn_sibling {
                trace!("remove fixup: red near nephew, rotating sibling");
                let near = near_child.expect("`RawOSRBTree::remove_fixup()` - red near nephew is absent!");
                self.set_color(near, Color::Black);
                self.set_color(w, Color::Red);
                self.rotate(w, far);
                w = self
                    .nodes
                    .get(p)
                    .child(far)
                    .expect("`RawOSRBTree::remove_fixup()` - sibling lost after rotation!");
            }

            trace!("remove fixup: red far nephew, rotating parent");
            let parent_color = self.nodes.get(p).color();
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far_child) = self.nodes.get(w).child(far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}
