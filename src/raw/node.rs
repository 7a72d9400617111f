use super::handle::Handle;
use crate::Color;

/// A red-black tree node stored in the arena.
///
/// `left` and `right` own their subtrees; `parent` is a back-link used only for
/// walking toward the root during fixups and count maintenance.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    key: T,
    color: Color,
    // Number of nodes in the subtree rooted here, this node included.
    count: usize,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<T> Node<T> {
    /// Creates a detached red leaf.
    pub(crate) const fn new(key: T, parent: Option<Handle>) -> Self {
        Self {
            key,
            color: Color::Red,
            count: 1,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) const fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side `child` hangs from, or `None` if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
