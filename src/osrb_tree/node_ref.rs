use core::fmt::{self, Display, Write};

use crate::Color;
use crate::raw::{Handle, Node, RawOSRBTree};

/// A read-only cursor onto one node of an [`OSRBTree`](crate::OSRBTree).
///
/// Cursors expose the tree's shape without allowing mutation: a renderer can walk
/// children and parents, read keys, colors and subtree counts, and measure labels.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Color, OSRBTree};
///
/// let tree = OSRBTree::from([2, 1, 3]);
/// let root = tree.root().unwrap();
///
/// assert_eq!(*root.key(), 2);
/// assert_eq!(root.count(), 3);
///
/// let left = root.left().unwrap();
/// assert_eq!(*left.key(), 1);
/// assert_eq!(left.color(), Color::Red);
/// assert_eq!(left.parent(), Some(root));
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a RawOSRBTree<T>,
    handle: Handle,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a RawOSRBTree<T>, handle: Handle) -> Self {
        Self { tree, handle }
    }

    fn node(&self) -> &'a Node<T> {
        self.tree.node(self.handle)
    }

    fn relative(&self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self::new(self.tree, handle))
    }

    #[must_use]
    pub fn key(&self) -> &'a T {
        self.node().key()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.node().color()
    }

    /// Number of keys in the subtree rooted at this node, itself included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.node().count()
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.relative(self.node().left())
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.relative(self.node().right())
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.relative(self.node().parent())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node().parent().is_none()
    }
}

impl<T: Display> NodeRef<'_, T> {
    /// The number of characters in this node's diagram label.
    ///
    /// With `show_counts` the label is `{count}{color}{key}`, otherwise `{color}{key}`.
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([250]);
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.display_width(true), 5); // "1b250"
    /// assert_eq!(root.display_width(false), 4); // "b250"
    /// ```
    #[must_use]
    pub fn display_width(&self, show_counts: bool) -> usize {
        let mut width = CharCounter(0);
        // Counting never fails; only the key's `Display` impl could.
        let _ = self.write_label(&mut width, show_counts);
        width.0
    }

    /// Writes this node's diagram label.
    pub fn write_label<W: Write + ?Sized>(&self, out: &mut W, show_counts: bool) -> fmt::Result {
        if show_counts {
            write!(out, "{}", self.count())?;
        }
        write!(out, "{}{}", self.color().tag(), self.key())
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .field("count", &self.count())
            .finish()
    }
}

/// A `fmt::Write` sink that only counts characters.
struct CharCounter(usize);

impl Write for CharCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}
