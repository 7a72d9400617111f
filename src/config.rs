//! Per-tree and per-diagram configuration.

/// When the deletion fixup runs after a black node is unlinked.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, RemovalFixup};
///
/// let mut tree = OSRBTree::with_removal_fixup(RemovalFixup::ChildPresent);
/// for key in [1, 2, 6, 8, 9, 7, 4, 4, 2, 4, 4] {
///     tree.insert(key);
/// }
/// for key in [4, 4, 4, 4, 8] {
///     tree.remove(&key);
/// }
/// assert_eq!(tree.representation(), "b1b2b2b6b7b9");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum RemovalFixup {
    /// Repair the double-black point even when the unlinked node left no child behind.
    ///
    /// Every red-black invariant, black-height included, holds after each removal.
    #[default]
    Always,
    /// Repair only when a child took the unlinked node's place.
    ///
    /// Reproduces the reference traces of earlier implementations byte-for-byte,
    /// including rotating the sibling whenever its near child is red.
    /// Ordering, counts and the red-red rule still hold, but removing a childless
    /// black node can leave paths with unequal black-heights.
    ChildPresent,
}

/// Label style for [`Diagram`](crate::render::Diagram).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RenderStyle {
    /// Prefix each label with the node's subtree count.
    pub show_counts: bool,
}

impl RenderStyle {
    /// Labels of the form `{count}{color}{key}`.
    pub const COUNTED: Self = Self { show_counts: true };
    /// Labels of the form `{color}{key}`.
    pub const PLAIN: Self = Self { show_counts: false };
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::COUNTED
    }
}
