use core::fmt;

/// The color of a red-black tree node.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Color, OSRBTree};
///
/// let tree = OSRBTree::from([7]);
/// let root = tree.root().unwrap();
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.color().tag(), 'b');
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The one-character tag used by the tree representation and diagrams.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Black => 'b',
        }
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.tag())
    }
}
