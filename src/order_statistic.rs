/// A one-based position in the sorted order of a tree's keys.
///
/// `Rank(1)` is the smallest key and `Rank(tree.len())` the largest, the same
/// positions accepted by [`OSRBTree::select`](crate::OSRBTree::select).
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from([30, 10, 20]);
///
/// assert_eq!(tree[Rank(1)], 10);
/// assert_eq!(tree[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
