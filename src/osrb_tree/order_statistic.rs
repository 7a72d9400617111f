use core::borrow::Borrow;
use core::ops::Index;

use super::OSRBTree;
use crate::Rank;

impl<T: Ord> OSRBTree<T> {
    /// Returns the 1-based rank of the first key equal to `key`, or `None` if the key
    /// is not present.
    ///
    /// For a present key, `select(rank_of(key))` returns that key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([40, 10, 20, 20, 30]);
    ///
    /// assert_eq!(tree.rank_of(&10), Some(1));
    /// assert_eq!(tree.rank_of(&20), Some(2));
    /// assert_eq!(tree.rank_of(&30), Some(4));
    /// assert_eq!(tree.rank_of(&25), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the tree by 1-based rank.
///
/// # Panics
///
/// Panics if `rank` is 0 or greater than the tree's length.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from([5, 1, 3]);
/// assert_eq!(tree[Rank(2)], 3);
/// ```
impl<T> Index<Rank> for OSRBTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).expect("rank out of bounds")
    }
}
