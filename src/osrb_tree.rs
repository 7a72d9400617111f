use alloc::string::String;
use core::borrow::Borrow;
use core::fmt::{self, Display, Write};

use crate::RemovalFixup;
use crate::config::RenderStyle;
use crate::raw::RawOSRBTree;
use crate::render::Diagram;

mod node_ref;
mod order_statistic;

pub use node_ref::NodeRef;

/// An ordered multiset of keys kept in a red-black tree augmented with subtree sizes.
///
/// Insertion and removal take O(log n) time, as does [`select`](OSRBTree::select), which
/// returns the k-th smallest key. Equal keys are all kept; each new duplicate is placed
/// after the existing ones, so duplicates stay in insertion order.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the tree.
/// The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `OSRBTree` that observed the logic error and not result in
/// undefined behavior.
///
/// The tree does no internal locking. Share it across threads behind a single lock.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let mut tree = OSRBTree::new();
/// for key in [10, 85, 15] {
///     tree.insert(key);
/// }
///
/// // In-order color tags and keys.
/// assert_eq!(tree.representation(), "r10b15r85");
///
/// // Order statistics are 1-indexed.
/// assert_eq!(tree.select(1), Some(&10));
/// assert_eq!(tree.select(4), None);
///
/// tree.remove(&15);
/// assert_eq!(tree.size(), 2);
/// ```
#[derive(Clone)]
pub struct OSRBTree<T> {
    raw: RawOSRBTree<T>,
}

impl<T> OSRBTree<T> {
    /// Makes a new, empty `OSRBTree` that always restores every red-black invariant.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_removal_fixup(RemovalFixup::Always)
    }

    /// Makes a new, empty `OSRBTree` with the given removal policy.
    ///
    /// See [`RemovalFixup`] for the trade-off.
    #[must_use]
    pub const fn with_removal_fixup(removal_fixup: RemovalFixup) -> Self {
        OSRBTree {
            raw: RawOSRBTree::new(removal_fixup),
        }
    }

    /// Makes a new, empty `OSRBTree` with room for at least `capacity` keys.
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<u8> = OSRBTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTree {
            raw: RawOSRBTree::with_capacity(capacity, RemovalFixup::Always),
        }
    }

    /// Returns the removal policy this tree was created with.
    #[must_use]
    pub const fn removal_fixup(&self) -> RemovalFixup {
        self.raw.removal_fixup()
    }

    /// Returns the number of keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of keys in the tree, duplicates included.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Same as [`len`](OSRBTree::len).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.representation(), "");
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a read-only cursor at the root, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.raw.root().map(|handle| NodeRef::new(&self.raw, handle))
    }

    /// Returns the `k`-th smallest key, counting from 1.
    ///
    /// Returns `None` when `k` is 0 or greater than [`len`](OSRBTree::len).
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
    /// let tree: OSRBTree<i32> = (1..=8).collect();
    /// assert_eq!(tree.select(3), Some(&3));
    /// assert_eq!(tree.select(0), None);
    /// assert_eq!(tree.select(9), None);
    /// ```
    #[must_use]
    pub fn select(&self, k: usize) -> Option<&T> {
        self.raw.select(k)
    }
}

impl<T: Ord> OSRBTree<T> {
    /// Adds a key. Equal keys are kept, each placed after those already present.
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
    /// let mut tree = OSRBTree::new();
    /// tree.insert(4);
    /// tree.insert(4);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T) {
        self.raw.insert(key);
    }

    /// Removes one key equal to `key`. Returns whether a key was removed.
    ///
    /// Removing a key that is not present leaves the tree untouched.
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
    /// let mut tree = OSRBTree::from([1, 2, 2]);
    /// assert!(tree.remove(&2));
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.representation(), "b1");
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).is_some()
    }

    /// Removes one key equal to `key` and returns it.
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([String::from("a"), String::from("b")]);
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns `true` if the tree holds a key equal to `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }
}

impl<T: Display> OSRBTree<T> {
    /// Returns the in-order encoding of the tree: each node's color tag (`r` or `b`)
    /// immediately followed by its key, with no separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// assert_eq!(tree.representation(), "");
    /// tree.insert(10);
    /// tree.insert(85);
    /// assert_eq!(tree.representation(), "b10r85");
    /// ```
    #[must_use]
    pub fn representation(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` only fails if a key's `Display` impl does.
        let _ = self.write_representation(&mut out);
        out
    }

    /// Writes the same encoding as [`representation`](OSRBTree::representation).
    pub fn write_representation<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        self.raw
            .try_for_each_in_order(|node| write!(out, "{}{}", node.color().tag(), node.key()))
    }

    /// Returns an ASCII diagram of the tree using the default [`RenderStyle`].
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([2, 1, 3]);
    /// assert_eq!(tree.diagram().to_string(), "  _3b2_\n /     \\\n1r1   1r3\n");
    /// ```
    #[must_use]
    pub fn diagram(&self) -> Diagram<'_, T> {
        self.diagram_with(RenderStyle::default())
    }

    /// Returns an ASCII diagram of the tree using `style`.
    #[must_use]
    pub fn diagram_with(&self, style: RenderStyle) -> Diagram<'_, T> {
        Diagram::new(self.root(), style)
    }
}

impl<T> Default for OSRBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OSRBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let _ = self.raw.try_for_each_in_order(|node| {
            list.entry(node.key());
            Ok::<(), fmt::Error>(())
        });
        list.finish()
    }
}

impl<T: Ord> FromIterator<T> for OSRBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OSRBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OSRBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for OSRBTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSRBTree<T> {
    /// Inserts the array's keys in order.
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([10, 85, 15]);
    /// assert_eq!(tree.representation(), "r10b15r85");
    /// ```
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}
