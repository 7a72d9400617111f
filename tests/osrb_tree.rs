use std::cmp::Ordering;

use osrb_tree::{Color, NodeRef, OSRBTree, Rank, RemovalFixup};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a narrow range so duplicates and misses are common.
fn key_strategy() -> impl Strategy<Value = i64> {
    -300i64..300i64
}

fn tree_from(keys: &[i64], removal_fixup: RemovalFixup) -> OSRBTree<i64> {
    let mut tree = OSRBTree::with_removal_fixup(removal_fixup);
    tree.extend(keys);
    tree
}

// ─── Structural checks through the public cursor API ─────────────────────────

/// Walks the tree through `NodeRef`s and returns (count, black-height) of `node`,
/// asserting parent links, the red-red rule, ordering against neighbours and counts.
fn check_subtree<T: Ord + std::fmt::Debug>(node: NodeRef<'_, T>) -> (usize, usize) {
    let mut counts = [0; 2];
    let mut heights = [0; 2];

    for (i, child) in [node.left(), node.right()].into_iter().enumerate() {
        let Some(child) = child else {
            continue;
        };
        assert_eq!(child.parent(), Some(node), "child {:?} lost its parent link", child.key());
        assert!(
            !(node.color() == Color::Red && child.color() == Color::Red),
            "red {:?} has red child {:?}",
            node.key(),
            child.key()
        );
        if i == 0 {
            assert!(child.key() <= node.key(), "{:?} left of {:?}", child.key(), node.key());
        } else {
            assert!(child.key() >= node.key(), "{:?} right of {:?}", child.key(), node.key());
        }
        (counts[i], heights[i]) = check_subtree(child);
    }

    assert_eq!(heights[0], heights[1], "black-height differs under {:?}", node.key());
    assert_eq!(node.count(), 1 + counts[0] + counts[1], "count of {:?}", node.key());
    (node.count(), heights[0] + usize::from(node.color() == Color::Black))
}

fn check_tree<T: Ord + std::fmt::Debug>(tree: &OSRBTree<T>) {
    match tree.root() {
        None => assert_eq!(tree.size(), 0),
        Some(root) => {
            assert!(root.is_root());
            assert_eq!(root.color(), Color::Black, "root must be black");
            let (count, _) = check_subtree(root);
            assert_eq!(count, tree.size());
        }
    }
}

fn in_order<T: Clone>(tree: &OSRBTree<T>) -> Vec<T> {
    (1..=tree.len()).map(|k| tree.select(k).cloned().unwrap()).collect()
}

// ─── Reference traces ────────────────────────────────────────────────────────

#[test]
fn insertion_reference_trace() {
    let steps = [
        (10, "b10"),
        (85, "b10r85"),
        (15, "r10b15r85"),
        (70, "b10b15r70b85"),
        (20, "b10b15r20b70r85"),
        (60, "b10b15b20r60r70b85"),
        (30, "b10b15r20b30r60r70b85"),
        (50, "b10r15b20b30r50b60r70b85"),
        (65, "b10r15b20b30r50b60r65r70b85"),
        (80, "b10r15b20b30r50b60r65r70r80b85"),
        (90, "b10r15b20b30r50b60r65r70r80b85r90"),
        (40, "b10b15b20b30r40b50r60b65b70r80b85r90"),
        (5, "r5b10b15b20b30r40b50r60b65b70r80b85r90"),
        (55, "r5b10b15b20b30r40b50r55r60b65b70r80b85r90"),
    ];

    let mut tree = OSRBTree::new();
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.representation(), "");
    for (i, (key, expected)) in steps.into_iter().enumerate() {
        tree.insert(key);
        assert_eq!(tree.representation(), expected, "after inserting {key}");
        assert_eq!(tree.size(), i + 1);
        check_tree(&tree);
    }
}

#[test]
fn single_insert_then_remove() {
    let mut tree = OSRBTree::new();
    tree.insert(10);
    assert_eq!(tree.representation(), "b10");
    assert_eq!(tree.size(), 1);
    assert!(tree.remove(&10));
    assert_eq!(tree.representation(), "");
    assert_eq!(tree.size(), 0);
    assert!(tree.root().is_none());
}

#[test]
fn removing_a_two_child_root() {
    for fixup in [RemovalFixup::Always, RemovalFixup::ChildPresent] {
        let mut tree = tree_from(&[2, 1, 3, 4, 5], fixup);
        assert_eq!(tree.representation(), "b1b2r3b4r5");
        tree.remove(&2);
        assert_eq!(tree.representation(), "b1b3b4r5");
        assert_eq!(*tree.root().unwrap().key(), 3);
    }
}

const BLACK_NEPHEWS: [i64; 11] = [1, 2, 6, 8, 9, 7, 4, 4, 2, 4, 4];
const ASCENDING_THEN_ZERO: [i64; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0];

#[test]
fn reference_removal_black_sibling_with_black_children() {
    let mut tree = tree_from(&BLACK_NEPHEWS, RemovalFixup::ChildPresent);
    for key in [4, 4, 4, 4, 8] {
        assert!(tree.remove(&key));
    }
    assert_eq!(tree.representation(), "b1b2b2b6b7b9");
    tree.remove(&9);
    assert_eq!(tree.representation(), "b1r2b2b6b7");
}

#[test]
fn reference_removal_black_sibling_with_red_far_child() {
    let mut tree = tree_from(&ASCENDING_THEN_ZERO, RemovalFixup::ChildPresent);
    tree.remove(&3);
    assert_eq!(tree.representation(), "r0b1b2b4b5b6b7r8r9b10r11");
    tree.remove(&2);
    assert_eq!(tree.representation(), "r0b1b4b5b6b7b8r9b10r11");
}

#[test]
fn reference_removal_red_sibling() {
    let mut tree = tree_from(&ASCENDING_THEN_ZERO, RemovalFixup::ChildPresent);
    tree.remove(&3);
    tree.extend([5, 5, 5, 5, 5]);
    assert_eq!(tree.representation(), "r0b1b2b4b5b5b5r5b5r5r6b7b8r9b10r11");
    tree.remove(&2);
    assert_eq!(tree.representation(), "r0b1b4b5r5b5b5b5r5b6b7b8r9b10r11");
}

#[test]
fn reference_removal_black_sibling_with_two_red_children() {
    let mut tree = tree_from(&[30, 28, 21, 13, 20, 26, 27, 12, 14, 21], RemovalFixup::ChildPresent);
    tree.remove(&26);
    tree.extend([5, 11, 6]);
    assert_eq!(tree.representation(), "b5r6r11b12b13b14r20b21r21b27b28b30");

    // 28 replaces the root and 30 is left short; its sibling 13 has red 11 and red 20.
    tree.remove(&27);
    assert_eq!(tree.representation(), "b5r6r11b12b13b14b20b21r21b28b30");
    assert_eq!(*tree.root().unwrap().key(), 20);
    assert_eq!(tree.size(), 11);
    assert_eq!(tree.select(6), Some(&14));
}

#[test]
fn full_fixup_keeps_black_heights_on_reference_sequences() {
    let mut tree = tree_from(&BLACK_NEPHEWS, RemovalFixup::Always);
    for key in [4, 4, 4, 4, 8] {
        tree.remove(&key);
        check_tree(&tree);
    }
    assert_eq!(tree.representation(), "b1r2b2b6r7b9");
    tree.remove(&9);
    assert_eq!(tree.representation(), "b1r2b2b6b7");
    check_tree(&tree);

    let mut tree = tree_from(&ASCENDING_THEN_ZERO, RemovalFixup::Always);
    tree.remove(&3);
    assert_eq!(tree.representation(), "b0b1b2b4b5b6b7r8r9b10r11");
    check_tree(&tree);
    tree.extend([5, 5, 5, 5, 5]);
    assert_eq!(tree.representation(), "b0b1b2b4b5b5b5r5b5r5r6b7b8r9b10r11");
    tree.remove(&2);
    assert_eq!(tree.representation(), "r0b1b4b5r5b5b5b5r5b6b7b8r9b10r11");
    check_tree(&tree);
}

// ─── Order statistics ────────────────────────────────────────────────────────

#[test]
fn select_on_ascending_keys() {
    let tree: OSRBTree<i64> = (1..=8).collect();
    for i in 1..=8 {
        assert_eq!(tree.select(i as usize), Some(&i));
        assert_eq!(tree[Rank(i as usize)], i);
    }
    assert_eq!(tree.select(0), None);
    assert_eq!(tree.select(9), None);
}

#[test]
fn select_on_empty_tree() {
    let tree: OSRBTree<i64> = OSRBTree::new();
    assert_eq!(tree.select(0), None);
    assert_eq!(tree.select(1), None);
    assert_eq!(tree.rank_of(&1), None);
}

#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_past_the_end_panics() {
    let tree = OSRBTree::from([1, 2, 3]);
    let _ = tree[Rank(4)];
}

// ─── Misc API ────────────────────────────────────────────────────────────────

#[test]
fn take_and_contains() {
    let mut tree = OSRBTree::from([3, 1, 3]);
    assert!(tree.contains(&3));
    assert_eq!(tree.take(&3), Some(3));
    assert!(tree.contains(&3));
    assert_eq!(tree.take(&3), Some(3));
    assert!(!tree.contains(&3));
    assert_eq!(tree.take(&3), None);
    assert_eq!(tree.len(), 1);
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = OSRBTree::from([3, 1, 2, 2]);
    assert_eq!(format!("{tree:?}"), "[1, 2, 2, 3]");
}

#[test]
fn clones_do_not_share_nodes() {
    let mut tree = OSRBTree::from([1, 2, 3, 4, 5]);
    let snapshot = tree.clone();
    tree.remove(&3);
    tree.insert(9);
    assert_eq!(in_order(&snapshot), [1, 2, 3, 4, 5]);
    assert_eq!(in_order(&tree), [1, 2, 4, 5, 9]);
}

#[test]
fn clear_then_reuse() {
    let mut tree = OSRBTree::from([5, 4, 3, 2, 1]);
    tree.clear();
    assert!(tree.is_empty());
    tree.insert(7);
    assert_eq!(tree.representation(), "b7");
}

#[test]
fn removal_policy_is_reported() {
    assert_eq!(OSRBTree::<i64>::new().removal_fixup(), RemovalFixup::Always);
    assert_eq!(OSRBTree::<i64>::default().removal_fixup(), RemovalFixup::Always);
    assert_eq!(
        OSRBTree::<i64>::with_removal_fixup(RemovalFixup::ChildPresent).removal_fixup(),
        RemovalFixup::ChildPresent
    );
}

#[test]
fn string_keys_are_looked_up_by_str() {
    let mut tree: OSRBTree<String> = ["pear", "apple", "fig"].into_iter().map(String::from).collect();
    assert_eq!(tree.representation(), "rapplebfigrpear");
    assert_eq!(tree.rank_of("fig"), Some(2));
    assert!(tree.remove("apple"));
    assert_eq!(tree.select(1).map(String::as_str), Some("fig"));
}

// ─── Duplicate placement ─────────────────────────────────────────────────────

/// A key that orders by `key` only and remembers when it was inserted.
#[derive(Clone, Debug)]
struct Tagged {
    key: i64,
    seq: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn equal_keys_keep_insertion_order() {
    let mut tree = OSRBTree::new();
    for (seq, key) in [4, 4, 1, 4, 9, 4].into_iter().enumerate() {
        tree.insert(Tagged { key, seq });
    }
    let seqs: Vec<usize> = in_order(&tree).into_iter().filter(|t| t.key == 4).map(|t| t.seq).collect();
    assert_eq!(seqs, [0, 1, 3, 5]);
}

// ─── Randomized ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        3 => key_strategy().prop_map(TreeOp::Insert),
        2 => key_strategy().prop_map(TreeOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random inserts and removes against a sorted `Vec` and checks size,
    /// selection and ranks after every step.
    #[test]
    fn ops_match_sorted_vec(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree = OSRBTree::new();
        let mut model: Vec<i64> = Vec::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(key) => {
                    tree.insert(key);
                    let at = model.partition_point(|&k| k <= key);
                    model.insert(at, key);
                }
                TreeOp::Remove(key) => {
                    let removed = tree.remove(&key);
                    let position = model.binary_search(&key).ok();
                    prop_assert_eq!(removed, position.is_some(), "remove({})", key);
                    if let Some(at) = position {
                        model.remove(at);
                    }
                }
            }
            prop_assert_eq!(tree.size(), model.len(), "size after {:?}", op);
        }

        check_tree(&tree);
        for (i, key) in model.iter().enumerate() {
            prop_assert_eq!(tree.select(i + 1), Some(key));
        }
        prop_assert!(tree.select(0).is_none());
        prop_assert!(tree.select(model.len() + 1).is_none());
        for key in &model {
            prop_assert_eq!(tree.rank_of(key), Some(model.partition_point(|k| k < key) + 1));
        }
    }

    /// Every intermediate tree satisfies all structural invariants.
    #[test]
    fn invariants_hold_at_every_step(ops in proptest::collection::vec(tree_op_strategy(), 0..500)) {
        let mut tree = OSRBTree::new();
        for op in ops {
            match op {
                TreeOp::Insert(key) => tree.insert(key),
                TreeOp::Remove(key) => {
                    tree.remove(&key);
                }
            }
            check_tree(&tree);
        }
    }

    /// Removing every inserted key, in any order, empties the tree.
    #[test]
    fn remove_everything_in_any_order(
        keys in proptest::collection::vec(key_strategy(), 0..300)
            .prop_flat_map(|keys| Just(keys.clone()).prop_shuffle().prop_map(move |order| (keys.clone(), order)))
    ) {
        let (keys, order) = keys;
        let mut tree = tree_from(&keys, RemovalFixup::Always);
        for key in &order {
            prop_assert!(tree.remove(key));
        }
        prop_assert_eq!(tree.size(), 0);
        prop_assert_eq!(tree.representation(), "");
        prop_assert!(tree.root().is_none());
    }

    /// Removing an absent key changes nothing, under either policy.
    #[test]
    fn removing_absent_key_is_idempotent(keys in proptest::collection::vec(0i64..100, 0..200), missing in 100i64..200) {
        for fixup in [RemovalFixup::Always, RemovalFixup::ChildPresent] {
            let mut tree = tree_from(&keys, fixup);
            let before = tree.representation();
            prop_assert!(!tree.remove(&missing));
            prop_assert_eq!(tree.representation(), before);
            prop_assert_eq!(tree.size(), keys.len());
        }
    }

    /// Duplicates stay in insertion order through unrelated removals and rebalancing.
    #[test]
    fn duplicates_stay_stable(
        keys in proptest::collection::vec(0i64..10, 1..300),
        removals in proptest::collection::vec(10i64..20, 0..50),
    ) {
        let mut tree = OSRBTree::new();
        for (seq, key) in keys.iter().copied().enumerate() {
            tree.insert(Tagged { key, seq });
        }
        for (offset, key) in removals.iter().copied().enumerate() {
            tree.insert(Tagged { key, seq: keys.len() + offset });
        }
        for key in removals {
            tree.remove(&Tagged { key, seq: 0 });
        }

        let items = in_order(&tree);
        prop_assert_eq!(items.len(), keys.len());
        for pair in items.windows(2) {
            prop_assert!(pair[0].key < pair[1].key || (pair[0].key == pair[1].key && pair[0].seq < pair[1].seq));
        }
    }
}
