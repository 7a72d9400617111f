//! An order-statistic red-black tree for Rust.
//!
//! This crate provides [`OSRBTree`], an ordered multiset backed by a red-black tree whose
//! nodes also record the size of their subtree. Besides O(log n) insertion and removal of
//! possibly-duplicate keys it answers order-statistic queries in O(log n):
//!
//! - [`select`](OSRBTree::select) - The k-th smallest key (1-indexed)
//! - [`rank_of`](OSRBTree::rank_of) - The 1-based position of a key
//! - Indexing by [`Rank`] - e.g., `tree[Rank(1)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTree, Rank};
//!
//! let mut tree = OSRBTree::new();
//! for key in [10, 85, 15, 70, 20, 60, 30, 50, 65, 80, 90, 40, 5, 55] {
//!     tree.insert(key);
//! }
//!
//! // Each node as its color tag and key, in key order.
//! assert_eq!(tree.representation(), "r5b10b15b20b30r40b50r55r60b65b70r80b85r90");
//!
//! // The median of 14 keys.
//! assert_eq!(tree.select(7), Some(&50));
//! assert_eq!(tree[Rank(7)], 50);
//! assert_eq!(tree.rank_of(&50), Some(7));
//!
//! tree.remove(&50);
//! assert_eq!(tree.select(7), Some(&55));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Duplicate keys** - Equal keys are kept in insertion order
//! - **Inspectable** - [`OSRBTree::root`] hands out read-only [`NodeRef`] cursors, and
//!   [`OSRBTree::diagram`] draws the tree as ASCII art
//! - **`repl`** - Builds the `osrb_repl` binary, which drives a tree from `+`/`-` lines
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by handle: children are owned links,
//! the parent link is a plain back-reference. Rotations, transplants and recoloring keep
//! both the red-black coloring and the subtree counts exact after every public call.

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod color;
mod order_statistic;
mod raw;

pub mod command;
pub mod config;
pub mod osrb_tree;
pub mod render;

pub use color::Color;
pub use config::{RemovalFixup, RenderStyle};
pub use order_statistic::Rank;
pub use osrb_tree::{NodeRef, OSRBTree};
