//! ASCII diagrams of a tree, built only from [`NodeRef`] accessors.
//!
//! Every node is drawn as its label (see [`NodeRef::write_label`]). A parent's label
//! sits between its two subtree blocks, joined to each child by a run of `_` on the
//! label row and a `/` or `\` on the row below, directly above the child label's
//! centre column.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display};

use crate::config::RenderStyle;
use crate::osrb_tree::NodeRef;

/// A lazily rendered diagram, produced by [`OSRBTree::diagram`](crate::OSRBTree::diagram).
///
/// Every row ends with `\n` and carries no trailing spaces. An empty tree renders
/// as the empty string.
pub struct Diagram<'a, T> {
    root: Option<NodeRef<'a, T>>,
    style: RenderStyle,
}

impl<'a, T> Diagram<'a, T> {
    #[must_use]
    pub fn new(root: Option<NodeRef<'a, T>>, style: RenderStyle) -> Self {
        Self { root, style }
    }
}

impl<T: Display> Display for Diagram<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return Ok(());
        };
        let block = Block::layout(root, self.style)?;
        for line in &block.lines {
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// A rectangle of text holding one subtree.
struct Block {
    lines: Vec<String>,
    width: usize,
    // Column of the root label's centre, where the parent's connector points.
    anchor: usize,
}

impl Block {
    fn layout<T: Display>(node: NodeRef<'_, T>, style: RenderStyle) -> Result<Self, fmt::Error> {
        let mut label = String::new();
        node.write_label(&mut label, style.show_counts)?;
        let label_width = label.chars().count();

        let left = node.left().map(|left| Self::layout(left, style)).transpose()?;
        let right = node.right().map(|right| Self::layout(right, style)).transpose()?;

        let mut first = String::new();
        let mut second = String::new();

        // Label row and connector row, left part.
        let left_width = match &left {
            Some(left) => {
                pad(&mut first, ' ', left.anchor + 1);
                pad(&mut first, '_', left.width - left.anchor - 1);
                pad(&mut second, ' ', left.anchor);
                second.push('/');
                pad(&mut second, ' ', left.width - left.anchor - 1);
                left.width
            }
            None => 0,
        };

        first.push_str(&label);
        pad(&mut second, ' ', label_width);

        // Label row and connector row, right part.
        let right_width = match &right {
            Some(right) => {
                pad(&mut first, '_', right.anchor);
                pad(&mut first, ' ', right.width - right.anchor);
                pad(&mut second, ' ', right.anchor);
                second.push('\\');
                pad(&mut second, ' ', right.width - right.anchor - 1);
                right.width
            }
            None => 0,
        };

        let width = left_width + label_width + right_width;
        let anchor = left_width + label_width / 2;

        if left.is_none() && right.is_none() {
            return Ok(Self {
                lines: alloc::vec![first],
                width,
                anchor,
            });
        }

        let mut lines = alloc::vec![first, second];
        let left_lines = left.as_ref().map_or(&[][..], |b| &b.lines[..]);
        let right_lines = right.as_ref().map_or(&[][..], |b| &b.lines[..]);
        for row in 0..left_lines.len().max(right_lines.len()) {
            let mut line = String::with_capacity(width);
            match left_lines.get(row) {
                Some(text) => line.push_str(text),
                None => pad(&mut line, ' ', left_width),
            }
            pad(&mut line, ' ', label_width);
            match right_lines.get(row) {
                Some(text) => line.push_str(text),
                None => pad(&mut line, ' ', right_width),
            }
            lines.push(line);
        }

        Ok(Self { lines, width, anchor })
    }
}

fn pad(line: &mut String, fill: char, n: usize) {
    line.extend(core::iter::repeat_n(fill, n));
}
