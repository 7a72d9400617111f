//! The line protocol of the interactive driver: `+ <key>` inserts, `- <key>` removes.
//!
//! # Examples
//!
//! ```
//! use osrb_tree::command::{Command, parse_line};
//! use osrb_tree::OSRBTree;
//!
//! let mut tree = OSRBTree::new();
//! for line in ["+ 10", "+85", "", "+ 15", "- 85"] {
//!     if let Some(command) = parse_line::<i32>(line).unwrap() {
//!         command.apply(&mut tree);
//!     }
//! }
//! assert_eq!(tree.representation(), "r10b15");
//! assert_eq!(parse_line::<i32>("q").unwrap(), Some(Command::Stop));
//! ```

use alloc::string::{String, ToString};
use core::str::FromStr;

use thiserror::Error;

use crate::OSRBTree;

/// One parsed input line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command<T> {
    Insert(T),
    Remove(T),
    /// Any line that does not start with `+` or `-` ends the session.
    Stop,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CommandError {
    #[error("`{op}` needs a key")]
    MissingKey { op: char },

    #[error("invalid key `{text}`: {reason}")]
    InvalidKey { text: String, reason: String },
}

impl<T: Ord> Command<T> {
    /// Applies the command to `tree`. Returns `false` for [`Command::Stop`].
    pub fn apply(self, tree: &mut OSRBTree<T>) -> bool {
        match self {
            Command::Insert(key) => tree.insert(key),
            Command::Remove(key) => {
                tree.remove(&key);
            }
            Command::Stop => return false,
        }
        true
    }
}

/// Parses one line. Blank lines yield `Ok(None)`.
///
/// The key is the first whitespace-separated token after the operator; the rest of
/// the line is ignored, so `+ 5 junk` inserts 5.
///
/// # Errors
///
/// Returns [`CommandError`] when a `+` or `-` is not followed by a key that parses as `T`.
pub fn parse_line<T>(line: &str) -> Result<Option<Command<T>>, CommandError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let line = line.trim();
    let mut chars = line.chars();
    let Some(op) = chars.next() else {
        return Ok(None);
    };

    let make: fn(T) -> Command<T> = match op {
        '+' => Command::Insert,
        '-' => Command::Remove,
        _ => return Ok(Some(Command::Stop)),
    };

    // Only the first token is the key; anything after it is ignored.
    let Some(text) = chars.as_str().split_whitespace().next() else {
        return Err(CommandError::MissingKey { op });
    };
    let key = text.parse::<T>().map_err(|err| CommandError::InvalidKey {
        text: text.to_string(),
        reason: err.to_string(),
    })?;
    Ok(Some(make(key)))
}
