//! Command allow-list - the only authorization boundary for execution
//!
//! A command is allowed when its leading whitespace-delimited token exactly
//! equals an allow-list entry. Nothing after that token is inspected:
//! `git status; rm -rf /` is allowed whenever `git` is, and the shell runs
//! the whole line. Operators must only allow commands they would trust with
//! arbitrary trailing shell text.

use std::collections::BTreeSet;
use std::fmt;

/// Commands allowed out of the box
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] =
    &["git", "ls", "mkdir", "npm", "npx", "python", "make"];

/// Case-sensitive set of allowed command names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    commands: BTreeSet<String>,
}

impl AllowList {
    /// Empty list; nothing is allowed
    pub fn empty() -> Self {
        Self {
            commands: BTreeSet::new(),
        }
    }

    /// Default commands plus `extra`, deduplicated
    pub fn with_defaults<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::empty();
        list.extend(DEFAULT_ALLOWED_COMMANDS.iter().copied());
        list.extend(extra);
        list
    }

    /// Check if a command may run
    pub fn is_allowed(&self, command: &str) -> bool {
        self.commands.contains(leading_token(command))
    }

    /// Add a command; returns `false` if it was already present
    pub fn insert(&mut self, command: impl Into<String>) -> bool {
        self.commands.insert(command.into())
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains(command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.commands.iter().cloned().collect()
    }
}

impl<S: Into<String>> Extend<S> for AllowList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for command in iter {
            self.insert(command);
        }
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Text before the first whitespace character
///
/// No trimming: a command starting with whitespace has an empty leading token.
pub fn leading_token(command: &str) -> &str {
    command.split(char::is_whitespace).next().unwrap_or_default()
}
