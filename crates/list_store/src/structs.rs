//! List store data structures

use serde::{Deserialize, Serialize};

/// A single todo within a list. Addressed by its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    #[serde(default)]
    pub completed: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
        }
    }
}

/// A named list of todos. Addressed by its position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,

    /// Insertion order is the canonical order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// All lists owned by one session.
///
/// The collection is owned by the caller (normally a session store) and
/// passed by reference into every operation; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCollection {
    pub lists: Vec<TodoList>,
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
