//! Mutations on a session's lists and their todos.
//!
//! Lists and todos have no identity beyond their position. Every index is
//! only meaningful against the collection as it was when the index was
//! handed out; deleting an element shifts everything after it down by one.

use crate::error::{ListStoreError, NameKind, Result};
use crate::structs::{Item, ListCollection, TodoList};
use tracing::debug;

pub const MIN_NAME_LEN: usize = 1;
pub const MAX_NAME_LEN: usize = 200;

/// Trim `raw` and check its length, returning the trimmed name.
pub fn validate_name(kind: NameKind, raw: &str) -> Result<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(ListStoreError::InvalidLength(kind));
    }
    Ok(name.to_string())
}

impl ListCollection {
    pub fn list(&self, index: usize) -> Result<&TodoList> {
        self.lists
            .get(index)
            .ok_or(ListStoreError::ListNotFound(index))
    }

    pub fn list_mut(&mut self, index: usize) -> Result<&mut TodoList> {
        self.lists
            .get_mut(index)
            .ok_or(ListStoreError::ListNotFound(index))
    }

    fn name_taken(&self, name: &str, except: Option<usize>) -> bool {
        self.lists
            .iter()
            .enumerate()
            .any(|(i, list)| Some(i) != except && list.name == name)
    }

    /// Append a new empty list and return its index.
    pub fn create_list(&mut self, name: &str) -> Result<usize> {
        let name = validate_name(NameKind::List, name)?;
        if self.name_taken(&name, None) {
            return Err(ListStoreError::DuplicateName);
        }

        let index = self.lists.len();
        debug!(index, name = %name, "created list");
        self.lists.push(TodoList::new(name));
        Ok(index)
    }

    /// Rename a list in place. A list never conflicts with its own name.
    pub fn rename_list(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.lists.len() {
            return Err(ListStoreError::ListNotFound(index));
        }
        let name = validate_name(NameKind::List, new_name)?;
        if self.name_taken(&name, Some(index)) {
            return Err(ListStoreError::DuplicateName);
        }

        debug!(index, name = %name, "renamed list");
        self.lists[index].name = name;
        Ok(())
    }

    /// Remove and return the list at `index`.
    pub fn delete_list(&mut self, index: usize) -> Result<TodoList> {
        if index >= self.lists.len() {
            return Err(ListStoreError::ListNotFound(index));
        }
        let removed = self.lists.remove(index);
        debug!(index, name = %removed.name, "deleted list");
        Ok(removed)
    }
}

impl TodoList {
    /// Append a todo and return its index. Todo names need not be unique.
    pub fn add_item(&mut self, name: &str) -> Result<usize> {
        let name = validate_name(NameKind::Todo, name)?;
        let index = self.items.len();
        debug!(list = %self.name, index, name = %name, "added todo");
        self.items.push(Item::new(name));
        Ok(index)
    }

    /// Remove and return the todo at `index`.
    pub fn delete_item(&mut self, index: usize) -> Result<Item> {
        if index >= self.items.len() {
            return Err(ListStoreError::ItemNotFound(index));
        }
        let removed = self.items.remove(index);
        debug!(list = %self.name, index, name = %removed.name, "deleted todo");
        Ok(removed)
    }

    pub fn set_item_completed(&mut self, index: usize, completed: bool) -> Result<()> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(ListStoreError::ItemNotFound(index))?;
        item.completed = completed;
        debug!(list = %self.name, index, completed, "updated todo");
        Ok(())
    }

    /// Mark every todo completed. Empty lists are left as they are.
    pub fn complete_all(&mut self) {
        for item in &mut self.items {
            item.completed = true;
        }
        debug!(list = %self.name, count = self.items.len(), "completed all todos");
    }
}
