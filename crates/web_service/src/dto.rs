//! Response shapes for the list pages
use list_store::{display_order, Item, TodoList};
use serde::{Deserialize, Serialize};

use crate::services::session_store::Flash;

/// One row on the lists page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListSummaryDTO {
    /// Position in the session's lists; valid until the next deletion
    pub id: usize,
    pub name: String,
    pub item_count: usize,
    pub remaining_count: usize,
    pub is_complete: bool,
}

impl ListSummaryDTO {
    pub fn from_list(id: usize, list: &TodoList) -> Self {
        Self {
            id,
            name: list.name.clone(),
            item_count: list.item_count(),
            remaining_count: list.remaining_count(),
            is_complete: list.is_complete(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListsPageDTO {
    pub lists: Vec<ListSummaryDTO>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl ListsPageDTO {
    pub fn new(lists: &[TodoList], flash: Option<Flash>) -> Self {
        Self {
            lists: display_order(lists)
                .map(|(list, id)| ListSummaryDTO::from_list(id, list))
                .collect(),
            flash,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoDTO {
    /// Position in the list; valid until the next deletion
    pub id: usize,
    pub name: String,
    pub completed: bool,
}

impl TodoDTO {
    fn from_item(id: usize, item: &Item) -> Self {
        Self {
            id,
            name: item.name.clone(),
            completed: item.completed,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListPageDTO {
    pub id: usize,
    pub name: String,
    pub todos: Vec<TodoDTO>,
    pub item_count: usize,
    pub remaining_count: usize,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl ListPageDTO {
    pub fn new(id: usize, list: &TodoList, flash: Option<Flash>) -> Self {
        Self {
            id,
            name: list.name.clone(),
            todos: display_order(&list.items)
                .map(|(item, index)| TodoDTO::from_item(index, item))
                .collect(),
            item_count: list.item_count(),
            remaining_count: list.remaining_count(),
            is_complete: list.is_complete(),
            flash,
        }
    }
}

/// State for the new/edit list forms
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListFormDTO {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub list_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_store::ListCollection;

    #[test]
    fn test_lists_page_orders_complete_lists_last() {
        let mut collection = ListCollection::new();
        collection.create_list("Done").unwrap();
        collection.create_list("Open").unwrap();
        let done = collection.list_mut(0).unwrap();
        done.add_item("x").unwrap();
        done.complete_all();

        let page = ListsPageDTO::new(&collection.lists, None);
        let order: Vec<_> = page.lists.iter().map(|l| (l.name.as_str(), l.id)).collect();
        assert_eq!(order, vec![("Open", 1), ("Done", 0)]);
        assert!(page.lists[1].is_complete);
        assert!(!page.lists[0].is_complete);
    }

    #[test]
    fn test_list_page_keeps_stored_todo_ids() {
        let mut list = TodoList::new("Today");
        for name in ["Buy", "Wash", "Cook"] {
            list.add_item(name).unwrap();
        }
        list.set_item_completed(1, true).unwrap();

        let page = ListPageDTO::new(4, &list, Some(Flash::success("ok")));
        let ids: Vec<_> = page.todos.iter().map(|t| (t.name.as_str(), t.id)).collect();
        assert_eq!(ids, vec![("Buy", 0), ("Cook", 2), ("Wash", 1)]);
        assert_eq!(page.id, 4);
        assert_eq!(page.remaining_count, 2);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["flash"]["kind"], "success");
    }
}
