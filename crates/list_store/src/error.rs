//! List store error types

use std::fmt;
use thiserror::Error;

/// What kind of name failed validation. Drives the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Todo,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::List => write!(f, "List name"),
            NameKind::Todo => write!(f, "Todo name"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListStoreError {
    #[error("{0} must be between 1 and 200 characters")]
    InvalidLength(NameKind),

    #[error("List name must be unique.")]
    DuplicateName,

    #[error("List {0} not found")]
    ListNotFound(usize),

    #[error("Todo {0} not found")]
    ItemNotFound(usize),
}

impl ListStoreError {
    /// Input errors the user can correct by resubmitting the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ListStoreError::InvalidLength(_) | ListStoreError::DuplicateName
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ListStoreError::ListNotFound(_) | ListStoreError::ItemNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ListStoreError>;
