pub mod list_controller;
pub mod todo_controller;

use actix_web::{http::header, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;

pub(crate) const LIST_NOT_FOUND: &str = "The specified list was not found.";

/// 303 so the browser follows up with a GET
pub(crate) fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// Parse a list or todo position taken from the URL.
pub(crate) fn parse_index(raw: &str, kind: &str) -> Result<usize, AppError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| AppError::NotFound(format!("{} {} not found", kind, raw)))
}

#[derive(Deserialize)]
pub(crate) struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

#[derive(Deserialize)]
pub(crate) struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

#[derive(Deserialize)]
pub(crate) struct CompletedForm {
    #[serde(default)]
    pub completed: String,
}

impl CompletedForm {
    /// Only the literal "true" marks a todo completed
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("3", "List").unwrap(), 3);
        let err = parse_index("abc", "List").unwrap_err();
        assert_eq!(err.to_string(), "List abc not found");
        assert!(parse_index("-1", "Todo").is_err());
    }

    #[test]
    fn test_completed_form() {
        let yes = CompletedForm {
            completed: "true".into(),
        };
        let no = CompletedForm {
            completed: "TRUE".into(),
        };
        assert!(yes.is_completed());
        assert!(!no.is_completed());
    }
}
