mod request;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use request::{CreateTodo, Title, TodoPatch, UpdateTodo, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: Title) -> Self {
        Self {
            id: TodoId::generate(),
            title: title.into_inner(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title.into_inner();
        }

        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl Health {
    pub fn ok() -> Self {
        Self {
            status: String::from("OK"),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn todo_uses_camel_case_on_the_wire() {
        let todo = Todo::new(Title::parse("Buy milk").unwrap());
        let value = serde_json::to_value(&todo).unwrap();

        assert_eq!(value["id"], json!(todo.id.to_string()));
        assert_eq!(value["title"], json!("Buy milk"));
        assert_eq!(value["completed"], json!(false));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut todo = Todo::new(Title::parse("Buy milk").unwrap());

        todo.apply(TodoPatch {
            title: None,
            completed: Some(true),
        });
        assert_eq!(todo.title, "Buy milk");
        assert!(todo.completed);

        todo.apply(TodoPatch {
            title: Some(Title::parse("Buy oat milk").unwrap()),
            completed: None,
        });
        assert_eq!(todo.title, "Buy oat milk");
        assert!(todo.completed);
    }

    #[test]
    fn todo_id_parses_its_own_display() {
        let id = TodoId::generate();
        assert_eq!(id.to_string().parse::<TodoId>().unwrap(), id);
        assert!("not-an-id".parse::<TodoId>().is_err());
    }
}
