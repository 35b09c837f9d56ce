use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("`{0}` cannot be null")]
    Null(&'static str),
}

/// Trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::TitleRequired);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    pub fn validate(&self) -> Result<Title, ValidationError> {
        match &self.title {
            Some(title) => Title::parse(title),
            None => Err(ValidationError::TitleRequired),
        }
    }
}

/// Partial update body.
///
/// The outer `Option` records whether a field was sent at all, the inner one
/// whether it was `null`. Absent fields are left alone; `null` is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<Option<bool>>,
}

impl UpdateTodo {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(Some(title.into())),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(Some(completed)),
        }
    }

    pub fn validate(&self) -> Result<TodoPatch, ValidationError> {
        let title = match &self.title {
            None => None,
            Some(None) => return Err(ValidationError::Null("title")),
            Some(Some(title)) => Some(Title::parse(title)?),
        };

        let completed = match self.completed {
            None => None,
            Some(None) => return Err(ValidationError::Null("completed")),
            Some(Some(completed)) => Some(completed),
        };

        Ok(TodoPatch { title, completed })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<Title>,
    pub completed: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        let title = Title::parse("  Buy milk \n").unwrap();
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn blank_titles_are_rejected() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(Title::parse(raw), Err(ValidationError::TitleRequired));
        }
    }

    #[test]
    fn create_requires_a_title() {
        let missing: CreateTodo = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.validate(), Err(ValidationError::TitleRequired));

        let null: CreateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(null.validate(), Err(ValidationError::TitleRequired));

        let blank = CreateTodo::new("  ");
        assert_eq!(blank.validate(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let absent: UpdateTodo = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(absent.title, None);
        assert_eq!(
            absent.validate().unwrap(),
            TodoPatch {
                title: None,
                completed: Some(true),
            }
        );

        let null: UpdateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(null.title, Some(None));
        assert_eq!(null.validate(), Err(ValidationError::Null("title")));

        let null: UpdateTodo = serde_json::from_str(r#"{"completed":null}"#).unwrap();
        assert_eq!(null.validate(), Err(ValidationError::Null("completed")));
    }

    #[test]
    fn update_trims_and_rejects_blank_titles() {
        let patch = UpdateTodo::title("  Walk dog ").validate().unwrap();
        assert_eq!(patch.title.unwrap().as_str(), "Walk dog");
        assert_eq!(patch.completed, None);

        assert_eq!(
            UpdateTodo::title(" ").validate(),
            Err(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let body = serde_json::to_string(&UpdateTodo::completed(true)).unwrap();
        assert_eq!(body, r#"{"completed":true}"#);
    }
}
