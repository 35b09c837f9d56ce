pub mod todo_input;

use std::fmt;

use crate::{todo, Data};

pub fn view(data: &Data) -> Screen<'_> {
    Screen(data)
}

pub struct Screen<'a>(&'a Data);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;

        writeln!(f, "Simple Todo App")?;
        writeln!(f, "Stay organized and productive")?;
        writeln!(f)?;

        if let Some(error) = data.error {
            writeln!(f, "! {}", error)?;
            writeln!(f)?;
        }

        writeln!(f, "{}", todo_input::view(data))?;

        write!(
            f,
            "{} of {} completed",
            data.completed_count(),
            data.total_count()
        )?;
        if let Some(percent) = data.percent_done() {
            write!(f, " | {}% done", percent)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if data.loading && data.todos.is_empty() {
            return write!(f, "Loading todos...");
        }

        if data.todos.is_empty() {
            writeln!(f, "No todos yet!")?;
            return write!(f, "Add your first todo above to get started.");
        }

        for (i, item) in data.todos.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", todo::view(i + 1, item))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tally_api::v1::{Title, Todo};

    use super::*;
    use crate::FETCH_FAILED;

    fn todo(title: &str, completed: bool) -> Todo {
        let mut todo = Todo::new(Title::parse(title).unwrap());
        todo.completed = completed;
        todo
    }

    #[test]
    fn loading_indicator_only_shows_for_an_empty_list() {
        let mut data = Data::default();
        data.begin_load();

        let screen = view(&data).to_string();
        assert!(screen.ends_with("Loading todos..."));
        assert!(!screen.contains("No todos yet!"));

        data.todos.push(todo("Buy milk", false));
        let screen = view(&data).to_string();
        assert!(!screen.contains("Loading todos..."));
        assert!(screen.ends_with("  1. [ ] Buy milk"));
    }

    #[test]
    fn empty_list_shows_the_placeholder() {
        let screen = view(&Data::default()).to_string();

        assert!(screen.contains("No todos yet!"));
        assert!(screen.contains("0 of 0 completed"));
        assert!(!screen.contains("% done"));
        assert!(!screen.contains("Loading todos..."));
    }

    #[test]
    fn full_screen() {
        let data = Data {
            todos: vec![todo("Walk dog", true), todo("Buy milk", false)],
            draft: String::from("Call mom"),
            loading: false,
            error: Some(FETCH_FAILED),
        };

        let expected = "\
Simple Todo App
Stay organized and productive

! Failed to fetch todos

> Call mom  [Add]
1 of 2 completed | 50% done

  1. [x] Walk dog
  2. [ ] Buy milk";

        assert_eq!(view(&data).to_string(), expected);
    }
}
