pub mod api;
pub mod command;
pub mod todo;
pub mod ui;

use tally_api::v1::{CreateTodo, Todo, TodoId, UpdateTodo};
use tracing::error;

pub const FETCH_FAILED: &str = "Failed to fetch todos";
pub const ADD_FAILED: &str = "Failed to add todo";
pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";

#[derive(Clone, Debug, Default)]
pub struct Data {
    pub todos: Vec<Todo>,
    pub draft: String,
    pub loading: bool,
    pub error: Option<&'static str>,
}

#[derive(Debug)]
pub enum Msg {
    Loaded(eyre::Result<Vec<Todo>>),
    Created(eyre::Result<Todo>),
    Toggled(eyre::Result<Todo>),
    Deleted(TodoId, eyre::Result<()>),
}

impl Data {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    pub fn begin_create(&mut self) -> Option<CreateTodo> {
        if !self.can_submit() {
            return None;
        }

        self.loading = true;
        Some(CreateTodo::new(self.draft.trim()))
    }

    pub fn toggle(&self, index: usize) -> Option<(TodoId, UpdateTodo)> {
        let todo = self.todos.get(index)?;
        Some((todo.id, UpdateTodo::completed(!todo.completed)))
    }

    pub fn delete(&self, index: usize) -> Option<TodoId> {
        self.todos.get(index).map(|todo| todo.id)
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;

                match result {
                    Ok(todos) => {
                        self.todos = todos;
                        self.error = None;
                    }
                    Err(err) => self.fail(FETCH_FAILED, err),
                }
            }
            Msg::Created(result) => {
                self.loading = false;

                match result {
                    Ok(todo) => {
                        self.todos.insert(0, todo);
                        self.draft.clear();
                        self.error = None;
                    }
                    Err(err) => self.fail(ADD_FAILED, err),
                }
            }
            Msg::Toggled(Ok(todo)) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
                    *slot = todo;
                }

                self.error = None;
            }
            Msg::Toggled(Err(err)) => self.fail(UPDATE_FAILED, err),
            Msg::Deleted(id, Ok(())) => {
                self.todos.retain(|todo| todo.id != id);
                self.error = None;
            }
            Msg::Deleted(_, Err(err)) => self.fail(DELETE_FAILED, err),
        }
    }

    fn fail(&mut self, message: &'static str, err: eyre::Report) {
        error!("{}: {:?}", message, err);
        self.error = Some(message);
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    pub fn percent_done(&self) -> Option<u32> {
        let total = self.total_count();

        if total == 0 {
            return None;
        }

        let ratio = self.completed_count() as f64 / total as f64;
        Some((ratio * 100.0).round() as u32)
    }
}
