mod file;
mod memory;

use std::{future::Future, io};

use tally_api::v1::{Title, Todo, TodoId, TodoPatch};

pub use file::FileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("failed to access data file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode data file: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to decode data file: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

pub trait TodoStore: Send + Sync + 'static {
    fn insert(&self, title: Title) -> impl Future<Output = StoreResult<Todo>> + Send;

    fn find(&self, id: TodoId) -> impl Future<Output = StoreResult<Todo>> + Send;

    /// All todos, newest first.
    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    fn update(
        &self,
        id: TodoId,
        patch: TodoPatch,
    ) -> impl Future<Output = StoreResult<Todo>> + Send;

    fn delete(&self, id: TodoId) -> impl Future<Output = StoreResult<Todo>> + Send;
}

/// Todos in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    todos: Vec<Todo>,
}

impl Collection {
    pub fn from_vec(todos: Vec<Todo>) -> Self {
        Self { todos }
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    pub fn insert(&mut self, title: Title) -> Todo {
        let todo = Todo::new(title);
        self.todos.push(todo.clone());
        todo
    }

    pub fn find(&self, id: TodoId) -> StoreResult<Todo> {
        (self.todos.iter())
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Sorted by creation time, newest first. Ties go to the later insert.
    pub fn newest_first(&self) -> Vec<Todo> {
        let mut todos: Vec<_> = self.todos.iter().rev().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).reverse());
        todos
    }

    pub fn update(&mut self, id: TodoId, patch: TodoPatch) -> StoreResult<Todo> {
        let todo = (self.todos.iter_mut())
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;

        todo.apply(patch);
        Ok(todo.clone())
    }

    pub fn remove(&mut self, id: TodoId) -> StoreResult<Todo> {
        let index = (self.todos.iter())
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;

        Ok(self.todos.remove(index))
    }
}
