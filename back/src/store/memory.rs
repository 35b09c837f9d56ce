use tally_api::v1::{Title, Todo, TodoId, TodoPatch};
use tokio::sync::Mutex;

use super::{Collection, StoreResult, TodoStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: Mutex<Collection>,
}

impl TodoStore for MemoryStore {
    async fn insert(&self, title: Title) -> StoreResult<Todo> {
        Ok(self.todos.lock().await.insert(title))
    }

    async fn find(&self, id: TodoId) -> StoreResult<Todo> {
        self.todos.lock().await.find(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.todos.lock().await.newest_first())
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> StoreResult<Todo> {
        self.todos.lock().await.update(id, patch)
    }

    async fn delete(&self, id: TodoId) -> StoreResult<Todo> {
        self.todos.lock().await.remove(id)
    }
}
