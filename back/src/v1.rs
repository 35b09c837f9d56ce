use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tally_api::v1::{CreateTodo, Health, Message, Todo, TodoId, UpdateTodo};
use tracing::{debug, info};

use crate::{error::ApiError, store::TodoStore, AppState};

pub fn router<S: TodoStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", put(update_todo::<S>).delete(delete_todo::<S>))
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn list_todos<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = (state.store.find_all().await)
        .map_err(ApiError::store(StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(todos))
}

async fn create_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(body) = body?;
    let title = body.validate()?;

    let todo = (state.store.insert(title).await)
        .map_err(ApiError::store(StatusCode::BAD_REQUEST))?;

    info!(
        id = %todo.id,
        title = %todo.title,
        "created todo"
    );

    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = body?;
    let patch = body.validate()?;

    let store = ApiError::store(StatusCode::BAD_REQUEST);

    if patch.title.is_none() && patch.completed.is_none() {
        let todo = state.store.find(id).await.map_err(store)?;
        return Ok(Json(todo));
    }

    let todo = state.store.update(id, patch).await.map_err(store)?;

    info!(
        id = %todo.id,
        title = %todo.title,
        completed = todo.completed,
        "updated todo"
    );

    Ok(Json(todo))
}

async fn delete_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id)?;

    let todo = (state.store.delete(id).await)
        .map_err(ApiError::store(StatusCode::INTERNAL_SERVER_ERROR))?;

    info!(id = %todo.id, "deleted todo");

    Ok(Json(Message::new("Todo deleted")))
}

/// An id that does not parse cannot name a stored todo.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|err| {
        debug!(id = raw, error = %err, "malformed todo id");
        ApiError::NotFound
    })
}
