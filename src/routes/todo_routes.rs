//! Todo CRUD endpoint handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, patch},
    Json, Router,
};

use crate::models::{
    CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest, User,
};
use crate::state::AppState;
use crate::todos;
use crate::utils::http_helpers::HTTPError;

/// Registers todo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(get_todos).post(create_todo))
        .route("/todos/:item_id", patch(update_todo).delete(delete_todo))
}

/// Creates a todo for the caller. The server assigns id, creation time and `done = false`.
async fn create_todo(
    user: User,
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), HTTPError> {
    let Json(request) = body?;
    let item = todos::create_todo(state.store.as_ref(), &user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse { item })))
}

/// Lists every todo owned by the caller. Paging is left to the client.
async fn get_todos(
    user: User,
    State(state): State<AppState>,
) -> Result<Json<TodoListResponse>, HTTPError> {
    let items = todos::get_todos(state.store.as_ref(), &user.user_id).await?;
    Ok(Json(TodoListResponse { items }))
}

async fn update_todo(
    user: User,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, HTTPError> {
    let Json(request) = body?;
    let item =
        todos::update_todo(state.store.as_ref(), &user.user_id, &item_id, request).await?;
    Ok(Json(TodoResponse { item }))
}

async fn delete_todo(
    user: User,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, HTTPError> {
    todos::delete_todo(state.store.as_ref(), &user.user_id, &item_id).await?;
    Ok(StatusCode::OK)
}
