//! Todo API endpoints.
//!
//! - POST /todos - Create a todo
//! - GET /todos - List todos, optionally filtered by `title`,
//!   `description` and `completed`
//! - GET /todos/:id - Get one todo
//! - PUT|PATCH /todos/:id - Partially update a todo
//! - DELETE /todos/:id - Delete a todo

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use todo::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};

// ============================================================================
// Request Types
// ============================================================================

/// Request to create a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Todo title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
        }
    }
}

/// Request to update a todo. Absent (or `null`) fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New completion flag
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            completed: request.completed,
        }
    }
}

/// Query parameters for searching todos.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// Exact completion state
    pub completed: Option<bool>,
}

impl From<SearchQuery> for TodoFilter {
    fn from(query: SearchQuery) -> Self {
        Self {
            title: query.title,
            description: query.description,
            completed: query.completed,
        }
    }
}

/// Parse a path id; anything that is not an id names no todo.
fn parse_id(raw: &str) -> WebResult<TodoId> {
    raw.parse()
        .map_err(|_| AppError::not_found("Todo not found"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a todo.
///
/// # Errors
///
/// 400 for a malformed body or a title/description that fails validation.
#[allow(clippy::unused_async)]
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<Todo>)> {
    let Json(request) = body?;
    let todo = state.service().create_todo(request.into())?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// List todos matching every given criterion.
///
/// # Errors
///
/// 400 for unparsable query parameters.
#[allow(clippy::unused_async)]
pub async fn list_todos(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> WebResult<Json<Vec<Todo>>> {
    let Query(query) = query?;
    let todos = state.service().find_todos(&query.into())?;
    Ok(Json(todos))
}

/// Get one todo.
///
/// # Errors
///
/// 404 if the id is unknown.
#[allow(clippy::unused_async)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<Todo>> {
    let todo = state.service().get_todo(&parse_id(&id)?)?;
    Ok(Json(todo))
}

/// Partially update a todo.
///
/// # Errors
///
/// 404 if the id is unknown, 400 for a malformed body, a validation failure
/// or an attempt to change a completed todo.
#[allow(clippy::unused_async)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> WebResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let Json(request) = body?;
    let todo = state.service().update_todo(&id, request.into())?;
    Ok(Json(todo))
}

/// Delete a todo.
///
/// # Errors
///
/// 404 if the id is unknown.
#[allow(clippy::unused_async)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.service().delete_todo(&parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}
