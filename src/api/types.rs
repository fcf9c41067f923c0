// API request/response types

use serde::{Deserialize, Serialize};

use crate::store::Todo;

/// Body of `POST /todos`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /todos/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// `GET /todos` response: `{ success, count, data }`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Todo>,
}

/// Single-record success response. `message` is present on mutations only.
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Todo,
}

/// Validation / not-found error body: `{ success: false, error }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
