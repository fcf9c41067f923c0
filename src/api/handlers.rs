// CRUD handlers module
// One handler per operation: extract input, validate, delegate to the
// store, map the result to a response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{self, json_response};
use super::types::{CreateTodoRequest, ListResponse, TodoResponse, UpdateTodoRequest};
use crate::config::AppState;
use crate::logger;
use crate::store::TodoPatch;

/// Maximum accepted title length, in characters.
const MAX_TITLE_LEN: usize = 200;

/// `GET /` - service metadata
pub fn handle_index(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &serde_json::json!({
            "message": state.config.http.server_name,
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "createTodo": "POST /todos",
                "getAllTodos": "GET /todos",
                "getTodoById": "GET /todos/{id}",
                "updateTodo": "PUT /todos/{id}",
                "deleteTodo": "DELETE /todos/{id}"
            }
        }),
    )
}

/// `GET /todos` - list the full collection
pub async fn handle_list(state: &AppState) -> Response<Full<Bytes>> {
    let todos = state.store.get_all().await;
    json_response(
        StatusCode::OK,
        &ListResponse {
            success: true,
            count: todos.len(),
            data: todos,
        },
    )
}

/// `GET /todos/{id}` - fetch a single todo
pub async fn handle_get(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.get_by_id(id).await {
        Ok(todo) => json_response(
            StatusCode::OK,
            &TodoResponse {
                success: true,
                message: None,
                data: todo,
            },
        ),
        Err(e) => response::store_error_response(&e),
    }
}

/// `POST /todos` - create a todo
pub async fn handle_create(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    let request: CreateTodoRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let title = match request.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => return response::bad_request("Title is required"),
    };
    if title.chars().count() > MAX_TITLE_LEN {
        return response::bad_request("Title must be less than 200 characters");
    }

    match state
        .store
        .create(title, request.completed.unwrap_or(false))
        .await
    {
        Ok(todo) => json_response(
            StatusCode::CREATED,
            &TodoResponse {
                success: true,
                message: Some("Todo created successfully".to_string()),
                data: todo,
            },
        ),
        Err(e) => response::store_error_response(&e),
    }
}

/// `PUT /todos/{id}` - partially update a todo
pub async fn handle_update(state: &AppState, id: &str, body: &[u8]) -> Response<Full<Bytes>> {
    // Existence is checked before the patch is validated
    if !state.store.exists(id).await {
        return response::todo_not_found();
    }

    let request: UpdateTodoRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return response::bad_request("Title cannot be empty");
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return response::bad_request("Title must be less than 200 characters");
        }
    }

    let patch = TodoPatch {
        title: request.title,
        completed: request.completed,
    };
    match state.store.update(id, patch).await {
        Ok(todo) => json_response(
            StatusCode::OK,
            &TodoResponse {
                success: true,
                message: Some("Todo updated successfully".to_string()),
                data: todo,
            },
        ),
        Err(e) => response::store_error_response(&e),
    }
}

/// `DELETE /todos/{id}` - remove a todo
pub async fn handle_delete(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.delete(id).await {
        Ok(todo) => json_response(
            StatusCode::OK,
            &TodoResponse {
                success: true,
                message: Some("Todo deleted successfully".to_string()),
                data: todo,
            },
        ),
        Err(e) => response::store_error_response(&e),
    }
}

/// Parse a JSON request body. An empty body is treated as an empty object,
/// so requests without a payload fall through to field-level validation.
fn parse_body<T: Default + serde::de::DeserializeOwned>(
    body: &[u8],
) -> Result<T, Response<Full<Bytes>>> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        logger::log_warning(&format!("Rejected request body: {e}"));
        response::bad_request("Invalid JSON body")
    })
}
