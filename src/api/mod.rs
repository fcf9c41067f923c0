//! HTTP API module
//!
//! Declarative binding of (method, path) pairs to the CRUD handlers.
//! Collects the request body up front so handlers work on plain bytes.

mod handlers;
mod response;
mod types;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Main entry point for request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Reject oversized bodies before buffering them
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        log_request(&state, &method, &path, &resp);
        return Ok(resp);
    }

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            let resp = response::bad_request("Failed to read request body");
            log_request(&state, &method, &path, &resp);
            return Ok(resp);
        }
    };

    let resp = route(&method, &path, &body, &state).await;
    log_request(&state, &method, &path, &resp);
    Ok(resp)
}

/// Route table: (method, path) -> handler.
async fn route(
    method: &Method,
    path: &str,
    body: &Bytes,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/") => handlers::handle_index(state),
        (&Method::GET, "/todos") => handlers::handle_list(state).await,
        (&Method::POST, "/todos") => handlers::handle_create(state, body).await,
        _ => match path.strip_prefix("/todos/") {
            Some(id) if !id.is_empty() && !id.contains('/') => match method {
                &Method::GET => handlers::handle_get(state, id).await,
                &Method::PUT => handlers::handle_update(state, id, body).await,
                &Method::DELETE => handlers::handle_delete(state, id).await,
                _ => response::route_not_found(),
            },
            _ => response::route_not_found(),
        },
    }
}

/// Validate the Content-Length header against the configured cap.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn log_request(state: &AppState, method: &Method, path: &str, resp: &Response<Full<Bytes>>) {
    if state.config.logging.access_log {
        logger::log_request(method.as_str(), path, resp.status().as_u16());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{MemoryStorage, TodoStore};
    use hyper::StatusCode;

    fn test_state() -> AppState {
        let config = Config::load_from("missing-test-config").unwrap();
        let store = TodoStore::open(Box::new(MemoryStorage::default()));
        AppState::new(config, store)
    }

    async fn send(
        state: &AppState,
        method: Method,
        path: &str,
        body: &[u8],
    ) -> (StatusCode, serde_json::Value) {
        let resp = route(&method, path, &Bytes::copy_from_slice(body), state).await;
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unmatched_routes_are_404() {
        let state = test_state();

        for (method, path) in [
            (Method::GET, "/unknown"),
            (Method::POST, "/todos/some-id"),
            (Method::PATCH, "/todos/some-id"),
            (Method::GET, "/todos/a/b"),
            (Method::PUT, "/todos/"),
            (Method::DELETE, "/"),
        ] {
            let (status, json) = send(&state, method, path, b"").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
            assert_eq!(json["error"], "Route not found");
        }
    }

    #[tokio::test]
    async fn full_crud_scenario() {
        let state = test_state();

        // POST {title:"Buy milk"} -> 201, completed defaults to false
        let (status, json) =
            send(&state, Method::POST, "/todos", br#"{"title":"Buy milk"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["completed"], false);
        let id = json["data"]["id"].as_str().unwrap().to_string();

        // PUT {completed:true} -> 200, title unchanged
        let (status, json) = send(
            &state,
            Method::PUT,
            &format!("/todos/{id}"),
            br#"{"completed":true}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["completed"], true);
        assert_eq!(json["data"]["title"], "Buy milk");

        // DELETE -> 200, returns the record
        let (status, json) = send(&state, Method::DELETE, &format!("/todos/{id}"), b"").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], id.as_str());

        // GET the same id -> 404
        let (status, json) = send(&state, Method::GET, &format!("/todos/{id}"), b"").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Todo not found");
    }

    #[tokio::test]
    async fn list_and_get_routes_dispatch() {
        let state = test_state();
        let created = state.store.create("one".to_string(), false).await.unwrap();

        let (status, json) = send(&state, Method::GET, "/todos", b"").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);

        let (status, json) =
            send(&state, Method::GET, &format!("/todos/{}", created.id), b"").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], created.id.as_str());

        let (status, _) = send(&state, Method::GET, "/", b"").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn body_size_check_uses_content_length() {
        let req = Request::builder()
            .header("content-length", "2048")
            .body(())
            .unwrap();
        assert!(check_body_size(&req, 1024).is_some());
        assert!(check_body_size(&req, 4096).is_none());

        let no_length = Request::builder().body(()).unwrap();
        assert!(check_body_size(&no_length, 1024).is_none());
    }
}
