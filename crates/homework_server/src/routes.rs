//! HTTP route table for the homework API.
//!
//! # Responsibility
//! - Map `(method, url, body)` to a JSON response without touching sockets.
//! - Translate service outcomes into status codes and envelopes.
//!
//! # Invariants
//! - `PATCH /homework/{id}` always answers `{"success":true}`, also for
//!   unknown or non-integer ids.
//! - `DELETE /homework/{id}` reports whether a row was removed in `success`
//!   and never uses an error status for a missing row.
//! - Query strings and one trailing slash are ignored when matching.

use homework_core::{
    CompletionPatch, HomeworkId, HomeworkRepository, HomeworkService, HomeworkServiceError,
    NewHomework,
};
use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

static HOMEWORK_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/homework(?:/([^/]+))?/?$").expect("valid homework route regex"));

/// Response produced by [`handle`]; `body = None` means an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }

    fn success(flag: bool) -> Self {
        Self::json(200, json!({ "success": flag }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Collection,
    Item(&'a str),
}

/// Dispatches one request against the service.
pub fn handle<R: HomeworkRepository>(
    service: &HomeworkService<R>,
    method: &str,
    url: &str,
    body: &[u8],
) -> ApiResponse {
    let path = url.split('?').next().unwrap_or_default();
    let method = method.to_ascii_uppercase();

    if method == "OPTIONS" {
        return ApiResponse::no_content();
    }

    let Some(route) = match_route(path) else {
        return ApiResponse::error(404, format!("no route for {method} {path}"));
    };

    match (method.as_str(), route) {
        ("GET", Route::Collection) => list(service),
        ("POST", Route::Collection) => create(service, body),
        ("PATCH", Route::Item(raw_id)) => set_completion(service, raw_id, body),
        ("DELETE", Route::Item(raw_id)) => delete(service, raw_id),
        _ => ApiResponse::error(405, format!("method {method} not allowed on {path}")),
    }
}

fn match_route(path: &str) -> Option<Route<'_>> {
    let captures = HOMEWORK_ROUTE.captures(path)?;
    Some(match captures.get(1) {
        Some(id) => Route::Item(id.as_str()),
        None => Route::Collection,
    })
}

fn list<R: HomeworkRepository>(service: &HomeworkService<R>) -> ApiResponse {
    match service.list_homework() {
        Ok(items) => match serde_json::to_value(items) {
            Ok(value) => ApiResponse::json(200, value),
            Err(err) => internal_error("list", &err),
        },
        Err(err) => internal_error("list", &err),
    }
}

fn create<R: HomeworkRepository>(service: &HomeworkService<R>, body: &[u8]) -> ApiResponse {
    let draft: NewHomework = match parse_body(body) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match service.create_homework(&draft) {
        Ok(_) => ApiResponse::success(true),
        Err(HomeworkServiceError::Validation(err)) => {
            let missing = err
                .missing
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>();
            ApiResponse::json(400, json!({ "error": err.to_string(), "missing": missing }))
        }
        Err(err) => internal_error("create", &err),
    }
}

fn set_completion<R: HomeworkRepository>(
    service: &HomeworkService<R>,
    raw_id: &str,
    body: &[u8],
) -> ApiResponse {
    let patch: CompletionPatch = match parse_body(body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    // A non-integer id cannot match any row.
    let Some(id) = parse_id(raw_id) else {
        return ApiResponse::success(true);
    };

    match service.set_completion(id, patch.completed) {
        Ok(()) => ApiResponse::success(true),
        Err(err) => internal_error("set_completion", &err),
    }
}

fn delete<R: HomeworkRepository>(service: &HomeworkService<R>, raw_id: &str) -> ApiResponse {
    let Some(id) = parse_id(raw_id) else {
        return ApiResponse::success(false);
    };

    match service.delete_homework(id) {
        Ok(removed) => ApiResponse::success(removed),
        Err(err) => internal_error("delete", &err),
    }
}

/// Parses a JSON body; an empty body reads as `{}`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiResponse> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|err| ApiResponse::error(400, format!("invalid JSON body: {err}")))
}

fn parse_id(raw: &str) -> Option<HomeworkId> {
    raw.trim().parse().ok()
}

fn internal_error(operation: &str, err: &dyn std::fmt::Display) -> ApiResponse {
    error!("event=http_handler module=routes status=error operation={operation} error={err}");
    ApiResponse::error(500, format!("{operation} failed"))
}
