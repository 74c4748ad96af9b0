use homework_core::db::open_db_in_memory;
use homework_core::{HomeworkItem, HomeworkService, SqliteHomeworkRepository};
use homework_server::{handle, ApiResponse};
use serde_json::{json, Value};

fn call(
    service: &HomeworkService<SqliteHomeworkRepository<'_>>,
    method: &str,
    url: &str,
    body: Value,
) -> ApiResponse {
    let bytes = if body.is_null() {
        Vec::new()
    } else {
        serde_json::to_vec(&body).unwrap()
    };
    handle(service, method, url, &bytes)
}

fn list(service: &HomeworkService<SqliteHomeworkRepository<'_>>) -> Vec<HomeworkItem> {
    let response = call(service, "GET", "/homework", Value::Null);
    assert_eq!(response.status, 200);
    serde_json::from_value(response.body.unwrap()).unwrap()
}

#[test]
fn post_acknowledges_without_returning_the_record() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    let response = call(
        &service,
        "POST",
        "/homework",
        json!({"date_due": "2025-10-05", "subject": "Math", "title": "X", "type": "", "description": ""}),
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!({"success": true})));

    let items = list(&service);
    assert_eq!(items.len(), 1);
    assert!(!items[0].completed);
    assert_eq!(items[0].kind.as_deref(), Some(""));
}

#[test]
fn create_patch_get_scenario_keeps_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    call(
        &service,
        "POST",
        "/homework",
        json!({"date_due": "2025-10-05", "subject": "Math", "title": "X"}),
    );
    let id = list(&service)[0].id;

    let patched = call(
        &service,
        "PATCH",
        &format!("/homework/{id}"),
        json!({"completed": true}),
    );
    assert_eq!(patched.body, Some(json!({"success": true})));

    let item = &list(&service)[0];
    assert!(item.completed);
    assert_eq!(item.date_due.as_deref(), Some("2025-10-05"));
    assert_eq!(item.subject.as_deref(), Some("Math"));
    assert_eq!(item.title.as_deref(), Some("X"));
}

#[test]
fn list_emits_boolean_completed_and_type_key() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    call(
        &service,
        "POST",
        "/homework",
        json!({"date_due": "2025-10-05", "subject": "Math", "title": "X", "type": "Practice"}),
    );

    let body = call(&service, "GET", "/homework?fresh=1", Value::Null)
        .body
        .unwrap();
    assert_eq!(body[0]["completed"], json!(false));
    assert_eq!(body[0]["type"], json!("Practice"));
    assert!(body[0]["date_created"].is_string());
}

#[test]
fn patch_unknown_or_non_integer_id_still_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    for url in ["/homework/404", "/homework/abc"] {
        let response = call(&service, "PATCH", url, json!({"completed": 1}));
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"success": true})));
    }
    assert!(list(&service).is_empty());
}

#[test]
fn delete_reports_whether_a_row_was_removed() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    call(
        &service,
        "POST",
        "/homework",
        json!({"date_due": "2025-10-05", "subject": "Math", "title": "X"}),
    );
    let id = list(&service)[0].id;

    let first = call(&service, "DELETE", &format!("/homework/{id}"), Value::Null);
    let second = call(&service, "DELETE", &format!("/homework/{id}"), Value::Null);
    let bogus = call(&service, "DELETE", "/homework/abc", Value::Null);
    assert_eq!(first.body, Some(json!({"success": true})));
    assert_eq!(second.body, Some(json!({"success": false})));
    assert_eq!(bogus.body, Some(json!({"success": false})));
    assert!(list(&service).is_empty());
}

#[test]
fn lenient_api_accepts_empty_payload() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    let response = call(&service, "POST", "/homework", Value::Null);
    assert_eq!(response.status, 200);
    let items = list(&service);
    assert_eq!(items.len(), 1);
    assert!(items[0].title.is_none());
}

#[test]
fn strict_api_rejects_missing_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn)).strict(true);

    let response = call(&service, "POST", "/homework", json!({"subject": "Math"}));
    assert_eq!(response.status, 400);
    let body = response.body.unwrap();
    assert_eq!(body["missing"], json!(["date_due", "title"]));
    assert!(list(&service).is_empty());
}

#[test]
fn malformed_json_and_wrong_shapes_are_bad_requests() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    let malformed = handle(&service, "POST", "/homework", b"{\"subject\": ");
    assert_eq!(malformed.status, 400);
    let wrong_type = call(&service, "POST", "/homework", json!({"subject": 5}));
    assert_eq!(wrong_type.status, 400);
    assert!(list(&service).is_empty());
}

#[test]
fn unknown_paths_and_methods_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    assert_eq!(call(&service, "GET", "/notes", Value::Null).status, 404);
    assert_eq!(call(&service, "PUT", "/homework", Value::Null).status, 405);
    assert_eq!(call(&service, "GET", "/homework/1", Value::Null).status, 405);
    let preflight = call(&service, "OPTIONS", "/homework/1", Value::Null);
    assert_eq!(preflight.status, 204);
    assert!(preflight.body.is_none());
}
