use chrono::Utc;
use homework_cli::{ApiError, HomeworkApi, HomeworkViewModel, HttpHomeworkApi, ViewModelError};
use homework_core::db::open_db_in_memory;
use homework_core::{NewHomework, RequiredField, Urgency};
use homework_server::{HomeworkServer, ServerConfig, ShutdownHandle};
use std::thread::{self, JoinHandle};

struct RunningServer {
    base_url: String,
    shutdown: ShutdownHandle,
    worker: Option<JoinHandle<()>>,
}

impl RunningServer {
    fn start(strict_validation: bool) -> Self {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            strict_validation,
            ..ServerConfig::default()
        };
        let server =
            HomeworkServer::bind_with_connection(config, open_db_in_memory().unwrap()).unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = server.shutdown_handle();
        let worker = thread::spawn(move || server.run());
        Self {
            base_url: format!("http://{addr}"),
            shutdown,
            worker: Some(worker),
        }
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.shutdown.shutdown();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn draft(date_due: &str, subject: &str, title: &str) -> NewHomework {
    NewHomework {
        date_due: Some(date_due.to_string()),
        subject: Some(subject.to_string()),
        title: Some(title.to_string()),
        ..NewHomework::default()
    }
}

#[test]
fn create_toggle_and_delete_through_the_http_api() {
    let server = RunningServer::start(false);
    let mut view_model = HomeworkViewModel::new(HttpHomeworkApi::new(&server.base_url));
    let before = Utc::now();

    view_model.create(&draft("2025-10-05", "Math", "X")).unwrap();
    let items = view_model.store().items().to_vec();
    assert_eq!(items.len(), 1);
    let created = &items[0];
    assert!(!created.completed);
    let stamped = homework_core::view::format::parse_instant(
        created.date_created.as_deref().unwrap(),
    )
    .unwrap();
    assert!(stamped.timestamp_millis() >= before.timestamp_millis());

    view_model.toggle_completed(created.id, true).unwrap();
    view_model.load().unwrap();
    let reloaded = view_model.store().get(created.id).unwrap();
    assert!(reloaded.completed);
    assert_eq!(reloaded.subject.as_deref(), Some("Math"));
    assert_eq!(reloaded.title.as_deref(), Some("X"));
    assert_eq!(reloaded.date_due.as_deref(), Some("2025-10-05"));

    let rows = view_model.rows(Utc::now());
    assert_eq!(rows[0].urgency, Urgency::Completed);

    assert!(view_model.delete(created.id).unwrap());
    assert!(view_model.store().items().is_empty());
    assert!(!view_model.delete(created.id).unwrap());
}

#[test]
fn toggling_unknown_id_succeeds_without_changes() {
    let server = RunningServer::start(false);
    let api = HttpHomeworkApi::new(&server.base_url);

    api.set_completed(404, true).unwrap();
    assert!(api.fetch_all().unwrap().is_empty());
}

#[test]
fn incomplete_draft_is_rejected_locally() {
    let server = RunningServer::start(false);
    let mut view_model = HomeworkViewModel::new(HttpHomeworkApi::new(&server.base_url));

    let err = view_model
        .create(&NewHomework {
            title: Some("Essay".to_string()),
            ..NewHomework::default()
        })
        .unwrap_err();
    let ViewModelError::Validation(err) = err else {
        panic!("expected validation error");
    };
    assert_eq!(err.missing, vec![RequiredField::DateDue, RequiredField::Subject]);

    view_model.load().unwrap();
    assert!(view_model.store().items().is_empty());
}

#[test]
fn strict_server_reports_bad_request_status() {
    let server = RunningServer::start(true);
    let api = HttpHomeworkApi::new(&server.base_url);

    let err = api
        .create(&NewHomework {
            subject: Some("Physics".to_string()),
            ..NewHomework::default()
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
}

#[test]
fn unreachable_server_surfaces_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = HttpHomeworkApi::new(format!("http://{addr}"));

    assert!(matches!(api.fetch_all(), Err(ApiError::Transport(_))));
}
