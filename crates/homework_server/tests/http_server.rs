use homework_core::db::open_db_in_memory;
use homework_server::{HomeworkServer, ServerConfig};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;

fn exchange(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn ephemeral_config() -> ServerConfig {
    ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    }
}

#[test]
fn serves_json_with_cors_headers_until_shutdown() {
    let server =
        HomeworkServer::bind_with_connection(ephemeral_config(), open_db_in_memory().unwrap())
            .unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let worker = thread::spawn(move || server.run());

    let body = r#"{"date_due":"2025-10-05","subject":"Math","title":"X"}"#;
    let created = exchange(
        addr,
        &format!(
            "POST /homework HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
    );
    assert!(created.starts_with("HTTP/1.1 200"), "{created}");
    assert!(created.contains(r#"{"success":true}"#));

    let listed = exchange(
        addr,
        "GET /homework HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(listed.starts_with("HTTP/1.1 200"), "{listed}");
    assert!(listed
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: *"));
    assert!(listed.contains(r#""subject":"Math""#));

    shutdown.shutdown();
    worker.join().unwrap();
}

#[test]
fn seeding_fills_an_empty_diary_before_serving() {
    let config = ServerConfig {
        seed_samples: true,
        ..ephemeral_config()
    };
    let server =
        HomeworkServer::bind_with_connection(config, open_db_in_memory().unwrap()).unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let worker = thread::spawn(move || server.run());

    let listed = exchange(
        addr,
        "GET /homework HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    let body_start = listed.find("\r\n\r\n").unwrap() + 4;
    let items: Vec<serde_json::Value> = serde_json::from_str(&listed[body_start..]).unwrap();
    assert_eq!(items.len(), 5);

    shutdown.shutdown();
    worker.join().unwrap();
}

#[test]
fn bind_reports_unusable_address() {
    let config = ServerConfig {
        bind_addr: "not-an-address".to_string(),
        ..ServerConfig::default()
    };
    let err = HomeworkServer::bind_with_connection(config, open_db_in_memory().unwrap())
        .err()
        .expect("bind should fail");
    assert!(err.to_string().contains("not-an-address"));
}
