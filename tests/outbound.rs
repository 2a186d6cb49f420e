use std::sync::Arc;
use std::time::Duration;

use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use shopping_list::build_rocket;
use shopping_list::client::{HttpTransport, ListEditor, PasswordCookie, PasswordStore, SubmitError};
use shopping_list::config::Config;
use shopping_list::forward::{Forwarder, HttpForwarder};
use shopping_list::types::ForwardPayload;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A captured request: lowercased head and raw body.
struct Captured {
    head: String,
    body: String,
}

/// Accepts one connection, records it, and answers with `status`.
async fn serve_once(status: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;
        let response =
            format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        captured
    });

    (base, handle)
}

async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if buf.len() >= end + 4 + length {
                return Captured {
                    head,
                    body: String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).into_owned(),
                };
            }
        }
    }

    panic!("connection closed before a full request arrived");
}

fn forwarder() -> HttpForwarder {
    HttpForwarder::new(Duration::from_secs(5)).unwrap()
}

fn cookie() -> PasswordCookie {
    PasswordCookie::new(
        std::env::temp_dir().join(format!("shopping-list-outbound-{}.json", uuid::Uuid::new_v4())),
    )
}

fn editor_with_milk(password: &str) -> ListEditor {
    let mut editor = ListEditor::new();
    editor.set_password(password);
    editor.toggle_by_name("牛乳").unwrap();
    editor
}

#[tokio::test]
async fn forwarder_sends_json_headers_and_strips_password() {
    let (base, server) = serve_once("200 OK").await;
    let items = vec!["milk".to_string()];

    forwarder()
        .forward(&format!("{base}/hook"), &ForwardPayload { items: &items })
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.head.starts_with("post /hook http/1.1"));
    assert!(request.head.contains("content-type: application/json"));
    assert!(request.head.contains("accept: application/json"));
    assert_eq!(request.body, r#"{"items":["milk"]}"#);
}

#[tokio::test]
async fn webhook_error_status_is_not_a_delivery_failure() {
    let (base, server) = serve_once("500 Internal Server Error").await;
    let items = vec!["milk".to_string()];

    let result = forwarder()
        .forward(&format!("{base}/hook"), &ForwardPayload { items: &items })
        .await;

    assert!(result.is_ok());
    server.await.unwrap();
}

#[rocket::async_test]
async fn endpoint_succeeds_even_when_webhook_answers_500() {
    let (base, server) = serve_once("500 Internal Server Error").await;
    let config = Config {
        port: 0,
        admin_password: Some("secret123".into()),
        webhook_url: Some(format!("{base}/hook")),
        webhook_timeout: Duration::from_secs(5),
    };
    let client = Client::tracked(build_rocket(config, Arc::new(forwarder())))
        .await
        .unwrap();

    let response = client
        .post("/api/webhook")
        .header(ContentType::JSON)
        .body(r#"{"items":["milk"],"password":"secret123"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(server.await.unwrap().body, r#"{"items":["milk"]}"#);
}

#[tokio::test]
async fn transport_maps_401_to_wrong_password() {
    let (base, server) = serve_once("401 Unauthorized").await;
    let mut jar = cookie();
    let mut editor = editor_with_milk("wrong");

    let result = editor.submit(&HttpTransport::new(&base), &mut jar).await;

    assert_eq!(result, Err(SubmitError::WrongPassword));
    assert_eq!(editor.selected_names(), vec!["牛乳"]);
    assert!(jar.load().unwrap().is_none());

    let request = server.await.unwrap();
    assert!(request.head.starts_with("post /api/webhook http/1.1"));
    assert!(request.head.contains("content-type: application/json"));
    assert_eq!(request.body, r#"{"items":["牛乳"],"password":"wrong"}"#);
}

#[tokio::test]
async fn transport_maps_500_to_generic_failure() {
    let (base, server) = serve_once("500 Internal Server Error").await;
    let mut jar = cookie();
    let mut editor = editor_with_milk("secret123");

    let result = editor.submit(&HttpTransport::new(&base), &mut jar).await;

    assert_eq!(result, Err(SubmitError::Failed));
    assert!(!editor.is_submitting());
    assert!(jar.load().unwrap().is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn accepted_submission_remembers_password_and_clears_selection() {
    let (base, server) = serve_once("200 OK").await;
    let mut jar = cookie();
    let mut editor = editor_with_milk("secret123");

    editor
        .submit(&HttpTransport::new(&base), &mut jar)
        .await
        .unwrap();

    assert!(editor.selected_names().is_empty());
    assert_eq!(jar.load().unwrap().as_deref(), Some("secret123"));
    std::fs::remove_file(jar.path()).unwrap();
    server.await.unwrap();
}
