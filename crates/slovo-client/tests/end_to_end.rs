//! Client facade in front of a real translation server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use slovo_client::ClientState;
use slovo_config::client::ClientConfig;
use slovo_config::server::ServerConfig;
use slovo_translator::TranslationClient;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

async fn start_server(cancel: &CancellationToken) -> SocketAddr {
    // Embedded word list
    let service = slovo_server::build_service(&ServerConfig::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(slovo_server::serve(listener, service, cancel.clone()));
    addr
}

async fn start_facade(server: SocketAddr, cancel: &CancellationToken) -> SocketAddr {
    let config = ClientConfig {
        server_url: format!("http://{server}"),
        connect_timeout_ms: 500,
        request_timeout_ms: 1000,
        max_retries: 1,
        retry_base_delay_ms: 10,
        health_timeout_ms: 300,
        ..ClientConfig::default()
    };
    let state = Arc::new(ClientState {
        client: TranslationClient::new(&config).unwrap(),
        demo_words: config.demo_words.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(slovo_client::serve(listener, state, cancel.clone()));
    addr
}

async fn get(addr: SocketAddr, path: &str) -> (reqwest::StatusCode, String) {
    let response = timeout(
        Duration::from_secs(5),
        reqwest::get(format!("http://{addr}{path}")),
    )
    .await
    .expect("request timed out")
    .unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn demo_endpoint_translates_fixed_words() {
    let cancel = CancellationToken::new();
    let server = start_server(&cancel).await;
    let facade = start_facade(server, &cancel).await;

    let (status, body) = get(facade, "/api/client/test").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "cat\ndog\nhello\nhouse\nworld");

    cancel.cancel();
}

#[tokio::test]
async fn single_word_passes_through() {
    let cancel = CancellationToken::new();
    let server = start_server(&cancel).await;
    let facade = start_facade(server, &cancel).await;

    let (_, body) = get(facade, "/api/client/translate/%D0%9C%D0%B8%D1%80").await;
    assert_eq!(body, "world");

    let (_, body) = get(facade, "/api/client/translate/zebra").await;
    assert_eq!(body, "Translation not found");

    cancel.cancel();
}

#[tokio::test]
async fn comma_separated_batch() {
    let cancel = CancellationToken::new();
    let server = start_server(&cancel).await;
    let facade = start_facade(server, &cancel).await;

    let kot = "%D0%BA%D0%BE%D1%82";
    let dom = "%D0%B4%D0%BE%D0%BC";
    let path = format!("/api/client/translate/batch?words={kot},{kot},{dom}");
    let (_, body) = get(facade, &path).await;
    assert_eq!(body, "cat\nhouse");

    let (status, _) = get(facade, "/api/client/translate/batch").await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);

    cancel.cancel();
}

#[tokio::test]
async fn health_passes_through_server_status() {
    let cancel = CancellationToken::new();
    let server = start_server(&cancel).await;
    let facade = start_facade(server, &cancel).await;

    let (_, body) = get(facade, "/api/client/health").await;
    assert_eq!(body, "Server is running");

    cancel.cancel();
}

#[tokio::test]
async fn facade_degrades_when_server_is_down() {
    let cancel = CancellationToken::new();
    let dead = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let facade = start_facade(dead, &cancel).await;

    let (status, body) = get(facade, "/api/client/health").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("unavailable"), "got {body}");

    let (_, body) = get(facade, "/api/client/translate/%D0%BA%D0%BE%D1%82").await;
    assert!(body.starts_with("ERROR: Failed to translate - "), "got {body}");

    cancel.cancel();
}
