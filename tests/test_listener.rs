//! Tests for the accept loop over a real TCP listener

use beacon::config::Config;
use beacon::server::listener::serve;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn get(addr: std::net::SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut out = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut out))
        .await
        .unwrap()
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_listener_survives_failed_connections() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cfg = Config {
        read_timeout_secs: 1,
        ..Config::default()
    };
    let server = tokio::spawn(async move { serve(listener, &cfg).await });

    // Peer that connects and vanishes
    drop(TcpStream::connect(addr).await.unwrap());
    // Peer that sends garbage
    assert_eq!(get(addr, b"NOPE\r\n\r\n").await, "HTTP/1.1 400 Bad Request\r\n\r\n");

    let out = get(addr, b"GET /echo/still-up HTTP/1.1\r\n\r\n").await;
    assert!(out.ends_with("\r\n\r\nstill-up"), "{}", out);
    assert!(!server.is_finished());

    server.abort();
}
