#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Canned HTTP/1.1 responses keyed by request target, falling back to the path alone.
pub struct StubServer {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&str, u16, String)>) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Cannot bind");
        let base = format!("http://{}", listener.local_addr().expect("No address"));

        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(target, status, body)| (target.to_string(), (status, body)))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(vec![]));

        let hits_clone = hits.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(respond(stream, routes.clone(), hits_clone.clone()));
            }
        });

        StubServer { base, hits }
    }

    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base, target)
    }

    /// Request targets in the order they were received.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("Poisoned").clone()
    }
}

async fn respond(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, (u16, String)>>,
    hits: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = vec![0u8; 16 * 1024];
    let mut read = 0;
    loop {
        let n = stream.read(&mut buf[read..]).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        read += n;
        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
            break;
        }
    }

    let request = String::from_utf8_lossy(&buf[..read]);
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    let path = target.split('?').next().unwrap_or("/").to_string();
    hits.lock().expect("Poisoned").push(target.clone());

    let (status, body) = routes
        .get(&target)
        .or_else(|| routes.get(&path))
        .cloned()
        .unwrap_or((404, "not found".to_string()));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        if status < 400 { "OK" } else { "Error" },
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// A URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Cannot bind");
    let addr = listener.local_addr().expect("No address");
    drop(listener);
    format!("http://{}/api/offers", addr)
}

pub fn fixture(path: &str) -> String {
    std::fs::read_to_string(path).expect("Invalid file url")
}
