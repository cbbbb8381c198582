//! Throwaway HTTP server for exercising the real fetcher.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pulsefeed::config::{Config, FeedConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

#[derive(Clone)]
pub enum Reply {
    Json {
        status: u16,
        body: String,
        delay: Duration,
    },
    /// Accept the request and never answer.
    Hang,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Json {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Reply::Json {
            status,
            body: r#"{"status":"error"}"#.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(body: impl Into<String>, delay: Duration) -> Self {
        Reply::Json {
            status: 200,
            body: body.into(),
            delay,
        }
    }
}

pub struct TestServer {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
    /// Signalled once per request received.
    pub received: Arc<Notify>,
}

impl TestServer {
    /// Serve `replies` in order, one per connection; the last one repeats.
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let received = Arc::new(Notify::new());

        let server_hits = hits.clone();
        let server_received = received.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let n = server_hits.fetch_add(1, Ordering::SeqCst);
                let reply = replies
                    .get(n)
                    .or(replies.last())
                    .cloned()
                    .unwrap_or(Reply::Hang);
                let received = server_received.clone();

                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    received.notify_one();
                    respond(&mut socket, reply).await;
                });
            }
        });

        Self {
            url: format!("http://{}/top-headlines/category/health.json", addr),
            hits,
            received,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            feed: FeedConfig {
                endpoint: self.url.clone(),
                timeout_secs: 1,
                use_system_proxy: false,
                ..FeedConfig::default()
            },
            ..Config::default()
        }
    }
}

async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
}

async fn respond(socket: &mut TcpStream, reply: Reply) {
    match reply {
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Reply::Json {
            status,
            body,
            delay,
        } => {
            tokio::time::sleep(delay).await;
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                503 => "Service Unavailable",
                _ => "Status",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }
}

pub fn headline_doc(titles: &[&str]) -> String {
    let articles: Vec<_> = titles
        .iter()
        .map(|title| {
            serde_json::json!({
                "source": {"id": null, "name": "Test Wire"},
                "author": null,
                "title": title,
                "description": format!("About {}", title),
                "url": format!("https://news.example.com/{}", title),
                "urlToImage": format!("http://img.example.com/{}.jpg", title),
                "publishedAt": "2024-01-01T00:00:00Z",
                "content": null
            })
        })
        .collect();

    serde_json::json!({
        "status": "ok",
        "totalResults": articles.len(),
        "articles": articles
    })
    .to_string()
}
