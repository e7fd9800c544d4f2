//! Local HTTP responder shared by the adapter tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// A request as it arrived on the wire.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

/// Minimal HTTP/1.1 responder: records every request and answers each
/// connection with the same canned response.
pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CannedServer {
    pub async fn start(status_line: &'static str, body: &'static str) -> Self {
        Self::start_with_headers(status_line, &[("content-type", "application/json")], body).await
    }

    pub async fn start_with_headers(
        status_line: &'static str,
        headers: &'static [(&'static str, &'static str)],
        body: &'static str,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };

                let mut raw = Vec::new();
                let mut buf = [0u8; 4096];
                let mut head_end = None;
                let mut expected_len = 0;
                loop {
                    if let Some(end) = head_end {
                        if raw.len() >= end + expected_len {
                            break;
                        }
                    }
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => raw.extend_from_slice(&buf[..n]),
                    }
                    if head_end.is_none() {
                        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                            head_end = Some(pos + 4);
                            expected_len = content_length(&raw[..pos]);
                        }
                    }
                }

                let split = head_end.unwrap_or(raw.len());
                seen.lock().unwrap().push(CapturedRequest {
                    head: String::from_utf8_lossy(&raw[..split]).into_owned(),
                    body: String::from_utf8_lossy(&raw[split..]).into_owned(),
                });

                let mut response = format!("{}\r\n", status_line);
                for (name, value) in headers {
                    response.push_str(&format!("{}: {}\r\n", name, value));
                }
                response.push_str(&format!(
                    "content-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                ));
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
