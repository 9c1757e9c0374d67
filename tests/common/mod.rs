// Shared HTTP stub for the integration tests: a local listener that serves a
// scripted set of responses and records every request it saw, raw body
// included, so tests can assert the exact wire shape.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// One scripted response. `route` is a substring the request path must
/// contain, so concurrent requests to different paths find their own script
/// regardless of arrival order.
pub struct Script {
    pub route: &'static str,
    pub status: u16,
    pub reason: &'static str,
    pub body: String,
}

pub fn ok_json(route: &'static str, body: &str) -> Script {
    Script {
        route,
        status: 200,
        reason: "OK",
        body: body.to_string(),
    }
}

pub fn server_error(route: &'static str, body: &str) -> Script {
    Script {
        route,
        status: 500,
        reason: "Internal Server Error",
        body: body.to_string(),
    }
}

pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct StubServer {
    pub base_url: String,
    requests: Receiver<RecordedRequest>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Bind a local listener and serve exactly one connection per script.
    pub fn start(scripts: Vec<Script>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("local stub should bind");
        let addr = listener.local_addr().expect("stub listener address");
        let (sender, requests) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut scripts = scripts;
            while !scripts.is_empty() {
                let (stream, _) = match listener.accept() {
                    Ok(pair) => pair,
                    Err(_) => return,
                };
                serve_one(stream, &mut scripts, &sender);
            }
        });

        StubServer {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    /// Wait until every scripted response has been served, then return the
    /// recorded requests in arrival order.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("stub thread");
        self.requests.try_iter().collect()
    }
}

fn serve_one(mut stream: TcpStream, scripts: &mut Vec<Script>, sender: &Sender<RecordedRequest>) {
    let request = match read_request(&mut stream) {
        Some(request) => request,
        None => return,
    };

    let position = scripts
        .iter()
        .position(|script| request.path.contains(script.route))
        .expect("request matched no scripted route");
    let script = scripts.remove(position);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        script.status,
        script.reason,
        script.body.len(),
        script.body,
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = sender.send(request);
}

// Minimal HTTP/1.1 request reader: request line, headers, then a body of
// exactly `Content-Length` bytes. The client never sends chunked requests.
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut raw = Vec::new();
    let mut buffer = [0_u8; 2048];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&buffer[..n]);
        if let Some(position) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let header_text = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let mut lines = header_text.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = raw[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..n]);
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
