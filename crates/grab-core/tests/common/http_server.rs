//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each accepted connection consumes the next scripted `Behavior`; once the
//! script is exhausted every connection gets the fallback reply. Requests are
//! recorded so tests can inspect the headers the client sent.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u32,
    pub body: Vec<u8>,
    pub gzip: bool,
    pub last_modified: Option<String>,
}

impl Reply {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            gzip: false,
            last_modified: None,
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            body: Vec::new(),
            gzip: false,
            last_modified: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Behavior {
    /// Read the request, say nothing for this long, then hang up.
    Stall(Duration),
    /// Read the request and close without answering.
    Hangup,
    /// Answer with a line that is not an HTTP status line, then close.
    Garbage,
    Reply(Reply),
}

pub struct TestServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `path` is appended to the base URL.
/// The server runs until the process exits.
pub fn start(path: &str, script: Vec<Behavior>, fallback: Reply) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let script = Arc::new(Mutex::new(VecDeque::from(script)));
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    {
        let hits = Arc::clone(&hits);
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                hits.fetch_add(1, Ordering::SeqCst);
                let behavior = script
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| Behavior::Reply(fallback.clone()));
                let requests = Arc::clone(&requests);
                thread::spawn(move || handle(stream, behavior, &requests));
            }
        });
    }
    TestServer {
        url: format!("http://127.0.0.1:{}/{}", port, path.trim_start_matches('/')),
        hits,
        requests,
    }
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone", port)
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8(buf).ok()
}

fn handle(mut stream: TcpStream, behavior: Behavior, requests: &Mutex<Vec<String>>) {
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    requests.lock().unwrap().push(request);
    match behavior {
        Behavior::Stall(d) => thread::sleep(d),
        Behavior::Hangup => {}
        Behavior::Garbage => {
            let _ = stream.write_all(b"GARBAGE STATUS LINE\r\n\r\n");
            let _ = stream.flush();
        }
        Behavior::Reply(reply) => {
            let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
            let mut head = format!(
                "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n",
                reply.status,
                reply.body.len()
            );
            if reply.gzip {
                head.push_str("Content-Encoding: gzip\r\n");
            }
            if let Some(lm) = &reply.last_modified {
                head.push_str(&format!("Last-Modified: {}\r\n", lm));
            }
            head.push_str("\r\n");
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&reply.body);
            let _ = stream.flush();
        }
    }
}
