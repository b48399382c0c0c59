//! Shared helpers for integration tests: environment scoping, an
//! in-memory sink and a mock Sentry ingestion server.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::thread;

use serde_json::Value;

/// Process-wide lock serializing tests that touch environment variables.
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> MutexGuard<'static, ()> {
    let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Run `task` with the given variables temporarily set (an empty value
/// removes the variable), restoring the previous state afterwards, even
/// on panic. Holds the environment lock for the whole task so tests can
/// run in parallel without crosstalk.
pub fn with_env_vars(vars: &[(&str, &str)], task: impl FnOnce()) {
    struct Restore {
        previous: Vec<(String, Option<String>)>,
    }

    impl Drop for Restore {
        fn drop(&mut self) {
            for (key, value) in self.previous.drain(..) {
                match value {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }

    let _guard = env_lock();
    let _restore = Restore {
        previous: vars
            .iter()
            .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
            .collect(),
    };

    for (key, value) in vars {
        if value.is_empty() {
            std::env::remove_var(key);
        } else {
            std::env::set_var(key, value);
        }
    }

    task();
}

/// In-memory sink capturing logger output for assertions.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Captured output split into non-empty lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A mock Sentry ingestion endpoint on a loopback listener.
///
/// Every store request is decoded and handed over on `events`; the
/// server answers `200 OK` with `connection: close` so each delivery
/// uses a fresh connection.
#[allow(dead_code)]
pub struct MockSentryServer {
    /// DSN pointing at the mock endpoint.
    pub dsn: String,
    /// Decoded JSON bodies, one per request.
    pub events: Receiver<Value>,
}

#[allow(dead_code)]
pub fn start_mock_sentry() -> MockSentryServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let body = read_request_body(&mut stream);
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            let _ = stream.flush();
            if let Ok(event) = serde_json::from_slice(&body) {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });

    MockSentryServer {
        dsn: format!("http://public:secret@{}/42", addr),
        events: rx,
    }
}

fn read_request_body(stream: &mut TcpStream) -> Vec<u8> {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(1) => head.push(byte[0]),
            _ => return Vec::new(),
        }
    }

    let content_length = String::from_utf8_lossy(&head)
        .to_ascii_lowercase()
        .lines()
        .find_map(|line| line.strip_prefix("content-length:").map(str::to_string))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    if content_length > 0 && stream.read_exact(&mut body).is_err() {
        return Vec::new();
    }
    body
}
