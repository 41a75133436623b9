//! Minimal scriptable HTTP/1.1 server for download-engine tests.
//!
//! Each path gets a `Route` scripting the status code per request (the last
//! entry repeats), an optional response delay, or a stall that never
//! responds. The server records per-path hit counts, a request timeline,
//! and the peak number of concurrent connections.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Route {
    /// Status code per request, in arrival order; the last entry repeats.
    pub statuses: Vec<u32>,
    /// Body served with a 200 response.
    pub body: Vec<u8>,
    /// Sleep before responding (simulates a slow transfer).
    pub delay: Duration,
    /// Accept the connection but never respond, so the client times out.
    pub stall: bool,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self::with_statuses(vec![200], body)
    }

    pub fn with_statuses(statuses: Vec<u32>, body: &[u8]) -> Self {
        Self {
            statuses,
            body: body.to_vec(),
            delay: Duration::ZERO,
            stall: false,
        }
    }

    pub fn stalled() -> Self {
        Self {
            statuses: vec![200],
            body: Vec::new(),
            delay: Duration::ZERO,
            stall: true,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct Gauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

pub struct StubServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, u32>>>,
    timeline: Arc<Mutex<Vec<(String, Instant)>>>,
    gauge: Arc<Gauge>,
}

impl StubServer {
    /// Starts the server on an ephemeral port with the given routes.
    /// Runs until the test process exits.
    pub fn start(routes: HashMap<String, Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(routes);
        let hits: Arc<Mutex<HashMap<String, u32>>> = Arc::new(Mutex::new(HashMap::new()));
        let timeline: Arc<Mutex<Vec<(String, Instant)>>> = Arc::new(Mutex::new(Vec::new()));
        let gauge = Arc::new(Gauge::default());

        let server = StubServer {
            base_url: format!("http://127.0.0.1:{}", port),
            hits: Arc::clone(&hits),
            timeline: Arc::clone(&timeline),
            gauge: Arc::clone(&gauge),
        };

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&hits);
                let timeline = Arc::clone(&timeline);
                let gauge = Arc::clone(&gauge);
                thread::spawn(move || handle(stream, &routes, &hits, &timeline, &gauge));
            }
        });

        server
    }

    /// Full URL for a routed path (path must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// How many requests the given path has received.
    pub fn hits(&self, path: &str) -> u32 {
        *self.hits.lock().unwrap().get(path).unwrap_or(&0)
    }

    /// Highest number of simultaneously open connections seen so far.
    pub fn peak_concurrency(&self) -> usize {
        self.gauge.peak.load(Ordering::SeqCst)
    }

    /// (path, arrival time) for every request, in arrival order.
    pub fn timeline(&self) -> Vec<(String, Instant)> {
        self.timeline.lock().unwrap().clone()
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, u32>>,
    timeline: &Mutex<Vec<(String, Instant)>>,
    gauge: &Gauge,
) {
    let current = gauge.current.fetch_add(1, Ordering::SeqCst) + 1;
    gauge.peak.fetch_max(current, Ordering::SeqCst);

    serve(&mut stream, routes, hits, timeline);

    gauge.current.fetch_sub(1, Ordering::SeqCst);
}

fn serve(
    stream: &mut std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, u32>>,
    timeline: &Mutex<Vec<(String, Instant)>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request.split_whitespace().nth(1) {
        Some(p) => p.to_string(),
        None => return,
    };

    timeline.lock().unwrap().push((path.clone(), Instant::now()));
    let hit = {
        let mut map = hits.lock().unwrap();
        let count = map.entry(path.clone()).or_insert(0);
        *count += 1;
        *count
    };

    let Some(route) = routes.get(&path) else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    };

    if route.stall {
        // Outlive any client timeout a test would configure.
        thread::sleep(Duration::from_secs(30));
        return;
    }
    if route.delay > Duration::ZERO {
        thread::sleep(route.delay);
    }

    let idx = (hit as usize - 1).min(route.statuses.len() - 1);
    let status = route.statuses[idx];
    let body: &[u8] = if status == 200 { &route.body } else { &[] };
    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
