use crate::harness::{CapturedEvent, fixture_resolver, init_test_tracing};
use geoipmap_core::conf::types::ServerConfig;
use geoipmap_core::ingest::{IngestLoop, IngestReport};
use geoipmap_core::server::build_pingora_server;
use geoipmap_core::store::AggregateStore;
use reqwest::blocking::{Client, RequestBuilder};
use std::io::Cursor;
use std::net::TcpStream;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running map server.
pub struct TestServer {
    base_url: String,
    client: Client,
    store: Arc<AggregateStore>,
    report: IngestReport,
}

impl TestServer {
    /// Ingest `log` through the fixture resolver, then serve the result.
    pub fn start(log: &str) -> Self {
        Self::start_with_title(log, None)
    }

    /// Like [`TestServer::start`] with a page title.
    ///
    /// Ports are allocated dynamically, so servers can run in parallel.
    pub fn start_with_title(log: &str, title: Option<&str>) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let store = Arc::new(AggregateStore::new());

        // Ingest runs to completion before the server starts so every test
        // sees a fixed aggregate.
        let ingest = IngestLoop::new(fixture_resolver(), Arc::clone(&store));
        let report = ingest.run(Cursor::new(log.as_bytes().to_vec()));

        let listen_port = free_port();
        let cfg = ServerConfig {
            listen: format!("127.0.0.1:{listen_port}"),
            title: title.map(str::to_string),
            threads: Some(1),
            pid_file: None,
            open_browser: false,
        };

        let server =
            build_pingora_server(&cfg, Arc::clone(&store)).expect("failed to build map server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            store,
            report,
        }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn store(&self) -> &Arc<AggregateStore> {
        &self.store
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(5);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

/// Every event captured so far, shared by all servers in this test binary.
pub fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
