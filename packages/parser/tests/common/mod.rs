#![allow(dead_code)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pydocs_parser::cache::ResponseCache;
use pydocs_parser::{Config, Session};

/// Load fixture file content.
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// HTML response with the given body.
pub fn html(body: impl Into<Vec<u8>>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Serve `fixture` at `route`.
pub async fn mount_fixture(server: &MockServer, route: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(load_fixture(fixture)))
        .mount(server)
        .await;
}

/// Serve `fixture` at `route`, exactly `hits` times over the test.
pub async fn mount_fixture_expecting(server: &MockServer, route: &str, fixture: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(load_fixture(fixture)))
        .expect(hits)
        .mount(server)
        .await;
}

/// Serve the PEP index and every PEP detail fixture below `/peps/`.
pub async fn mount_peps(server: &MockServer) {
    mount_fixture(server, "/peps/", "pep_index.html").await;
    for number in ["0001", "0008", "0020", "0484", "0572"] {
        mount_fixture(
            server,
            &format!("/peps/pep-{number}/"),
            &format!("peps/pep-{number}.html"),
        )
        .await;
    }
}

/// Configuration pointing both base URLs at the mock server.
///
/// Docs live under `/3/` and PEPs under `/peps/`.
pub fn config_for(server_uri: &str, home: &Path) -> Config {
    Config::new(
        &format!("{server_uri}/3/"),
        &format!("{server_uri}/peps/"),
        home,
    )
    .unwrap()
}

/// Session with a fresh cache under the configured home.
pub fn session_for(config: &Config) -> Session {
    Session::new(ResponseCache::open(config.cache_dir()).unwrap()).unwrap()
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with every event at WARN and above written to a fresh buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
