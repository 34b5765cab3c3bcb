//! Extraction routines against a mock documentation site.
//!
//! The blocking client must not run on the async runtime, so every routine
//! runs inside `spawn_blocking` with its own session.

mod common;

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    capture_logs, config_for, html, mount_fixture, mount_fixture_expecting, mount_peps,
    session_for,
};
use pydocs_parser::modes::{download, latest_versions, pep, pep_tally, whats_new};
use pydocs_parser::{Mode, ParserError};

fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| line.iter().map(|field| field.to_string()).collect())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whats_new_collects_every_version() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/3/whatsnew/", "whatsnew_index.html").await;
    mount_fixture(&server, "/3/whatsnew/3.13.html", "whatsnew_3.13.html").await;
    mount_fixture(&server, "/3/whatsnew/3.12.html", "whatsnew_3.12.html").await;
    let uri = server.uri();

    let results = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        whats_new(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap();

    let base = format!("{}/3/whatsnew", server.uri());
    let expected = rows(&[
        &["Link to article", "Title", "Editor, author"],
        &[
            &format!("{base}/3.13.html"),
            "What's New In Python 3.13",
            "Editors:Adam Turner and Thomas Wouters",
        ],
        &[
            &format!("{base}/3.12.html"),
            "What's New In Python 3.12",
            "Editor:Adam Turner",
        ],
    ]);
    assert_eq!(results.lines().cloned().collect::<Vec<_>>(), expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whats_new_fails_on_missing_version_page() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/3/whatsnew/", "whatsnew_index.html").await;
    mount_fixture(&server, "/3/whatsnew/3.13.html", "whatsnew_3.13.html").await;
    // 3.12.html is not mounted: the mock answers 404 with an empty body.
    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        whats_new(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, ParserError::TagNotFound { ref query } if query == "<h1>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whats_new_fails_without_main_section() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/"))
        .respond_with(html("<html><body><p>This page has moved.</p></body></html>"))
        .mount(&server)
        .await;
    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        whats_new(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Tag not found: <section id=\"what-s-new-in-python\">"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_latest_versions_reads_sidebar() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/3/", "docs_index.html").await;
    let uri = server.uri();

    let results = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        latest_versions(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap();

    let expected = rows(&[
        &["Link to documentation", "Version", "Status"],
        &["https://docs.python.org/3.14/", "3.14", "in development"],
        &["https://docs.python.org/3.13/", "3.13", "stable"],
        &["https://docs.python.org/2.7/", "2.7", "EOL"],
        &["https://www.python.org/doc/versions/", "All versions", ""],
    ]);
    assert_eq!(results.lines().cloned().collect::<Vec<_>>(), expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_latest_versions_without_version_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html(
            r#"<div class="sphinxsidebarwrapper"><ul><li><a href="download.html">Download</a></li></ul></div>"#,
        ))
        .mount(&server)
        .await;
    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        latest_versions(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, ParserError::NothingFound(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_saves_a4_archive() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/3/download.html", "download.html").await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-3.13-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04archive".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let uri = server.uri();

    let (saved, content, expected_path) = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        let saved = download(&session_for(&config), &config).unwrap();
        let content = fs::read(&saved).unwrap();
        let expected_path = config.downloads_dir().join("python-3.13-docs-pdf-a4.zip");
        (saved, content, expected_path)
    })
    .await
    .unwrap();

    assert_eq!(saved, expected_path);
    assert_eq!(content, b"PK\x03\x04archive");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_without_archive_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/download.html"))
        .respond_with(html(
            r#"<div class="document"><table class="docutils"><tr><td><a href="archives/python-3.13-docs-html.zip">HTML</a></td></tr></table></div>"#,
        ))
        .mount(&server)
        .await;
    let uri = server.uri();

    let (err, downloads_empty) = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        let err = download(&session_for(&config), &config).unwrap_err();
        let downloads_empty = fs::read_dir(config.downloads_dir())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true);
        (err, downloads_empty)
    })
    .await
    .unwrap();

    assert!(matches!(err, ParserError::TagNotFound { .. }));
    assert!(downloads_empty);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pep_tally_counts_actual_statuses() {
    let server = MockServer::start().await;
    mount_peps(&server).await;
    let uri = server.uri();

    let results = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        pep(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap();

    let expected = rows(&[
        &["Status", "Count"],
        &["Active", "2"],
        &["Final", "2"],
        &["Total", "4"],
    ]);
    assert_eq!(results.lines().cloned().collect::<Vec<_>>(), expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pep_mismatch_warns_and_keeps_actual_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/peps/"))
        .respond_with(html(
            r#"<section id="index-by-category"><table>
                 <tr><th>Status</th><th>PEP</th></tr>
                 <tr><td>PA</td><td><a href="pep-0008/">8</a></td></tr>
                 <tr><td>SF</td><td><a href="pep-0484/">484</a></td></tr>
               </table></section>"#,
        ))
        .mount(&server)
        .await;
    mount_fixture(&server, "/peps/pep-0008/", "peps/pep-0008.html").await;
    mount_fixture(&server, "/peps/pep-0484/", "peps/pep-0484.html").await;
    let uri = server.uri();

    let (tally, logs) = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        let session = session_for(&config);
        capture_logs(|| pep_tally(&session, &config))
    })
    .await
    .unwrap();

    let tally = tally.unwrap();
    assert_eq!(tally.count("Deferred"), 1);
    assert_eq!(tally.count("Final"), 1);
    assert_eq!(tally.total(), 2);

    assert!(logs.contains("Mismatched PEP status"));
    assert!(logs.contains("/peps/pep-0008/"));
    assert!(logs.contains("Deferred"));
    assert!(!logs.contains("/peps/pep-0484/"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pep_unknown_status_code_fails_before_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/peps/"))
        .respond_with(html(
            r#"<section id="index-by-category"><table>
                 <tr><td>PX</td><td><a href="pep-0001/">1</a></td></tr>
               </table></section>"#,
        ))
        .mount(&server)
        .await;
    mount_fixture_expecting(&server, "/peps/pep-0001/", "peps/pep-0001.html", 0).await;
    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        pep(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, ParserError::UnknownStatusCode(ref code) if code == "X"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pep_row_with_single_cell_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/peps/"))
        .respond_with(html(
            r#"<section id="index-by-category"><table>
                 <tr><td colspan="2">Withdrawn PEPs</td></tr>
               </table></section>"#,
        ))
        .mount(&server)
        .await;
    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        pep(&session_for(&config), &config)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, ParserError::TagNotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeated_runs_are_served_from_cache() {
    let server = MockServer::start().await;
    // Two network hits: the first run, and the run after clearing the cache.
    mount_fixture_expecting(&server, "/3/", "docs_index.html", 2).await;
    let uri = server.uri();

    let (first, second, third, cleared) = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        let session = session_for(&config);

        let first = Mode::LatestVersions.run(&session, &config).unwrap();
        let second = Mode::LatestVersions.run(&session, &config).unwrap();
        let cleared = session.cache().clear().unwrap();
        let third = Mode::LatestVersions.run(&session, &config).unwrap();
        (first, second, third, cleared)
    })
    .await
    .unwrap();

    assert_eq!(cleared, 1);
    assert_eq!(first, second);
    assert_eq!(first, third);
    assert!(first.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_mode_produces_no_table() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/3/download.html", "download.html").await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-3.13-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip".to_vec()))
        .mount(&server)
        .await;
    let uri = server.uri();

    let (result, saved) = tokio::task::spawn_blocking(move || {
        let home = tempdir().unwrap();
        let config = config_for(&uri, home.path());
        let result = Mode::Download.run(&session_for(&config), &config).unwrap();
        let saved = config
            .downloads_dir()
            .join("python-3.13-docs-pdf-a4.zip")
            .exists();
        (result, saved)
    })
    .await
    .unwrap();

    assert!(result.is_none());
    assert!(saved);
}
