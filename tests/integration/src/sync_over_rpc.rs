//! End-to-end sync over JSON-RPC
//!
//! This test exercises the complete flow: state file -> JSON-RPC client ->
//! mock Trac server -> working directory -> state file.

use pretty_assertions::assert_eq;
use serde_json::json;
use tracwiki_core::{
    CheckoutOutcome, CommitOutcome, Error, PageStatus, RemoteConfig, StateFile, SyncEngine,
};
use tracwiki_fs::{ContentHash, NormalizedPath};
use tracwiki_rpc::{JsonRpcClient, PageAttributes};
use tracwiki_test_utils::{TestWorkspace, TracResponder};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn anonymous_server(trac: &TracResponder) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .respond_with(trac.clone())
        .mount(&server)
        .await;
    server
}

/// Run `f` with an engine over a real client, off the async runtime.
async fn with_engine<T, F>(ws: &TestWorkspace, remote: RemoteConfig, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&SyncEngine<JsonRpcClient>) -> T + Send + 'static,
{
    let root = NormalizedPath::new(ws.root());
    tokio::task::spawn_blocking(move || {
        let engine = SyncEngine::new(root, remote.connect().unwrap());
        f(&engine)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_cycle_persists_state() {
    let trac = TracResponder::new()
        .with_page("WikiStart", 3, "Hi")
        .with_page("Project/Notes", 7, "* item\n");
    let server = anonymous_server(&trac).await;
    let ws = TestWorkspace::new();
    let remote = RemoteConfig::parse(&server.uri(), "", "").unwrap();
    let state_path = StateFile::path_in(&NormalizedPath::new(ws.root()));

    // checkout everything and persist
    let mut state = StateFile::default();
    state.configure(remote.clone());
    let (report, state) = with_engine(&ws, remote.clone(), move |engine| {
        let report = engine.checkout_all(&mut state.store).unwrap();
        (report, state)
    })
    .await;
    state.save(&state_path).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.changed(), 2);
    ws.assert_page_eq("WikiStart", "Hi");
    ws.assert_page_eq("Project/Notes", "* item\n");

    // edit, reload state from disk, commit
    ws.write_page("WikiStart", "Hi there");
    let mut state = StateFile::load(&state_path).unwrap();
    let (outcome, state) = with_engine(&ws, remote, move |engine| {
        let outcome = engine
            .commit_page(&mut state.store, "WikiStart", &PageAttributes::default())
            .unwrap();
        (outcome, state)
    })
    .await;
    state.save(&state_path).unwrap();

    assert_eq!(outcome, CommitOutcome::Committed { version: 4 });
    assert_eq!(trac.page("WikiStart"), Some((4, "Hi there".to_string())));
    assert_eq!(trac.puts()[0].2, json!({}));

    let reloaded = StateFile::load(&state_path).unwrap();
    let record = reloaded.store.get("WikiStart").unwrap();
    assert_eq!(record.version, 4);
    assert_eq!(record.hash, ContentHash::of_text("Hi there"));
    assert_eq!(
        reloaded.store.names().collect::<Vec<_>>(),
        vec!["Project/Notes", "WikiStart"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_authenticated_session_uses_login_endpoint() {
    let trac = TracResponder::new().with_page("Private", 1, "secret notes");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/jsonrpc"))
        .and(basic_auth("alice", "pw"))
        .respond_with(trac.clone())
        .mount(&server)
        .await;
    let ws = TestWorkspace::new();
    let remote = RemoteConfig::parse(&server.uri(), "alice", "pw").unwrap();

    let outcome = with_engine(&ws, remote, |engine| {
        let mut store = tracwiki_core::MetadataStore::new();
        engine.checkout_page(&mut store, "Private").unwrap()
    })
    .await;

    assert_eq!(outcome, CheckoutOutcome::Created { version: 1 });
    ws.assert_page_eq("Private", "secret notes");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_page_is_reported_not_fatal() {
    let trac = TracResponder::new();
    let server = anonymous_server(&trac).await;
    let ws = TestWorkspace::new();
    let remote = RemoteConfig::parse(&server.uri(), "", "").unwrap();

    let err = with_engine(&ws, remote, |engine| {
        let mut store = tracwiki_core::MetadataStore::new();
        engine.checkout_page(&mut store, "Ghost").unwrap_err()
    })
    .await;

    assert!(matches!(err, Error::PageNotFound { .. }));
    ws.assert_page_absent("Ghost");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_fails_only_that_page() {
    let trac = TracResponder::new()
        .with_page("Broken", 1, "x")
        .with_page("Fine", 1, "y");
    let server = MockServer::start().await;
    // Trac answers this one page with a server error page instead of JSON
    Mock::given(method("POST"))
        .and(wiremock::matchers::body_partial_json(
            json!({"method": "wiki.getPageInfo", "params": ["Broken"]}),
        ))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(trac.clone())
        .mount(&server)
        .await;
    let ws = TestWorkspace::new();
    let remote = RemoteConfig::parse(&server.uri(), "", "").unwrap();

    let report = with_engine(&ws, remote, |engine| {
        let mut store = tracwiki_core::MetadataStore::new();
        engine.checkout_all(&mut store).unwrap()
    })
    .await;

    assert_eq!(report.get("Broken").map(|e| e.status), Some(PageStatus::Failed));
    assert_eq!(report.get("Fine").map(|e| e.status), Some(PageStatus::Created));
    ws.assert_page_eq("Fine", "y");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conflicting_remote_edit_uploads_nothing() {
    let trac = TracResponder::new().with_page("Home", 3, "Hi");
    let server = anonymous_server(&trac).await;
    let ws = TestWorkspace::new();
    let remote = RemoteConfig::parse(&server.uri(), "", "").unwrap();

    let trac_handle = trac.clone();
    let home = ws.page_path("Home");
    let (err, version) = with_engine(&ws, remote, move |engine| {
        let mut store = tracwiki_core::MetadataStore::new();
        engine.checkout_page(&mut store, "Home").unwrap();
        std::fs::write(&home, "mine").unwrap();
        trac_handle.edit_page("Home", "theirs");
        let err = engine
            .commit_page(&mut store, "Home", &PageAttributes::default())
            .unwrap_err();
        (err, store.get("Home").map(|r| r.version))
    })
    .await;

    assert!(matches!(err, Error::VersionConflict { local: 3, remote: 4, .. }));
    assert_eq!(version, Some(3));
    assert!(trac.puts().is_empty());
}
