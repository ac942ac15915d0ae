//! A stateful Trac JSON-RPC endpoint for `wiremock`.
//!
//! [`TracResponder`] answers the four wiki methods the way Trac's RPC plugin
//! does, against an in-memory page map shared with the test.
//!
//! ```rust,no_run
//! # async fn demo() {
//! use tracwiki_test_utils::TracResponder;
//! use wiremock::{Mock, MockServer, matchers::method};
//!
//! let server = MockServer::start().await;
//! let trac = TracResponder::new().with_page("WikiStart", 1, "= Welcome =");
//! Mock::given(method("POST"))
//!     .respond_with(trac.clone())
//!     .mount(&server)
//!     .await;
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use wiremock::{Request, Respond, ResponseTemplate};

#[derive(Debug, Default)]
struct Inner {
    pages: BTreeMap<String, (u64, String)>,
    puts: Vec<(String, String, Value)>,
    requests: usize,
}

/// In-memory Trac wiki behind a mock HTTP server. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct TracResponder {
    inner: Arc<Mutex<Inner>>,
}

impl TracResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, name: &str, version: u64, content: &str) -> Self {
        self.set_page(name, version, content);
        self
    }

    pub fn set_page(&self, name: &str, version: u64, content: &str) {
        self.inner
            .lock()
            .unwrap()
            .pages
            .insert(name.to_string(), (version, content.to_string()));
    }

    /// Simulate another user saving `content`.
    pub fn edit_page(&self, name: &str, content: &str) {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .pages
            .entry(name.to_string())
            .or_insert((0, String::new()));
        entry.0 += 1;
        entry.1 = content.to_string();
    }

    pub fn page(&self, name: &str) -> Option<(u64, String)> {
        self.inner.lock().unwrap().pages.get(name).cloned()
    }

    /// `(name, content, attributes)` of every `wiki.putPage` received.
    pub fn puts(&self) -> Vec<(String, String, Value)> {
        self.inner.lock().unwrap().puts.clone()
    }

    /// Number of JSON-RPC requests received.
    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests
    }

    fn dispatch(&self, method: &str, params: &[Value]) -> Result<Value, (i64, String)> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests += 1;
        let name = params.first().and_then(Value::as_str).unwrap_or_default();

        match method {
            "wiki.getAllPages" => Ok(json!(inner.pages.keys().collect::<Vec<_>>())),
            "wiki.getPageInfo" => Ok(match inner.pages.get(name) {
                Some((version, _)) => json!({
                    "name": name,
                    "version": version,
                    "author": "trac",
                    "comment": ""
                }),
                None => Value::Null,
            }),
            "wiki.getPage" => inner
                .pages
                .get(name)
                .map(|(_, content)| json!(content))
                .ok_or_else(|| (404, format!("Wiki page \"{name}\" does not exist"))),
            "wiki.putPage" => {
                let content = params.get(1).and_then(Value::as_str).unwrap_or_default();
                let attributes = params.get(2).cloned().unwrap_or_else(|| json!({}));
                inner
                    .puts
                    .push((name.to_string(), content.to_string(), attributes));
                let entry = inner
                    .pages
                    .entry(name.to_string())
                    .or_insert((0, String::new()));
                entry.0 += 1;
                entry.1 = content.to_string();
                Ok(json!(true))
            }
            other => Err((-32601, format!("JSON-RPC method \"{other}\" not found"))),
        }
    }
}

impl Respond for TracResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(e) => return ResponseTemplate::new(400).set_body_string(e.to_string()),
        };
        let id = body.get("id").cloned().unwrap_or(Value::Null);
        let method = body.get("method").and_then(Value::as_str).unwrap_or_default();
        let params = body
            .get("params")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        match self.dispatch(method, &params) {
            Ok(result) => ResponseTemplate::new(200).set_body_json(json!({
                "result": result,
                "error": null,
                "id": id
            })),
            Err((code, message)) => ResponseTemplate::new(500).set_body_json(json!({
                "result": null,
                "error": {"name": "JSONRPCError", "code": code, "message": message},
                "id": id
            })),
        }
    }
}
