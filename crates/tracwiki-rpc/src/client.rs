//! Blocking JSON-RPC client for Trac's RPC plugin

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::protocol::{Method, RpcRequest, RpcResponse, page_info_absent};
use crate::service::{PageAttributes, PageInfo, WikiService};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("tracwiki/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A [`WikiService`] backed by a Trac server.
///
/// Authenticated sessions post to `{base}/login/jsonrpc`, anonymous ones to
/// `{base}/jsonrpc`.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: Client,
    endpoint: String,
    credentials: Option<Credentials>,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Build a client for the wiki rooted at `base_url` (e.g. `https://trac.example.org/project`).
    pub fn connect(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidEndpoint {
                url: base_url.to_string(),
                message: "expected an http:// or https:// URL".to_string(),
            });
        }

        let endpoint = match credentials {
            Some(_) => format!("{base}/login/jsonrpc"),
            None => format!("{base}/jsonrpc"),
        };

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::InvalidEndpoint {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(endpoint = %endpoint, authenticated = credentials.is_some(), "Connecting to wiki");

        Ok(Self {
            http,
            endpoint,
            credentials,
            next_id: AtomicU64::new(1),
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn call(&self, method: Method, params: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, id);

        tracing::debug!(method = %method, id, "Sending request");

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(credentials) = &self.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = builder.send().map_err(|e| Error::Unavailable {
            endpoint: self.endpoint.clone(),
            source: Box::new(e),
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| Error::Unavailable {
            endpoint: self.endpoint.clone(),
            source: Box::new(e),
        })?;

        // Trac answers faults with an error status but a well-formed body,
        // so the body is inspected before the status.
        let parsed: RpcResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(Error::Decode {
                    method: method.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(Error::Http {
                    endpoint: self.endpoint.clone(),
                    status: status.as_u16(),
                });
            }
        };

        if let Some(fault) = parsed.error {
            tracing::debug!(method = %method, code = ?fault.code, "Server fault");
            return Err(Error::Fault {
                method: method.to_string(),
                code: fault.code,
                message: fault.message,
            });
        }

        if !status.is_success() {
            return Err(Error::Http {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        if !parsed.matches(id) {
            return Err(Error::Decode {
                method: method.to_string(),
                message: format!("response id does not match request id {id}"),
            });
        }

        Ok(parsed.result.unwrap_or(Value::Null))
    }

    fn call_as<T: DeserializeOwned>(&self, method: Method, params: Vec<Value>) -> Result<T> {
        let result = self.call(method, params)?;
        decode(method, result)
    }
}

fn decode<T: DeserializeOwned>(method: Method, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Decode {
        method: method.to_string(),
        message: e.to_string(),
    })
}

impl WikiService for JsonRpcClient {
    fn get_all_pages(&self) -> Result<Vec<String>> {
        self.call_as(Method::GetAllPages, Vec::new())
    }

    fn get_page_info(&self, name: &str) -> Result<Option<PageInfo>> {
        let result = self.call(Method::GetPageInfo, vec![json!(name)])?;
        if page_info_absent(&result) {
            return Ok(None);
        }
        decode(Method::GetPageInfo, result).map(Some)
    }

    fn get_page(&self, name: &str) -> Result<String> {
        self.call_as(Method::GetPage, vec![json!(name)])
    }

    fn put_page(&self, name: &str, content: &str, attributes: &PageAttributes) -> Result<bool> {
        let attributes = serde_json::to_value(attributes).map_err(|e| Error::Decode {
            method: Method::PutPage.to_string(),
            message: e.to_string(),
        })?;
        self.call_as(Method::PutPage, vec![json!(name), json!(content), attributes])
    }
}
