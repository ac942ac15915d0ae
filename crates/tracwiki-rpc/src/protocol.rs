//! JSON-RPC message types
//!
//! Trac's RPC plugin accepts `{"method", "params", "id"}` and answers with
//! `{"result", "error", "id"}`, where `error` is `null` on success.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wiki methods exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetAllPages,
    GetPageInfo,
    GetPage,
    PutPage,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAllPages => "wiki.getAllPages",
            Self::GetPageInfo => "wiki.getPageInfo",
            Self::GetPage => "wiki.getPage",
            Self::PutPage => "wiki.putPage",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing request
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub method: &'static str,
    pub params: Vec<Value>,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: Method, params: Vec<Value>, id: u64) -> Self {
        Self {
            method: method.as_str(),
            params,
            id,
        }
    }
}

/// Incoming response
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFault>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Fault object carried in `error`
#[derive(Debug, Clone, Deserialize)]
pub struct RpcFault {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl RpcResponse {
    /// Whether the response answers the request with the given id.
    ///
    /// A missing or `null` id is accepted; some server versions omit it on
    /// faults.
    pub fn matches(&self, id: u64) -> bool {
        match &self.id {
            None | Some(Value::Null) => true,
            Some(value) => value.as_u64() == Some(id),
        }
    }
}

/// Interpret a `wiki.getPageInfo` result.
///
/// The server answers `null` (or a falsy `0`/`false` on older versions) for a
/// page that does not exist.
pub fn page_info_absent(result: &Value) -> bool {
    match result {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_u64() == Some(0),
        _ => false,
    }
}
