//! Remote wiki access for tracwiki
//!
//! [`WikiService`] is the seam between the sync engine and the server. The
//! production implementation, [`JsonRpcClient`], speaks the JSON-RPC dialect
//! of Trac's RPC plugin over blocking HTTP.

pub mod client;
pub mod error;
pub mod protocol;
pub mod service;

pub use client::{Credentials, JsonRpcClient};
pub use error::{Error, Result};
pub use service::{PageAttributes, PageInfo, WikiService};
