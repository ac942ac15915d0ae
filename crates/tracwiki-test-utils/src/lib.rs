//! Shared test utilities for the tracwiki workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`wiki`]: [`FakeWiki`], an in-memory wiki that records every call
//! - [`trac`]: [`TracResponder`], a stateful JSON-RPC endpoint for `wiremock`
//! - [`workspace`]: [`TestWorkspace`], a temporary working directory

pub mod trac;
pub mod wiki;
pub mod workspace;

pub use trac::TracResponder;
pub use wiki::{Call, FakeWiki};
pub use workspace::TestWorkspace;
