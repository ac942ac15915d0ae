//! Core synchronization layer for tracwiki
//!
//! This crate decides, page by page, whether to fetch, skip, refuse or upload,
//! by comparing local content hashes against the persisted page records and
//! the server's version counter.
//!
//! - **Metadata store**: page name to `(version, hash)` records, in insertion order
//! - **State file**: the `.trac_config` document holding remote settings and records
//! - **SyncEngine**: checkout and commit, for one page or all of them
//! - **Local status**: offline comparison of working files against their records
//!
//! # Architecture
//!
//! ```text
//!             tracwiki-cli
//!                  |
//!            tracwiki-core
//!                  |
//!         +--------+--------+
//!         |                 |
//!    tracwiki-fs      tracwiki-rpc
//! ```

pub mod config;
pub mod error;
pub mod metadata;
pub mod state;
pub mod sync;

pub use config::RemoteConfig;
pub use error::{Error, Result};
pub use metadata::{MetadataStore, PageRecord};
pub use state::StateFile;
pub use sync::{
    CheckoutOutcome, CommitOutcome, LocalState, PageReport, PageStatus, StatusEntry,
    StatusReport, SyncEngine, SyncReport, check_local,
};
