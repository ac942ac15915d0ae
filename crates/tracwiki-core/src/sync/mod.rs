//! Page synchronization between the working directory and the wiki
//!
//! - **engine**: checkout and commit, single page or batch
//! - **report**: per-page outcomes and batch reports
//! - **status**: offline comparison of working files against their records

mod engine;
mod report;
mod status;

pub use engine::SyncEngine;
pub use report::{CheckoutOutcome, CommitOutcome, PageReport, PageStatus, SyncReport};
pub use status::{LocalState, StatusEntry, StatusReport, check_local};
