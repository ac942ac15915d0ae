//! Commit command implementation

use std::path::Path;

use tracwiki_core::{PageReport, SyncReport};
use tracwiki_rpc::PageAttributes;

use super::{Session, print_entry, print_report};
use crate::error::Result;

/// Run the commit command
///
/// With a page name only that page is uploaded; otherwise every tracked page.
/// The state file is saved before any failure is reported.
pub fn run_commit(
    path: &Path,
    page: Option<&str>,
    message: Option<&str>,
    minor: bool,
    json: bool,
) -> Result<()> {
    let attributes = PageAttributes {
        comment: message.map(str::to_string),
        minoredit: minor,
    };
    let mut session = Session::open(path)?;

    match page {
        Some(name) => {
            let result = session
                .engine
                .commit_page(&mut session.state.store, name, &attributes);
            session.save()?;

            let entry = match &result {
                Ok(outcome) => PageReport::from_commit(name, *outcome),
                Err(e) => PageReport::from_error(name, e),
            };
            if json {
                print_report(&SyncReport { entries: vec![entry] }, true)?;
            } else if result.is_ok() {
                print_entry(&entry);
            }
            result?;
            Ok(())
        }
        None => {
            let report = session
                .engine
                .commit_all(&mut session.state.store, &attributes);
            session.save()?;
            print_report(&report, json)
        }
    }
}
