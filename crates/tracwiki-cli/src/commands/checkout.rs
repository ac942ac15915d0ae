//! Checkout command implementation

use std::path::Path;

use tracwiki_core::{PageReport, SyncReport};

use super::{Session, print_entry, print_report};
use crate::error::Result;

/// Run the checkout command
///
/// With a page name only that page is fetched; otherwise every page on the
/// server. The state file is saved before any failure is reported.
pub fn run_checkout(path: &Path, page: Option<&str>, json: bool) -> Result<()> {
    let mut session = Session::open(path)?;

    match page {
        Some(name) => {
            let result = session.engine.checkout_page(&mut session.state.store, name);
            session.save()?;

            let entry = match &result {
                Ok(outcome) => PageReport::from_checkout(name, *outcome),
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
            let result = session.engine.checkout_all(&mut session.state.store);
            session.save()?;
            print_report(&result?, json)
        }
    }
}
