//! SyncEngine implementation
//!
//! The SyncEngine moves page content between the working directory and the
//! remote wiki, consulting and updating the [`MetadataStore`] as it goes.
//! It never loads or saves the state file itself; the caller owns the store.

use tracwiki_fs::checksum::compute_file_hash;
use tracwiki_fs::{ContentHash, NormalizedPath, io, page_path};
use tracwiki_rpc::{PageAttributes, WikiService};

use crate::metadata::{MetadataStore, PageRecord};
use crate::{Error, Result};

use super::report::{CheckoutOutcome, CommitOutcome, PageReport, SyncReport};

/// Engine for synchronizing wiki pages
///
/// - **checkout**: download remote pages that have no local modifications
/// - **commit**: upload local edits when nobody else has changed the page
pub struct SyncEngine<W> {
    /// Working directory holding one file per page
    root: NormalizedPath,
    /// Remote wiki
    wiki: W,
}

impl<W: WikiService> SyncEngine<W> {
    pub fn new(root: NormalizedPath, wiki: W) -> Self {
        Self { root, wiki }
    }

    /// Download `name` into the working directory.
    ///
    /// A tracked page whose local file no longer matches its record is left
    /// alone and reported as [`Error::LocalModifiedConflict`] without
    /// contacting the server. A tracked page whose file was deleted is
    /// restored.
    ///
    /// # Errors
    ///
    /// Per-page conditions: `LocalModifiedConflict`, `PageNotFound`,
    /// `Remote`, plus `Fs` for invalid names or unwritable files.
    pub fn checkout_page(&self, store: &mut MetadataStore, name: &str) -> Result<CheckoutOutcome> {
        let path = page_path(&self.root, name)?;
        let record = store.get(name).copied();
        let local = compute_file_hash(&path.to_native())?;

        if let Some(record) = record {
            match local {
                Some(hash) if hash != record.hash => {
                    tracing::debug!(page = name, "Local file differs from record");
                    return Err(Error::LocalModifiedConflict {
                        name: name.to_string(),
                    });
                }
                None => tracing::debug!(page = name, "Tracked file is missing, restoring"),
                Some(_) => {}
            }
        }

        let info = self
            .wiki
            .get_page_info(name)?
            .ok_or_else(|| Error::PageNotFound {
                name: name.to_string(),
            })?;
        let content = self.wiki.get_page(name)?;
        let hash = ContentHash::of_text(&content);

        if let Some(record) = record
            && record.hash == hash
            && local.is_some()
        {
            tracing::debug!(page = name, version = info.version, "Page is up to date");
            return Ok(CheckoutOutcome::UpToDate);
        }

        io::write_text(&path, &content)?;
        store.put(name, PageRecord::new(info.version, hash));
        tracing::info!(page = name, version = info.version, path = %path, "Checked out page");

        Ok(match record {
            Some(_) => CheckoutOutcome::Updated {
                version: info.version,
            },
            None => CheckoutOutcome::Created {
                version: info.version,
            },
        })
    }

    /// Check out every page the server lists.
    ///
    /// Per-page failures are recorded in the report and never stop the batch.
    ///
    /// # Errors
    ///
    /// Only if the page listing itself cannot be fetched.
    pub fn checkout_all(&self, store: &mut MetadataStore) -> Result<SyncReport> {
        let names = self.wiki.get_all_pages()?;
        tracing::debug!(count = names.len(), "Checking out all pages");

        let mut report = SyncReport::new();
        for name in &names {
            let entry = match self.checkout_page(store, name) {
                Ok(outcome) => PageReport::from_checkout(name, outcome),
                Err(e) => {
                    tracing::warn!(page = %name, error = %e, "Skipping page");
                    PageReport::from_error(name, &e)
                }
            };
            report.push(entry);
        }
        Ok(report)
    }

    /// Upload local edits of a tracked page.
    ///
    /// Nothing is uploaded unless the server's version equals the recorded
    /// one and the local content differs from the recorded hash.
    ///
    /// # Errors
    ///
    /// Per-page conditions: `UntrackedPage`, `PageNotFound`,
    /// `VersionConflict`, `LocalFileMissing`, `VersionOverflow`,
    /// `CommitRejected`, `Remote`, plus `Fs` for invalid names, unreadable
    /// or non-UTF-8 files.
    pub fn commit_page(
        &self,
        store: &mut MetadataStore,
        name: &str,
        attributes: &PageAttributes,
    ) -> Result<CommitOutcome> {
        let path = page_path(&self.root, name)?;
        let record = store
            .get(name)
            .copied()
            .ok_or_else(|| Error::UntrackedPage {
                name: name.to_string(),
            })?;

        let info = self
            .wiki
            .get_page_info(name)?
            .ok_or_else(|| Error::PageNotFound {
                name: name.to_string(),
            })?;

        if info.version != record.version {
            tracing::debug!(
                page = name,
                local = record.version,
                remote = info.version,
                "Remote version moved on"
            );
            return Err(Error::VersionConflict {
                name: name.to_string(),
                local: record.version,
                remote: info.version,
            });
        }

        if !path.exists() {
            return Err(Error::LocalFileMissing {
                name: name.to_string(),
                path: path.to_native(),
            });
        }

        let bytes = io::read_bytes(&path)?;
        let hash = ContentHash::of(&bytes);
        if hash == record.hash {
            tracing::debug!(page = name, "No local changes");
            return Ok(CommitOutcome::UpToDate);
        }

        let content = String::from_utf8(bytes).map_err(|_| tracwiki_fs::Error::NotUtf8 {
            path: path.to_native(),
        })?;
        let version = record
            .version
            .checked_add(1)
            .ok_or_else(|| Error::VersionOverflow {
                name: name.to_string(),
                version: record.version,
            })?;

        if !self.wiki.put_page(name, &content, attributes)? {
            return Err(Error::CommitRejected {
                name: name.to_string(),
            });
        }

        self.confirm_version(name, version);
        store.put(name, PageRecord::new(version, hash));
        tracing::info!(page = name, version, "Committed page");

        Ok(CommitOutcome::Committed { version })
    }

    /// Commit every tracked page, in the store's order.
    ///
    /// Per-page failures are recorded in the report and never stop the batch.
    pub fn commit_all(&self, store: &mut MetadataStore, attributes: &PageAttributes) -> SyncReport {
        let names: Vec<String> = store.names().map(str::to_string).collect();
        tracing::debug!(count = names.len(), "Committing all tracked pages");

        let mut report = SyncReport::new();
        for name in &names {
            let entry = match self.commit_page(store, name, attributes) {
                Ok(outcome) => PageReport::from_commit(name, outcome),
                Err(e) => {
                    tracing::warn!(page = %name, error = %e, "Skipping page");
                    PageReport::from_error(name, &e)
                }
            };
            report.push(entry);
        }
        report
    }

    /// Compare the server's version after an accepted upload with the one
    /// about to be recorded.
    ///
    /// The recorded version is always `previous + 1`. A server that reports
    /// anything else has seen another save, which the next commit must then
    /// refuse as a version conflict.
    fn confirm_version(&self, name: &str, expected: u64) {
        match self.wiki.get_page_info(name) {
            Ok(Some(info)) if info.version == expected => {}
            Ok(Some(info)) => tracing::warn!(
                page = name,
                reported = info.version,
                recorded = expected,
                "Server version after commit differs, page was edited concurrently"
            ),
            Ok(None) => {
                tracing::warn!(page = name, recorded = expected, "Page vanished after commit")
            }
            Err(e) => tracing::warn!(
                page = name,
                recorded = expected,
                error = %e,
                "Could not confirm version after commit"
            ),
        }
    }
}
