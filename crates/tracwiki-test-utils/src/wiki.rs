//! In-memory wiki server.
//!
//! [`FakeWiki`] implements [`WikiService`] over a map of pages and logs each
//! call, so tests can assert on what reached the "server" (for example that a
//! refused commit made zero upload calls).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracwiki_rpc::{Error, PageAttributes, PageInfo, Result, WikiService};

/// One call received by a [`FakeWiki`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAllPages,
    GetPageInfo(String),
    GetPage(String),
    PutPage {
        name: String,
        content: String,
        attributes: PageAttributes,
    },
}

#[derive(Debug, Clone)]
struct Page {
    version: u64,
    content: String,
}

/// A wiki held in memory.
///
/// Pages are listed in name order. Every accepted `put_page` bumps the
/// page's version by one (or by [`FakeWiki::set_put_step`]), starting at 1
/// for new pages.
#[derive(Debug, Default)]
pub struct FakeWiki {
    pages: Mutex<BTreeMap<String, Page>>,
    calls: Mutex<Vec<Call>>,
    offline: AtomicBool,
    reject_puts: AtomicBool,
    offline_after_put: AtomicBool,
    put_step: AtomicU64,
    edit_after_put: Mutex<Option<String>>,
    failing_pages: Mutex<BTreeSet<String>>,
}

impl FakeWiki {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FakeWiki::set_page`].
    pub fn with_page(self, name: &str, version: u64, content: &str) -> Self {
        self.set_page(name, version, content);
        self
    }

    /// Create or replace a page with an explicit version.
    pub fn set_page(&self, name: &str, version: u64, content: &str) {
        self.pages.lock().unwrap().insert(
            name.to_string(),
            Page {
                version,
                content: content.to_string(),
            },
        );
    }

    /// Simulate another user saving `content`, bumping the version.
    pub fn edit_page(&self, name: &str, content: &str) -> u64 {
        let mut pages = self.pages.lock().unwrap();
        let page = pages.entry(name.to_string()).or_insert(Page {
            version: 0,
            content: String::new(),
        });
        page.version += 1;
        page.content = content.to_string();
        page.version
    }

    /// Current `(version, content)` of a page.
    pub fn page(&self, name: &str) -> Option<(u64, String)> {
        self.pages
            .lock()
            .unwrap()
            .get(name)
            .map(|p| (p.version, p.content.clone()))
    }

    /// Make every call fail as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Answer `false` to every `put_page`.
    pub fn set_reject_puts(&self, reject: bool) {
        self.reject_puts.store(reject, Ordering::SeqCst);
    }

    /// Go offline right after the next accepted `put_page`.
    pub fn set_offline_after_put(&self, enabled: bool) {
        self.offline_after_put.store(enabled, Ordering::SeqCst);
    }

    /// Advance the version by `step` on every accepted `put_page`.
    pub fn set_put_step(&self, step: u64) {
        self.put_step.store(step, Ordering::SeqCst);
    }

    /// Have another user save `content` right after the next accepted
    /// `put_page`, before the caller can look at the page again.
    pub fn edit_after_next_put(&self, content: &str) {
        *self.edit_after_put.lock().unwrap() = Some(content.to_string());
    }

    /// Make every call naming `name` fail as if the server were unreachable.
    pub fn fail_page(&self, name: &str) {
        self.failing_pages.lock().unwrap().insert(name.to_string());
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// `(name, content)` of every `put_page` received.
    pub fn puts(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::PutPage { name, content, .. } => Some((name, content)),
                _ => None,
            })
            .collect()
    }

    pub fn put_count(&self) -> usize {
        self.puts().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<()> {
        let name = match &call {
            Call::GetAllPages => None,
            Call::GetPageInfo(name) | Call::GetPage(name) => Some(name.clone()),
            Call::PutPage { name, .. } => Some(name.clone()),
        };
        self.calls.lock().unwrap().push(call);

        let page_fails = name.is_some_and(|n| self.failing_pages.lock().unwrap().contains(&n));
        if self.offline.load(Ordering::SeqCst) || page_fails {
            return Err(Error::Unavailable {
                endpoint: "fake://wiki".to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "fake wiki is offline",
                )),
            });
        }
        Ok(())
    }
}

impl WikiService for FakeWiki {
    fn get_all_pages(&self) -> Result<Vec<String>> {
        self.record(Call::GetAllPages)?;
        Ok(self.pages.lock().unwrap().keys().cloned().collect())
    }

    fn get_page_info(&self, name: &str) -> Result<Option<PageInfo>> {
        self.record(Call::GetPageInfo(name.to_string()))?;
        Ok(self.pages.lock().unwrap().get(name).map(|p| PageInfo {
            version: p.version,
            name: Some(name.to_string()),
            author: None,
        }))
    }

    fn get_page(&self, name: &str) -> Result<String> {
        self.record(Call::GetPage(name.to_string()))?;
        self.pages
            .lock()
            .unwrap()
            .get(name)
            .map(|p| p.content.clone())
            .ok_or_else(|| Error::Fault {
                method: "wiki.getPage".to_string(),
                code: Some(404),
                message: format!("Wiki page \"{name}\" does not exist"),
            })
    }

    fn put_page(&self, name: &str, content: &str, attributes: &PageAttributes) -> Result<bool> {
        self.record(Call::PutPage {
            name: name.to_string(),
            content: content.to_string(),
            attributes: attributes.clone(),
        })?;
        if self.reject_puts.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let version = self.edit_page(name, content);
        let step = self.put_step.load(Ordering::SeqCst);
        if step > 1
            && let Some(page) = self.pages.lock().unwrap().get_mut(name)
        {
            page.version = version - 1 + step;
        }
        if let Some(other) = self.edit_after_put.lock().unwrap().take() {
            self.edit_page(name, &other);
        }
        if self.offline_after_put.load(Ordering::SeqCst) {
            self.set_offline(true);
        }
        Ok(true)
    }
}
