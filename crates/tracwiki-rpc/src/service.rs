//! The remote wiki capability consumed by the sync engine.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Metadata the server reports for an existing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Authoritative version counter, bumped on every accepted write
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Attributes sent along with `putPage`.
///
/// The default value serializes to an empty map, which is what the server
/// receives unless the user supplied a comment or asked for a minor edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub minoredit: bool,
}

/// A remote wiki holding named plain-text pages.
///
/// Every call is a blocking round trip. Implementations never retry.
pub trait WikiService {
    /// Names of every page on the server.
    fn get_all_pages(&self) -> Result<Vec<String>>;

    /// Current metadata for `name`, or `None` if the page does not exist.
    fn get_page_info(&self, name: &str) -> Result<Option<PageInfo>>;

    /// Latest content of `name`.
    fn get_page(&self, name: &str) -> Result<String>;

    /// Store `content` as a new version of `name`.
    ///
    /// Returns the server's acknowledgement; `false` means the write was
    /// refused without a fault.
    fn put_page(&self, name: &str, content: &str, attributes: &PageAttributes) -> Result<bool>;
}

impl<T: WikiService + ?Sized> WikiService for &T {
    fn get_all_pages(&self) -> Result<Vec<String>> {
        (**self).get_all_pages()
    }

    fn get_page_info(&self, name: &str) -> Result<Option<PageInfo>> {
        (**self).get_page_info(name)
    }

    fn get_page(&self, name: &str) -> Result<String> {
        (**self).get_page(name)
    }

    fn put_page(&self, name: &str, content: &str, attributes: &PageAttributes) -> Result<bool> {
        (**self).put_page(name, content, attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_attributes_serialize_to_empty_map() {
        let json = serde_json::to_string(&PageAttributes::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn attributes_with_comment() {
        let attributes = PageAttributes {
            comment: Some("typo".to_string()),
            minoredit: true,
        };
        let json = serde_json::to_value(&attributes).unwrap();
        assert_eq!(json, serde_json::json!({"comment": "typo", "minoredit": true}));
    }

    #[test]
    fn page_info_ignores_unknown_fields() {
        let json = serde_json::json!({
            "name": "WikiStart",
            "version": 7,
            "author": "admin",
            "lastModified": {"__jsonclass__": ["datetime", "2012-05-01T10:00:00"]},
            "comment": ""
        });
        let info: PageInfo = serde_json::from_value(json).unwrap();
        assert_eq!(info.version, 7);
        assert_eq!(info.name.as_deref(), Some("WikiStart"));
        assert_eq!(info.author.as_deref(), Some("admin"));
    }
}
