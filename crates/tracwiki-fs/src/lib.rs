//! Filesystem abstraction for tracwiki
//!
//! Maps wiki page names onto files in the working directory, hashes page
//! content and performs locked, atomic writes.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::ContentHash;
pub use constants::STATE_FILE_NAME;
pub use error::{Error, Result};
pub use path::{NormalizedPath, page_path, validate_page_name};
