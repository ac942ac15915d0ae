//! Well-known names inside a tracwiki working directory.

/// Name of the state document (remote settings plus page records).
///
/// Working directories created by earlier tracwiki releases use the same name.
pub const STATE_FILE_NAME: &str = ".trac_config";

/// Suffix appended to temporary files produced by atomic writes.
pub const TEMP_SUFFIX: &str = "tmp";
