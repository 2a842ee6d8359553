//! Application identity used to locate the storage directory

use crate::storage::storage_dir;
use std::path::PathBuf;

/// Identifies the application whose shopping list is being stored
///
/// Resolved through the platform conventions of the `directories` crate
/// (XDG on Linux, `Application Support` on macOS, `%APPDATA%` on Windows).
///
/// # Example
///
/// ```
/// use shopping_list_store::AppName;
///
/// let app_name = AppName::new("com", "example", "groceries");
/// assert_eq!(app_name.application, "groceries");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// Create a new application name
    ///
    /// # Arguments
    ///
    /// * `qualifier` - Typically a reverse domain name (e.g., "com", "org")
    /// * `organization` - Your organization or username
    /// * `application` - The application name
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    /// Directory the group files of this application live in
    pub fn storage_dir(&self) -> PathBuf {
        storage_dir(self)
    }
}
