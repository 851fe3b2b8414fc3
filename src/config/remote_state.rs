//! Remote state backend configuration.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Azure storage account state backend.
///
/// Optional: without it the backend render produces no output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStateConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub resource_group: String,

    #[serde(deserialize_with = "null_as_default")]
    pub storage_account: String,

    #[serde(deserialize_with = "null_as_default")]
    pub container_name: String,

    /// Folder inside the container that holds the per-site state files
    pub state_folder: Option<String>,
}

impl RemoteStateConfig {
    /// Storage key of the state file for `site`.
    ///
    /// ```rust
    /// use mach_azure_minimal::config::RemoteStateConfig;
    ///
    /// let mut state = RemoteStateConfig::default();
    /// assert_eq!(state.key("foo"), "foo");
    ///
    /// state.state_folder = Some("envs".to_string());
    /// assert_eq!(state.key("foo"), "envs/foo");
    /// ```
    #[must_use]
    pub fn key(&self, site: &str) -> String {
        match self.state_folder.as_deref() {
            Some(folder) if !folder.is_empty() => format!("{folder}/{site}"),
            _ => site.to_string(),
        }
    }
}
