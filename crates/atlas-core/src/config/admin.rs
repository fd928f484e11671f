//! Admin bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Credentials for the optional startup admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin email; bootstrap is skipped when unset.
    #[serde(default)]
    pub email: Option<String>,
    /// Admin password; bootstrap is skipped when unset.
    #[serde(default)]
    pub password: Option<String>,
    /// Display name for a newly created admin.
    #[serde(default = "default_username")]
    pub username: String,
}

impl AdminConfig {
    /// Returns `(email, password)` when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            username: default_username(),
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}
