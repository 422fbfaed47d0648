// Preferences module.
// Persists the single setting the user configures: the access token.

pub mod paths;
pub mod store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use store::FilePreferenceStore;

/// Stored user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// GitHub personal access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Preferences {
    /// Preferences holding a token, trimmed. Blank tokens count as unset.
    pub fn with_token(token: &str) -> Self {
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A persisted key-value preference store.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self) -> Result<Preferences>;
    async fn set(&self, preferences: &Preferences) -> Result<()>;
}
