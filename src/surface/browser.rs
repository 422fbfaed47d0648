// Browser launcher.
// Opens notification URLs with the system's default handler.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{FocusError, Result};

use super::UrlOpener;

/// Opens URLs in the default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl BrowserOpener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlOpener for BrowserOpener {
    async fn open(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Opening browser");
        let target = url.to_string();
        // The launcher blocks until the handler process has started.
        tokio::task::spawn_blocking(move || open::that(target))
            .await
            .map_err(|e| FocusError::Other(format!("Browser launcher panicked: {}", e)))??;
        Ok(())
    }
}
