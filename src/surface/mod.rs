// Desktop surface module.
// Defines where notifications are displayed and how their URLs are opened.

pub mod browser;
pub mod terminal;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use browser::BrowserOpener;
pub use terminal::{SurfaceEvent, TerminalSurface, parse_command, spawn_input_reader};

/// A notification as handed to the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNotification {
    pub title: String,
    pub message: String,
    pub event_time: DateTime<Utc>,
}

/// Displays and clears desktop notifications.
#[async_trait]
pub trait NotificationSurface: Send + Sync {
    /// Show a notification under `id`, replacing any existing one.
    async fn create(&self, id: &str, notification: DesktopNotification) -> Result<()>;

    /// Remove a notification. Returns false if nothing was displayed under `id`.
    async fn clear(&self, id: &str) -> Result<bool>;
}

/// Opens a URL in a new, focused viewer.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}
