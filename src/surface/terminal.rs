// Terminal notification surface.
// Renders notifications as styled cards and reads clicks from stdin.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Local;
use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::Result;

use super::{DesktopNotification, NotificationSurface};

/// User interaction with the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A notification was clicked.
    Click(String),
    /// Check for notifications now.
    Refresh,
    Quit,
}

/// Parse one line of user input.
///
/// `<id>` or `open <id>` clicks a notification, an empty line or `r`
/// refreshes, and `q` quits.
pub fn parse_command(line: &str) -> Option<SurfaceEvent> {
    let line = line.trim();
    match line {
        "" | "r" | "refresh" => return Some(SurfaceEvent::Refresh),
        "q" | "quit" => return Some(SurfaceEvent::Quit),
        _ => {}
    }

    let id = line
        .strip_prefix("open ")
        .map(str::trim)
        .unwrap_or(line);
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(SurfaceEvent::Click(id.to_string()))
    } else {
        None
    }
}

/// Forward stdin commands to `tx` until EOF or quit. Dropping `tx`
/// closes the event stream.
pub fn spawn_input_reader(tx: mpsc::UnboundedSender<SurfaceEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(event) => {
                        let quit = event == SurfaceEvent::Quit;
                        if tx.send(event).is_err() || quit {
                            break;
                        }
                    }
                    None => warn!(input = %line.trim(), "Unrecognised command"),
                },
                // Without input the loop keeps polling until interrupted
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    })
}

/// Prints notifications to stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    visible: Mutex<HashSet<String>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.visible.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Render a notification card.
fn render_card(id: &str, notification: &DesktopNotification) -> String {
    let time = notification
        .event_time
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");
    format!(
        "{} {}\n  {}\n  {}\n",
        format!("[{}]", id).cyan().bold(),
        notification.title.as_str().bold(),
        notification.message.as_str().dim(),
        format!("{}  (type {} to open)", time, id).dark_grey(),
    )
}

#[async_trait]
impl NotificationSurface for TerminalSurface {
    async fn create(&self, id: &str, notification: DesktopNotification) -> Result<()> {
        let card = render_card(id, &notification);
        {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(card.as_bytes())?;
            stdout.flush()?;
        }
        self.lock().insert(id.to_string());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool> {
        let cleared = self.lock().remove(id);
        debug!(notification_id = %id, cleared, "Cleared notification");
        Ok(cleared)
    }
}
