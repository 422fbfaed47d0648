// Click handler.
// Opens a clicked notification and marks its thread read.

use tracing::{error, info, warn};

use crate::context::FocusContext;
use crate::error::Result;

/// What a click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Opened and marked read remotely and locally.
    Acknowledged,
    /// No URL is known for the id.
    UnknownNotification,
    /// Something failed; details were logged.
    Failed,
}

/// React to a notification click. Errors are logged, never returned.
pub async fn handle_click(ctx: &FocusContext, id: &str) -> ClickOutcome {
    match acknowledge(ctx, id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(notification_id = %id, error = %e, "Caught exception handling click");
            ClickOutcome::Failed
        }
    }
}

async fn acknowledge(ctx: &FocusContext, id: &str) -> Result<ClickOutcome> {
    if !ctx.surface.clear(id).await? {
        warn!(notification_id = %id, "Clearing notification found nothing to clear");
    }

    let Some(url) = ctx.shown.url(id) else {
        warn!(notification_id = %id, "No URL for notification");
        return Ok(ClickOutcome::UnknownNotification);
    };

    info!(notification_id = %id, url = %url, "Opening notification");
    ctx.opener.open(&url).await?;

    ctx.api.mark_thread_read(id).await?;

    // Read state is heavily cached server-side, so a successful PATCH can
    // still list the thread as unread for a while.
    ctx.read.mark_read(id);
    Ok(ClickOutcome::Acknowledged)
}
