// Notification poller.
// Fetches one batch of notifications and shows the ones worth showing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::classifier::{Decision, SuppressReason, classify};
use crate::context::FocusContext;
use crate::error::Result;
use crate::github::{Notification, NotificationQuery};
use crate::state::BatchSummary;
use crate::surface::DesktopNotification;

/// What happened to a single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Shown { url: String },
    Suppressed(SuppressReason),
}

/// Run one batch and log any failure. Never fails.
pub async fn check_notifications(ctx: Arc<FocusContext>) -> Option<BatchSummary> {
    match run_batch(&ctx).await {
        Ok(summary) => Some(summary),
        Err(e) if e.is_configuration() => {
            error!(error = %e, "Cannot check notifications");
            None
        }
        Err(e) => {
            error!(error = %e, "Caught exception while checking notifications");
            None
        }
    }
}

/// Fetch notifications and process every item on its own task.
///
/// A failing item is logged and counted; it never fails the batch. The
/// batch only fails when the list itself cannot be fetched.
pub async fn run_batch(ctx: &Arc<FocusContext>) -> Result<BatchSummary> {
    let _fetching = ctx.poll_state.begin_batch();
    info!("Checking notifications");

    let query = NotificationQuery {
        participating: ctx.query.participating,
        since: ctx.query.lookback.and_then(window_start),
    };
    let notifications = ctx.api.list_notifications(&query).await?;

    let mut summary = BatchSummary {
        fetched: notifications.len(),
        ..Default::default()
    };

    let mut tasks = JoinSet::new();
    for notification in notifications {
        let ctx = Arc::clone(ctx);
        tasks.spawn(async move {
            let id = notification.id.clone();
            (id, process_notification(&ctx, notification).await)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(ItemOutcome::Shown { .. }))) => summary.shown += 1,
            Ok((_, Ok(ItemOutcome::Suppressed(_)))) => summary.suppressed += 1,
            Ok((id, Err(e))) => {
                error!(notification_id = %id, error = %e, "Failed to process notification");
                summary.failed += 1;
            }
            Err(e) => {
                error!(error = %e, "Notification task aborted");
                summary.failed += 1;
            }
        }
    }

    if summary.shown == 0 {
        info!("No important notifications to show");
    }
    debug!(?summary, "Batch complete");
    Ok(summary)
}

/// Start of the lookback window, or None when it reaches past the
/// representable time range.
fn window_start(lookback: chrono::Duration) -> Option<DateTime<Utc>> {
    let start = Utc::now().checked_sub_signed(lookback);
    if start.is_none() {
        warn!(
            lookback_days = lookback.num_days(),
            "Lookback window out of range; fetching without a window"
        );
    }
    start
}

/// Classify one notification and display it if accepted.
pub async fn process_notification(
    ctx: &FocusContext,
    notification: Notification,
) -> Result<ItemOutcome> {
    let decision = classify(
        &notification,
        &ctx.shown,
        &ctx.read,
        &ctx.filter,
        ctx.api.as_ref(),
    )
    .await?;

    let url = match decision {
        Decision::Suppress(reason) => {
            debug!(
                notification_id = %notification.id,
                reason = %reason,
                "Ignoring notification"
            );
            return Ok(ItemOutcome::Suppressed(reason));
        }
        Decision::Show { url } => url,
    };

    info!(
        notification_id = %notification.id,
        url = %url,
        title = %notification.subject.title,
        "Showing notification"
    );
    ctx.surface
        .create(
            &notification.id,
            DesktopNotification {
                title: notification.subject.title.clone(),
                message: notification.repository.full_name.clone(),
                event_time: notification.updated_at,
            },
        )
        .await?;
    ctx.shown.insert(notification.id, url.clone());

    Ok(ItemOutcome::Shown { url })
}
