// Notification classifier.
// Decides whether a notification deserves a desktop notification.

use std::fmt;

use crate::cache::{LocalReadCache, ShownNotificationCache};
use crate::error::Result;
use crate::github::{GitHubApi, Notification, Reason, SubjectType, notification_url};

/// Which notifications are worth showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Reasons that produce a desktop notification.
    pub interesting: Vec<Reason>,
    /// Ignore comments on anything but pull requests.
    pub comments_only_on_prs: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            interesting: Reason::INTERESTING.to_vec(),
            comments_only_on_prs: false,
        }
    }
}

impl FilterConfig {
    pub fn is_interesting(&self, reason: Reason) -> bool {
        self.interesting.contains(&reason)
    }
}

/// Why a notification was not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    NotUnread,
    LocallyRead,
    AlreadyShown,
    UninterestingReason,
    CommentOutsidePullRequest,
    ClosedPullRequest,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SuppressReason::NotUnread => "not unread",
            SuppressReason::LocallyRead => "locally cached read",
            SuppressReason::AlreadyShown => "already shown",
            SuppressReason::UninterestingReason => "uninteresting reason",
            SuppressReason::CommentOutsidePullRequest => "comment restricted to PRs",
            SuppressReason::ClosedPullRequest => "closed PR",
        };
        f.write_str(text)
    }
}

/// Outcome of classifying one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Show { url: String },
    Suppress(SuppressReason),
}

/// Classify a notification. Local checks run first; the pull request
/// lookup is the only network call and runs last.
pub async fn classify(
    notification: &Notification,
    shown: &ShownNotificationCache,
    read: &LocalReadCache,
    filter: &FilterConfig,
    api: &dyn GitHubApi,
) -> Result<Decision> {
    if let Some(reason) = local_suppression(notification, shown, read, filter) {
        return Ok(Decision::Suppress(reason));
    }

    if notification.subject.subject_type == SubjectType::PullRequest
        && !api.is_open_pull_request(notification).await?
    {
        return Ok(Decision::Suppress(SuppressReason::ClosedPullRequest));
    }

    let url = notification_url(notification)?;
    Ok(Decision::Show { url })
}

fn local_suppression(
    notification: &Notification,
    shown: &ShownNotificationCache,
    read: &LocalReadCache,
    filter: &FilterConfig,
) -> Option<SuppressReason> {
    if !notification.unread {
        return Some(SuppressReason::NotUnread);
    }
    if read.is_read(&notification.id) {
        return Some(SuppressReason::LocallyRead);
    }
    if shown.contains(&notification.id) {
        return Some(SuppressReason::AlreadyShown);
    }
    if !filter.is_interesting(notification.reason) {
        return Some(SuppressReason::UninterestingReason);
    }
    if filter.comments_only_on_prs
        && notification.reason == Reason::Comment
        && notification.subject.subject_type != SubjectType::PullRequest
    {
        return Some(SuppressReason::CommentOutsidePullRequest);
    }
    None
}
