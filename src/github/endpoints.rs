// GitHub API endpoint functions.
// Typed methods for the notification and pull request REST endpoints.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;

use super::client::{CallOptions, GitHubClient};
use super::types::{Notification, NotificationQuery, PullRequest, PullRequestState};
use super::urls::id_from_api_url;

/// Body for marking a thread read.
#[derive(Debug, Serialize)]
struct MarkReadBody {
    last_read_at: String,
}

/// Remote operations used by the poll loop and click handler.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// List notification threads for the authenticated user.
    async fn list_notifications(&self, query: &NotificationQuery) -> Result<Vec<Notification>>;

    /// Get a pull request by its repository API URL and number.
    async fn get_pull_request(&self, repository_url: &str, number: u64) -> Result<PullRequest>;

    /// Mark a notification thread as read.
    async fn mark_thread_read(&self, thread_id: &str) -> Result<()>;

    /// Whether the pull request a notification refers to is still open.
    ///
    /// Any fetch failure counts as open. A 404 for a private repository
    /// usually means the token lacks repo scope, not that the PR is gone,
    /// and an open PR should never be hidden. Only a subject URL without a
    /// number is an error.
    async fn is_open_pull_request(&self, notification: &Notification) -> Result<bool> {
        let number = id_from_api_url(notification.subject.url.as_deref().unwrap_or_default())?;
        match self
            .get_pull_request(&notification.repository.url, number)
            .await
        {
            Ok(pr) => Ok(pr.state == PullRequestState::Open),
            Err(e) => {
                warn!(
                    notification_id = %notification.id,
                    number,
                    error = %e,
                    "Assuming PR is open because of error"
                );
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_notifications(&self, query: &NotificationQuery) -> Result<Vec<Notification>> {
        let params = query.to_params();
        let response = self
            .get_with_params(&self.endpoint("/notifications"), &params)
            .await?;
        let notifications: Vec<Notification> = response.json().await?;
        Ok(notifications)
    }

    async fn get_pull_request(&self, repository_url: &str, number: u64) -> Result<PullRequest> {
        let url = format!("{}/pulls/{}", repository_url.trim_end_matches('/'), number);
        let response = self.get(&url).await?;
        let pr: PullRequest = response.json().await?;
        Ok(pr)
    }

    async fn mark_thread_read(&self, thread_id: &str) -> Result<()> {
        // The API says a body is optional, but without a timestamp threads
        // tend to stay unread for a long time.
        let body = MarkReadBody {
            last_read_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };
        let url = self.endpoint(&format!("/notifications/threads/{}", thread_id));
        self.request(
            Method::PATCH,
            &url,
            |r| r.json(&body),
            CallOptions {
                require_status: Some(StatusCode::RESET_CONTENT),
            },
        )
        .await?;
        info!(notification_id = %thread_id, "Marked notification as read");
        Ok(())
    }
}
