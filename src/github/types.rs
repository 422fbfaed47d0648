// GitHub API response types.
// Defines structs for deserializing notification threads and pull requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why the user received a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Assign,
    Comment,
    Mention,
    ReviewRequested,
    Author,
    Manual,
    Subscribed,
    #[serde(other)]
    Other,
}

impl Reason {
    /// Reasons that produce a desktop notification unless overridden.
    pub const INTERESTING: [Reason; 7] = [
        Reason::Assign,
        Reason::Comment,
        Reason::Mention,
        Reason::ReviewRequested,
        Reason::Author,
        Reason::Manual,
        Reason::Subscribed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Assign => "assign",
            Reason::Comment => "comment",
            Reason::Mention => "mention",
            Reason::ReviewRequested => "review_requested",
            Reason::Author => "author",
            Reason::Manual => "manual",
            Reason::Subscribed => "subscribed",
            Reason::Other => "other",
        }
    }
}

/// Kind of resource a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    Issue,
    PullRequest,
    Commit,
    RepositoryInvitation,
    RepositoryVulnerabilityAlert,
    #[serde(other)]
    Other,
}

/// Repository a notification thread belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRepository {
    pub full_name: String,
    pub html_url: String,
    /// API URL of the repository.
    pub url: String,
}

/// Repository reference nested in some subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRepository {
    pub html_url: String,
}

/// The resource a notification refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "type")]
    pub subject_type: SubjectType,
    /// API URL; null for some subject types (discussions, check suites).
    pub url: Option<String>,
    pub title: String,
    #[serde(default)]
    pub repository: Option<SubjectRepository>,
}

/// A notification thread from `GET /notifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub unread: bool,
    pub reason: Reason,
    pub subject: Subject,
    pub repository: NotificationRepository,
    pub updated_at: DateTime<Utc>,
}

/// Pull request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

/// The subset of a pull request needed to decide whether it is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub state: PullRequestState,
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    /// Only notifications the user is directly participating in.
    pub participating: bool,
    /// Only notifications updated after this time.
    pub since: Option<DateTime<Utc>>,
}

impl NotificationQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.participating {
            params.push(("participating", "true".to_string()));
        }
        if let Some(since) = self.since {
            params.push((
                "since",
                since.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ));
        }
        params
    }
}
