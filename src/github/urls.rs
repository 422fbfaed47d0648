// URL helpers for notification subjects.
// Maps API URLs to the pages a user would open in a browser.

use crate::error::{FocusError, Result};

use super::types::{Notification, SubjectType};

/// Get the trailing number from an API URL,
/// like https://api.github.com/repos/mozilla/addons-code-manager/pulls/28.
pub fn id_from_api_url(api_url: &str) -> Result<u64> {
    let malformed = || FocusError::MalformedSubjectUrl(api_url.to_string());
    let (_, last) = api_url.rsplit_once('/').ok_or_else(malformed)?;
    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    last.parse().map_err(|_| malformed())
}

fn subject_number(notification: &Notification) -> Result<u64> {
    match notification.subject.url.as_deref() {
        Some(url) => id_from_api_url(url),
        None => Err(FocusError::MalformedSubjectUrl(String::new())),
    }
}

/// Resolve the browser URL for a notification.
pub fn notification_url(notification: &Notification) -> Result<String> {
    let html_url = notification.repository.html_url.trim_end_matches('/');
    match notification.subject.subject_type {
        SubjectType::RepositoryInvitation => Ok(format!("{}/invitations", html_url)),
        SubjectType::RepositoryVulnerabilityAlert => {
            Ok(format!("{}/network/dependencies", html_url))
        }
        // Issues redirect to pull requests, and commit notifications come
        // from their issue-like discussion thread.
        SubjectType::Commit | SubjectType::Issue | SubjectType::PullRequest => {
            let number = subject_number(notification)?;
            Ok(format!("{}/issues/{}", html_url, number))
        }
        SubjectType::Other => match &notification.subject.repository {
            Some(repository) => Ok(repository.html_url.clone()),
            None => Err(FocusError::UnknownSubjectType(notification.id.clone())),
        },
    }
}
