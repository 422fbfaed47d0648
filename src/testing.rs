// Test doubles for the GitHub API and the desktop surface.
// Includes a one-shot local HTTP server for exercising the real client.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::error::{FocusError, Result};
use crate::github::client::check_status;
use crate::github::{
    GitHubApi, Notification, NotificationQuery, NotificationRepository, PullRequest,
    PullRequestState, Reason, Subject, SubjectType,
};
use crate::surface::{DesktopNotification, NotificationSurface, UrlOpener};

/// An unread `mention` notification in org/repo.
pub fn notification(id: &str, subject_type: SubjectType, subject_url: &str) -> Notification {
    Notification {
        id: id.to_string(),
        unread: true,
        reason: Reason::Mention,
        subject: Subject {
            subject_type,
            url: Some(subject_url.to_string()),
            title: format!("Subject {}", id),
            repository: None,
        },
        repository: NotificationRepository {
            full_name: "org/repo".to_string(),
            html_url: "https://github.com/org/repo".to_string(),
            url: "https://api.github.com/repos/org/repo".to_string(),
        },
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

/// An unread issue notification: `.../issues/{number}`.
pub fn issue(id: &str, number: u64) -> Notification {
    notification(
        id,
        SubjectType::Issue,
        &format!("https://api.github.com/repos/org/repo/issues/{}", number),
    )
}

/// In-memory GitHub API.
pub struct FakeApi {
    notifications: Mutex<Vec<Notification>>,
    fail_list: AtomicBool,
    pulls: Mutex<HashMap<u64, PullRequestState>>,
    lookups: Mutex<Vec<(String, u64)>>,
    queries: Mutex<Vec<NotificationQuery>>,
    mark_read_status: Mutex<StatusCode>,
    mark_read_calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            pulls: Mutex::new(HashMap::new()),
            lookups: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            mark_read_status: Mutex::new(StatusCode::RESET_CONTENT),
            mark_read_calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
        *self.notifications.lock().unwrap() = notifications;
        self
    }

    pub fn with_pull_request(self, number: u64, state: PullRequestState) -> Self {
        self.pulls.lock().unwrap().insert(number, state);
        self
    }

    pub fn with_mark_read_status(self, status: StatusCode) -> Self {
        *self.mark_read_status.lock().unwrap() = status;
        self
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn pull_request_lookups(&self) -> Vec<(String, u64)> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<NotificationQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn mark_read_calls(&self) -> Vec<String> {
        self.mark_read_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn list_notifications(&self, query: &NotificationQuery) -> Result<Vec<Notification>> {
        self.queries.lock().unwrap().push(query.clone());
        let url = "https://api.github.com/notifications";
        if self.fail_list.load(Ordering::SeqCst) {
            check_status(url, StatusCode::BAD_GATEWAY, None)?;
        }
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn get_pull_request(&self, repository_url: &str, number: u64) -> Result<PullRequest> {
        self.lookups
            .lock()
            .unwrap()
            .push((repository_url.to_string(), number));
        match self.pulls.lock().unwrap().get(&number) {
            Some(state) => Ok(PullRequest {
                number,
                state: *state,
            }),
            None => Err(FocusError::Http {
                url: format!("{}/pulls/{}", repository_url, number),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn mark_thread_read(&self, thread_id: &str) -> Result<()> {
        self.mark_read_calls
            .lock()
            .unwrap()
            .push(thread_id.to_string());
        let status = *self.mark_read_status.lock().unwrap();
        let url = format!("https://api.github.com/notifications/threads/{}", thread_id);
        check_status(&url, status, Some(StatusCode::RESET_CONTENT))
    }
}

/// Surface that records what it was asked to show.
#[derive(Default)]
pub struct RecordingSurface {
    created: Mutex<Vec<(String, DesktopNotification)>>,
    visible: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSurface {
    /// Make `create` fail for `id`.
    pub fn fail_on(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn created(&self) -> Vec<(String, DesktopNotification)> {
        self.created.lock().unwrap().clone()
    }

    pub fn created_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.created().into_iter().map(|(id, _)| id).collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl NotificationSurface for RecordingSurface {
    async fn create(&self, id: &str, notification: DesktopNotification) -> Result<()> {
        if self.failing.lock().unwrap().contains(id) {
            return Err(FocusError::Other(format!("surface refused {}", id)));
        }
        self.created
            .lock()
            .unwrap()
            .push((id.to_string(), notification));
        self.visible.lock().unwrap().insert(id.to_string());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool> {
        Ok(self.visible.lock().unwrap().remove(id))
    }
}

/// Opener that records URLs instead of launching a browser.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// A request as seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// For example `GET /notifications?participating=true HTTP/1.1`.
    pub request_line: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Local HTTP/1.1 server that answers exactly one request with a canned response.
pub struct StubServer {
    /// Base URL, e.g. `http://127.0.0.1:40000`.
    pub base_url: String,
    handle: JoinHandle<RecordedRequest>,
}

impl StubServer {
    pub async fn respond(status: StatusCode, headers: &[(&str, &str)], body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let mut response = format!(
            "HTTP/1.1 {} {}\r\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );
        for (name, value) in headers {
            response.push_str(&format!("{}: {}\r\n", name, value));
        }
        response.push_str("content-type: application/json\r\n");
        response.push_str(&format!("content-length: {}\r\n", body.len()));
        response.push_str("connection: close\r\n\r\n");
        response.push_str(body);

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });

        Self { base_url, handle }
    }

    /// The request the server received.
    pub async fn request(self) -> RecordedRequest {
        self.handle.await.unwrap()
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..head_end + length]).into_owned();

    RecordedRequest {
        request_line,
        headers,
        body,
    }
}
