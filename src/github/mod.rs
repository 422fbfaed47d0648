// GitHub API module.
// Provides the client, endpoints, and types for the notifications API.

pub mod client;
pub mod endpoints;
pub mod types;
pub mod urls;

pub use client::GitHubClient;
pub use endpoints::GitHubApi;
pub use types::*;
pub use urls::{id_from_api_url, notification_url};
