// Process-wide context.
// Bundles the API, surfaces, caches, and poll state handed to every component.

use std::sync::Arc;

use crate::cache::{LocalReadCache, ShownNotificationCache};
use crate::classifier::FilterConfig;
use crate::github::GitHubApi;
use crate::state::PollState;
use crate::surface::{NotificationSurface, UrlOpener};

/// Everything the poll loop and click handler share. Created once the
/// configuration has loaded and dropped at exit.
pub struct FocusContext {
    pub api: Arc<dyn GitHubApi>,
    pub surface: Arc<dyn NotificationSurface>,
    pub opener: Arc<dyn UrlOpener>,
    pub poll_state: Arc<PollState>,
    pub shown: ShownNotificationCache,
    pub read: LocalReadCache,
    pub filter: FilterConfig,
    pub query: QueryConfig,
}

/// How the notification list is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    pub participating: bool,
    /// Only fetch notifications updated in this window. None is unwindowed.
    pub lookback: Option<chrono::Duration>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            participating: true,
            lookback: Some(chrono::Duration::days(4)),
        }
    }
}

impl FocusContext {
    pub fn new(
        api: Arc<dyn GitHubApi>,
        surface: Arc<dyn NotificationSurface>,
        opener: Arc<dyn UrlOpener>,
        poll_state: Arc<PollState>,
        filter: FilterConfig,
        query: QueryConfig,
    ) -> Self {
        Self {
            api,
            surface,
            opener,
            poll_state,
            shown: ShownNotificationCache::new(),
            read: LocalReadCache::new(),
            filter,
            query,
        }
    }
}
