// App state and main event loop.
// Runs the poll timer and reacts to clicks, refreshes, and quit requests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use crate::acknowledge::handle_click;
use crate::context::FocusContext;
use crate::poller::check_notifications;
use crate::surface::SurfaceEvent;

/// Main application state.
pub struct App {
    ctx: Arc<FocusContext>,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(ctx: Arc<FocusContext>) -> Self {
        Self {
            ctx,
            should_quit: false,
        }
    }

    /// Main event loop. Checks immediately, then on every interval tick.
    ///
    /// Batches and clicks run on their own tasks, so a manual refresh may
    /// overlap a timer run. Work still in flight at exit is abandoned.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<SurfaceEvent>) {
        info!(
            interval_secs = self.ctx.poll_state.interval().as_secs(),
            "Watching GitHub notifications"
        );
        self.spawn_check();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut last_tick = Instant::now();
        let mut events_open = true;
        while !self.should_quit {
            // Recomputed every iteration so a raised interval applies to the next tick
            let deadline = last_tick + self.ctx.poll_state.interval();
            tokio::select! {
                _ = sleep_until(deadline) => {
                    last_tick = Instant::now();
                    self.spawn_check();
                }
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("Input closed; polling continues");
                        events_open = false;
                    }
                },
                _ = &mut ctrl_c => {
                    self.should_quit = true;
                }
            }
        }
        info!("Stopped watching notifications");
    }

    /// Handle one surface event.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Click(id) => {
                let ctx = Arc::clone(&self.ctx);
                tokio::spawn(async move {
                    handle_click(&ctx, &id).await;
                });
            }
            SurfaceEvent::Refresh => {
                debug!(
                    phase = self.ctx.poll_state.phase().display(),
                    "Manual refresh requested"
                );
                self.spawn_check();
            }
            SurfaceEvent::Quit => self.should_quit = true,
        }
    }

    fn spawn_check(&self) {
        tokio::spawn(check_notifications(Arc::clone(&self.ctx)));
    }
}
