// gh-focus library.
// Polls GitHub notifications and surfaces the interesting ones.

pub mod acknowledge;
pub mod app;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod github;
pub mod poller;
pub mod preferences;
pub mod state;
pub mod surface;

#[cfg(test)]
mod testing;

pub use app::App;
pub use context::FocusContext;
pub use error::{FocusError, Result};
