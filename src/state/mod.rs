// State management module.
// Holds the poll interval, token, and batch progress shared across tasks.

pub mod poll;

pub use poll::{BatchGuard, BatchSummary, PollPhase, PollState};
