// Cache module for notification bookkeeping.
// Memory-resident for the process lifetime; nothing is written to disk.

pub mod notifications;

pub use notifications::{LocalReadCache, ShownNotificationCache};
