//! WeekStore - per-week keyed JSON persistence
//!
//! Stores one serialized record per week, keyed by the ISO date of that
//! week's Monday. Records are whole-blob reads and writes; there is no
//! partial-record locking because only one planner instance mutates a
//! week at a time.
//!
//! # Architecture
//!
//! ```text
//! ~/.local/share/weekplan/weeks/
//! ├── 2024-06-03.json
//! ├── 2024-06-10.json
//! └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use weekstore::WeekStore;
//!
//! let store: WeekStore<MyRecord> = WeekStore::open("~/.local/share/weekplan/weeks")?;
//! if let Some(record) = store.load("2024-06-03")? {
//!     // ...
//! }
//! ```
//!
//! Writes from interactive editing go through [`DebouncedSaver`], which
//! collapses bursts of edits into a single durable write once a quiet
//! period has elapsed.

pub mod cli;
pub mod config;
mod debounce;
mod store;

pub use debounce::DebouncedSaver;
pub use store::{WeekId, WeekStore};

/// Default quiet period before a scheduled write becomes durable (ms)
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
