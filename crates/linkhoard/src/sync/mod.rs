//! GitHub stars synchronization.
//!
//! # Module Structure
//!
//! - [`types`] - `StarsSyncResult`, `SyncError`, `MAX_PAGES`
//! - [`progress`] - Progress reporting: `SyncProgress`, `ProgressCallback`, `emit()`
//! - [`registry`] - Per-user in-progress tracking: `SyncRegistry`
//! - [`engine`] - The sync itself: `StarsSyncer`

pub mod engine;
mod progress;
mod registry;
mod types;

pub use engine::{StarsSyncer, star_to_item};
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use registry::{SyncGuard, SyncRegistry};
pub use types::{MAX_PAGES, StarsSyncResult, SyncError};
