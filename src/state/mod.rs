//! State module for tracking run progress
//!
//! # Components
//!
//! - `ItemState`: Tracks a source item through search and identifier processing
//! - `RunPhase`: Tracks the run from start to final report
//! - `QuotaBreaker`: Stops all remote calls after a quota signal
//! - `RunState`: Counters plus the breaker, owned by the crawl loop

mod breaker;
mod item_state;
mod run_state;

// Re-export main types
pub use breaker::{is_quota_status, QuotaBreaker};
pub use item_state::{ItemState, RunPhase};
pub use run_state::RunState;
