//! Dashboard Coordinator
//!
//! Drives what gets fetched, when, and how failures are handled.
//!
//! ## Lifecycle
//!
//! 1. [`Dashboard::mount`] loads the application registry once
//! 2. Summary and realtime fetches run immediately
//! 3. A poller re-fetches realtime data every 30 seconds
//! 4. Each filter change replaces the poller and fetches both again
//! 5. [`Dashboard::unmount`] (or drop) stops the poller
//!
//! ## Failure handling
//!
//! - Summary `401`: session cleared, logout hook invoked
//! - Anything else: logged, last good data stays on screen
//! - Registry failure: logged, empty registry

mod coordinator;
mod loader;
mod poller;
mod sequence;
mod state;

pub use coordinator::{Dashboard, DashboardConfig, LogoutHook, DEFAULT_REALTIME_INTERVAL};
pub use loader::load_apps;
pub use poller::{spawn_poller, PollHandle};
pub use state::DashboardState;
