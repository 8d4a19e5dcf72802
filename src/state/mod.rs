//! Persistent planner state.
//!
//! Completion is the only state the planner keeps between runs; see
//! [`ProgressStore`].

pub mod store;

pub use store::ProgressStore;
