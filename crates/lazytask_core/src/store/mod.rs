//! Task store: authoritative task list, filter, and mutation entry points.
//!
//! # Responsibility
//! - Own the in-memory task list for one application session.
//! - Route every mutation through the pure `reduce` transition.
//! - Persist and notify after transitions, never inside them.

pub mod ids;
pub mod task_store;
pub mod transition;
