//! Task domain model and view selectors.
//!
//! # Responsibility
//! - Define the canonical `Task` record and its wire shape.
//! - Define the filter selector used to derive visible task lists.
//!
//! # Invariants
//! - Every task is identified by an opaque, never reused `TaskId`.
//! - A task that exists in the store never has a blank title.

pub mod filter;
pub mod task;
