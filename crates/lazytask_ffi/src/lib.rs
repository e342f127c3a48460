//! Flutter-facing bindings for lazytask core.

pub mod api;
