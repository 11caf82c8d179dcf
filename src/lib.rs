//! Terminal client for a categorized collection tracker.
//!
//! The store is remote; this crate keeps a local picture of it (categories,
//! active and completed items, a random set per category) and keeps that
//! picture reconciled with the store after every change.

pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod model;
pub mod page;
pub mod random_set;
pub mod reconcile;
pub mod remote;
pub mod schema;
pub mod tui;

mod tui_shell;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
