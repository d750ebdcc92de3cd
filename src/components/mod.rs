//! UI Components
//!
//! Leptos components mounted into the server-rendered page.

mod failure_banner;

pub use failure_banner::FailureIndicator;
