//! Poll Service Bindings
//!
//! HTTP plumbing between the browser and the poll server, organized by
//! concern.

mod http;
mod sondage;

pub use http::*;
pub use sondage::*;
