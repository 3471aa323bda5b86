// ABOUTME: Remote module - client side of the remote tool-execution service.
// ABOUTME: Wire types, the ToolService trait, and its HTTP implementation.

mod http;
mod service;
mod types;

pub use http::{DEFAULT_BASE_URL, HttpToolService};
pub use service::ToolService;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
