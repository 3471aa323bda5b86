// ABOUTME: Permission module - confirmation policy and approval handling for
// ABOUTME: tool calls, wired into the runtime as a pre-tool-call hook.

mod confirm;
mod handler;
mod policy;

pub use confirm::*;
pub use handler::*;
pub use policy::*;
