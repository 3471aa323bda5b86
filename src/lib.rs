// ABOUTME: Root module for toolgate - exposes remotely hosted tools to an LLM
// ABOUTME: agent with authorization gating and call confirmation.

pub mod agent;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hook;
pub mod llm;
pub mod permission;
pub mod prelude;
pub mod remote;
pub mod schema;
pub mod session;
pub mod tool;

pub use error::ToolgateError;
