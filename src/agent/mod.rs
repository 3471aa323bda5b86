// ABOUTME: Agent runtime module - the conversational loop that drives tools.
// ABOUTME: Provides the Agent definition, the Runner, and turn events.

mod definition;
mod runner;

pub use definition::{Agent, DEFAULT_MAX_ITERATIONS};
pub use runner::{Event, EventStream, Runner};
