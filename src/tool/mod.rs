// ABOUTME: Tool module - defines tools, the registry, and remote tool adapters.
// ABOUTME: Core abstraction for agent capabilities.

mod registry;
mod remote;
mod result;
mod traits;

pub use registry::*;
pub use remote::*;
pub use result::*;
pub use traits::*;
