//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod profiles;
mod simulate;

pub use profiles::Profiles;
pub use simulate::Simulate;
