//! Interactive CLI layer (cliclack prompts)

pub mod prompts;

pub use prompts::{run, CreateArgs};
