pub mod cli;
pub mod command;
pub mod config;
mod error;
pub mod forge;
pub mod notes;
pub mod throttle;

pub use cli::Args;
pub use error::{RelnoteError, Result};

#[cfg(test)]
pub mod test_helpers;
