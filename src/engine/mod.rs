//! Compliance engine for Comply Gateway.
//!
//! - Completion: client for the remote chat-completion API
//! - Prompt: builds the classification prompt
//! - Checker: runs a draft through the model and interprets the answer

mod checker;
mod completion;
#[cfg(test)]
mod mock;
mod prompt;

pub use checker::*;
pub use completion::*;
#[cfg(test)]
pub use mock::*;
pub use prompt::*;
