//! Client side of the conversation with the completion server.

pub mod completion;

pub use completion::CompletionClient;
