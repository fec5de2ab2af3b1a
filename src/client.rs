//! Chat session client.
//!
//! Keep the public surface small and predictable: one stateless client, a
//! builder for configuration overrides, and the [`ChatBackend`] seam used by
//! the conversation layer.

pub mod backend;
pub mod builder;
pub mod core;

pub use backend::ChatBackend;
pub use builder::ChatClientBuilder;
pub use core::ChatClient;
