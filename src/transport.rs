//! HTTP transport for the chatbot API.

pub mod http;

pub use http::{HttpTransport, TransportError};
