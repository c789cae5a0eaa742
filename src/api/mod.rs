/// Processing backend client
///
/// - `client.rs` - reachability probe and multipart submission
/// - `error.rs` - how a request can fail

pub mod client;
pub mod error;

pub use client::{BackendClient, ProcessRequest};
pub use error::ApiError;
