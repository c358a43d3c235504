//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from the static file business logic:
//! MIME inference, `ETag` handling, and response builders.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_options_response, build_redirect_response,
};
