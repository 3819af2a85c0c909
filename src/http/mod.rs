//! HTTP protocol layer module.
//!
//! MIME detection and response builders, decoupled from request handling.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_custom_404_response, build_file_response,
    build_redirect_response,
};
