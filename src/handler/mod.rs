//! Request handler module.
//!
//! Path resolution, static file loading, and the dispatch logic that ties
//! them together with the subsite redirect and custom 404 interception.

pub mod dispatch;
pub mod resolve;
pub mod static_files;

// Re-export the hyper-facing entry point
pub use dispatch::handle_request;
