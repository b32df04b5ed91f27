//! # Server Module
//!
//! Binds the router to the `may_minihttp` transport. The router itself never
//! touches sockets; this module extracts the method and path from each request,
//! calls [`Router::handle`](crate::router::Router::handle) and writes the rendered
//! status, content type and body back.

pub mod http_server;
pub mod response;
pub mod service;

pub use http_server::{RouterServer, ServerHandle, MAX_REQUEST_HEADERS};
pub use response::write_handler_response;
pub use service::{request_path, AppService};
