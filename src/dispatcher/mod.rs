//! # Dispatcher Module
//!
//! The dispatcher module defines the contract between the router and application
//! code: the [`Handler`] trait, the typed signature a handler declares, and the
//! [`HandlerResponse`] every dispatch produces.
//!
//! ## Handler Registration
//!
//! Handlers declare the parameters they expect, in pattern order. The router
//! checks this signature when the route is registered:
//!
//! ```rust
//! use minirouter::dispatcher::{handler_fn, ParamSpec};
//! use minirouter::router::Router;
//!
//! let mut router = Router::new("Router", true);
//! router
//!     .get(
//!         "/book/<id:int>",
//!         handler_fn(&[ParamSpec::int("id")], |p| Ok(format!("Book #{}", p.int("id")?))),
//!     )
//!     .unwrap();
//!
//! let res = router.handle("GET", "/book/7");
//! assert_eq!(res.body_str(), Some("Book #7"));
//! ```
//!
//! ## Error Handling
//!
//! - A [`HandlerError::Validation`](crate::error::HandlerError) becomes `400 Bad Request`
//! - A panicking handler is caught and becomes `500 Internal Server Error`
//! - Every response is `text/plain; charset=utf-8` with an exact `Content-Length`

mod core;

pub use self::core::{
    handler_fn, FnHandler, Handler, HandlerResponse, HeaderVec, ParamSpec, CONTENT_TYPE_TEXT,
    MAX_INLINE_HEADERS,
};
