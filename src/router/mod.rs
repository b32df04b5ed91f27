//! # Router Module
//!
//! The router module provides path compilation, route matching and dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling declarative path patterns (`/book/<id:int>`) into segment descriptors
//! - Matching incoming requests against registered routes in registration order
//! - Extracting path parameters, coercing typed ones
//! - Invoking the matched handler and rendering a plain-text response
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: At registration, each pattern is split on `/` into literal
//!    and parameter segments. Malformed patterns fail here, never per request.
//!
//! 2. **Matching**: For each incoming request, the path is split the same way and
//!    routes are scanned in order. A route must agree on method, segment count and
//!    every literal. The first such route wins; if one of its typed parameters does
//!    not parse, the request is rejected with `400` and no later route is tried.
//!
//! ## Example
//!
//! ```rust
//! use minirouter::dispatcher::{handler_fn, ParamSpec};
//! use minirouter::router::Router;
//!
//! let mut router = Router::new("Router", false);
//! router
//!     .get("/user/<username>", handler_fn(&[ParamSpec::str("username")], |p| {
//!         Ok(format!("Welcome, {}", p.str("username")?))
//!     }))
//!     .unwrap();
//!
//! assert_eq!(router.handle("GET", "/user/alice").body_str(), Some("Welcome, alice"));
//! assert_eq!(router.handle("GET", "/nope").status.as_u16(), 404);
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over routes, O(n) in the number of routes. Request
//! components and extracted parameters are stack-allocated for up to 8 entries.
//! Routes are never reordered or indexed by hash: registration order is part of
//! the observable behaviour (first match wins, duplicates are shadowed).

mod core;
mod params;
mod pattern;

pub use self::core::{CompiledRoute, Mismatch, ParamInfo, RouteInfo, RouteMatch, Router};
pub use params::{ParamValue, ParamVec, Params, MAX_INLINE_PARAMS};
pub use pattern::{compile_path, split_path, ParamType, SegmentDescriptor};
