//! # minirouter
//!
//! **minirouter** is a small HTTP request router: it matches a request's method and
//! path against registered route patterns, extracts typed path parameters, calls a
//! handler and renders a plain-text response.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern compilation (`/book/<id:int>`) and the ordered matching scan
//! - **[`dispatcher`]** - The [`Handler`](dispatcher::Handler) contract and rendered
//!   [`HandlerResponse`](dispatcher::HandlerResponse)
//! - **[`error`]** - Registration, conversion and handler error types
//! - **[`server`]** - Binding to the `may_minihttp` coroutine HTTP server
//! - **[`runtime_config`]** - YAML + environment configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`demo`]** - The bundled sample applications
//! - **[`cli`]** - The `minirouter` command line
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as AppService<br/>(may_minihttp)
//!     participant Router as Router
//!     participant Handler as Handler
//!
//!     Client->>Server: GET /book/7
//!     Server->>Server: Strip query, percent-decode path
//!     Server->>Router: handle("GET", "/book/7")
//!     Router->>Router: Scan routes in registration order
//!
//!     alt No route with this method, length and literals
//!         Router-->>Client: 404 Not Found
//!     end
//!
//!     Router->>Router: Coerce typed parameters
//!
//!     alt Conversion failed
//!         Router-->>Client: 400 Bad Request
//!     end
//!
//!     Router->>Handler: call(&Params)
//!
//!     alt HandlerError::Validation
//!         Handler-->>Client: 400 Bad Request
//!     end
//!
//!     Handler-->>Router: body
//!     Router-->>Server: 200 OK, text/plain
//!     Server-->>Client: HTTP Response
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use minirouter::dispatcher::{handler_fn, ParamSpec};
//! use minirouter::router::Router;
//!
//! let mut router = Router::new("Router", true);
//! router
//!     .get("/hello", handler_fn(&[], |_| Ok("Hello, world!")))
//!     .unwrap()
//!     .get(
//!         "/book/<id:int>",
//!         handler_fn(&[ParamSpec::int("id")], |p| Ok(format!("Book #{}", p.int("id")?))),
//!     )
//!     .unwrap();
//!
//! assert_eq!(router.handle("GET", "/hello").body_str(), Some("Hello, world!"));
//! assert_eq!(router.handle("GET", "/book/x").status.as_u16(), 400);
//!
//! // Serve it:
//! // minirouter::server::RouterServer::new(router).bind("0.0.0.0:8080")?.join()?;
//! ```
//!
//! ## Runtime Considerations
//!
//! The server runs on the `may` coroutine runtime. Handlers execute on coroutine
//! stacks whose size is set with `MINIROUTER_STACK_SIZE`. The router itself is
//! synchronous and does no I/O; once registration is done it is shared read-only
//! across coroutines behind an `Arc`.

pub mod cli;
pub mod demo;
pub mod dispatcher;
pub mod error;
mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{handler_fn, Handler, HandlerResponse, ParamSpec};
pub use error::{ConversionError, HandlerError, RouterError};
pub use ids::RequestId;
pub use router::{ParamType, ParamValue, Params, Router};
