use crate::error::HandlerError;
use crate::router::{ParamType, Params};
use http::StatusCode;
use smallvec::SmallVec;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Maximum inline response headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 4;

/// Content type of every response the router renders.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Stack-allocated header storage.
///
/// Header names use `Arc<str>` so that cloning a response never copies them.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// One expected parameter in a handler signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name as written in the route pattern
    pub name: &'static str,
    /// Type the handler expects to receive
    pub ty: ParamType,
}

impl ParamSpec {
    /// A parameter delivered as the raw path segment.
    #[must_use]
    pub const fn str(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Str,
        }
    }

    /// A parameter delivered as a coerced integer.
    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Int,
        }
    }
}

/// Application code bound to a route.
///
/// A handler declares the parameters it expects, in pattern order, so that a
/// router can reject mismatched bindings at registration time instead of failing
/// per request.
pub trait Handler: Send + Sync + 'static {
    /// Expected parameters, in the order they appear in the route pattern.
    fn signature(&self) -> &[ParamSpec];

    /// Handle a matched request and return the response body.
    ///
    /// # Errors
    ///
    /// A [`HandlerError::Validation`] is rendered as `400 Bad Request`.
    fn call(&self, params: &Params) -> Result<String, HandlerError>;
}

/// A [`Handler`] built from a closure and an explicit signature.
///
/// See [`handler_fn`].
pub struct FnHandler<F, R> {
    signature: Vec<ParamSpec>,
    f: F,
    _output: PhantomData<fn() -> R>,
}

impl<F, R> fmt::Debug for FnHandler<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Wrap a closure as a [`Handler`].
///
/// The closure's return value is converted to the response body with its
/// `Display` implementation.
///
/// ```
/// use minirouter::dispatcher::{handler_fn, Handler, ParamSpec};
///
/// let book = handler_fn(&[ParamSpec::int("id")], |p| Ok(format!("Book #{}", p.int("id")?)));
/// assert_eq!(book.signature(), &[ParamSpec::int("id")]);
/// ```
pub fn handler_fn<F, R>(signature: &[ParamSpec], f: F) -> FnHandler<F, R>
where
    F: Fn(&Params) -> Result<R, HandlerError> + Send + Sync + 'static,
    R: fmt::Display + 'static,
{
    FnHandler {
        signature: signature.to_vec(),
        f,
        _output: PhantomData,
    }
}

impl<F, R> Handler for FnHandler<F, R>
where
    F: Fn(&Params) -> Result<R, HandlerError> + Send + Sync + 'static,
    R: fmt::Display + 'static,
{
    fn signature(&self) -> &[ParamSpec] {
        &self.signature
    }

    fn call(&self, params: &Params) -> Result<String, HandlerError> {
        (self.f)(params).map(|body| body.to_string())
    }
}

/// A rendered response: status, headers and UTF-8 body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Content-Type` and `Content-Length`
    pub headers: HeaderVec,
    /// Encoded body
    pub body: Vec<u8>,
}

impl HandlerResponse {
    /// Plain-text response with content headers computed from `body`.
    #[must_use]
    pub fn text(status: StatusCode, body: String) -> Self {
        let body = body.into_bytes();
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("Content-Type"), CONTENT_TYPE_TEXT.to_string()));
        headers.push((Arc::from("Content-Length"), body.len().to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// `200 OK` carrying a handler's output.
    #[must_use]
    pub fn ok(body: String) -> Self {
        Self::text(StatusCode::OK, body)
    }

    /// `400 Bad Request` for conversion and validation failures.
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self::text(
            StatusCode::BAD_REQUEST,
            format!("400 Bad Request: {message}"),
        )
    }

    /// `404 Not Found` naming the router and the unmatched request.
    #[must_use]
    pub fn not_found(router_name: &str, method: &str, path: &str) -> Self {
        Self::text(
            StatusCode::NOT_FOUND,
            format!("{router_name}: 404 Not Found ({method} {path})"),
        )
    }

    /// `500 Internal Server Error` for a handler that panicked.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::text(
            StatusCode::INTERNAL_SERVER_ERROR,
            "500 Internal Server Error".to_string(),
        )
    }

    /// Reason phrase for the status code.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// Status line without the protocol version, e.g. `404 Not Found`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status.as_u16(), self.reason())
    }

    /// Get a header by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, if it is valid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}
