//! Router core module - registration and the per-request matching scan.

use super::params::{ParamValue, Params};
use super::pattern::{compile_path, split_path, ParamType, SegmentDescriptor};
use crate::dispatcher::{Handler, HandlerResponse};
use crate::error::{ConversionError, RouterError};
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A registered route. Immutable once created.
#[derive(Clone)]
pub struct CompiledRoute {
    method: String,
    pattern: String,
    segments: Vec<SegmentDescriptor>,
    handler: Arc<dyn Handler>,
    types_enabled: bool,
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("segments", &self.segments)
            .field("types_enabled", &self.types_enabled)
            .finish_non_exhaustive()
    }
}

/// Why a single candidate route did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The request has a different number of segments than the pattern
    SegmentCount { expected: usize, actual: usize },
    /// A literal segment differs
    Literal { expected: String, actual: String },
    /// The route matched structurally but a parameter could not be coerced
    Conversion(ConversionError),
}

impl CompiledRoute {
    /// Uppercase HTTP method
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Pattern as registered
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentDescriptor] {
        &self.segments
    }

    /// Whether typed parameters are coerced on this route
    #[must_use]
    pub fn types_enabled(&self) -> bool {
        self.types_enabled
    }

    /// The type a parameter is delivered as on this route.
    fn effective_type(&self, declared: ParamType) -> ParamType {
        if self.types_enabled {
            declared
        } else {
            ParamType::Str
        }
    }

    /// Match pre-split request components against this route's segments.
    ///
    /// Segments are walked in order and the first failure is returned. Literal and
    /// count mismatches are recoverable (the caller tries the next route); a
    /// [`Mismatch::Conversion`] is terminal for the request.
    ///
    /// # Errors
    ///
    /// Returns the first reason the components do not match.
    pub fn match_components(&self, components: &[&str]) -> Result<Params, Mismatch> {
        if components.len() != self.segments.len() {
            return Err(Mismatch::SegmentCount {
                expected: self.segments.len(),
                actual: components.len(),
            });
        }

        let mut params = Params::new();
        for (segment, raw) in self.segments.iter().zip(components) {
            match segment {
                SegmentDescriptor::Literal(expected) => {
                    if expected.as_str() != *raw {
                        return Err(Mismatch::Literal {
                            expected: expected.clone(),
                            actual: (*raw).to_string(),
                        });
                    }
                }
                SegmentDescriptor::Param { name, ty } => {
                    let value = match self.effective_type(*ty) {
                        ParamType::Str => ParamValue::Str((*raw).to_string()),
                        ty => ty.parse(raw).map_err(Mismatch::Conversion)?,
                    };
                    params.push(Arc::clone(name), value);
                }
            }
        }
        Ok(params)
    }

    /// Check a handler signature against this route's parameters.
    fn check_signature(&self, handler: &dyn Handler) -> Result<(), String> {
        let expected: Vec<(&str, ParamType)> = self
            .segments
            .iter()
            .filter_map(SegmentDescriptor::as_param)
            .map(|(name, ty)| (name, self.effective_type(ty)))
            .collect();
        let declared = handler.signature();

        if expected.len() != declared.len() {
            return Err(format!(
                "pattern binds {} parameter(s), handler declares {}",
                expected.len(),
                declared.len()
            ));
        }
        for ((name, ty), spec) in expected.iter().zip(declared) {
            if *name != spec.name {
                return Err(format!(
                    "expected parameter '{name}', handler declares '{}'",
                    spec.name
                ));
            }
            if *ty != spec.ty {
                return Err(format!(
                    "parameter '{name}' is delivered as {ty}, handler declares {}",
                    spec.ty
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of scanning the route table for one request.
#[derive(Debug)]
pub enum RouteMatch<'r> {
    /// A route matched and every parameter was extracted
    Matched {
        route: &'r CompiledRoute,
        params: Params,
    },
    /// The first structurally matching route rejected a parameter value
    ConversionFailed {
        route: &'r CompiledRoute,
        error: ConversionError,
    },
    /// No route has this method, segment count and literals
    NotFound,
}

/// Serializable view of a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: String,
    pub pattern: String,
    pub params: Vec<ParamInfo>,
    pub types_enabled: bool,
}

/// Serializable view of one route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParamType,
}

/// Ordered, append-only route table.
///
/// Routes are tried in registration order and the first structural + literal
/// match wins. Registering the same method and pattern twice is allowed; the
/// later route is shadowed and never reached.
///
/// Build the router with `&mut self` registrations, then share it read-only
/// (typically behind an `Arc`) with the transport.
#[derive(Clone)]
pub struct Router {
    name: String,
    types_enabled: bool,
    routes: Vec<CompiledRoute>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("name", &self.name)
            .field("types_enabled", &self.types_enabled)
            .field("routes", &self.routes)
            .finish()
    }
}

impl Router {
    /// Create an empty router.
    ///
    /// `name` appears in 404 bodies; `types_enabled` is the coercion default
    /// captured by routes registered from now on.
    #[must_use]
    pub fn new(name: impl Into<String>, types_enabled: bool) -> Self {
        Self {
            name: name.into(),
            types_enabled,
            routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn types_enabled(&self) -> bool {
        self.types_enabled
    }

    /// Change the coercion default. Routes already registered keep theirs.
    pub fn set_types_enabled(&mut self, enabled: bool) {
        self.types_enabled = enabled;
    }

    #[must_use]
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidRoutePattern`] if the pattern does not compile
    /// - [`RouterError::SignatureMismatch`] if the handler's declared parameters
    ///   differ from the pattern's
    ///
    /// On error nothing is registered.
    pub fn register<H: Handler>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        let method = method.to_ascii_uppercase();
        let route = CompiledRoute {
            segments: compile_path(pattern)?,
            method,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
            types_enabled: self.types_enabled,
        };
        route
            .check_signature(route.handler.as_ref())
            .map_err(|reason| RouterError::SignatureMismatch {
                method: route.method.clone(),
                pattern: route.pattern.clone(),
                reason,
            })?;

        info!(
            router = %self.name,
            method = %route.method,
            pattern = %route.pattern,
            segments = route.segments.len(),
            types_enabled = route.types_enabled,
            "Route registered"
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Register a `GET` route.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register("GET", pattern, handler)
    }

    /// Register a `POST` route.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register("POST", pattern, handler)
    }

    /// Find the route for a request without invoking its handler.
    #[must_use]
    pub fn route(&self, method: &str, path: &str) -> RouteMatch<'_> {
        let method = method.to_ascii_uppercase();
        let components: SmallVec<[&str; 8]> = split_path(path).collect();

        for route in &self.routes {
            if route.method != method {
                continue;
            }
            match route.match_components(&components) {
                Ok(params) => return RouteMatch::Matched { route, params },
                Err(Mismatch::Conversion(error)) => {
                    return RouteMatch::ConversionFailed { route, error }
                }
                Err(Mismatch::SegmentCount { .. } | Mismatch::Literal { .. }) => {}
            }
        }
        RouteMatch::NotFound
    }

    /// Dispatch a request and render the response.
    ///
    /// Never fails: conversion and validation errors become `400`, unmatched
    /// requests `404`, handler panics `500`.
    #[must_use]
    pub fn handle(&self, method: &str, path: &str) -> HandlerResponse {
        let method = method.to_ascii_uppercase();
        let path = if path.is_empty() { "/" } else { path };

        match self.route(&method, path) {
            RouteMatch::Matched { route, params } => {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    params = ?params,
                    "Route matched"
                );
                let handler = Arc::clone(&route.handler);
                match catch_unwind(AssertUnwindSafe(|| handler.call(&params))) {
                    Ok(Ok(body)) => HandlerResponse::ok(body),
                    Ok(Err(err)) => {
                        warn!(
                            method = %method,
                            path = %path,
                            route_pattern = %route.pattern,
                            error = %err,
                            "Handler rejected request"
                        );
                        HandlerResponse::bad_request(&err.to_string())
                    }
                    Err(panic) => {
                        error!(
                            method = %method,
                            path = %path,
                            route_pattern = %route.pattern,
                            panic = ?panic,
                            "Handler panicked"
                        );
                        HandlerResponse::internal_error()
                    }
                }
            }
            RouteMatch::ConversionFailed { route, error } => {
                warn!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    error = %error,
                    "Parameter conversion failed"
                );
                HandlerResponse::bad_request(&error.to_string())
            }
            RouteMatch::NotFound => {
                debug!(method = %method, path = %path, "No route matched");
                HandlerResponse::not_found(&self.name, &method, path)
            }
        }
    }

    /// Describe every registered route, in match order.
    #[must_use]
    pub fn route_table(&self) -> Vec<RouteInfo> {
        self.routes
            .iter()
            .map(|route| RouteInfo {
                method: route.method.clone(),
                pattern: route.pattern.clone(),
                params: route
                    .segments
                    .iter()
                    .filter_map(SegmentDescriptor::as_param)
                    .map(|(name, ty)| ParamInfo {
                        name: name.to_string(),
                        ty,
                    })
                    .collect(),
                types_enabled: route.types_enabled,
            })
            .collect()
    }

    /// Log all registered routes at `info` level.
    pub fn dump_routes(&self) {
        info!(router = %self.name, count = self.routes.len(), "Routing table");
        for route in &self.routes {
            info!(
                method = %route.method,
                pattern = %route.pattern,
                types_enabled = route.types_enabled,
                "Route"
            );
        }
    }
}
