use crate::error::HandlerError;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most routes have ≤4 parameters (e.g. `/book/<id>/page/<number>`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// A path parameter value after optional type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Stack-allocated parameter storage for the hot path.
///
/// Names are `Arc<str>` shared with the compiled route, so building a match
/// only clones a pointer per parameter.
pub type ParamVec = SmallVec<[(Arc<str>, ParamValue); MAX_INLINE_PARAMS]>;

/// Parameters extracted from a matched request, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: Arc<str>, value: ParamValue) {
        self.inner.push((name, value));
    }

    /// Look up a parameter by name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.inner
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// String parameter by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the parameter is missing or was coerced to
    /// another type.
    pub fn str(&self, name: &str) -> Result<&str, HandlerError> {
        self.get(name)
            .and_then(ParamValue::as_str)
            .ok_or_else(|| HandlerError::invalid(format!("missing string parameter '{name}'")))
    }

    /// Integer parameter by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the parameter is missing or was not coerced
    /// to an integer.
    pub fn int(&self, name: &str) -> Result<i64, HandlerError> {
        self.get(name)
            .and_then(ParamValue::as_int)
            .ok_or_else(|| HandlerError::invalid(format!("missing integer parameter '{name}'")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.inner.iter().map(|(k, v)| (&**k, v))
    }
}
