//! Route pattern compilation.
//!
//! A pattern such as `/book/<id:int>/page/<number>` is compiled once, at registration
//! time, into one [`SegmentDescriptor`] per path level. Matching never re-parses the
//! pattern.

use super::params::ParamValue;
use crate::error::{ConversionError, RouterError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Declared type of a path parameter.
///
/// The set is closed: every variant has a tag used in patterns and a parse
/// function used during matching. Adding a type means adding a variant here and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// `<name>` or `<name:str>`; the raw segment is passed through untouched
    Str,
    /// `<name:int>`; optional leading sign followed by ASCII digits, fits in `i64`
    Int,
}

impl ParamType {
    /// Resolve a pattern type tag (`str`, `int`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    /// The tag as written in patterns.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
        }
    }

    /// Coerce a raw path segment to this type.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when the segment is not a valid value of the type.
    pub fn parse(self, raw: &str) -> Result<ParamValue, ConversionError> {
        match self {
            Self::Str => Ok(ParamValue::Str(raw.to_string())),
            Self::Int => raw
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| ConversionError {
                    value: raw.to_string(),
                    ty: self,
                }),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One compiled path level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentDescriptor {
    /// Matched by exact, case-sensitive string equality
    Literal(String),
    /// Binds the request segment to `name`
    Param {
        /// Non-empty parameter name, unique within its pattern
        name: Arc<str>,
        /// Declared type
        ty: ParamType,
    },
}

impl SegmentDescriptor {
    /// Parameter name and type, if this is a parameter segment.
    #[must_use]
    pub fn as_param(&self) -> Option<(&str, ParamType)> {
        match self {
            Self::Param { name, ty } => Some((&**name, *ty)),
            Self::Literal(_) => None,
        }
    }
}

/// Split a path into its non-empty `/`-separated components.
///
/// Leading, trailing and repeated separators collapse, so `/a//b/` and `/a/b`
/// yield the same components.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Compile a route pattern into its segment descriptors.
///
/// # Errors
///
/// Returns [`RouterError::InvalidRoutePattern`] when the pattern does not start with
/// `/`, a parameter has an empty name, a name is repeated, or a type tag is unknown.
///
/// # Example
///
/// ```
/// use minirouter::router::{compile_path, ParamType, SegmentDescriptor};
///
/// let segments = compile_path("/book/<id:int>").unwrap();
/// assert_eq!(segments[0], SegmentDescriptor::Literal("book".into()));
/// assert_eq!(segments[1].as_param(), Some(("id", ParamType::Int)));
/// ```
pub fn compile_path(pattern: &str) -> Result<Vec<SegmentDescriptor>, RouterError> {
    if !pattern.starts_with('/') {
        return Err(RouterError::invalid_pattern(
            pattern,
            format!("Route must start with '/': {pattern}"),
        ));
    }

    let mut segments = Vec::with_capacity(pattern.matches('/').count());
    for part in split_path(pattern) {
        let Some(inner) = part
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        else {
            segments.push(SegmentDescriptor::Literal(part.to_string()));
            continue;
        };

        let inner = inner.trim();
        let (name, ty) = match inner.split_once(':') {
            Some((name, tag)) => {
                let tag = tag.trim();
                let ty = ParamType::from_tag(tag).ok_or_else(|| {
                    RouterError::invalid_pattern(
                        pattern,
                        format!("Unsupported type '{tag}' in segment '{part}'"),
                    )
                })?;
                (name.trim(), ty)
            }
            None => (inner, ParamType::Str),
        };

        if name.is_empty() {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("Missing parameter name in segment '{part}'"),
            ));
        }
        let duplicate = segments
            .iter()
            .filter_map(SegmentDescriptor::as_param)
            .any(|(existing, _)| existing == name);
        if duplicate {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("Duplicate parameter '{name}'"),
            ));
        }

        segments.push(SegmentDescriptor::Param {
            name: Arc::from(name),
            ty,
        });
    }

    Ok(segments)
}
