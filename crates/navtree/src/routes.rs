//! Named-route reversal

use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{Result, RoutingError};

/// Keyword parameters for route reversal.
pub type Params = IndexMap<String, String>;

/// The routing service: turns a route name and parameters into a URL.
///
/// Host applications implement this over their router. [`Routes`] is a
/// standalone table for applications without one.
pub trait Reverse: Send + Sync {
    /// Reverse `name` with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] if the name is unknown or the parameters do
    /// not satisfy the route.
    fn reverse(&self, name: &str, params: &Params) -> Result<String>;
}

/// Parameter converter, written `<converter:name>` in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Any non-empty text without `/`, percent-encoded when reversed
    Str,
    /// ASCII letters, digits, hyphens and underscores
    Slug,
    /// ASCII digits
    Int,
}

impl Converter {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Converter::Str),
            "slug" => Some(Converter::Slug),
            "int" => Some(Converter::Int),
            _ => None,
        }
    }

    /// Converter name as written in patterns.
    pub fn name(&self) -> &'static str {
        match self {
            Converter::Str => "str",
            Converter::Slug => "slug",
            Converter::Int => "int",
        }
    }

    fn accepts(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Converter::Str => !value.contains('/'),
            Converter::Slug => value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            Converter::Int => value.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSegment {
    /// Fixed text
    Literal(String),
    /// Placeholder filled from parameters
    Parameter {
        /// Parameter name
        name: String,
        /// Value converter
        converter: Converter,
    },
}

/// A parsed route pattern such as `blog/category/<slug:slug>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<RouteSegment>,
}

impl RoutePattern {
    /// Parse a pattern. Leading slashes are ignored; `<name>` uses the
    /// `str` converter; unknown converters are treated as `str`.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .trim_start_matches('/')
            .split('/')
            .map(|piece| {
                match piece
                    .strip_prefix('<')
                    .and_then(|p| p.strip_suffix('>'))
                {
                    Some(inner) => {
                        let (converter, name) = match inner.split_once(':') {
                            Some((conv, name)) => {
                                (Converter::parse(conv).unwrap_or(Converter::Str), name)
                            }
                            None => (Converter::Str, inner),
                        };
                        RouteSegment::Parameter {
                            name: name.to_string(),
                            converter,
                        }
                    }
                    None => RouteSegment::Literal(piece.to_string()),
                }
            })
            .collect();
        Self { segments }
    }

    /// Segments in order.
    pub fn segments(&self) -> std::slice::Iter<'_, RouteSegment> {
        self.segments.iter()
    }

    /// Parameter names in order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            RouteSegment::Parameter { name, .. } => Some(name.as_str()),
            RouteSegment::Literal(_) => None,
        })
    }

    fn build(&self, route: &str, params: &Params) -> Result<String> {
        if let Some(extra) = params
            .keys()
            .find(|key| !self.parameters().any(|p| p == key.as_str()))
        {
            return Err(RoutingError::UnexpectedParameter {
                route: route.to_string(),
                param: extra.clone(),
            }
            .into());
        }

        let mut pieces = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                RouteSegment::Literal(text) => pieces.push(Cow::Borrowed(text.as_str())),
                RouteSegment::Parameter { name, converter } => {
                    let value =
                        params
                            .get(name)
                            .ok_or_else(|| RoutingError::MissingParameter {
                                route: route.to_string(),
                                param: name.clone(),
                            })?;
                    if !converter.accepts(value) {
                        return Err(RoutingError::InvalidParameter {
                            route: route.to_string(),
                            param: name.clone(),
                            value: value.clone(),
                            converter: converter.name(),
                        }
                        .into());
                    }
                    pieces.push(urlencoding::encode(value));
                }
            }
        }
        Ok(format!("/{}", pieces.join("/")))
    }
}

/// A table of named routes.
///
/// # Example
///
/// ```
/// use navtree::{Params, Reverse, Routes};
///
/// let routes = Routes::new()
///     .with("index", "")
///     .with("category", "blog/category/<slug:slug>");
///
/// assert_eq!(routes.reverse("index", &Params::new()).unwrap(), "/");
///
/// let mut params = Params::new();
/// params.insert("slug".to_string(), "rust".to_string());
/// assert_eq!(routes.reverse("category", &params).unwrap(), "/blog/category/rust");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: IndexMap<String, RoutePattern>,
}

impl Routes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route (builder form).
    pub fn with(mut self, name: impl Into<String>, pattern: &str) -> Self {
        self.add(name, pattern);
        self
    }

    /// Add a route. A later route with the same name replaces the earlier.
    pub fn add(&mut self, name: impl Into<String>, pattern: &str) {
        self.routes.insert(name.into(), RoutePattern::parse(pattern));
    }

    /// Look up a route's pattern.
    pub fn get(&self, name: &str) -> Option<&RoutePattern> {
        self.routes.get(name)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Reverse for Routes {
    fn reverse(&self, name: &str, params: &Params) -> Result<String> {
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| RoutingError::UnknownRoute {
                name: name.to_string(),
            })?;
        let url = pattern.build(name, params)?;
        trace!(route = name, url = %url, "reversed route");
        Ok(url)
    }
}
