//! Link targets shared by nodes and breadcrumbs

use crate::error::{ConfigError, Result};
use crate::routes::{Params, Reverse};

/// Where a node or breadcrumb points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// A literal URL, returned unchanged
    Url(String),

    /// A named route reversed at render time
    Route {
        /// Route name
        name: String,
        /// Parameter names the route accepts; others are dropped
        reverse_kwargs: Vec<String>,
    },
}

impl Link {
    /// Literal URL target.
    pub fn url(url: impl Into<String>) -> Self {
        Link::Url(url.into())
    }

    /// Named route target without parameters.
    pub fn route(name: impl Into<String>) -> Self {
        Link::Route {
            name: name.into(),
            reverse_kwargs: Vec::new(),
        }
    }

    /// Build a target from optional parts. Exactly one of `url` and `route`
    /// must be given; empty strings count as absent.
    pub fn from_parts(
        label: &str,
        url: Option<String>,
        route: Option<String>,
        reverse_kwargs: Vec<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let url = url.filter(|u| !u.is_empty());
        let route = route.filter(|r| !r.is_empty());
        match (url, route) {
            (Some(_), Some(_)) => Err(ConfigError::BothTargets {
                label: label.to_string(),
            }),
            (None, None) => Err(ConfigError::MissingTarget {
                label: label.to_string(),
            }),
            (Some(url), None) => Ok(Link::Url(url)),
            (None, Some(name)) => Ok(Link::Route {
                name,
                reverse_kwargs,
            }),
        }
    }

    /// Resolve to a URL string.
    ///
    /// Route targets keep only the parameters named in `reverse_kwargs`
    /// before reversing. URL targets ignore `params`.
    pub fn resolve(&self, resolver: &dyn Reverse, params: &Params) -> Result<String> {
        match self {
            Link::Url(url) => Ok(url.clone()),
            Link::Route {
                name,
                reverse_kwargs,
            } => {
                let accepted: Params = params
                    .iter()
                    .filter(|(key, _)| reverse_kwargs.iter().any(|k| k == *key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                resolver.reverse(name, &accepted)
            }
        }
    }
}
