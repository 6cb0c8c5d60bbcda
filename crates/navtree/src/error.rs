//! Error types for navigation trees, routing and rendering

use thiserror::Error;

/// Main error type for navtree operations
#[derive(Error, Debug)]
pub enum NavError {
    /// A node, breadcrumb or menu was built with invalid arguments
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A named route could not be reversed
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// A rendering entry point received no viewer
    #[error("Missing viewer: {tag} needs a viewer in its options or context")]
    MissingViewer {
        /// Entry point that was called
        tag: &'static str,
    },

    /// No menu is registered under the name
    #[error("Menu not found: {name}")]
    MenuNotFound {
        /// Menu name
        name: String,
    },

    /// The template engine does not know the requested template
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Template name
        name: String,
    },

    /// An installed application's menu hook failed during start-up
    #[error("Menu discovery failed for app '{app}': {source}")]
    Discovery {
        /// Application name
        app: String,
        /// Error returned by the hook
        #[source]
        source: anyhow::Error,
    },

    /// Menu configuration could not be parsed
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Construction-time errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Both a literal URL and a route name were supplied
    #[error("'{label}' accepts either a url or a route name, but not both")]
    BothTargets {
        /// Label of the offending node or breadcrumb
        label: String,
    },

    /// Neither a literal URL nor a route name was supplied
    #[error("'{label}' needs either a url or a route name")]
    MissingTarget {
        /// Label of the offending node or breadcrumb
        label: String,
    },

    /// A reserved key was used in an attribute map
    #[error("Node '{id}' sets reserved attribute '{key}'; use css_class instead")]
    ReservedAttribute {
        /// Node id
        id: String,
        /// Reserved key
        key: String,
    },

    /// `add` was called on a node whose children come from a producer
    #[error("Node '{id}' has dynamic children and cannot accept new ones")]
    DynamicChildren {
        /// Node id
        id: String,
    },
}

/// Route reversal errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// No route is registered under the name
    #[error("Reverse for '{name}' not found")]
    UnknownRoute {
        /// Route name
        name: String,
    },

    /// The route needs a parameter that was not supplied
    #[error("Reverse for '{route}' is missing parameter '{param}'")]
    MissingParameter {
        /// Route name
        route: String,
        /// Parameter name
        param: String,
    },

    /// A parameter was supplied that the route does not declare
    #[error("Reverse for '{route}' got unexpected parameter '{param}'")]
    UnexpectedParameter {
        /// Route name
        route: String,
        /// Parameter name
        param: String,
    },

    /// A parameter value does not match its converter
    #[error("Reverse for '{route}': '{value}' is not a valid {converter} for '{param}'")]
    InvalidParameter {
        /// Route name
        route: String,
        /// Parameter name
        param: String,
        /// Rejected value
        value: String,
        /// Converter name
        converter: &'static str,
    },
}

/// Result type alias for navtree operations
pub type Result<T> = std::result::Result<T, NavError>;
