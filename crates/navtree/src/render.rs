//! Rendering entry points and the views handed to templates
//!
//! # Architecture
//!
//! ```text
//! Navigation::render_menu ─┐
//!                          ├─ filter by viewer ─ push frame ─ TemplateEngine
//! Navigation::render_node ─┘                                        │
//!          ▲                                                        │
//!          └────────────── node templates recurse per child ◄───────┘
//! ```
//!
//! Every entry point pushes one context frame for its own keys and pops it
//! before returning. Nothing is cached; each render re-evaluates visibility
//! and re-invokes dynamic children producers.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::trace;

use crate::breadcrumbs::{Breadcrumb, Breadcrumbs, DEFAULT_BREADCRUMBS_TEMPLATE, DEFAULT_CRUMB_TEMPLATE};
use crate::config::MenuConfig;
use crate::context::Context;
use crate::error::{NavError, Result};
use crate::menu::Menu;
use crate::navigation::Navigation;
use crate::node::Node;
use crate::routes::Params;
use crate::viewer::Viewer;

/// Depth limit used when neither options nor context set one.
pub const DEFAULT_MAX_DEPTH: usize = 999;

/// Context keys written by the entry points.
pub mod keys {
    /// Id of the menu being rendered
    pub const MENU_ID: &str = "menu_id";
    /// Full id of the node being rendered
    pub const NODE_ID: &str = "node_id";
    /// Full id of the current item
    pub const CURRENT_MENU_ITEM: &str = "current_menu_item";
    /// Depth limit relative to the start depth
    pub const MAX_DEPTH: &str = "max_depth";
    /// Depth of the node relative to the start depth
    pub const CURRENT_DEPTH: &str = "current_depth";
    /// Absolute depth rendering started at
    pub const START_DEPTH: &str = "start_depth";
    /// Whether the node is current
    pub const IS_CURRENT: &str = "is_current";
    /// Whether a direct child is current
    pub const HAS_CURRENT: &str = "has_current";
    /// Menu configuration classes
    pub const MENU_CONFIG: &str = "menu_config";
}

/// The template rendering service.
///
/// Each method receives the template name and a typed view. Implementations
/// render child nodes by calling back into [`Navigation::render_node`] with
/// [`NodeView::child_options`].
pub trait TemplateEngine: Send + Sync {
    /// Render a menu.
    fn render_menu(
        &self,
        nav: &Navigation,
        template: &str,
        view: &MenuView<'_>,
        context: &mut Context,
    ) -> Result<String>;

    /// Render one node and, through recursion, its visible children.
    fn render_node(
        &self,
        nav: &Navigation,
        template: &str,
        view: &NodeView<'_>,
        context: &mut Context,
    ) -> Result<String>;

    /// Render a breadcrumb trail.
    fn render_breadcrumbs(
        &self,
        nav: &Navigation,
        template: &str,
        view: &BreadcrumbsView<'_>,
        context: &mut Context,
    ) -> Result<String>;

    /// Render a single crumb.
    fn render_crumb(
        &self,
        nav: &Navigation,
        template: &str,
        view: &CrumbView<'_>,
        context: &mut Context,
    ) -> Result<String>;
}

// ═══════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════

/// Per-call arguments. Unset values fall back to the context, then to
/// defaults.
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Viewer; falls back to the context's viewer slot
    pub viewer: Option<Arc<dyn Viewer>>,

    /// Depth limit; falls back to `max_depth`, then 999
    pub max_depth: Option<usize>,

    /// Full id of the current item; falls back to `current_menu_item`
    pub current_menu_item: Option<String>,

    /// Absolute depth rendering started at; falls back to the node's depth
    pub start_depth: Option<usize>,

    /// Relative depth of the node; falls back to depth - start depth
    pub current_depth: Option<usize>,

    /// Parameters for route reversal
    pub params: Params,
}

impl RenderOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render for `viewer`.
    pub fn viewer<V: Viewer + 'static>(self, viewer: V) -> Self {
        self.shared_viewer(Arc::new(viewer))
    }

    /// Render for an already shared viewer.
    pub fn shared_viewer(mut self, viewer: Arc<dyn Viewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Limit depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Mark the current item by full id.
    pub fn current(mut self, id: impl Into<String>) -> Self {
        self.current_menu_item = Some(id.into());
        self
    }

    /// Set the start depth.
    pub fn start_depth(mut self, depth: usize) -> Self {
        self.start_depth = Some(depth);
        self
    }

    /// Set the relative depth.
    pub fn current_depth(mut self, depth: usize) -> Self {
        self.current_depth = Some(depth);
        self
    }

    /// Add a route parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("viewer", &self.viewer.as_deref().map(|v| v.username()))
            .field("max_depth", &self.max_depth)
            .field("current_menu_item", &self.current_menu_item)
            .field("start_depth", &self.start_depth)
            .field("current_depth", &self.current_depth)
            .field("params", &self.params)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Views
// ═══════════════════════════════════════════════════════════════════════

/// What a menu template sees.
pub struct MenuView<'a> {
    /// The menu
    pub menu: &'a Menu,
    /// Root nodes the viewer may see, in registration order
    pub viewable_nodes: Vec<&'a Node>,
    /// The viewer
    pub viewer: &'a Arc<dyn Viewer>,
    /// Depth limit
    pub max_depth: usize,
    /// Full id of the current item
    pub current_menu_item: Option<&'a str>,
    /// Menu configuration
    pub config: &'a MenuConfig,
    /// Route parameters
    pub params: &'a Params,
}

impl MenuView<'_> {
    /// Options for rendering the root nodes.
    pub fn node_options(&self) -> RenderOptions {
        RenderOptions {
            viewer: Some(Arc::clone(self.viewer)),
            max_depth: Some(self.max_depth),
            current_menu_item: self.current_menu_item.map(str::to_string),
            start_depth: None,
            current_depth: None,
            params: self.params.clone(),
        }
    }
}

/// What a node template sees.
pub struct NodeView<'a> {
    /// The node
    pub node: &'a Node,
    /// Resolved link target
    pub url: String,
    /// Label with placeholders expanded
    pub label: String,
    /// Direct children the viewer may see, empty past the depth limit
    pub viewable_children: &'a [&'a Node],
    /// Whether the node is current
    pub is_current: bool,
    /// Whether a viewable direct child is current
    pub has_current: bool,
    /// Full id of the current item
    pub current_menu_item: Option<&'a str>,
    /// The viewer
    pub viewer: &'a Arc<dyn Viewer>,
    /// Depth limit
    pub max_depth: usize,
    /// Depth relative to `start_depth`
    pub current_depth: usize,
    /// Absolute depth rendering started at
    pub start_depth: usize,
    /// Menu configuration
    pub config: &'a MenuConfig,
    /// Route parameters
    pub params: &'a Params,
}

impl NodeView<'_> {
    /// Options for rendering one level deeper.
    pub fn child_options(&self) -> RenderOptions {
        RenderOptions {
            viewer: Some(Arc::clone(self.viewer)),
            max_depth: Some(self.max_depth),
            current_menu_item: self.current_menu_item.map(str::to_string),
            start_depth: Some(self.start_depth),
            current_depth: Some(self.current_depth + 1),
            params: self.params.clone(),
        }
    }

    /// Whether there are children to render.
    pub fn has_children(&self) -> bool {
        !self.viewable_children.is_empty()
    }

    /// CSS classes for the node element.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes = vec!["menu-item"];
        if let Some(class) = self.node.css_class() {
            classes.push(class);
        }
        if self.has_children() {
            classes.push("has-children");
        }
        if self.is_current {
            classes.push(self.config.current_menu_item_class.as_str());
        }
        if self.has_current {
            classes.push(self.config.current_menu_item_parent_class.as_str());
        }
        if self.has_children() {
            classes.push("has-dropdown");
        }
        classes
    }
}

/// What a breadcrumbs template sees.
pub struct BreadcrumbsView<'a> {
    /// Crumbs, root first
    pub crumbs: &'a [Breadcrumb],
    /// Options to pass to each crumb
    pub options: &'a RenderOptions,
}

/// What a crumb template sees.
pub struct CrumbView<'a> {
    /// The crumb
    pub crumb: &'a Breadcrumb,
    /// Resolved link target
    pub url: String,
    /// Label with placeholders expanded
    pub label: String,
    /// Whether this is the last crumb of the trail
    pub last: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════════════════

impl Navigation {
    /// Render the registered menu `name`.
    ///
    /// # Errors
    ///
    /// [`NavError::MenuNotFound`] for an unknown name, otherwise as
    /// [`Navigation::render_menu`].
    pub fn render_menu_named(
        &self,
        name: &str,
        context: &mut Context,
        options: &RenderOptions,
    ) -> Result<String> {
        let menu = self.menu(name).ok_or_else(|| NavError::MenuNotFound {
            name: name.to_string(),
        })?;
        self.render_menu(menu, context, options)
    }

    /// Render a menu's visible root nodes. Returns `""` if none is visible.
    ///
    /// # Errors
    ///
    /// - [`NavError::MissingViewer`] if neither options nor context carry a viewer
    /// - routing and template errors from the nodes
    pub fn render_menu(
        &self,
        menu: &Menu,
        context: &mut Context,
        options: &RenderOptions,
    ) -> Result<String> {
        let viewer = resolve_viewer("render_menu", context, options)?;
        let max_depth = options
            .max_depth
            .or_else(|| context.get_usize(keys::MAX_DEPTH))
            .unwrap_or(DEFAULT_MAX_DEPTH);

        let viewable_nodes: Vec<&Node> = menu
            .nodes()
            .filter(|node| node.is_viewable_by(viewer.as_ref(), context))
            .collect();
        if viewable_nodes.is_empty() {
            trace!(menu = menu.id(), "no viewable nodes");
            return Ok(String::new());
        }

        let current = resolve_current(context, options);
        let menu_config = self.config().to_value()?;
        let mut scope = context.scope();
        scope.extend([
            (keys::MENU_ID, json!(menu.id())),
            (keys::MAX_DEPTH, json!(max_depth)),
            (keys::CURRENT_MENU_ITEM, optional_str(current.as_deref())),
            (keys::MENU_CONFIG, menu_config),
        ]);
        menu.get_context(&mut scope);

        let view = MenuView {
            menu,
            viewable_nodes,
            viewer: &viewer,
            max_depth,
            current_menu_item: current.as_deref(),
            config: self.config(),
            params: &options.params,
        };
        trace!(menu = menu.id(), nodes = view.viewable_nodes.len(), "rendering menu");
        self.templates()
            .render_menu(self, menu.template(), &view, &mut scope)
    }

    /// Render one node and its visible children down to the depth limit.
    /// Returns `""` if the viewer may not see the node.
    ///
    /// # Errors
    ///
    /// - [`NavError::MissingViewer`] if neither options nor context carry a viewer
    /// - [`NavError::Routing`] if the node's route cannot be reversed
    /// - template errors
    pub fn render_node(
        &self,
        node: &Node,
        context: &mut Context,
        options: &RenderOptions,
    ) -> Result<String> {
        let viewer = resolve_viewer("render_node", context, options)?;
        if !node.is_viewable_by(viewer.as_ref(), context) {
            return Ok(String::new());
        }

        let current = resolve_current(context, options);
        let max_depth = options
            .max_depth
            .or_else(|| context.get_usize(keys::MAX_DEPTH))
            .unwrap_or(DEFAULT_MAX_DEPTH);
        let start_depth = options
            .start_depth
            .or_else(|| context.get_usize(keys::START_DEPTH))
            .unwrap_or_else(|| node.depth());
        let current_depth = options
            .current_depth
            .or_else(|| context.get_usize(keys::CURRENT_DEPTH))
            .unwrap_or_else(|| node.depth().saturating_sub(start_depth));

        let children = if current_depth < max_depth {
            node.children()
        } else {
            Cow::Borrowed(&[][..])
        };
        let viewable_children: Vec<&Node> = children
            .iter()
            .filter(|child| child.is_viewable_by(viewer.as_ref(), context))
            .collect();

        let is_current = current.as_deref().is_some_and(|c| node.is_current(c));
        let has_current = current
            .as_deref()
            .is_some_and(|c| node.has_current(c, viewable_children.iter().copied()));
        let url = node.get_url(self.routes(), &options.params)?;

        let menu_config = self.config().to_value()?;
        let mut scope = context.scope();
        scope.extend([
            (keys::NODE_ID, json!(node.id())),
            (keys::IS_CURRENT, json!(is_current)),
            (keys::HAS_CURRENT, json!(has_current)),
            (keys::CURRENT_MENU_ITEM, optional_str(current.as_deref())),
            (keys::MAX_DEPTH, json!(max_depth)),
            (keys::CURRENT_DEPTH, json!(current_depth)),
            (keys::START_DEPTH, json!(start_depth)),
            (keys::MENU_CONFIG, menu_config),
        ]);
        node.get_context(&mut scope);
        let label = node.render_label(&scope);

        let view = NodeView {
            node,
            url,
            label,
            viewable_children: &viewable_children,
            is_current,
            has_current,
            current_menu_item: current.as_deref(),
            viewer: &viewer,
            max_depth,
            current_depth,
            start_depth,
            config: self.config(),
            params: &options.params,
        };
        trace!(node = %node.id(), current_depth, children = viewable_children.len(), "rendering node");
        self.templates()
            .render_node(self, node.template(), &view, &mut scope)
    }

    /// Render a breadcrumb trail. Returns `""` for an empty trail.
    ///
    /// # Errors
    ///
    /// Routing and template errors from the crumbs.
    pub fn render_breadcrumbs(
        &self,
        crumbs: &Breadcrumbs,
        context: &mut Context,
        options: &RenderOptions,
    ) -> Result<String> {
        if crumbs.is_empty() {
            return Ok(String::new());
        }
        let view = BreadcrumbsView {
            crumbs: crumbs.as_slice(),
            options,
        };
        let mut scope = context.scope();
        self.templates()
            .render_breadcrumbs(self, DEFAULT_BREADCRUMBS_TEMPLATE, &view, &mut scope)
    }

    /// Render a single crumb.
    ///
    /// # Errors
    ///
    /// [`NavError::Routing`] if the crumb's route cannot be reversed.
    pub fn render_crumb(
        &self,
        crumb: &Breadcrumb,
        last: bool,
        context: &mut Context,
        options: &RenderOptions,
    ) -> Result<String> {
        let url = crumb.get_url(self.routes(), &options.params)?;
        let mut scope = context.scope();
        scope.define("last", json!(last));
        let label = crumb.render_label(&scope);
        let view = CrumbView {
            crumb,
            url,
            label,
            last,
        };
        self.templates()
            .render_crumb(self, DEFAULT_CRUMB_TEMPLATE, &view, &mut scope)
    }
}

fn resolve_viewer(
    tag: &'static str,
    context: &Context,
    options: &RenderOptions,
) -> Result<Arc<dyn Viewer>> {
    options
        .viewer
        .clone()
        .or_else(|| context.viewer().cloned())
        .ok_or(NavError::MissingViewer { tag })
}

fn resolve_current(context: &Context, options: &RenderOptions) -> Option<String> {
    options
        .current_menu_item
        .clone()
        .or_else(|| context.get_str(keys::CURRENT_MENU_ITEM).map(str::to_string))
}

fn optional_str(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}
