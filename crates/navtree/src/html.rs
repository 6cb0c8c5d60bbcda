//! Built-in HTML template engine
//!
//! Renders the four default template names to compact HTML. Any template
//! name, default or custom, can be overridden with a closure that receives
//! the same view the built-in renderer would.

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::breadcrumbs::{DEFAULT_BREADCRUMBS_TEMPLATE, DEFAULT_CRUMB_TEMPLATE};
use crate::context::Context;
use crate::error::{NavError, Result};
use crate::menu::DEFAULT_MENU_TEMPLATE;
use crate::navigation::Navigation;
use crate::node::DEFAULT_NODE_TEMPLATE;
use crate::render::{BreadcrumbsView, CrumbView, MenuView, NodeView, TemplateEngine};

/// A template override.
pub type TemplateFn =
    Arc<dyn Fn(&Navigation, &View<'_>, &mut Context) -> Result<String> + Send + Sync>;

/// The view handed to a template override.
pub enum View<'a> {
    /// A menu
    Menu(&'a MenuView<'a>),
    /// A node
    Node(&'a NodeView<'a>),
    /// A breadcrumb trail
    Breadcrumbs(&'a BreadcrumbsView<'a>),
    /// A single crumb
    Crumb(&'a CrumbView<'a>),
}

/// The default engine.
///
/// # Example
///
/// ```
/// use navtree::html::{escape, HtmlTemplates, View};
/// use navtree::{Context, Menu, Navigation, Node, RenderOptions, User};
///
/// let templates = HtmlTemplates::new().with_template("site/node.html", |_, view, _| {
///     let View::Node(node) = view else { unreachable!() };
///     Ok(format!("<span>{}</span>", escape(&node.label)))
/// });
///
/// let mut main = Menu::new("main");
/// main.register(Node::builder("home", "Home").url("/").template("site/node.html").build().unwrap());
/// let nav = Navigation::builder().menu(main).templates(templates).build().unwrap();
///
/// let html = nav
///     .render_menu_named("main", &mut Context::new(), &RenderOptions::new().viewer(User::new("ann")))
///     .unwrap();
/// assert_eq!(html, r#"<ul class="main-menu"><span>Home</span></ul>"#);
/// ```
#[derive(Clone, Default)]
pub struct HtmlTemplates {
    overrides: IndexMap<String, TemplateFn>,
}

impl HtmlTemplates {
    /// Engine with only the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a template.
    pub fn with_template<F>(mut self, name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Navigation, &View<'_>, &mut Context) -> Result<String> + Send + Sync + 'static,
    {
        self.overrides.insert(name.into(), Arc::new(render));
        self
    }

    fn dispatch(
        &self,
        nav: &Navigation,
        template: &str,
        builtin: &str,
        view: View<'_>,
        context: &mut Context,
    ) -> Result<String> {
        if let Some(render) = self.overrides.get(template) {
            return render(nav, &view, context);
        }
        if template != builtin {
            return Err(NavError::TemplateNotFound {
                name: template.to_string(),
            });
        }
        match view {
            View::Menu(view) => menu(nav, view, context),
            View::Node(view) => node(nav, view, context),
            View::Breadcrumbs(view) => breadcrumbs(nav, view, context),
            View::Crumb(view) => Ok(crumb(view)),
        }
    }
}

impl fmt::Debug for HtmlTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlTemplates")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TemplateEngine for HtmlTemplates {
    fn render_menu(
        &self,
        nav: &Navigation,
        template: &str,
        view: &MenuView<'_>,
        context: &mut Context,
    ) -> Result<String> {
        self.dispatch(nav, template, DEFAULT_MENU_TEMPLATE, View::Menu(view), context)
    }

    fn render_node(
        &self,
        nav: &Navigation,
        template: &str,
        view: &NodeView<'_>,
        context: &mut Context,
    ) -> Result<String> {
        self.dispatch(nav, template, DEFAULT_NODE_TEMPLATE, View::Node(view), context)
    }

    fn render_breadcrumbs(
        &self,
        nav: &Navigation,
        template: &str,
        view: &BreadcrumbsView<'_>,
        context: &mut Context,
    ) -> Result<String> {
        self.dispatch(
            nav,
            template,
            DEFAULT_BREADCRUMBS_TEMPLATE,
            View::Breadcrumbs(view),
            context,
        )
    }

    fn render_crumb(
        &self,
        nav: &Navigation,
        template: &str,
        view: &CrumbView<'_>,
        context: &mut Context,
    ) -> Result<String> {
        self.dispatch(nav, template, DEFAULT_CRUMB_TEMPLATE, View::Crumb(view), context)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in templates
// ═══════════════════════════════════════════════════════════════════════

fn menu(nav: &Navigation, view: &MenuView<'_>, context: &mut Context) -> Result<String> {
    let options = view.node_options();
    let mut out = format!(r#"<ul class="{}-menu">"#, escape(view.menu.id()));
    for node in &view.viewable_nodes {
        out.push_str(&nav.render_node(node, context, &options)?);
    }
    out.push_str("</ul>");
    Ok(out)
}

fn node(nav: &Navigation, view: &NodeView<'_>, context: &mut Context) -> Result<String> {
    let mut out = format!(r#"<li class="{}""#, escape(&view.classes().join(" ")));
    push_attrs(&mut out, view.node.attrs());
    let _ = write!(out, r#"><a href="{}""#, escape(&view.url));
    if let Some(title) = view.node.title() {
        let _ = write!(out, r#" title="{}""#, escape(title));
    }
    push_attrs(&mut out, view.node.link_attrs());
    let _ = write!(out, ">{}</a>", escape(&view.label));

    if view.has_children() {
        let options = view.child_options();
        out.push_str(r#"<ul class="sub-menu dropdown">"#);
        for child in view.viewable_children {
            out.push_str(&nav.render_node(child, context, &options)?);
        }
        out.push_str("</ul>");
    }
    out.push_str("</li>");
    Ok(out)
}

fn breadcrumbs(
    nav: &Navigation,
    view: &BreadcrumbsView<'_>,
    context: &mut Context,
) -> Result<String> {
    let mut out = String::from(r#"<ol class="breadcrumbs">"#);
    let last = view.crumbs.len().saturating_sub(1);
    for (i, crumb) in view.crumbs.iter().enumerate() {
        out.push_str(&nav.render_crumb(crumb, i == last, context, view.options)?);
    }
    out.push_str("</ol>");
    Ok(out)
}

fn crumb(view: &CrumbView<'_>) -> String {
    let mut class = String::from("crumb");
    if let Some(css) = view.crumb.css_class() {
        class.push(' ');
        class.push_str(css);
    }
    if view.last {
        class.push_str(" last");
    }
    let mut out = format!(r#"<li class="{}"><a href="{}""#, escape(&class), escape(&view.url));
    if let Some(title) = view.crumb.title() {
        let _ = write!(out, r#" title="{}""#, escape(title));
    }
    let _ = write!(out, ">{}</a></li>", escape(&view.label));
    out
}

fn push_attrs(out: &mut String, attrs: &IndexMap<String, String>) {
    for (key, value) in attrs {
        let _ = write!(out, r#" {}="{}""#, escape(key), escape(value));
    }
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
