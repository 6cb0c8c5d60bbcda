//! Breadcrumb trails

use crate::context::Context;
use crate::error::Result;
use crate::link::Link;
use crate::routes::{Params, Reverse};
use crate::template::Template;

/// Default template for a whole trail.
pub const DEFAULT_BREADCRUMBS_TEMPLATE: &str = "navtree/breadcrumbs.html";

/// Default template for a single crumb.
pub const DEFAULT_CRUMB_TEMPLATE: &str = "navtree/crumb.html";

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    label: String,
    label_template: Template,
    link: Link,
    title: Option<String>,
    css_class: Option<String>,
}

impl Breadcrumb {
    /// Crumb pointing at a literal URL.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_link(label, Link::url(url))
    }

    /// Crumb pointing at a named route.
    pub fn route(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_link(label, Link::route(name))
    }

    /// Crumb with an explicit link target.
    pub fn with_link(label: impl Into<String>, link: Link) -> Self {
        let label = label.into();
        Self {
            label_template: Template::parse(&label),
            label,
            link,
            title: None,
            css_class: None,
        }
    }

    /// Crumb from optional parts; exactly one of `url` and `route` must be set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for both or neither target.
    pub fn from_parts(
        label: impl Into<String>,
        url: Option<String>,
        route: Option<String>,
        reverse_kwargs: Vec<String>,
    ) -> Result<Self> {
        let label = label.into();
        let link = Link::from_parts(&label, url, route, reverse_kwargs)?;
        Ok(Self::with_link(label, link))
    }

    /// Set the link title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set an extra CSS class.
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Raw label, placeholders included.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label with placeholders expanded against `context`.
    pub fn render_label(&self, context: &Context) -> String {
        self.label_template.expand(context)
    }

    /// Link target.
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Link title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Extra CSS class.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    /// Resolve the link target, same rules as nodes.
    pub fn get_url(&self, resolver: &dyn Reverse, params: &Params) -> Result<String> {
        self.link.resolve(resolver, params)
    }
}

/// An ordered trail, root first. Built per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    crumbs: Vec<Breadcrumb>,
}

impl Breadcrumbs {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a crumb.
    pub fn push(&mut self, crumb: Breadcrumb) -> &mut Self {
        self.crumbs.push(crumb);
        self
    }

    /// Append a crumb (builder form).
    pub fn with(mut self, crumb: Breadcrumb) -> Self {
        self.crumbs.push(crumb);
        self
    }

    /// Crumbs in order.
    pub fn as_slice(&self) -> &[Breadcrumb] {
        &self.crumbs
    }

    /// Iterate over crumbs.
    pub fn iter(&self) -> std::slice::Iter<'_, Breadcrumb> {
        self.crumbs.iter()
    }

    /// Number of crumbs.
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// The current page's crumb.
    pub fn last(&self) -> Option<&Breadcrumb> {
        self.crumbs.last()
    }

    /// The section the current page belongs to: the crumb before the last,
    /// unless that is the root crumb.
    pub fn parent_section(&self) -> Option<&Breadcrumb> {
        if self.crumbs.len() < 3 {
            return None;
        }
        self.crumbs.get(self.crumbs.len() - 2)
    }

    /// Page title suffixed with the parent section label, when there is one.
    ///
    /// ```
    /// use navtree::{Breadcrumb, Breadcrumbs};
    ///
    /// let trail = Breadcrumbs::new()
    ///     .with(Breadcrumb::new("Home", "/"))
    ///     .with(Breadcrumb::new("Blog", "/blog"))
    ///     .with(Breadcrumb::new("Rust", "/blog/category/rust"));
    /// assert_eq!(trail.seo_title("Rust"), "Rust | Blog");
    /// ```
    pub fn seo_title(&self, title: &str) -> String {
        match self.parent_section() {
            Some(parent) => format!("{} | {}", title, parent.label()),
            None => title.to_string(),
        }
    }
}

impl FromIterator<Breadcrumb> for Breadcrumbs {
    fn from_iter<T: IntoIterator<Item = Breadcrumb>>(iter: T) -> Self {
        Self {
            crumbs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Breadcrumbs {
    type Item = Breadcrumb;
    type IntoIter = std::vec::IntoIter<Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.crumbs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Breadcrumbs {
    type Item = &'a Breadcrumb;
    type IntoIter = std::slice::Iter<'a, Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.crumbs.iter()
    }
}
