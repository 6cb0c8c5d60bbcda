//! Menu nodes: weighted, ordered trees with visibility rules
//!
//! # Architecture
//!
//! ```text
//! Node "test"                 id: test        depth: 0
//!  ├─ Node "c" (weight 3)     id: test:c      depth: 1
//!  │   └─ Node "sc"           id: test:c:sc   depth: 2
//!  └─ Node "d" (weight 1)     id: test:d      depth: 1
//! ```
//!
//! A child records its parent's full id and depth when it is added. The link
//! is only used to compute ids and depths; parents own their children.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::context::Context;
use crate::error::{ConfigError, Result};
use crate::link::Link;
use crate::routes::{Params, Reverse};
use crate::template::Template;
use crate::viewer::Viewer;
use crate::visibility::Visibility;

/// Default node template name.
pub const DEFAULT_NODE_TEMPLATE: &str = "navtree/node.html";

/// Attribute keys that may not appear in `attrs`.
pub const RESERVED_ATTRS: &[&str] = &["class"];

/// Producer for dynamic children.
pub type ChildrenFn = Arc<dyn Fn() -> Vec<Node> + Send + Sync>;

/// Where a node's children come from.
#[derive(Clone)]
pub enum Children {
    /// Owned children, kept sorted by weight, highest first
    Static(Vec<Node>),

    /// Producer called on every access. The result is never cached and the
    /// produced nodes keep no parent link.
    Dynamic(ChildrenFn),
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::Static(nodes) => f.debug_list().entries(nodes).finish(),
            Children::Dynamic(_) => write!(f, "Dynamic(<fn>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParentLink {
    id: String,
    depth: usize,
}

/// A navigation node.
///
/// Build one with [`Node::builder`].
#[derive(Clone)]
pub struct Node {
    local_id: String,
    label: String,
    label_template: Template,
    title: Option<String>,
    weight: i64,
    template: String,
    css_class: Option<String>,
    link: Link,
    attrs: IndexMap<String, String>,
    link_attrs: IndexMap<String, String>,
    context: IndexMap<String, Value>,
    visibility: Visibility,
    children: Children,
    parent: Option<ParentLink>,
}

impl Node {
    /// Start building a node.
    pub fn builder(id: impl Into<String>, label: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(id, label)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Identity
    // ═══════════════════════════════════════════════════════════════════

    /// Full id: the parent's id and this node's local id joined by `:`.
    pub fn id(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}:{}", parent.id, self.local_id),
            None => self.local_id.clone(),
        }
    }

    /// Id unique among siblings.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Full id of the parent, if this node has been added to one.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.id.as_str())
    }

    /// 0 for a root, parent depth + 1 otherwise.
    pub fn depth(&self) -> usize {
        self.parent.as_ref().map_or(0, |p| p.depth + 1)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Attributes
    // ═══════════════════════════════════════════════════════════════════

    /// Raw label, placeholders included.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label with placeholders expanded against `context`.
    pub fn render_label(&self, context: &Context) -> String {
        self.label_template.expand(context)
    }

    /// Optional link title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sort key; higher sorts first.
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Template name used to render this node.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Extra CSS class.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    /// Link target.
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Attributes for the node element, in declaration order.
    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    /// Attributes for the link element, in declaration order.
    pub fn link_attrs(&self) -> &IndexMap<String, String> {
        &self.link_attrs
    }

    /// Extra render context.
    pub fn extra_context(&self) -> &IndexMap<String, Value> {
        &self.context
    }

    /// Visibility rule.
    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Overlay this node's extra context onto the current frame of `context`.
    pub fn get_context(&self, context: &mut Context) {
        context.extend(self.context.iter().map(|(k, v)| (k.as_str(), v.clone())));
    }

    /// Resolve the link target.
    ///
    /// Route targets keep only the parameters the node declared in
    /// `reverse_kwargs`; URL targets ignore `params`.
    pub fn get_url(&self, resolver: &dyn Reverse, params: &Params) -> Result<String> {
        self.link.resolve(resolver, params)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Children
    // ═══════════════════════════════════════════════════════════════════

    /// Current children.
    ///
    /// Static children are borrowed. Dynamic children are produced on this
    /// call and returned as the producer built them: they are not attached
    /// to this node, so their ids stay local and their depth is 0.
    pub fn children(&self) -> Cow<'_, [Node]> {
        match &self.children {
            Children::Static(nodes) => Cow::Borrowed(nodes.as_slice()),
            Children::Dynamic(produce) => Cow::Owned(produce()),
        }
    }

    /// Whether children come from a producer.
    pub fn has_dynamic_children(&self) -> bool {
        matches!(self.children, Children::Dynamic(_))
    }

    /// Add a child and re-sort by weight, highest first. Equal weights keep
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DynamicChildren`] if this node's children come
    /// from a producer.
    pub fn add(&mut self, mut child: Node) -> Result<()> {
        let id = self.id();
        let depth = self.depth();
        match &mut self.children {
            Children::Static(nodes) => {
                child.adopt(id, depth);
                nodes.push(child);
                nodes.sort_by(|a, b| b.weight.cmp(&a.weight));
                Ok(())
            }
            Children::Dynamic(_) => Err(ConfigError::DynamicChildren { id }.into()),
        }
    }

    /// Re-root this subtree under a parent with the given id and depth.
    fn adopt(&mut self, parent_id: String, parent_depth: usize) {
        self.parent = Some(ParentLink {
            id: parent_id,
            depth: parent_depth,
        });
        if let Children::Static(nodes) = &mut self.children {
            let id = match &self.parent {
                Some(parent) => format!("{}:{}", parent.id, self.local_id),
                None => self.local_id.clone(),
            };
            let depth = parent_depth + 1;
            for node in nodes {
                node.adopt(id.clone(), depth);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Visibility and current item
    // ═══════════════════════════════════════════════════════════════════

    /// Whether `viewer` may see this node.
    pub fn is_viewable_by(&self, viewer: &dyn Viewer, context: &Context) -> bool {
        self.visibility.allows(viewer, context)
    }

    /// Whether this node's full id equals `current`.
    pub fn is_current(&self, current: &str) -> bool {
        self.id() == current
    }

    /// Whether one of the given direct children is current.
    ///
    /// Not recursive: each depth is checked when it is rendered.
    pub fn has_current<'a, I>(&self, current: &str, viewable_children: I) -> bool
    where
        I: IntoIterator<Item = &'a Node>,
    {
        viewable_children
            .into_iter()
            .any(|child| child.is_current(current))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("label", &self.label)
            .field("weight", &self.weight)
            .field("link", &self.link)
            .field("visibility", &self.visibility)
            .field("children", &self.children)
            .finish()
    }
}

/// Builder for [`Node`].
///
/// # Example
///
/// ```
/// use navtree::{Node, Visibility};
///
/// let node = Node::builder("blog", "Blog")
///     .route("blog")
///     .weight(10)
///     .visibility(Visibility::Authenticated)
///     .child(Node::builder("new", "New post").url("/blog/new").build().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(node.children()[0].id(), "blog:new");
/// ```
#[must_use]
pub struct NodeBuilder {
    id: String,
    label: String,
    url: Option<String>,
    route: Option<String>,
    reverse_kwargs: Vec<String>,
    title: Option<String>,
    weight: i64,
    template: String,
    css_class: Option<String>,
    attrs: IndexMap<String, String>,
    link_attrs: IndexMap<String, String>,
    context: IndexMap<String, Value>,
    visibility: Visibility,
    children: Vec<Node>,
    producer: Option<ChildrenFn>,
}

impl NodeBuilder {
    fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: None,
            route: None,
            reverse_kwargs: Vec::new(),
            title: None,
            weight: 0,
            template: DEFAULT_NODE_TEMPLATE.to_string(),
            css_class: None,
            attrs: IndexMap::new(),
            link_attrs: IndexMap::new(),
            context: IndexMap::new(),
            visibility: Visibility::Anyone,
            children: Vec::new(),
            producer: None,
        }
    }

    /// Literal URL target.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Named route target.
    pub fn route(mut self, name: impl Into<String>) -> Self {
        self.route = Some(name.into());
        self
    }

    /// Parameter names the route accepts.
    pub fn reverse_kwargs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reverse_kwargs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Link title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sort weight, default 0.
    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    /// Template name.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Extra CSS class.
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Attribute on the node element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Attribute on the link element.
    pub fn link_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.link_attrs.insert(key.into(), value.into());
        self
    }

    /// Extra render context entry.
    pub fn context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Visibility rule.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Static child.
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Static children.
    pub fn children<I: IntoIterator<Item = Node>>(mut self, nodes: I) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Produce children on every access instead of storing them.
    /// Replaces any static children.
    pub fn dynamic_children<F>(mut self, produce: F) -> Self
    where
        F: Fn() -> Vec<Node> + Send + Sync + 'static,
    {
        self.producer = Some(Arc::new(produce));
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BothTargets`] / [`ConfigError::MissingTarget`] unless
    ///   exactly one of `url` and `route` was set
    /// - [`ConfigError::ReservedAttribute`] if `attrs` contains `class`
    pub fn build(self) -> Result<Node> {
        let link = Link::from_parts(&self.label, self.url, self.route, self.reverse_kwargs)?;

        if let Some(key) = self
            .attrs
            .keys()
            .find(|k| RESERVED_ATTRS.contains(&k.as_str()))
        {
            return Err(ConfigError::ReservedAttribute {
                id: self.id,
                key: key.clone(),
            }
            .into());
        }

        let children = match &self.producer {
            Some(produce) => Children::Dynamic(Arc::clone(produce)),
            None => Children::Static(Vec::new()),
        };

        let mut node = Node {
            label_template: Template::parse(&self.label),
            local_id: self.id,
            label: self.label,
            title: self.title,
            weight: self.weight,
            template: self.template,
            css_class: self.css_class,
            link,
            attrs: self.attrs,
            link_attrs: self.link_attrs,
            context: self.context,
            visibility: self.visibility,
            children,
            parent: None,
        };

        if self.producer.is_none() {
            for child in self.children {
                node.add(child)?;
            }
        }
        Ok(node)
    }
}
