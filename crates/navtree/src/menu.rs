//! Menus and the menu registry

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::Context;
use crate::node::Node;

/// Default menu template name.
pub const DEFAULT_MENU_TEMPLATE: &str = "navtree/menu.html";

/// A named collection of root nodes.
#[derive(Debug, Clone)]
pub struct Menu {
    id: String,
    template: String,
    context: IndexMap<String, Value>,
    nodes: IndexMap<String, Node>,
}

impl Menu {
    /// Create an empty menu with the default template.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: DEFAULT_MENU_TEMPLATE.to_string(),
            context: IndexMap::new(),
            nodes: IndexMap::new(),
        }
    }

    /// Use another template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Add a static context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Menu id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Template name.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Register a root node under its id. A later node with the same id
    /// replaces the earlier one in place.
    pub fn register(&mut self, node: Node) -> &mut Self {
        let id = node.id();
        if self.nodes.insert(id.clone(), node).is_some() {
            warn!(menu = %self.id, node = %id, "node registered twice, keeping the later one");
        } else {
            debug!(menu = %self.id, node = %id, "registered node");
        }
        self
    }

    /// Look up a root node.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Root nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the menu has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Overlay this menu's static context onto the current frame of `context`.
    pub fn get_context(&self, context: &mut Context) {
        context.extend(self.context.iter().map(|(k, v)| (k.as_str(), v.clone())));
    }
}

/// All menus of an application, keyed by menu id.
#[derive(Debug, Clone, Default)]
pub struct Menus {
    menus: IndexMap<String, Menu>,
}

impl Menus {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a menu under its id. A later menu with the same id replaces
    /// the earlier one.
    pub fn register(&mut self, menu: Menu) -> &mut Self {
        let id = menu.id().to_string();
        if self.menus.insert(id.clone(), menu).is_some() {
            warn!(menu = %id, "menu registered twice, keeping the later one");
        } else {
            debug!(menu = %id, "registered menu");
        }
        self
    }

    /// Get a menu for modification, creating an empty one if needed.
    ///
    /// Lets several applications contribute nodes to a shared menu.
    pub fn menu_mut(&mut self, id: &str) -> &mut Menu {
        self.menus
            .entry(id.to_string())
            .or_insert_with(|| Menu::new(id))
    }

    /// Look up a menu.
    pub fn get(&self, id: &str) -> Option<&Menu> {
        self.menus.get(id)
    }

    /// Menus in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Menu> {
        self.menus.values()
    }

    /// Number of menus.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Check if there are no menus.
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
