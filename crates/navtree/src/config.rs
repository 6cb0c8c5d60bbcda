//! Menu rendering configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Default class for the current node.
pub const DEFAULT_CURRENT_CLASS: &str = "current";

/// Default class for a node with a current child.
pub const DEFAULT_PARENT_CLASS: &str = "has-current";

/// CSS classes used to mark the current item and its parent.
///
/// Deserializes from the same keys host applications use in their
/// settings; missing keys keep their defaults.
///
/// ```
/// use navtree::MenuConfig;
///
/// let config = MenuConfig::from_json(r#"{"CURRENT_MENU_ITEM_CLASS": "active"}"#).unwrap();
/// assert_eq!(config.current_menu_item_class, "active");
/// assert_eq!(config.current_menu_item_parent_class, "has-current");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Class added to the current node
    #[serde(rename = "CURRENT_MENU_ITEM_CLASS")]
    pub current_menu_item_class: String,

    /// Class added to a node whose direct child is current
    #[serde(rename = "CURRENT_MENU_ITEM_PARENT_CLASS")]
    pub current_menu_item_parent_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            current_menu_item_class: DEFAULT_CURRENT_CLASS.to_string(),
            current_menu_item_parent_class: DEFAULT_PARENT_CLASS.to_string(),
        }
    }
}

impl MenuConfig {
    /// Parse overrides from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Settings`](crate::NavError::Settings) on malformed
    /// JSON or wrongly typed values.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Context value exposed to templates as `menu_config`, keyed like the
    /// JSON settings.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Settings`](crate::NavError::Settings) if
    /// serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
