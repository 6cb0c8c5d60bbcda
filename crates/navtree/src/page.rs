//! Per-page metadata exposed to templates

use serde_json::Value;

use crate::breadcrumbs::Breadcrumbs;
use crate::context::Context;
use crate::render::keys;

/// Context key for the page title.
pub const TITLE: &str = "title";

/// Context key for the page description.
pub const DESCRIPTION: &str = "description";

/// Metadata a page hands to its templates.
///
/// Every method has a default, so a page only overrides what it knows.
/// Trails compose by calling the parent page's `breadcrumbs` and pushing
/// onto the result.
///
/// ```
/// use navtree::{Breadcrumb, Breadcrumbs, Context, Page};
///
/// struct Blog;
///
/// impl Page for Blog {
///     fn title(&self) -> Option<String> {
///         Some("Blog".into())
///     }
///
///     fn current_menu_item(&self) -> Option<String> {
///         Some("main:blog".into())
///     }
///
///     fn breadcrumbs(&self) -> Breadcrumbs {
///         Breadcrumbs::new()
///             .with(Breadcrumb::new("Home", "/"))
///             .with(Breadcrumb::new("Blog", "/blog"))
///     }
/// }
///
/// let mut ctx = Context::new();
/// Blog.page_context(&mut ctx);
/// assert_eq!(ctx.get_str("title"), Some("Blog"));
/// assert_eq!(ctx.get_str("current_menu_item"), Some("main:blog"));
/// assert!(ctx.get("description").unwrap().is_null());
/// ```
pub trait Page {
    /// Page title.
    fn title(&self) -> Option<String> {
        None
    }

    /// Page description.
    fn description(&self) -> Option<String> {
        None
    }

    /// Full id of the menu node for this page.
    fn current_menu_item(&self) -> Option<String> {
        None
    }

    /// Breadcrumb trail, root first.
    fn breadcrumbs(&self) -> Breadcrumbs {
        Breadcrumbs::new()
    }

    /// Write `title`, `description` and `current_menu_item` into the current
    /// frame. Unset values are written as null.
    fn page_context(&self, context: &mut Context) {
        context.extend([
            (TITLE, optional(self.title())),
            (DESCRIPTION, optional(self.description())),
            (keys::CURRENT_MENU_ITEM, optional(self.current_menu_item())),
        ]);
    }

    /// Title suffixed with the parent section's label, see
    /// [`Breadcrumbs::seo_title`].
    fn seo_title(&self) -> String {
        let title = self.title().unwrap_or_default();
        self.breadcrumbs().seo_title(&title)
    }
}

fn optional(value: Option<String>) -> Value {
    value.map_or(Value::Null, Value::String)
}
