//! Render scopes: a context frame tied to a borrow

use std::ops::{Deref, DerefMut};

use super::Context;

/// A frame entered for one render call.
///
/// Dereferences to the [`Context`] it borrows. On drop the context unwinds
/// to the frame depth it had before the scope was entered, so frames a
/// template entered and never left are discarded along with this one.
///
/// # Example
///
/// ```
/// use navtree::Context;
/// use serde_json::json;
///
/// let mut ctx = Context::new();
/// ctx.define("current_menu_item", json!("blog"));
///
/// {
///     let mut scope = ctx.scope();
///     scope.define("node_id", json!("blog:archive"));
///     scope.push_frame();
///     scope.define("is_current", json!(false));
///     assert_eq!(scope.get_str("current_menu_item"), Some("blog"));
/// }
/// assert_eq!(ctx.depth(), 1);
/// assert!(!ctx.contains("node_id"));
/// assert!(!ctx.contains("is_current"));
/// ```
pub struct RenderScope<'a> {
    ctx: &'a mut Context,
    entered_at: usize,
}

impl Context {
    /// Enter a frame that is left when the returned scope is dropped.
    pub fn scope(&mut self) -> RenderScope<'_> {
        let entered_at = self.depth();
        self.push_frame();
        RenderScope {
            ctx: self,
            entered_at,
        }
    }
}

impl RenderScope<'_> {
    /// Frame depth the context returns to on drop.
    pub fn entered_at(&self) -> usize {
        self.entered_at
    }
}

impl Drop for RenderScope<'_> {
    fn drop(&mut self) {
        self.ctx.unwind_to(self.entered_at);
    }
}

impl Deref for RenderScope<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.ctx
    }
}

impl DerefMut for RenderScope<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.ctx
    }
}
