//! Render context handed to templates and visibility rules

mod scope;

pub use scope::RenderScope;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::viewer::Viewer;

/// A single context binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The binding's name
    pub name: String,

    /// The bound value
    pub value: Value,
}

/// Layered key/value context passed through rendering.
///
/// The page's keys sit in the outermost frame. Each menu and node render
/// enters a [`RenderScope`] for its own keys (`menu_id`, `current_depth`,
/// extra context), which shadow the page's while the template runs and are
/// gone once the render returns.
///
/// The viewer lives in its own slot because it is not a plain value.
///
/// # Example
///
/// ```
/// use navtree::Context;
/// use serde_json::json;
///
/// let mut ctx = Context::new();
/// ctx.define("title", json!("Blog"));
///
/// ctx.update([("title", json!("Archive")), ("node_id", json!("blog:archive"))]);
/// assert_eq!(ctx.get_str("title"), Some("Archive"));
///
/// ctx.pop_frame();
/// assert_eq!(ctx.get_str("title"), Some("Blog"));
/// assert!(!ctx.contains("node_id"));
/// ```
#[derive(Clone)]
pub struct Context {
    bindings: Vec<Binding>,

    /// Start of each frame in `bindings`; `frames[0]` is always 0
    frames: Vec<usize>,

    viewer: Option<Arc<dyn Viewer>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("bindings", &self.bindings)
            .field("frames", &self.frames)
            .field("viewer", &self.viewer.as_deref().map(|v| v.username()))
            .finish()
    }
}

impl Context {
    /// Create an empty context with no viewer.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            frames: vec![0],
            viewer: None,
        }
    }

    /// Create an empty context for the given viewer.
    pub fn for_viewer<V: Viewer + 'static>(viewer: V) -> Self {
        let mut ctx = Self::new();
        ctx.set_viewer(Arc::new(viewer));
        ctx
    }

    /// Set the viewer slot.
    pub fn set_viewer(&mut self, viewer: Arc<dyn Viewer>) {
        self.viewer = Some(viewer);
    }

    /// The viewer slot, if set.
    pub fn viewer(&self) -> Option<&Arc<dyn Viewer>> {
        self.viewer.as_ref()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frames
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a frame. Prefer [`Context::scope`], which leaves it on drop.
    pub fn push_frame(&mut self) {
        self.frames.push(self.bindings.len());
    }

    /// Leave the innermost frame and drop its bindings. The page frame is
    /// never left.
    pub fn pop_frame(&mut self) {
        self.unwind_to(self.depth().saturating_sub(1));
    }

    /// Leave frames until `depth` remain, keeping at least the page frame.
    fn unwind_to(&mut self, depth: usize) {
        let depth = depth.max(1);
        if depth < self.frames.len() {
            self.bindings.truncate(self.frames[depth]);
            self.frames.truncate(depth);
        }
    }

    /// Number of frames, including the outermost one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a frame and define every pair in it.
    pub fn update<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.push_frame();
        self.extend(values);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Define a binding in the current frame, shadowing earlier ones.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.push(Binding {
            name: name.into(),
            value,
        });
    }

    /// Define every pair in the current frame.
    pub fn extend<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (name, value) in values {
            self.define(name, value);
        }
    }

    /// Look up the most recent binding for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    /// Look up a string binding. Non-string values yield `None`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Look up a non-negative integer binding.
    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.get(name)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Check if a binding exists.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    /// Collapse all frames into one map, inner bindings winning.
    pub fn flatten(&self) -> IndexMap<String, Value> {
        let mut flat = IndexMap::new();
        for binding in &self.bindings {
            flat.insert(binding.name.clone(), binding.value.clone());
        }
        flat
    }

    /// Number of bindings across all frames.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut ctx = Self::new();
        ctx.extend(iter);
        ctx
    }
}
