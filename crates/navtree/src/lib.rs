//! # Navtree
//!
//! Hierarchical navigation menus and breadcrumb trails for server-rendered
//! web applications.
//!
//! Applications declare menus as weighted trees of nodes. Each node carries
//! a link target, display attributes and a visibility rule. At request time
//! the tree is filtered for the current viewer, the current item and its
//! parent are marked, and the result is rendered through a template engine.
//!
//! ## Architecture
//!
//! - **Nodes and menus**: [`Node`], [`Menu`], [`Menus`] hold the trees
//! - **Discovery**: [`InstalledApp`] hooks register menus at start-up
//! - **Rendering**: [`Navigation`] filters, marks and renders through a
//!   [`TemplateEngine`], by default [`HtmlTemplates`]
//! - **Context**: [`Context`] is the layered key/value scope templates read
//! - **Routing**: [`Reverse`] turns route names into URLs, [`Routes`] is the
//!   built-in table
//!
//! ## Quick start
//!
//! ```
//! use navtree::{Context, Menu, Navigation, Node, RenderOptions, User, Visibility};
//!
//! let mut main = Menu::new("main");
//! main.register(Node::builder("home", "Home").url("/").weight(10).build().unwrap());
//! main.register(
//!     Node::builder("admin", "Admin")
//!         .url("/admin")
//!         .visibility(Visibility::Staff)
//!         .build()
//!         .unwrap(),
//! );
//! let nav = Navigation::builder().menu(main).build().unwrap();
//!
//! let mut ctx = Context::for_viewer(User::new("ann"));
//! let html = nav
//!     .render_menu_named("main", &mut ctx, &RenderOptions::new().current("home"))
//!     .unwrap();
//! assert_eq!(
//!     html,
//!     r#"<ul class="main-menu"><li class="menu-item current"><a href="/">Home</a></li></ul>"#
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod breadcrumbs;
pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod link;
pub mod menu;
pub mod navigation;
pub mod node;
pub mod page;
pub mod render;
pub mod routes;
pub mod template;
pub mod viewer;
pub mod visibility;

// Re-export main types
pub use breadcrumbs::{Breadcrumb, Breadcrumbs};
pub use config::MenuConfig;
pub use context::{Binding, Context, RenderScope};
pub use error::{ConfigError, NavError, Result, RoutingError};
pub use html::HtmlTemplates;
pub use link::Link;
pub use menu::{Menu, Menus};
pub use navigation::{autodiscover, InstalledApp, MenuHook, Navigation, NavigationBuilder};
pub use node::{Children, ChildrenFn, Node, NodeBuilder};
pub use page::Page;
pub use render::{
    BreadcrumbsView, CrumbView, MenuView, NodeView, RenderOptions, TemplateEngine,
};
pub use routes::{Converter, Params, Reverse, RoutePattern, RouteSegment, Routes};
pub use template::Template;
pub use viewer::{AnonymousUser, User, Viewer};
pub use visibility::{PredicateFn, Visibility};

/// Navtree version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
