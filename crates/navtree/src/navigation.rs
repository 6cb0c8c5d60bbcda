//! The application-level navigation object and start-up discovery

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::MenuConfig;
use crate::error::{NavError, Result};
use crate::html::HtmlTemplates;
use crate::menu::{Menu, Menus};
use crate::render::TemplateEngine;
use crate::routes::{Reverse, Routes};

/// Start-up hook through which an application registers its menus.
pub type MenuHook = Arc<dyn Fn(&mut Menus) -> anyhow::Result<()> + Send + Sync>;

/// An installed application, optionally contributing menus.
#[derive(Clone)]
pub struct InstalledApp {
    name: String,
    menus: Option<MenuHook>,
}

impl InstalledApp {
    /// An application with no menu contributions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            menus: None,
        }
    }

    /// Attach the hook that registers this application's menus.
    pub fn with_menus<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Menus) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.menus = Some(Arc::new(hook));
        self
    }

    /// Application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the application contributes menus.
    pub fn has_menus(&self) -> bool {
        self.menus.is_some()
    }
}

impl fmt::Debug for InstalledApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstalledApp")
            .field("name", &self.name)
            .field("has_menus", &self.has_menus())
            .finish()
    }
}

/// Run every application's menu hook in order.
///
/// Applications without a hook are skipped. The first failing hook aborts
/// discovery.
///
/// # Errors
///
/// [`NavError::Discovery`] naming the application whose hook failed.
pub fn autodiscover<'a, I>(menus: &mut Menus, apps: I) -> Result<()>
where
    I: IntoIterator<Item = &'a InstalledApp>,
{
    for app in apps {
        let Some(hook) = &app.menus else {
            debug!(app = %app.name, "no menu definitions");
            continue;
        };
        hook(&mut *menus).map_err(|source| NavError::Discovery {
            app: app.name.clone(),
            source,
        })?;
        debug!(app = %app.name, "loaded menu definitions");
    }
    info!(menus = menus.len(), "menu discovery complete");
    Ok(())
}

/// Menus, routing, templates and configuration for one application.
///
/// Built once at start-up and read-only afterwards; share it behind an
/// [`Arc`] between request handlers.
///
/// # Example
///
/// ```
/// use navtree::{Context, InstalledApp, Menu, Navigation, Node, RenderOptions, User};
///
/// let nav = Navigation::builder()
///     .app(InstalledApp::new("auth"))
///     .app(InstalledApp::new("site").with_menus(|menus| {
///         let mut main = Menu::new("main");
///         main.register(Node::builder("home", "Home").url("/").build()?);
///         menus.register(main);
///         Ok(())
///     }))
///     .build()
///     .unwrap();
///
/// let html = nav
///     .render_menu_named("main", &mut Context::new(), &RenderOptions::new().viewer(User::new("ann")))
///     .unwrap();
/// assert_eq!(html, r#"<ul class="main-menu"><li class="menu-item"><a href="/">Home</a></li></ul>"#);
/// ```
pub struct Navigation {
    menus: Menus,
    routes: Arc<dyn Reverse>,
    templates: Arc<dyn TemplateEngine>,
    config: MenuConfig,
}

impl Navigation {
    /// Start building.
    pub fn builder() -> NavigationBuilder {
        NavigationBuilder::default()
    }

    /// All menus.
    pub fn menus(&self) -> &Menus {
        &self.menus
    }

    /// Look up a menu.
    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    /// Route resolver.
    pub fn routes(&self) -> &dyn Reverse {
        self.routes.as_ref()
    }

    /// Template engine.
    pub fn templates(&self) -> &dyn TemplateEngine {
        self.templates.as_ref()
    }

    /// Menu configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("menus", &self.menus)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Navigation`].
#[derive(Default)]
#[must_use]
pub struct NavigationBuilder {
    menus: Menus,
    apps: Vec<InstalledApp>,
    routes: Option<Arc<dyn Reverse>>,
    templates: Option<Arc<dyn TemplateEngine>>,
    config: MenuConfig,
}

impl NavigationBuilder {
    /// Register a menu directly.
    pub fn menu(mut self, menu: Menu) -> Self {
        self.menus.register(menu);
        self
    }

    /// Add an installed application. Hooks run in order during `build`.
    pub fn app(mut self, app: InstalledApp) -> Self {
        self.apps.push(app);
        self
    }

    /// Add several installed applications.
    pub fn apps<I: IntoIterator<Item = InstalledApp>>(mut self, apps: I) -> Self {
        self.apps.extend(apps);
        self
    }

    /// Route resolver, default an empty [`Routes`] table.
    pub fn routes<R: Reverse + 'static>(mut self, routes: R) -> Self {
        self.routes = Some(Arc::new(routes));
        self
    }

    /// Template engine, default [`HtmlTemplates`].
    pub fn templates<T: TemplateEngine + 'static>(mut self, templates: T) -> Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    /// Menu configuration.
    pub fn config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    /// Run discovery and freeze.
    ///
    /// # Errors
    ///
    /// [`NavError::Discovery`] if an application's hook fails.
    pub fn build(mut self) -> Result<Navigation> {
        autodiscover(&mut self.menus, &self.apps)?;
        let routes: Arc<dyn Reverse> = match self.routes {
            Some(routes) => routes,
            None => Arc::new(Routes::new()),
        };
        let templates: Arc<dyn TemplateEngine> = match self.templates {
            Some(templates) => templates,
            None => Arc::new(HtmlTemplates::new()),
        };
        Ok(Navigation {
            menus: self.menus,
            routes,
            templates,
            config: self.config,
        })
    }
}
