//! Who may see a node

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::viewer::Viewer;

/// Custom visibility test over the viewer and the render context.
pub type PredicateFn = Arc<dyn Fn(&dyn Viewer, &Context) -> bool + Send + Sync>;

/// Visibility rule attached to a node.
#[derive(Clone, Default)]
pub enum Visibility {
    /// Everyone
    #[default]
    Anyone,

    /// Viewers that are not logged in
    Anonymous,

    /// Viewers that are logged in
    Authenticated,

    /// Logged-in staff members and superusers
    Staff,

    /// Viewers holding the permission
    Permission(String),

    /// Viewers holding every listed permission
    AllPermissions(Vec<String>),

    /// Viewers holding at least one listed permission
    AnyPermission(Vec<String>),

    /// Viewers passing the predicate
    Custom(PredicateFn),
}

impl Visibility {
    /// Single-permission rule.
    pub fn permission(perm: impl Into<String>) -> Self {
        Visibility::Permission(perm.into())
    }

    /// All-of rule.
    pub fn all_permissions<I, S>(perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Visibility::AllPermissions(perms.into_iter().map(Into::into).collect())
    }

    /// Any-of rule.
    pub fn any_permission<I, S>(perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Visibility::AnyPermission(perms.into_iter().map(Into::into).collect())
    }

    /// Predicate rule.
    pub fn custom<F>(test: F) -> Self
    where
        F: Fn(&dyn Viewer, &Context) -> bool + Send + Sync + 'static,
    {
        Visibility::Custom(Arc::new(test))
    }

    /// Decide whether `viewer` may see the node.
    pub fn allows(&self, viewer: &dyn Viewer, context: &Context) -> bool {
        match self {
            Visibility::Anyone => true,
            Visibility::Anonymous => !viewer.is_authenticated(),
            Visibility::Authenticated => viewer.is_authenticated(),
            Visibility::Staff => {
                viewer.is_authenticated() && (viewer.is_staff() || viewer.is_superuser())
            }
            Visibility::Permission(perm) => viewer.has_perm(perm),
            Visibility::AllPermissions(perms) => perms.iter().all(|p| viewer.has_perm(p)),
            Visibility::AnyPermission(perms) => perms.iter().any(|p| viewer.has_perm(p)),
            Visibility::Custom(test) => test(viewer, context),
        }
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Anyone => write!(f, "Anyone"),
            Visibility::Anonymous => write!(f, "Anonymous"),
            Visibility::Authenticated => write!(f, "Authenticated"),
            Visibility::Staff => write!(f, "Staff"),
            Visibility::Permission(p) => write!(f, "Permission({})", p),
            Visibility::AllPermissions(ps) => write!(f, "AllPermissions({:?})", ps),
            Visibility::AnyPermission(ps) => write!(f, "AnyPermission({:?})", ps),
            Visibility::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
