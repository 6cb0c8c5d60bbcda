//! The viewer a menu is rendered for

use std::fmt;

use indexmap::IndexSet;

/// The current user, as seen by visibility rules.
///
/// Host applications implement this for their own user type. [`User`] and
/// [`AnonymousUser`] cover the common cases and the test suite.
pub trait Viewer: Send + Sync {
    /// Whether the viewer is logged in.
    fn is_authenticated(&self) -> bool;

    /// Whether the viewer is a staff member.
    fn is_staff(&self) -> bool {
        false
    }

    /// Whether the viewer is a superuser.
    fn is_superuser(&self) -> bool {
        false
    }

    /// Whether the viewer holds the named permission.
    fn has_perm(&self, perm: &str) -> bool;

    /// Display name, empty for anonymous viewers.
    fn username(&self) -> &str {
        ""
    }
}

impl fmt::Debug for dyn Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("username", &self.username())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// A viewer that is not logged in. Holds no permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousUser;

impl Viewer for AnonymousUser {
    fn is_authenticated(&self) -> bool {
        false
    }

    fn has_perm(&self, _perm: &str) -> bool {
        false
    }
}

/// A logged-in viewer with flags and a permission set.
///
/// Active superusers hold every permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Login name
    pub username: String,

    /// Inactive users hold no permissions
    pub is_active: bool,

    /// Staff flag
    pub is_staff: bool,

    /// Superuser flag
    pub is_superuser: bool,

    permissions: IndexSet<String>,
}

impl User {
    /// Create an active user with no flags and no permissions.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            permissions: IndexSet::new(),
        }
    }

    /// Mark the user as staff.
    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    /// Mark the user as superuser.
    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Grant a permission (builder form).
    pub fn with_perm(mut self, perm: impl Into<String>) -> Self {
        self.grant(perm);
        self
    }

    /// Grant a permission.
    pub fn grant(&mut self, perm: impl Into<String>) {
        self.permissions.insert(perm.into());
    }

    /// Revoke a permission. Returns whether it was held.
    pub fn revoke(&mut self, perm: &str) -> bool {
        self.permissions.shift_remove(perm)
    }

    /// Permissions granted explicitly, in grant order.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }
}

impl Viewer for User {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn is_staff(&self) -> bool {
        self.is_staff
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    fn has_perm(&self, perm: &str) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_superuser || self.permissions.contains(perm)
    }

    fn username(&self) -> &str {
        &self.username
    }
}
