//! Client-side destinations and per-role landing routes.

use ezwash_core::types::Role;

/// A navigable destination in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public landing page and customer area.
    Home,
    /// Login form.
    Login,
    /// Admin dashboard.
    Admin,
    /// Rider dashboard.
    Rider,
    /// Ambassador dashboard.
    Ambassador,
    /// The customer's past orders.
    History,
}

impl Route {
    /// Returns the path this route renders at.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/auth/login",
            Self::Admin => "/admin",
            Self::Rider => "/rider",
            Self::Ambassador => "/ambassador",
            Self::History => "/history",
        }
    }

    /// Returns the landing route for an actor of the given role.
    ///
    /// Admins and super-admins share the admin dashboard; customers land
    /// on the public home page.
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin | Role::SuperAdmin => Self::Admin,
            Role::Rider => Self::Rider,
            Role::Ambassador => Self::Ambassador,
            Role::Customer => Self::Home,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
