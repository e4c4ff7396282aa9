//! The single authorization decision for protected areas.

use ezwash_core::types::Role;

use crate::{Route, SessionState};

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the protected area.
    Allow,
    /// Session is still initializing; hold rendering.
    Wait,
    /// Send the actor to this route instead.
    Redirect(Route),
}

/// Decides whether the current session may enter an area restricted to
/// the given roles.
///
/// Every protected area goes through this one function. An unsettled
/// session yields [`Access::Wait`]; an anonymous one is redirected to the
/// login form; an authenticated actor with the wrong role is sent to
/// their own landing route instead of an error page. An empty role list
/// means any authenticated actor may enter.
pub fn authorize(state: &SessionState, allowed: &[Role]) -> Access {
    match state {
        SessionState::Initializing => Access::Wait,
        SessionState::Anonymous => Access::Redirect(Route::Login),
        SessionState::Authenticated(profile) => {
            if allowed.is_empty() || allowed.contains(&profile.role) {
                Access::Allow
            } else {
                Access::Redirect(Route::for_role(profile.role))
            }
        }
    }
}
