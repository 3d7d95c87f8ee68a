use super::router::{NavigationState, Page, Route};
use crate::api::User;
use crate::constants::{ROUTE_HOME, ROUTE_LOGIN, ROUTE_NOT_FOUND, ROUTE_PROFILE};

/// Send anonymous users to `home`; pass everyone else through
pub fn require_user(
    user: Option<&User>,
    _from: &NavigationState,
    to: &NavigationState,
) -> NavigationState {
    match user {
        Some(_) => to.clone(),
        None => to.redirect(ROUTE_HOME),
    }
}

/// Send anonymous users to the login form
pub fn require_login(
    user: Option<&User>,
    _from: &NavigationState,
    to: &NavigationState,
) -> NavigationState {
    match user {
        Some(_) => to.clone(),
        None => to.redirect(ROUTE_LOGIN),
    }
}

/// Always allow the transition
pub fn allow_all(
    _user: Option<&User>,
    _from: &NavigationState,
    to: &NavigationState,
) -> NavigationState {
    to.clone()
}

pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new(ROUTE_LOGIN, "/", "Login", Page::Login).with_guard(allow_all),
        Route::new(ROUTE_HOME, "/home", "Home", Page::Home).with_guard(require_login),
        Route::new(ROUTE_PROFILE, "/profile", "Profile", Page::Profile).with_guard(require_user),
    ]
}

pub fn not_found_route() -> Route {
    Route::new(ROUTE_NOT_FOUND, "/notfound", "Page Not Found", Page::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(name: &str) -> NavigationState {
        NavigationState {
            name: name.to_string(),
            path: format!("/{}", name),
            ..NavigationState::default()
        }
    }

    #[test]
    fn test_require_user_without_user_goes_home() {
        for dest in ["profile", "login", "anything"] {
            let to = state(dest);
            let result = require_user(None, &state("login"), &to);
            assert_eq!(result.name, "home");
        }
    }

    #[test]
    fn test_require_user_with_user_passes_through() {
        let user = User {
            user_id: "U".to_string(),
            email: "a@b.com".to_string(),
            token: "T".to_string(),
        };
        let to = state("profile");
        assert_eq!(require_user(Some(&user), &state("home"), &to), to);
    }

    #[test]
    fn test_require_login_without_user() {
        let result = require_login(None, &NavigationState::default(), &state("home"));
        assert_eq!(result.name, "login");
    }
}
