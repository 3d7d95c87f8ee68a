use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::api::User;
use crate::constants::ROUTE_NOT_FOUND;

pub type RouteParams = BTreeMap<String, String>;

/// Param carrying the requested path when nothing matched it
pub const UNMATCHED_PATH_PARAM: &str = "path";

/// Where the router is, or is about to go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub name: String,
    pub path: String,
    pub params: RouteParams,
}

impl NavigationState {
    /// Same state, pointed at another route name
    pub fn redirect(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// The path that was asked for when this state is the not-found fallback
    pub fn unmatched_path(&self) -> Option<&str> {
        self.params.get(UNMATCHED_PATH_PARAM).map(String::as_str)
    }
}

/// Guard evaluated before a navigation commits: `(user, from, to) -> to'`.
///
/// A plain function pointer, so a guard cannot hold on to I/O handles or
/// trigger navigation itself.
pub type RouteGuard = fn(Option<&User>, &NavigationState, &NavigationState) -> NavigationState;

/// Which page body a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Home,
    Profile,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub path: String,
    pub meta: RouteMeta,
    pub page: Page,
    pub guard: Option<RouteGuard>,
}

impl Route {
    pub fn new(name: &str, path: &str, title: &str, page: Page) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            meta: RouteMeta {
                title: title.to_string(),
            },
            page,
            guard: None,
        }
    }

    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = Some(guard);
        self
    }
}

#[derive(Default)]
struct RouterState {
    current: Option<NavigationState>,
    user: Option<User>,
}

/// Route table plus the committed navigation state
pub struct Router {
    routes: Vec<Route>,
    not_found: Route,
    state: RwLock<RouterState>,
}

impl Router {
    pub fn new(routes: Vec<Route>, not_found: Route) -> Self {
        Self {
            routes,
            not_found,
            state: RwLock::new(RouterState::default()),
        }
    }

    /// Look up a route by name; unknown names resolve to the not-found route
    pub fn route(&self, name: &str) -> &Route {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .unwrap_or(&self.not_found)
    }

    /// Look up a route by path; unknown paths resolve to the not-found route
    pub fn route_for_path(&self, path: &str) -> &Route {
        self.routes
            .iter()
            .chain(std::iter::once(&self.not_found))
            .find(|r| r.path == path)
            .unwrap_or(&self.not_found)
    }

    /// The user handed to guards. Called by the account lifecycle whenever
    /// the session changes.
    pub fn set_current_user(&self, user: Option<User>) {
        self.state.write().user = user;
    }

    pub fn current(&self) -> Option<NavigationState> {
        self.state.read().current.clone()
    }

    pub fn current_name(&self) -> Option<String> {
        self.state.read().current.as_ref().map(|s| s.name.clone())
    }

    /// Route for the committed state (not-found before the first navigation)
    pub fn current_route(&self) -> &Route {
        match self.current_name() {
            Some(name) => self.route(&name),
            None => self.route(ROUTE_NOT_FOUND),
        }
    }

    pub fn navigate(&self, name: &str) -> NavigationState {
        self.navigate_with(name, RouteParams::new())
    }

    /// Navigate by path. An unmatched path lands on the not-found route and
    /// is kept under [`UNMATCHED_PATH_PARAM`].
    pub fn navigate_path(&self, path: &str) -> NavigationState {
        let route = self.route_for_path(path);
        if route.name == self.not_found.name && path != self.not_found.path {
            let mut params = RouteParams::new();
            params.insert(UNMATCHED_PATH_PARAM.to_string(), path.to_string());
            return self.navigate_with(&route.name, params);
        }
        self.navigate(&route.name)
    }

    /// Evaluate guards for the destination and commit the result
    pub fn navigate_with(&self, name: &str, params: RouteParams) -> NavigationState {
        let mut state = self.state.write();
        let from = state.current.clone().unwrap_or_default();
        let target = self.route(name);
        let to = NavigationState {
            name: target.name.clone(),
            path: target.path.clone(),
            params,
        };

        let committed = self.resolve(state.user.as_ref(), &from, to);
        if committed.name != name {
            info!(requested = name, committed = %committed.name, "navigation redirected");
        } else {
            debug!(from = %from.name, to = %committed.name, "navigation");
        }
        state.current = Some(committed.clone());
        committed
    }

    /// Run guards until one accepts its own route. A redirect is checked
    /// against its new route's guard too; each route is visited at most once.
    fn resolve(
        &self,
        user: Option<&User>,
        from: &NavigationState,
        mut to: NavigationState,
    ) -> NavigationState {
        let mut visited: Vec<String> = Vec::new();
        loop {
            let route = self.route(&to.name);
            let Some(guard) = route.guard else {
                return to;
            };
            if visited.contains(&route.name) {
                return to;
            }
            visited.push(route.name.clone());

            let next = guard(user, from, &to);
            if next.name == to.name {
                return next;
            }

            let next_route = self.route(&next.name);
            to = NavigationState {
                name: next_route.name.clone(),
                path: next_route.path.clone(),
                params: next.params,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::routes::{default_routes, not_found_route};
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            user_id: "U".to_string(),
            email: "a@b.com".to_string(),
            token: "T".to_string(),
        }
    }

    fn router() -> Router {
        Router::new(default_routes(), not_found_route())
    }

    #[test]
    fn test_unguarded_route_passes_through() {
        let router = router();
        let state = router.navigate("login");
        assert_eq!(state.name, "login");
        assert_eq!(state.path, "/");
        assert_eq!(router.current_route().meta.title, "Login");
    }

    #[test]
    fn test_unknown_route_goes_to_not_found() {
        let router = router();
        assert_eq!(router.navigate("nowhere").name, "notfound");
        assert_eq!(router.navigate_path("/nowhere").name, "notfound");
        assert_eq!(router.current_route().page, Page::NotFound);
    }

    #[test]
    fn test_unknown_path_is_remembered() {
        let router = router();
        let state = router.navigate_path("/nowhere");
        assert_eq!(state.path, "/notfound");
        assert_eq!(state.unmatched_path(), Some("/nowhere"));

        // Known paths carry no such param
        assert_eq!(router.navigate_path("/").unmatched_path(), None);
        assert_eq!(router.navigate_path("/notfound").unmatched_path(), None);
    }

    #[test]
    fn test_gated_route_redirects_without_user() {
        let router = router();
        let state = router.navigate_path("/home");
        assert_eq!(state.name, "login");
        assert_eq!(state.path, "/");
    }

    #[test]
    fn test_gated_route_allowed_with_user() {
        let router = router();
        router.set_current_user(Some(user()));
        assert_eq!(router.navigate("home").name, "home");
        assert_eq!(router.navigate("profile").name, "profile");
    }

    #[test]
    fn test_redirect_chain_is_rechecked() {
        // profile -> home (require_user) -> login (require_login)
        let router = router();
        let state = router.navigate("profile");
        assert_eq!(state.name, "login");
        assert_eq!(router.current_route().page, Page::Login);
    }

    #[test]
    fn test_params_survive_redirect() {
        let router = router();
        let mut params = RouteParams::new();
        params.insert("tab".to_string(), "keys".to_string());
        let state = router.navigate_with("home", params.clone());
        assert_eq!(state.name, "login");
        assert_eq!(state.params, params);
    }

    #[test]
    fn test_guard_cycle_terminates() {
        fn to_b(_: Option<&User>, _: &NavigationState, to: &NavigationState) -> NavigationState {
            to.redirect("b")
        }
        fn to_a(_: Option<&User>, _: &NavigationState, to: &NavigationState) -> NavigationState {
            to.redirect("a")
        }
        let router = Router::new(
            vec![
                Route::new("a", "/a", "A", Page::Home).with_guard(to_b),
                Route::new("b", "/b", "B", Page::Home).with_guard(to_a),
            ],
            not_found_route(),
        );
        let state = router.navigate("a");
        assert!(state.name == "a" || state.name == "b");
    }
}
