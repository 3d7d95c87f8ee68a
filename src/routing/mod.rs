// Gateway module for client-side routing - follows the Train Station Pattern

mod router;
mod routes;

pub use router::{
    NavigationState, Page, Route, RouteGuard, RouteMeta, RouteParams, Router, UNMATCHED_PATH_PARAM,
};
pub use routes::{allow_all, default_routes, not_found_route, require_login, require_user};
