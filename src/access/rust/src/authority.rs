/* src/access/rust/src/authority.rs */

use vben_core::{RouteNode, filter_tree, map_tree};

/// True when the route declares no authority, or shares at least one entry with `roles`.
pub fn has_authority(route: &RouteNode, roles: &[String]) -> bool {
  match &route.meta.authority {
    None => true,
    Some(authority) => roles.iter().any(|role| authority.contains(role)),
  }
}

/// Shown in menus despite failing the authority check.
fn visible_with_forbidden(route: &RouteNode) -> bool {
  route.meta.authority.is_some() && route.meta.menu_visible_with_forbidden
}

/// Filter a static route table down to what `roles` may see.
///
/// Runs in two passes. The first prunes with ancestor preservation, keeping routes
/// that pass the authority check or are marked `menu_visible_with_forbidden`. The
/// second swaps the component of every kept route that failed the check for
/// `forbidden_component`, when one is given.
pub fn generate_routes_by_frontend(
  routes: Vec<RouteNode>,
  roles: &[String],
  forbidden_component: Option<&str>,
) -> Vec<RouteNode> {
  let routes = filter_tree(routes, |route| {
    has_authority(route, roles) || visible_with_forbidden(route)
  });

  let Some(forbidden) = forbidden_component else {
    return routes;
  };
  map_tree(routes, |mut route: RouteNode, children| {
    if visible_with_forbidden(&route) && !has_authority(&route, roles) {
      route.component = Some(forbidden.to_string());
    }
    route.children = children;
    route
  })
}
