/* src/access/rust/src/reset.rs */

use std::collections::HashSet;

use tracing::{debug, warn};
use vben_core::{RouteNode, Router, traverse_tree_values};

/// Remove every registered route that is not part of `static_routes`.
///
/// Static routes without a name cannot be told apart from dynamic ones and are
/// reported, since a later reset could not remove them either.
pub fn reset_static_routes<R: Router + ?Sized>(router: &mut R, static_routes: &[RouteNode]) {
  let keep: HashSet<String> = traverse_tree_values(static_routes, |route| {
    if route.name.is_empty() {
      warn!(path = %route.path, "static route needs a name to survive a reset");
    }
    route.name.clone()
  })
  .into_iter()
  .filter(|name| !name.is_empty())
  .collect();

  let mut removed = 0usize;
  for record in router.get_routes() {
    if !record.name.is_empty() && !keep.contains(&record.name) && router.has_route(&record.name) {
      router.remove_route(&record.name);
      removed += 1;
    }
  }
  debug!(removed, "dynamic routes reset");
}

#[cfg(test)]
mod tests {
  use vben_core::MemoryRouter;

  use super::*;

  fn static_routes() -> Vec<RouteNode> {
    vec![
      RouteNode::new("Root", "/").with_children(vec![RouteNode::new("Login", "/auth/login")]),
      RouteNode::new("", "/unnamed"),
    ]
  }

  #[test]
  fn dynamic_routes_are_removed() {
    let mut registered = static_routes();
    registered.push(RouteNode::new("Dashboard", "/dashboard").with_children(vec![
      RouteNode::new("Analytics", "analytics"),
      RouteNode::new("Workspace", "workspace"),
    ]));
    registered.push(RouteNode::new("System", "/system"));
    let mut router = MemoryRouter::new(&registered);

    reset_static_routes(&mut router, &static_routes());

    let names: Vec<String> = router.get_routes().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["Root", "Login", ""]);
    assert!(!router.has_route("Analytics"));
  }

  #[test]
  fn reset_without_dynamic_routes_is_noop() {
    let mut router = MemoryRouter::new(&static_routes());
    reset_static_routes(&mut router, &static_routes());
    assert_eq!(router.get_routes().len(), 3);
  }
}
