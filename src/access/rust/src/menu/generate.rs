/* src/access/rust/src/menu/generate.rs */

use std::collections::HashMap;

use tracing::error;
use vben_core::{Retain, RouteNode, Router, map_tree, prune_tree, sort_tree_by_key};

use super::types::MenuRecord;

/// Build the displayable menu for `routes`.
///
/// Paths come from the router's registered (final) path when the route name is
/// known to it. Menu-hidden entries are removed and their surviving children take
/// their place. Every level is sorted by `order`, missing order counting as 0.
pub fn generate_menus<R: Router + ?Sized>(routes: &[RouteNode], router: &R) -> Vec<MenuRecord> {
  let final_paths: HashMap<String, String> =
    router.get_routes().into_iter().map(|record| (record.name, record.path)).collect();

  let menus = map_tree(routes.to_vec(), |route: RouteNode, children| {
    to_menu(route, children, &final_paths)
  });
  let mut menus = prune_tree(menus, |menu| if menu.show { Retain::Keep } else { Retain::Hoist });
  sort_tree_by_key(&mut menus, |menu| menu.order.unwrap_or(0));
  assign_parents(&mut menus, &[]);
  menus
}

fn to_menu(
  route: RouteNode,
  children: Vec<MenuRecord>,
  final_paths: &HashMap<String, String>,
) -> MenuRecord {
  if route.name.is_empty() {
    error!(path = %route.path, "route name is required");
  }
  let path = final_paths.get(&route.name).cloned().unwrap_or(route.path);
  let meta = route.meta;

  let name = [meta.title.as_str(), route.name.as_str(), path.as_str()]
    .into_iter()
    .find(|candidate| !candidate.is_empty())
    .unwrap_or_default()
    .to_string();

  let hide_children = meta.hide_children_in_menu;
  let target = match (meta.link, route.redirect) {
    (Some(link), _) if !link.is_empty() => link,
    (_, Some(redirect)) if hide_children && !redirect.is_empty() => redirect,
    _ => path.clone(),
  };

  MenuRecord {
    name,
    path: target,
    route_path: path,
    icon: meta.icon,
    active_icon: meta.active_icon,
    badge: meta.badge,
    badge_type: meta.badge_type,
    badge_variants: meta.badge_variants,
    order: meta.order,
    parent: None,
    parents: Vec::new(),
    show: !meta.hide_in_menu,
    children: if hide_children { Vec::new() } else { children },
  }
}

fn assign_parents(menus: &mut [MenuRecord], ancestors: &[String]) {
  for menu in menus {
    menu.parent = ancestors.last().cloned();
    menu.parents = ancestors.to_vec();
    let mut lineage = ancestors.to_vec();
    lineage.push(menu.route_path.clone());
    assign_parents(&mut menu.children, &lineage);
  }
}

#[cfg(test)]
mod tests {
  use vben_core::{MemoryRouter, RouteMeta, traverse_tree_values};

  use super::*;

  fn meta(title: &str) -> RouteMeta {
    RouteMeta::titled(title)
  }

  fn dashboard() -> RouteNode {
    RouteNode::new("Dashboard", "/dashboard")
      .with_meta(RouteMeta { order: Some(-1), ..meta("page.dashboard.title") })
      .with_children(vec![
        RouteNode::new("Analytics", "analytics").with_meta(meta("page.dashboard.analytics")),
        RouteNode::new("Workspace", "workspace").with_meta(meta("page.dashboard.workspace")),
      ])
  }

  fn names(menus: &[MenuRecord]) -> Vec<&str> {
    menus.iter().map(|m| m.name.as_str()).collect()
  }

  #[test]
  fn paths_come_from_router_registration() {
    let routes = vec![dashboard()];
    let router = MemoryRouter::new(&routes);
    let menus = generate_menus(&routes, &router);
    assert_eq!(menus[0].path, "/dashboard");
    let child_paths: Vec<&str> = menus[0].children.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(child_paths, ["/dashboard/analytics", "/dashboard/workspace"]);
  }

  #[test]
  fn unregistered_routes_keep_declared_path() {
    let routes = vec![dashboard()];
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&routes, &router);
    assert_eq!(menus[0].children[0].path, "analytics");
  }

  #[test]
  fn name_falls_back_to_route_name_then_path() {
    let routes = vec![RouteNode::new("About", "/about"), RouteNode::new("", "/nameless")];
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&routes, &router);
    assert_eq!(names(&menus), ["About", "/nameless"]);
  }

  #[test]
  fn hidden_children_collapse_to_redirect() {
    let mut detail = RouteNode::new("Docs", "/docs").with_children(vec![
      RouteNode::new("DocsIndex", "/docs/index"),
      RouteNode::new("DocsApi", "/docs/api"),
    ]);
    detail.redirect = Some("/docs/index".to_string());
    detail.meta.hide_children_in_menu = true;
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&[detail], &router);
    assert_eq!(menus[0].path, "/docs/index");
    assert!(menus[0].children.is_empty());
  }

  #[test]
  fn link_wins_over_path_and_redirect() {
    let mut external = RouteNode::new("VbenDocument", "/vben-admin/document");
    external.meta.link = Some("https://doc.vben.pro".to_string());
    external.redirect = Some("/ignored".to_string());
    external.meta.hide_children_in_menu = true;
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&[external], &router);
    assert_eq!(menus[0].path, "https://doc.vben.pro");
  }

  #[test]
  fn hidden_menu_children_are_reparented() {
    let mut hidden = RouteNode::new("Hidden", "/hidden")
      .with_children(vec![RouteNode::new("Visible", "/hidden/visible")]);
    hidden.meta.hide_in_menu = true;
    let root = RouteNode::new("Root", "/root")
      .with_children(vec![RouteNode::new("First", "/root/first"), hidden]);
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&[root], &router);
    assert_eq!(names(&menus[0].children), ["First", "Visible"]);
    assert_eq!(menus[0].children[1].parent.as_deref(), Some("/root"));
  }

  #[test]
  fn every_level_sorted_by_order_stably() {
    let ordered = |name: &str, order: Option<i64>| {
      RouteNode::new(name, format!("/{name}")).with_meta(RouteMeta { order, ..meta(name) })
    };
    let routes = vec![
      ordered("c", Some(2)),
      ordered("a", None),
      ordered("b", Some(-1)).with_children(vec![
        ordered("b2", Some(9)),
        ordered("b1", Some(1)),
        ordered("b0", None),
      ]),
      ordered("d", Some(0)),
    ];
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&routes, &router);
    assert_eq!(names(&menus), ["b", "a", "d", "c"]);
    assert_eq!(names(&menus[0].children), ["b0", "b1", "b2"]);
  }

  #[test]
  fn parents_list_ancestor_paths() {
    let routes = vec![RouteNode::new("System", "/system").with_children(vec![
      RouteNode::new("Users", "/system/users")
        .with_children(vec![RouteNode::new("UserDetail", "/system/users/detail")]),
    ])];
    let router = MemoryRouter::new(&routes);
    let menus = generate_menus(&routes, &router);
    let lineage = traverse_tree_values(&menus, |m| (m.parent.clone(), m.parents.clone()));
    assert_eq!(lineage[0], (None, vec![]));
    assert_eq!(lineage[1], (Some("/system".to_string()), vec!["/system".to_string()]));
    assert_eq!(
      lineage[2],
      (
        Some("/system/users".to_string()),
        vec!["/system".to_string(), "/system/users".to_string()]
      )
    );
  }

  #[test]
  fn parents_use_route_path_not_click_target() {
    let mut docs = RouteNode::new("Docs", "/docs")
      .with_children(vec![RouteNode::new("DocsApi", "/docs/api")]);
    docs.meta.link = Some("https://doc.vben.pro".to_string());
    let mut guide = RouteNode::new("Guide", "/guide")
      .with_children(vec![RouteNode::new("GuideIntro", "/guide/intro")]);
    guide.redirect = Some("/guide/intro".to_string());
    let router = MemoryRouter::new(&[]);
    let menus = generate_menus(&[docs, guide], &router);

    assert_eq!(menus[0].path, "https://doc.vben.pro");
    assert_eq!(menus[0].route_path, "/docs");
    assert_eq!(menus[0].children[0].parent.as_deref(), Some("/docs"));
    assert_eq!(menus[0].children[0].parents, ["/docs"]);
    assert_eq!(menus[1].children[0].parent.as_deref(), Some("/guide"));
  }

  #[test]
  fn menu_fields_copied_from_meta() {
    let route = RouteNode::new("Analytics", "/analytics").with_meta(RouteMeta {
      icon: Some("lucide:area-chart".into()),
      badge: Some("new".into()),
      badge_type: Some("normal".into()),
      ..meta("page.dashboard.analytics")
    });
    let router = MemoryRouter::new(&[]);
    let menu = &generate_menus(&[route], &router)[0];
    assert_eq!(menu.name, "page.dashboard.analytics");
    assert_eq!(menu.icon.as_deref(), Some("lucide:area-chart"));
    assert_eq!(menu.badge.as_deref(), Some("new"));
    assert!(menu.show);
  }
}
