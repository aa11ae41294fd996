/* src/access/rust/src/backend.rs */

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::error;
use vben_core::{RouteNode, map_tree};

/// Component key → component id the view layer understands.
pub type ComponentMap = BTreeMap<String, String>;

/// Page rendered for backend routes whose component cannot be resolved.
pub const NOT_FOUND_PAGE: &str = "/_core/fallback/not-found.vue";

fn relative_prefix_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^(\./|\.\./)+").unwrap())
}

/// Strip `./` and `../` prefixes, force a leading `/` and drop a leading `/views`.
pub fn normalize_view_path(path: &str) -> String {
  let stripped = relative_prefix_re().replace(path, "");
  let view_path =
    if stripped.starts_with('/') { stripped.into_owned() } else { format!("/{stripped}") };
  match view_path.strip_prefix("/views") {
    Some(rest) => rest.to_string(),
    None => view_path,
  }
}

/// Resolve the raw component strings of backend routes.
///
/// Layout keys map through `layout_map`. Anything else is treated as a view path,
/// normalized, suffixed with `.vue` and looked up in `page_map`, whose keys are
/// normalized the same way. Misses fall back to [`NOT_FOUND_PAGE`].
pub fn convert_routes(
  routes: Vec<RouteNode>,
  layout_map: &ComponentMap,
  page_map: &ComponentMap,
) -> Vec<RouteNode> {
  let pages: ComponentMap =
    page_map.iter().map(|(key, value)| (normalize_view_path(key), value.clone())).collect();

  map_tree(routes, |mut route: RouteNode, children| {
    if route.name.is_empty() {
      error!(path = %route.path, "route name is required");
    }
    if let Some(component) = route.component.take() {
      route.component = Some(resolve_component(&route, component, layout_map, &pages));
    }
    route.children = children;
    route
  })
}

fn resolve_component(
  route: &RouteNode,
  component: String,
  layout_map: &ComponentMap,
  pages: &ComponentMap,
) -> String {
  if let Some(layout) = layout_map.get(&component) {
    return layout.clone();
  }
  let normalized = normalize_view_path(&component);
  let page_key =
    if normalized.ends_with(".vue") { normalized } else { format!("{normalized}.vue") };
  if let Some(page) = pages.get(&page_key) {
    return page.clone();
  }
  error!(route = %route.name, component = %page_key, "route component is invalid");
  pages.get(NOT_FOUND_PAGE).cloned().unwrap_or(component)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn maps() -> (ComponentMap, ComponentMap) {
    let layouts = ComponentMap::from([("BasicLayout".to_string(), "layout:basic".to_string())]);
    let pages = ComponentMap::from([
      ("../views/dashboard/analytics/index.vue".to_string(), "page:analytics".to_string()),
      ("./views/system/menu/list.vue".to_string(), "page:menu-list".to_string()),
      ("/views/_core/fallback/not-found.vue".to_string(), "page:not-found".to_string()),
    ]);
    (layouts, pages)
  }

  #[test]
  fn normalize_strips_relative_prefix_and_views() {
    assert_eq!(normalize_view_path("../views/dashboard/index.vue"), "/dashboard/index.vue");
    assert_eq!(normalize_view_path("./../views/a.vue"), "/a.vue");
    assert_eq!(normalize_view_path("system/menu/list"), "/system/menu/list");
    assert_eq!(normalize_view_path("/views/system/role"), "/system/role");
    assert_eq!(normalize_view_path("/dashboard/views/x"), "/dashboard/views/x");
  }

  #[test]
  fn layouts_and_pages_resolve() {
    let (layouts, pages) = maps();
    let routes = vec![RouteNode::new("Dashboard", "/dashboard")
      .with_component("BasicLayout")
      .with_children(vec![
        RouteNode::new("Analytics", "/analytics").with_component("/dashboard/analytics/index"),
        RouteNode::new("SystemMenu", "/system/menu").with_component("/system/menu/list.vue"),
      ])];
    let converted = convert_routes(routes, &layouts, &pages);
    assert_eq!(converted[0].component.as_deref(), Some("layout:basic"));
    assert_eq!(converted[0].children[0].component.as_deref(), Some("page:analytics"));
    assert_eq!(converted[0].children[1].component.as_deref(), Some("page:menu-list"));
  }

  #[test]
  fn unknown_page_falls_back_to_not_found() {
    let (layouts, pages) = maps();
    let routes = vec![RouteNode::new("Ghost", "/ghost").with_component("/ghost/index")];
    let converted = convert_routes(routes, &layouts, &pages);
    assert_eq!(converted[0].component.as_deref(), Some("page:not-found"));
  }

  #[test]
  fn unknown_page_without_fallback_keeps_raw_id() {
    let routes = vec![RouteNode::new("Ghost", "/ghost").with_component("/ghost/index")];
    let converted = convert_routes(routes, &ComponentMap::new(), &ComponentMap::new());
    assert_eq!(converted[0].component.as_deref(), Some("/ghost/index"));
  }

  #[test]
  fn routes_without_component_stay_bare() {
    let (layouts, pages) = maps();
    let converted = convert_routes(vec![RouteNode::new("", "/catalog")], &layouts, &pages);
    assert_eq!(converted[0].component, None);
    assert_eq!(converted[0].path, "/catalog");
  }
}
