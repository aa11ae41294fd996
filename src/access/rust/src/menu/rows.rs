/* src/access/rust/src/menu/rows.rs */

use std::collections::{BTreeSet, HashMap};

use tracing::warn;
use vben_core::{RouteMeta, RouteNode};

use super::types::{MenuRow, MenuType};

/// Rebuild the route tree from flat backend rows.
///
/// Rows attach to their `parent_id` when it resolves, otherwise they become roots.
/// Every level is sorted by `(sort_order, id)`. A catalog without a component
/// redirects to the path of its first `menu` child in that final order, unless the
/// row already carries a redirect. Duplicate ids keep the first row; rows caught
/// in a parent cycle are unreachable and dropped with a warning.
pub fn build_menu_tree(rows: Vec<MenuRow>) -> Vec<RouteNode> {
  let mut index = HashMap::with_capacity(rows.len());
  let mut kept: Vec<MenuRow> = Vec::with_capacity(rows.len());
  for row in rows {
    if index.contains_key(&row.id) {
      warn!(id = row.id, "duplicate menu row ignored");
      continue;
    }
    index.insert(row.id, kept.len());
    kept.push(row);
  }

  let mut roots = Vec::new();
  let mut children: Vec<Vec<usize>> = vec![Vec::new(); kept.len()];
  for (i, row) in kept.iter().enumerate() {
    // A row naming itself as parent is treated like a root.
    match row.parent_id.filter(|&pid| pid != row.id).and_then(|pid| index.get(&pid)) {
      Some(&parent) => children[parent].push(i),
      None => roots.push(i),
    }
  }

  let sort_key = |&i: &usize| (kept[i].sort_order, kept[i].id);
  roots.sort_by_key(sort_key);
  for list in &mut children {
    list.sort_by_key(sort_key);
  }

  let redirects: Vec<Option<String>> = kept
    .iter()
    .enumerate()
    .map(|(i, row)| derived_redirect(row, &children[i], &kept))
    .collect();

  let mut slots: Vec<Option<(MenuRow, Option<String>)>> =
    kept.into_iter().zip(redirects).map(Some).collect();
  let tree: Vec<RouteNode> =
    roots.iter().filter_map(|&i| assemble(i, &mut slots, &children)).collect();

  let orphaned: Vec<i64> = slots.iter().flatten().map(|(row, _)| row.id).collect();
  if !orphaned.is_empty() {
    warn!(ids = ?orphaned, "menu rows form a parent cycle and were dropped");
  }
  tree
}

fn derived_redirect(row: &MenuRow, children: &[usize], rows: &[MenuRow]) -> Option<String> {
  if let Some(redirect) = row.redirect.as_ref().filter(|r| !r.is_empty()) {
    return Some(redirect.clone());
  }
  let has_component = row.component.as_ref().is_some_and(|c| !c.is_empty());
  if row.kind != MenuType::Catalog || has_component {
    return None;
  }
  children
    .iter()
    .map(|&c| &rows[c])
    .find(|child| child.kind == MenuType::Menu)
    .map(|child| child.path.clone())
}

fn assemble(
  i: usize,
  slots: &mut [Option<(MenuRow, Option<String>)>],
  children: &[Vec<usize>],
) -> Option<RouteNode> {
  let (row, redirect) = slots[i].take()?;
  let nested = children[i].iter().filter_map(|&c| assemble(c, slots, children)).collect();
  Some(into_route(row, redirect, nested))
}

fn into_route(row: MenuRow, redirect: Option<String>, children: Vec<RouteNode>) -> RouteNode {
  let mut meta = match serde_json::from_value::<RouteMeta>(serde_json::Value::Object(row.meta)) {
    Ok(meta) => meta,
    Err(err) => {
      warn!(id = row.id, error = %err, "undecodable menu meta, using defaults");
      RouteMeta::default()
    }
  };
  meta.order = Some(row.sort_order);
  RouteNode {
    name: row.name,
    path: row.path,
    component: row.component.filter(|c| !c.is_empty()),
    redirect,
    meta,
    children,
  }
}

/// Sorted, de-duplicated permission codes of every enabled row.
pub fn collect_auth_codes(rows: &[MenuRow]) -> Vec<String> {
  rows
    .iter()
    .filter(|row| row.is_enabled())
    .filter_map(|row| row.auth_code.as_deref())
    .filter(|code| !code.is_empty())
    .map(str::to_string)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
  use vben_core::traverse_tree_values;

  use super::*;
  use crate::menu::types::MenuStatus;

  fn row(id: i64, parent_id: Option<i64>, kind: MenuType, sort_order: i64) -> MenuRow {
    MenuRow {
      name: format!("Menu{id}"),
      path: format!("/m{id}"),
      sort_order,
      ..MenuRow::new(id, parent_id, kind)
    }
  }

  fn names(nodes: &[RouteNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
  }

  #[test]
  fn children_sorted_by_sort_order() {
    let tree = build_menu_tree(vec![
      row(1, None, MenuType::Catalog, 5),
      row(2, Some(1), MenuType::Menu, 1),
      row(3, Some(1), MenuType::Menu, 0),
    ]);
    assert_eq!(names(&tree), ["Menu1"]);
    assert_eq!(names(&tree[0].children), ["Menu3", "Menu2"]);
  }

  #[test]
  fn sort_order_ties_broken_by_id() {
    let tree = build_menu_tree(vec![
      row(9, None, MenuType::Menu, 0),
      row(4, None, MenuType::Menu, 0),
      row(6, None, MenuType::Menu, -1),
    ]);
    assert_eq!(names(&tree), ["Menu6", "Menu4", "Menu9"]);
  }

  #[test]
  fn unresolvable_parent_becomes_root() {
    let tree = build_menu_tree(vec![
      row(1, None, MenuType::Catalog, 0),
      row(2, Some(99), MenuType::Menu, 1),
      row(3, Some(1), MenuType::Menu, 0),
    ]);
    assert_eq!(names(&tree), ["Menu1", "Menu2"]);
    assert_eq!(names(&tree[0].children), ["Menu3"]);
  }

  #[test]
  fn child_listed_before_parent_still_attaches() {
    let tree =
      build_menu_tree(vec![row(2, Some(1), MenuType::Menu, 0), row(1, None, MenuType::Catalog, 0)]);
    assert_eq!(names(&tree), ["Menu1"]);
    assert_eq!(names(&tree[0].children), ["Menu2"]);
  }

  #[test]
  fn every_row_appears_exactly_once() {
    let rows = vec![
      row(1, None, MenuType::Catalog, 2),
      row(2, Some(1), MenuType::Catalog, 0),
      row(3, Some(2), MenuType::Menu, 0),
      row(4, Some(2), MenuType::Button, 1),
      row(5, None, MenuType::Link, 1),
      row(6, Some(6), MenuType::Menu, 0),
    ];
    let tree = build_menu_tree(rows);
    let mut all = traverse_tree_values(&tree, |n| n.name.clone());
    all.sort();
    assert_eq!(all, ["Menu1", "Menu2", "Menu3", "Menu4", "Menu5", "Menu6"]);
    assert_eq!(names(&tree), ["Menu6", "Menu5", "Menu1"]);
  }

  #[test]
  fn duplicate_ids_keep_first_row() {
    let mut dup = row(1, None, MenuType::Menu, 0);
    dup.name = "Shadow".to_string();
    let tree = build_menu_tree(vec![row(1, None, MenuType::Menu, 0), dup]);
    assert_eq!(names(&tree), ["Menu1"]);
  }

  #[test]
  fn cyclic_rows_are_dropped() {
    let tree = build_menu_tree(vec![
      row(1, Some(2), MenuType::Menu, 0),
      row(2, Some(1), MenuType::Menu, 0),
      row(3, None, MenuType::Menu, 0),
    ]);
    assert_eq!(names(&tree), ["Menu3"]);
  }

  #[test]
  fn catalog_redirects_to_first_menu_child_in_sorted_order() {
    let tree = build_menu_tree(vec![
      row(1, None, MenuType::Catalog, 0),
      row(2, Some(1), MenuType::Menu, 5),
      row(3, Some(1), MenuType::Button, 0),
      row(4, Some(1), MenuType::Menu, 1),
    ]);
    assert_eq!(tree[0].redirect.as_deref(), Some("/m4"));
  }

  #[test]
  fn explicit_redirect_and_component_suppress_derivation() {
    let mut explicit = row(1, None, MenuType::Catalog, 0);
    explicit.redirect = Some("/elsewhere".to_string());
    let mut with_component = row(2, None, MenuType::Catalog, 1);
    with_component.component = Some("BasicLayout".to_string());
    let tree = build_menu_tree(vec![
      explicit,
      with_component,
      row(3, Some(1), MenuType::Menu, 0),
      row(4, Some(2), MenuType::Menu, 0),
    ]);
    assert_eq!(tree[0].redirect.as_deref(), Some("/elsewhere"));
    assert_eq!(tree[1].redirect, None);
  }

  #[test]
  fn meta_bag_decoded_and_order_taken_from_sort_order() {
    let mut r = row(1, None, MenuType::Menu, 7);
    r.meta.insert("title".into(), "system.title".into());
    r.meta.insert("keepAlive".into(), true.into());
    r.meta.insert("tenant".into(), "acme".into());
    let tree = build_menu_tree(vec![r]);
    let meta = &tree[0].meta;
    assert_eq!(meta.title, "system.title");
    assert!(meta.keep_alive);
    assert_eq!(meta.order, Some(7));
    assert_eq!(meta.extra["tenant"], "acme");
  }

  #[test]
  fn undecodable_meta_falls_back_to_defaults() {
    let mut r = row(1, None, MenuType::Menu, 2);
    r.meta.insert("title".into(), 42.into());
    let tree = build_menu_tree(vec![r]);
    assert_eq!(tree[0].meta.title, "");
    assert_eq!(tree[0].meta.order, Some(2));
  }

  #[test]
  fn auth_codes_sorted_unique_enabled_only() {
    let mut rows = vec![
      row(1, None, MenuType::Button, 0),
      row(2, None, MenuType::Button, 0),
      row(3, None, MenuType::Menu, 0),
      row(4, None, MenuType::Button, 0),
      row(5, None, MenuType::Menu, 0),
    ];
    rows[0].auth_code = Some("System:Menu:Edit".into());
    rows[1].auth_code = Some("System:Menu:Create".into());
    rows[2].auth_code = Some("System:Menu:Edit".into());
    rows[3].auth_code = Some("System:Menu:Delete".into());
    rows[3].status = MenuStatus::Disabled;
    rows[4].auth_code = Some(String::new());
    assert_eq!(collect_auth_codes(&rows), ["System:Menu:Create", "System:Menu:Edit"]);
  }
}
