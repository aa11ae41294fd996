/* src/core/rust/src/route.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::TreeNode;

pub type Params = BTreeMap<String, String>;

pub type Query = BTreeMap<String, QueryValue>;

/// A query parameter can repeat (`?tag=a&tag=b`), so values are either single or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
  One(String),
  Many(Vec<String>),
}

impl QueryValue {
  pub fn first(&self) -> Option<&str> {
    match self {
      Self::One(v) => Some(v.as_str()),
      Self::Many(values) => values.first().map(String::as_str),
    }
  }
}

impl From<&str> for QueryValue {
  fn from(value: &str) -> Self {
    Self::One(value.to_string())
  }
}

/// Route metadata. Unknown keys are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub active_icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub badge: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub badge_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub badge_variants: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<i64>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub hide_in_menu: bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub hide_children_in_menu: bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub hide_in_tab: bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub hide_in_breadcrumb: bool,
  /// Roles or permission codes, any one of which grants access.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub authority: Option<Vec<String>>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub menu_visible_with_forbidden: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affix_tab: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affix_tab_order: Option<i64>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub keep_alive: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_num_of_open_tab: Option<i64>,
  /// External link opened instead of the route path.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  /// `Some(false)` keys tabs by `path` instead of `fullPath`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_path_key: Option<bool>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

impl RouteMeta {
  pub fn titled(title: impl Into<String>) -> Self {
    Self { title: title.into(), ..Self::default() }
  }

  pub fn is_affix_tab(&self) -> bool {
    self.affix_tab.unwrap_or(false)
  }
}

/// A declared route. `name` is required; an empty name is a configuration error
/// that gets logged where trees are built, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub component: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub redirect: Option<String>,
  #[serde(default)]
  pub meta: RouteMeta,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<RouteNode>,
}

impl RouteNode {
  pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
    Self { name: name.into(), path: path.into(), ..Self::default() }
  }

  pub fn with_meta(mut self, meta: RouteMeta) -> Self {
    self.meta = meta;
    self
  }

  pub fn with_component(mut self, component: impl Into<String>) -> Self {
    self.component = Some(component.into());
    self
  }

  pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
    self.children = children;
    self
  }
}

impl TreeNode for RouteNode {
  fn children(&self) -> &[Self] {
    &self.children
  }

  fn children_mut(&mut self) -> &mut Vec<Self> {
    &mut self.children
  }
}

/// A flattened, registered route as the router reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
  pub name: String,
  pub path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub redirect: Option<String>,
  #[serde(default)]
  pub meta: RouteMeta,
}

/// The resolved location the router currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLocation {
  pub name: String,
  pub path: String,
  pub full_path: String,
  #[serde(default)]
  pub query: Query,
  #[serde(default)]
  pub params: Params,
  #[serde(default)]
  pub meta: RouteMeta,
  /// Matched records from the root down to the route itself.
  #[serde(default)]
  pub matched: Vec<RouteRecord>,
}

impl Default for RouteLocation {
  fn default() -> Self {
    Self {
      name: String::new(),
      path: "/".to_string(),
      full_path: "/".to_string(),
      query: Query::new(),
      params: Params::new(),
      meta: RouteMeta::default(),
      matched: Vec::new(),
    }
  }
}

/// Where a `replace` navigation should go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTarget {
  pub path: String,
  pub params: Params,
  pub query: Query,
}

impl RouteTarget {
  pub fn path(path: impl Into<String>) -> Self {
    Self { path: path.into(), ..Self::default() }
  }

  /// Path plus the encoded query string.
  pub fn full_path(&self) -> String {
    let query = encode_query(&self.query);
    if query.is_empty() { self.path.clone() } else { format!("{}?{query}", self.path) }
  }
}

pub fn encode_query(query: &Query) -> String {
  let mut pairs = Vec::new();
  for (key, value) in query {
    let key = urlencoding::encode(key);
    match value {
      QueryValue::One(v) => pairs.push(format!("{key}={}", urlencoding::encode(v))),
      QueryValue::Many(values) => {
        pairs.extend(values.iter().map(|v| format!("{key}={}", urlencoding::encode(v))));
      }
    }
  }
  pairs.join("&")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn meta_deserializes_camel_case() {
    let meta: RouteMeta = serde_json::from_value(serde_json::json!({
      "title": "Analytics",
      "affixTab": true,
      "hideInMenu": true,
      "maxNumOfOpenTab": 2,
      "authority": ["admin"],
      "query": { "tab": "1" }
    }))
    .unwrap();
    assert_eq!(meta.title, "Analytics");
    assert!(meta.is_affix_tab());
    assert!(meta.hide_in_menu);
    assert_eq!(meta.max_num_of_open_tab, Some(2));
    assert_eq!(meta.authority.as_deref(), Some(&["admin".to_string()][..]));
    assert_eq!(meta.extra["query"], serde_json::json!({ "tab": "1" }));
  }

  #[test]
  fn meta_skips_defaults_when_serialized() {
    let value = serde_json::to_value(RouteMeta::titled("Home")).unwrap();
    assert_eq!(value, serde_json::json!({ "title": "Home" }));
  }

  #[test]
  fn route_node_children_default_empty() {
    let node: RouteNode =
      serde_json::from_value(serde_json::json!({ "name": "Home", "path": "/home" })).unwrap();
    assert!(node.children.is_empty());
    assert_eq!(node.meta, RouteMeta::default());
  }

  #[test]
  fn query_value_first() {
    assert_eq!(QueryValue::from("a").first(), Some("a"));
    assert_eq!(QueryValue::Many(vec!["x".into(), "y".into()]).first(), Some("x"));
    assert_eq!(QueryValue::Many(Vec::new()).first(), None);
  }

  #[test]
  fn full_path_encodes_query() {
    let mut target = RouteTarget::path("/search");
    target.query.insert("q".into(), QueryValue::from("a b"));
    target.query.insert("tag".into(), QueryValue::Many(vec!["x".into(), "y".into()]));
    assert_eq!(target.full_path(), "/search?q=a%20b&tag=x&tag=y");
    assert_eq!(RouteTarget::path("/plain").full_path(), "/plain");
  }
}
