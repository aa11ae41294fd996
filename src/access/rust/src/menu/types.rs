/* src/access/rust/src/menu/types.rs */

use serde::{Deserialize, Serialize};
use vben_core::TreeNode;

use crate::errors::AccessError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuType {
  #[default]
  Menu,
  Catalog,
  Button,
  Embedded,
  Link,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatusRepr", into = "u8")]
pub enum MenuStatus {
  #[default]
  Enabled,
  Disabled,
}

/// Backends send `1`/`0`; hand-written fixtures tend to use labels.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
  Code(i64),
  Label(String),
}

impl From<StatusRepr> for MenuStatus {
  fn from(repr: StatusRepr) -> Self {
    match repr {
      StatusRepr::Code(0) => Self::Disabled,
      StatusRepr::Label(label) if label.eq_ignore_ascii_case("disabled") => Self::Disabled,
      _ => Self::Enabled,
    }
  }
}

impl From<MenuStatus> for u8 {
  fn from(status: MenuStatus) -> Self {
    match status {
      MenuStatus::Enabled => 1,
      MenuStatus::Disabled => 0,
    }
  }
}

/// One flat menu row as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRow {
  pub id: i64,
  #[serde(default, alias = "pid")]
  pub parent_id: Option<i64>,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub component: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub redirect: Option<String>,
  #[serde(rename = "type", default)]
  pub kind: MenuType,
  #[serde(default)]
  pub status: MenuStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub auth_code: Option<String>,
  #[serde(default)]
  pub sort_order: i64,
  /// Untyped meta bag, decoded into `RouteMeta` when the tree is built.
  #[serde(default)]
  pub meta: serde_json::Map<String, serde_json::Value>,
}

impl MenuRow {
  pub fn new(id: i64, parent_id: Option<i64>, kind: MenuType) -> Self {
    Self { id, parent_id, kind, ..Self::default() }
  }

  pub fn is_enabled(&self) -> bool {
    self.status == MenuStatus::Enabled
  }
}

/// Decode a JSON array of menu rows.
pub fn parse_menu_rows(json: &str) -> Result<Vec<MenuRow>, AccessError> {
  Ok(serde_json::from_str(json)?)
}

/// A displayable menu entry derived from a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
  pub name: String,
  /// Click target: the link, the redirect of a collapsed parent, or the route path.
  pub path: String,
  /// Registered path of the route itself; breadcrumb back-references use it.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub route_path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active_icon: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub badge: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub badge_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub badge_variants: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub order: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parent: Option<String>,
  /// Ancestor route paths from the root down, for breadcrumbs.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parents: Vec<String>,
  pub show: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<MenuRecord>,
}

impl TreeNode for MenuRecord {
  fn children(&self) -> &[Self] {
    &self.children
  }

  fn children_mut(&mut self) -> &mut Vec<Self> {
    &mut self.children
  }
}
