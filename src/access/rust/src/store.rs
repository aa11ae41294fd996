/* src/access/rust/src/store.rs */

use serde::{Deserialize, Serialize};
use vben_core::{RouteNode, find_tree_node};

use crate::accessible::Accessible;
use crate::menu::MenuRecord;

/// Permission entries with this prefix name a role instead of an access code.
pub const ROLE_PREFIX: &str = "role:";

/// Access state for one signed-in session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessStore {
  pub access_codes: Vec<String>,
  pub roles: Vec<String>,
  #[serde(skip)]
  pub access_menus: Vec<MenuRecord>,
  #[serde(skip)]
  pub access_routes: Vec<RouteNode>,
  #[serde(skip)]
  pub is_access_checked: bool,
}

impl AccessStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_access_codes(&mut self, codes: Vec<String>) {
    self.access_codes = codes;
  }

  pub fn set_roles(&mut self, roles: Vec<String>) {
    self.roles = roles;
  }

  pub fn set_access_menus(&mut self, menus: Vec<MenuRecord>) {
    self.access_menus = menus;
  }

  pub fn set_access_routes(&mut self, routes: Vec<RouteNode>) {
    self.access_routes = routes;
  }

  pub fn set_is_access_checked(&mut self, checked: bool) {
    self.is_access_checked = checked;
  }

  /// Publish a generated route/menu set and mark access as checked.
  pub fn apply(&mut self, accessible: Accessible) {
    self.access_routes = accessible.routes;
    self.access_menus = accessible.menus;
    self.is_access_checked = true;
  }

  /// First menu in depth-first order whose path is `path`.
  pub fn menu_by_path(&self, path: &str) -> Option<&MenuRecord> {
    find_tree_node(&self.access_menus, |menu| menu.path == path)
  }

  pub fn has_access_by_codes<S: AsRef<str>>(&self, codes: &[S]) -> bool {
    codes.iter().any(|code| self.access_codes.iter().any(|own| own == code.as_ref()))
  }

  pub fn has_access_by_roles<S: AsRef<str>>(&self, roles: &[S]) -> bool {
    roles.iter().any(|role| self.roles.iter().any(|own| own == role.as_ref()))
  }

  /// Any entry grants access. `role:<name>` entries check roles, others check codes.
  pub fn has_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
    permissions.iter().any(|permission| match permission.as_ref().strip_prefix(ROLE_PREFIX) {
      Some(role) => self.has_access_by_roles(&[role]),
      None => self.has_access_by_codes(&[permission.as_ref()]),
    })
  }

  /// Drop everything tied to the signed-in user.
  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
