/* src/tabbar/rust/src/tab.rs */

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vben_core::{Params, Query, RouteLocation, RouteMeta, RouteRecord};

/// A tab title that is either fixed or re-read on every render.
#[derive(Clone)]
pub enum TitleSource {
  Static(String),
  Dynamic(Arc<dyn Fn() -> String + Send + Sync>),
}

impl TitleSource {
  pub fn dynamic(provider: impl Fn() -> String + Send + Sync + 'static) -> Self {
    Self::Dynamic(Arc::new(provider))
  }

  pub fn resolve(&self) -> String {
    match self {
      Self::Static(title) => title.clone(),
      Self::Dynamic(provider) => provider(),
    }
  }

  /// Freeze the current value.
  pub fn snapshot(&self) -> Self {
    Self::Static(self.resolve())
  }

  pub fn is_dynamic(&self) -> bool {
    matches!(self, Self::Dynamic(_))
  }
}

impl fmt::Debug for TitleSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Static(title) => f.debug_tuple("Static").field(title).finish(),
      Self::Dynamic(provider) => f.debug_tuple("Dynamic").field(&provider()).finish(),
    }
  }
}

impl From<&str> for TitleSource {
  fn from(title: &str) -> Self {
    Self::Static(title.to_string())
  }
}

impl From<String> for TitleSource {
  fn from(title: String) -> Self {
    Self::Static(title)
  }
}

// Persisted as the title showing at the time.
impl Serialize for TitleSource {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.resolve())
  }
}

impl<'de> Deserialize<'de> for TitleSource {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(Self::Static)
  }
}

/// The slice of route meta a tab carries, plus the user-assigned title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabMeta {
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  /// `None` means never set; a set value survives re-adding the tab.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affix_tab: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affix_tab_order: Option<i64>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub keep_alive: bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub hide_in_tab: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_num_of_open_tab: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_path_key: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub new_tab_title: Option<TitleSource>,
}

impl From<&RouteMeta> for TabMeta {
  fn from(meta: &RouteMeta) -> Self {
    Self {
      title: meta.title.clone(),
      icon: meta.icon.clone(),
      affix_tab: meta.affix_tab,
      affix_tab_order: meta.affix_tab_order,
      keep_alive: meta.keep_alive,
      hide_in_tab: meta.hide_in_tab,
      max_num_of_open_tab: meta.max_num_of_open_tab,
      full_path_key: meta.full_path_key,
      new_tab_title: None,
    }
  }
}

/// One open tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDefinition {
  #[serde(default)]
  pub key: String,
  pub name: String,
  pub path: String,
  #[serde(default)]
  pub full_path: String,
  #[serde(default, skip_serializing_if = "Query::is_empty")]
  pub query: Query,
  #[serde(default, skip_serializing_if = "Params::is_empty")]
  pub params: Params,
  #[serde(default)]
  pub meta: TabMeta,
  /// Matched records from the root down, the tab's own route last.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub matched: Vec<RouteRecord>,
}

impl TabDefinition {
  pub fn from_location(location: &RouteLocation) -> Self {
    Self {
      key: get_tab_key(location),
      name: location.name.clone(),
      path: location.path.clone(),
      full_path: location.full_path.clone(),
      query: location.query.clone(),
      params: location.params.clone(),
      meta: TabMeta::from(&location.meta),
      matched: location.matched.clone(),
    }
  }

  /// A tab for a registered route that has not been visited yet.
  pub fn from_record(record: &RouteRecord) -> Self {
    let mut tab = Self {
      key: String::new(),
      name: record.name.clone(),
      path: record.path.clone(),
      full_path: record.path.clone(),
      meta: TabMeta::from(&record.meta),
      ..Self::default()
    };
    tab.key = tab.derive_key();
    tab
  }

  /// The stored key, or the derived one when none was assigned.
  pub fn key(&self) -> String {
    if self.key.is_empty() { self.derive_key() } else { self.key.clone() }
  }

  pub fn derive_key(&self) -> String {
    tab_key(&self.path, &self.full_path, self.meta.full_path_key, &self.query)
  }

  pub fn is_affix(&self) -> bool {
    self.meta.affix_tab.unwrap_or(false)
  }

  /// Hidden when the route or any matched ancestor sets `hide_in_tab`.
  pub fn is_shown(&self) -> bool {
    !self.meta.hide_in_tab && self.matched.iter().all(|record| !record.meta.hide_in_tab)
  }

  /// The user-assigned title when present, the route title otherwise.
  pub fn display_title(&self) -> String {
    self.meta.new_tab_title.as_ref().map_or_else(|| self.meta.title.clone(), TitleSource::resolve)
  }
}

/// Tab identity for a route location.
pub fn get_tab_key(location: &RouteLocation) -> String {
  tab_key(&location.path, &location.full_path, location.meta.full_path_key, &location.query)
}

/// `pageKey` from the query when present, else `path` when `full_path_key` is
/// `Some(false)`, else the full path. The result is URL-decoded; undecodable
/// input is returned as is.
pub fn tab_key(path: &str, full_path: &str, full_path_key: Option<bool>, query: &Query) -> String {
  let page_key = query.get("pageKey").and_then(|value| value.first()).filter(|k| !k.is_empty());
  let raw = match page_key {
    Some(page_key) => page_key,
    None if full_path_key == Some(false) => path,
    None if full_path.is_empty() => path,
    None => full_path,
  };
  urlencoding::decode(raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}
