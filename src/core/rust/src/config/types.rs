/* src/core/rust/src/config/types.rs */

use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
  #[serde(default)]
  pub app: AppSection,
  #[serde(default)]
  pub tabbar: TabbarSection,
}

impl Preferences {
  pub fn validate(&self) -> Result<()> {
    if self.app.namespace.trim().is_empty() {
      bail!("app.namespace must not be empty");
    }
    if self.tabbar.refresh_delay_ms == 0 {
      bail!("tabbar.refresh_delay_ms must be greater than 0");
    }
    Ok(())
  }

  /// Namespaced key under which a store's state is persisted, e.g. `vben-admin-core-tabbar`.
  pub fn storage_key(&self, store: &str) -> String {
    format!("{}-{store}", self.app.namespace)
  }
}

/// Where the accessible route table comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
  /// Static routes filtered by the user's roles.
  #[default]
  Frontend,
  /// Menu rows fetched from the backend.
  Backend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
  #[serde(default)]
  pub access_mode: AccessMode,
  #[serde(default = "default_namespace")]
  pub namespace: String,
}

impl Default for AppSection {
  fn default() -> Self {
    Self { access_mode: AccessMode::default(), namespace: default_namespace() }
  }
}

fn default_namespace() -> String {
  "vben-admin".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabbarSection {
  /// Zero or negative disables the global limit.
  #[serde(default)]
  pub max_count: i64,
  #[serde(default = "default_refresh_delay_ms")]
  pub refresh_delay_ms: u64,
}

impl TabbarSection {
  pub fn max_count_limit(&self) -> Option<usize> {
    usize::try_from(self.max_count).ok().filter(|&n| n > 0)
  }

  pub fn refresh_delay(&self) -> Duration {
    Duration::from_millis(self.refresh_delay_ms)
  }
}

impl Default for TabbarSection {
  fn default() -> Self {
    Self { max_count: 0, refresh_delay_ms: default_refresh_delay_ms() }
  }
}

fn default_refresh_delay_ms() -> u64 {
  200
}
