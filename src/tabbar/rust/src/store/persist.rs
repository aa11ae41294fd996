/* src/tabbar/rust/src/store/persist.rs */

// The host writes the snapshot to session storage under
// `Preferences::storage_key("core-tabbar")`; no I/O happens here.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::TabbarStore;
use crate::errors::TabbarError;
use crate::tab::TabDefinition;

impl TabbarStore {
  /// Serialize the open tabs, in stored order, as a JSON array.
  pub fn snapshot(&self) -> Result<String, TabbarError> {
    Ok(serde_json::to_string(&self.tabs)?)
  }

  /// Replace the open tabs with a snapshot. A malformed snapshot leaves the
  /// store untouched. Later entries repeating a key are dropped.
  pub fn restore(&mut self, snapshot: &str) -> Result<(), TabbarError> {
    let parsed: Vec<TabDefinition> = serde_json::from_str(snapshot)?;
    let total = parsed.len();
    let mut seen = HashSet::with_capacity(total);
    let tabs: Vec<TabDefinition> = parsed
      .into_iter()
      .map(|mut tab| {
        if tab.key.is_empty() {
          tab.key = tab.derive_key();
        }
        tab
      })
      .filter(|tab| seen.insert(tab.key.clone()))
      .collect();
    if tabs.len() < total {
      warn!(dropped = total - tabs.len(), "duplicate tab keys in snapshot");
    }
    debug!(tabs = tabs.len(), "tabs restored");
    self.tabs = tabs;
    self.update_cache_tabs();
    Ok(())
  }
}
