/* src/tabbar/rust/src/errors.rs */

use thiserror::Error;
use vben_core::NavError;

#[derive(Debug, Error)]
pub enum TabbarError {
  /// The only open tab has no sibling to fall back to.
  #[error("failed to close the tab; only one tab remains open")]
  LastTab,
  #[error(transparent)]
  Navigation(#[from] NavError),
  #[error("invalid tab snapshot: {0}")]
  Snapshot(#[from] serde_json::Error),
}

impl TabbarError {
  pub fn code(&self) -> &'static str {
    match self {
      Self::LastTab => "LAST_TAB",
      Self::Navigation(err) => err.code(),
      Self::Snapshot(_) => "INVALID_SNAPSHOT",
    }
  }
}
