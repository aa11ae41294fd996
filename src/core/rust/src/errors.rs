/* src/core/rust/src/errors.rs */

use thiserror::Error;

/// Failures reported by a router collaborator.
#[derive(Debug, Error)]
pub enum NavError {
  #[error("no route matches '{0}'")]
  NoMatch(String),
  #[error("navigation to '{target}' was aborted: {reason}")]
  Aborted { target: String, reason: String },
}

impl NavError {
  pub fn aborted(target: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Aborted { target: target.into(), reason: reason.into() }
  }

  /// Stable machine-readable code, independent of the message text.
  pub fn code(&self) -> &'static str {
    match self {
      Self::NoMatch(_) => "NO_MATCH",
      Self::Aborted { .. } => "NAVIGATION_ABORTED",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_are_stable() {
    assert_eq!(NavError::NoMatch("/x".into()).code(), "NO_MATCH");
    assert_eq!(NavError::aborted("/x", "guard").code(), "NAVIGATION_ABORTED");
  }

  #[test]
  fn display_format() {
    let err = NavError::aborted("/system/menu", "blocked by guard");
    assert_eq!(err.to_string(), "navigation to '/system/menu' was aborted: blocked by guard");
  }
}
