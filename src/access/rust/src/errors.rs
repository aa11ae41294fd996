/* src/access/rust/src/errors.rs */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
  /// The backend menu source could not produce rows.
  #[error("failed to fetch menu rows: {0}")]
  MenuSource(String),
  #[error("invalid menu rows: {0}")]
  Decode(#[from] serde_json::Error),
}

impl AccessError {
  pub fn menu_source(message: impl Into<String>) -> Self {
    Self::MenuSource(message.into())
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::MenuSource(_) => "MENU_SOURCE_FAILED",
      Self::Decode(_) => "INVALID_MENU_ROWS",
    }
  }
}
