/* src/core/rust/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{PREFERENCES_FILE, find_preferences, load_preferences, parse_preferences};
pub use types::{AccessMode, AppSection, Preferences, TabbarSection};
