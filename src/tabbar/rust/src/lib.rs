/* src/tabbar/rust/src/lib.rs */

//! Open tabs of an admin session: keys, limits, pinning, closing and the
//! keep-alive cache that follows them.

pub mod errors;
pub mod store;
pub mod tab;

pub use errors::TabbarError;
pub use store::{CloseOutcome, TabMenuAction, TabbarStore};
pub use tab::{TabDefinition, TabMeta, TitleSource, get_tab_key, tab_key};
