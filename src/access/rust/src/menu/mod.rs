/* src/access/rust/src/menu/mod.rs */

mod generate;
mod rows;
mod types;

pub use generate::generate_menus;
pub use rows::{build_menu_tree, collect_auth_codes};
pub use types::{MenuRecord, MenuRow, MenuStatus, MenuType, parse_menu_rows};
