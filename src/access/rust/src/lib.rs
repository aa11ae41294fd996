/* src/access/rust/src/lib.rs */

//! Menu tree building, role-based route filtering and access state.

pub mod accessible;
pub mod authority;
pub mod backend;
pub mod errors;
pub mod menu;
pub mod reset;
pub mod store;

pub use accessible::{Accessible, GenerateOptions, MenuSource, NoMenuSource, generate_accessible};
pub use authority::{generate_routes_by_frontend, has_authority};
pub use backend::{ComponentMap, NOT_FOUND_PAGE, convert_routes, normalize_view_path};
pub use errors::AccessError;
pub use menu::{
  MenuRecord, MenuRow, MenuStatus, MenuType, build_menu_tree, collect_auth_codes, generate_menus,
  parse_menu_rows,
};
pub use reset::reset_static_routes;
pub use store::{AccessStore, ROLE_PREFIX};
