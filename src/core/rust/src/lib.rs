/* src/core/rust/src/lib.rs */

//! Shared route model, tree helpers, router contract and preferences used by
//! the access and tabbar crates.

pub mod config;
pub mod errors;
pub mod route;
pub mod router;
pub mod tree;

pub use config::{AccessMode, Preferences, find_preferences, load_preferences};
pub use errors::NavError;
pub use route::{
  Params, Query, QueryValue, RouteLocation, RouteMeta, RouteNode, RouteRecord, RouteTarget,
  encode_query,
};
pub use router::{BoxFuture, MAX_REDIRECT_DEPTH, MemoryRouter, Router, join_path, match_path};
pub use tree::{
  Retain, TreeNode, filter_tree, find_tree_node, map_tree, prune_tree, sort_tree_by_key,
  traverse_tree_values,
};
