/* src/access/rust/src/accessible.rs */

use serde::Serialize;
use tracing::{error, info};
use vben_core::{AccessMode, BoxFuture, RouteNode, Router};

use crate::authority::generate_routes_by_frontend;
use crate::backend::{ComponentMap, convert_routes};
use crate::errors::AccessError;
use crate::menu::{MenuRecord, MenuRow, build_menu_tree, generate_menus};

/// Async supplier of backend menu rows. `Ok(None)` means the backend has no
/// menu for this user and the static routes apply.
pub trait MenuSource: Send + Sync {
  fn fetch_menu_rows(&self) -> BoxFuture<'_, Result<Option<Vec<MenuRow>>, AccessError>>;
}

/// Source for frontend mode, where the backend is never asked.
pub struct NoMenuSource;

impl MenuSource for NoMenuSource {
  fn fetch_menu_rows(&self) -> BoxFuture<'_, Result<Option<Vec<MenuRow>>, AccessError>> {
    Box::pin(async { Ok(None) })
  }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  pub mode: AccessMode,
  /// Current user's roles, matched against `meta.authority`.
  pub roles: Vec<String>,
  /// Statically declared routes.
  pub routes: Vec<RouteNode>,
  pub forbidden_component: Option<String>,
  pub layout_map: ComponentMap,
  pub page_map: ComponentMap,
}

/// Routes to register plus the menu derived from them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessible {
  pub routes: Vec<RouteNode>,
  pub menus: Vec<MenuRecord>,
}

pub async fn generate_accessible<S, R>(
  options: GenerateOptions,
  source: &S,
  router: &R,
) -> Result<Accessible, AccessError>
where
  S: MenuSource + ?Sized,
  R: Router + ?Sized,
{
  let GenerateOptions { mode, roles, routes, forbidden_component, layout_map, page_map } = options;

  let backend_rows = match mode {
    AccessMode::Frontend => None,
    AccessMode::Backend => source.fetch_menu_rows().await.inspect_err(|err| {
      error!(code = err.code(), error = %err, "menu source failed");
    })?,
  };

  let routes = match backend_rows {
    Some(rows) => {
      info!(rows = rows.len(), "building routes from backend menu");
      convert_routes(build_menu_tree(rows), &layout_map, &page_map)
    }
    None => generate_routes_by_frontend(routes, &roles, forbidden_component.as_deref()),
  };
  let menus = generate_menus(&routes, router);
  Ok(Accessible { routes, menus })
}
