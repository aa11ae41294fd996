/* src/core/rust/src/router.rs */

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::errors::NavError;
use crate::route::{Params, RouteLocation, RouteNode, RouteRecord, RouteTarget};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Redirect chains longer than this are treated as a loop.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// The navigation layer the access and tab managers talk to.
pub trait Router {
  /// Every registered route, parents included.
  fn get_routes(&self) -> Vec<RouteRecord>;
  fn has_route(&self, name: &str) -> bool;
  fn remove_route(&mut self, name: &str);
  fn current_route(&self) -> RouteLocation;
  /// Navigate without pushing a history entry. Resolves once navigation settled.
  fn replace(&mut self, to: RouteTarget) -> BoxFuture<'_, Result<(), NavError>>;
}

struct RouteEntry {
  record: RouteRecord,
  /// Indices into `entries` from the root down to this entry.
  chain: Vec<usize>,
}

/// A router over an in-memory route table, with no browser history behind it.
pub struct MemoryRouter {
  entries: Vec<RouteEntry>,
  current: RouteLocation,
  history: Vec<String>,
}

impl MemoryRouter {
  pub fn new(routes: &[RouteNode]) -> Self {
    let mut entries = Vec::new();
    flatten_routes(routes, "", &[], &mut entries);
    Self { entries, current: RouteLocation::default(), history: Vec::new() }
  }

  /// Full paths of every settled navigation, oldest first.
  pub fn history(&self) -> &[String] {
    &self.history
  }

  /// Resolve a target to a location, following redirects.
  pub fn resolve(&self, target: &RouteTarget) -> Result<RouteLocation, NavError> {
    let mut target = target.clone();
    for _ in 0..=MAX_REDIRECT_DEPTH {
      let (entry, captured) = self
        .entries
        .iter()
        .find_map(|entry| match_path(&entry.record.path, &target.path).map(|p| (entry, p)))
        .ok_or_else(|| NavError::NoMatch(target.path.clone()))?;

      if let Some(ref redirect) = entry.record.redirect {
        target = RouteTarget { path: redirect.clone(), params: Params::new(), query: target.query };
        continue;
      }

      let mut params = captured;
      params.extend(target.params.clone());
      return Ok(RouteLocation {
        name: entry.record.name.clone(),
        path: target.path.clone(),
        full_path: target.full_path(),
        query: target.query.clone(),
        params,
        meta: entry.record.meta.clone(),
        matched: entry.chain.iter().map(|&i| self.entries[i].record.clone()).collect(),
      });
    }
    Err(NavError::aborted(target.path, "too many redirects"))
  }
}

impl Router for MemoryRouter {
  fn get_routes(&self) -> Vec<RouteRecord> {
    self.entries.iter().map(|e| e.record.clone()).collect()
  }

  fn has_route(&self, name: &str) -> bool {
    !name.is_empty() && self.entries.iter().any(|e| e.record.name == name)
  }

  fn remove_route(&mut self, name: &str) {
    let Some(index) = self.entries.iter().position(|e| e.record.name == name) else {
      return;
    };
    // Removing a route removes its descendants too, then chains are reindexed.
    let removed: Vec<bool> = self.entries.iter().map(|e| e.chain.contains(&index)).collect();
    let mut remap = vec![usize::MAX; self.entries.len()];
    let mut next = 0;
    for (old, gone) in removed.iter().enumerate() {
      if !gone {
        remap[old] = next;
        next += 1;
      }
    }
    let entries = std::mem::take(&mut self.entries);
    self.entries = entries
      .into_iter()
      .zip(removed)
      .filter(|(_, gone)| !gone)
      .map(|(mut entry, _)| {
        entry.chain = entry.chain.iter().map(|&i| remap[i]).collect();
        entry
      })
      .collect();
    debug!(route = name, "route removed");
  }

  fn current_route(&self) -> RouteLocation {
    self.current.clone()
  }

  fn replace(&mut self, to: RouteTarget) -> BoxFuture<'_, Result<(), NavError>> {
    Box::pin(async move {
      let location = self.resolve(&to)?;
      self.history.push(location.full_path.clone());
      self.current = location;
      Ok(())
    })
  }
}

fn flatten_routes(
  routes: &[RouteNode],
  parent_path: &str,
  parent_chain: &[usize],
  entries: &mut Vec<RouteEntry>,
) {
  for route in routes {
    let path = join_path(parent_path, &route.path);
    let index = entries.len();
    let mut chain = parent_chain.to_vec();
    chain.push(index);
    entries.push(RouteEntry {
      record: RouteRecord {
        name: route.name.clone(),
        path: path.clone(),
        redirect: route.redirect.clone(),
        meta: route.meta.clone(),
      },
      chain: chain.clone(),
    });
    flatten_routes(&route.children, &path, &chain, entries);
  }
}

/// Nested route paths are relative unless they start with `/`.
pub fn join_path(parent: &str, path: &str) -> String {
  if path.starts_with('/') || parent.is_empty() {
    return path.to_string();
  }
  if path.is_empty() {
    return parent.to_string();
  }
  format!("{}/{path}", parent.trim_end_matches('/'))
}

/// Match `path` against a pattern with `:param` segments, returning captured params.
pub fn match_path(pattern: &str, path: &str) -> Option<Params> {
  let pattern_segments: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
  let path_segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
  if pattern_segments.len() != path_segments.len() {
    return None;
  }

  let mut params = Params::new();
  for (pattern_seg, seg) in pattern_segments.iter().zip(&path_segments) {
    if let Some(name) = pattern_seg.strip_prefix(':') {
      if seg.is_empty() {
        return None;
      }
      let value = urlencoding::decode(seg).map_or_else(|_| (*seg).to_string(), Cow::into_owned);
      params.insert(name.to_string(), value);
    } else if pattern_seg != seg {
      return None;
    }
  }
  Some(params)
}
