/* src/tabbar/rust/src/store/mod.rs */

mod persist;


use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use vben_core::config::TabbarSection;
use vben_core::{BoxFuture, NavError, RouteRecord, RouteTarget, Router};

use crate::errors::TabbarError;
use crate::tab::{TabDefinition, TabMeta, TitleSource, get_tab_key};

/// Entries of the tab context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabMenuAction {
  Close,
  Affix,
  Maximize,
  Reload,
  OpenInNewWindow,
  CloseLeft,
  CloseRight,
  CloseOther,
  CloseAll,
}

impl TabMenuAction {
  pub const DEFAULTS: [Self; 9] = [
    Self::Close,
    Self::Affix,
    Self::Maximize,
    Self::Reload,
    Self::OpenInNewWindow,
    Self::CloseLeft,
    Self::CloseRight,
    Self::CloseOther,
    Self::CloseAll,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Close => "close",
      Self::Affix => "affix",
      Self::Maximize => "maximize",
      Self::Reload => "reload",
      Self::OpenInNewWindow => "open-in-new-window",
      Self::CloseLeft => "close-left",
      Self::CloseRight => "close-right",
      Self::CloseOther => "close-other",
      Self::CloseAll => "close-all",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
  /// The tab was removed. `navigated_to` holds the key of the tab activated in its place.
  Closed { navigated_to: Option<String> },
  /// Affixed tabs are never closed.
  Affixed,
  /// No open tab has that key.
  NotOpen,
}

type SharedNames = Arc<Mutex<BTreeSet<String>>>;

fn lock(names: &Mutex<BTreeSet<String>>) -> MutexGuard<'_, BTreeSet<String>> {
  names.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Open tabs of one session, in stored order, plus the keep-alive cache derived from them.
///
/// All mutation goes through `&mut self`. The only state shared with pending
/// refresh futures is the exclusion set and the render flag.
#[derive(Debug)]
pub struct TabbarStore {
  tabs: Vec<TabDefinition>,
  cached_tabs: BTreeSet<String>,
  exclude_cached_tabs: SharedNames,
  render_route_view: Arc<AtomicBool>,
  menu_list: Vec<TabMenuAction>,
  drag_end_index: u64,
  max_count: Option<usize>,
  refresh_delay: Duration,
}

impl Default for TabbarStore {
  fn default() -> Self {
    Self::new(&TabbarSection::default())
  }
}

impl TabbarStore {
  pub fn new(preferences: &TabbarSection) -> Self {
    Self {
      tabs: Vec::new(),
      cached_tabs: BTreeSet::new(),
      exclude_cached_tabs: SharedNames::default(),
      render_route_view: Arc::new(AtomicBool::new(true)),
      menu_list: TabMenuAction::DEFAULTS.to_vec(),
      drag_end_index: 0,
      max_count: preferences.max_count_limit(),
      refresh_delay: preferences.refresh_delay(),
    }
  }

  /// Apply a changed `tabbar.max_count` preference. Zero or negative disables the limit.
  pub fn set_max_count(&mut self, max_count: i64) {
    self.max_count = usize::try_from(max_count).ok().filter(|&n| n > 0);
  }

  fn position(&self, key: &str) -> Option<usize> {
    self.tabs.iter().position(|tab| tab.key() == key)
  }

  // -- Queries --

  /// Display order: affixed tabs by `affix_tab_order` (stable), then the rest in stored order.
  pub fn tabs(&self) -> Vec<&TabDefinition> {
    let mut ordered = self.affix_tabs();
    ordered.extend(self.tabs.iter().filter(|tab| !tab.is_affix()));
    ordered
  }

  pub fn affix_tabs(&self) -> Vec<&TabDefinition> {
    let mut affixed: Vec<&TabDefinition> = self.tabs.iter().filter(|tab| tab.is_affix()).collect();
    affixed.sort_by_key(|tab| tab.meta.affix_tab_order.unwrap_or(0));
    affixed
  }

  /// Tabs in stored order, which is what `sort_tabs` indices refer to.
  pub fn tab_list(&self) -> &[TabDefinition] {
    &self.tabs
  }

  pub fn get_tab_by_key(&self, key: &str) -> Option<&TabDefinition> {
    self.tabs().into_iter().find(|tab| tab.key() == key)
  }

  pub fn cached_tabs(&self) -> Vec<String> {
    self.cached_tabs.iter().cloned().collect()
  }

  pub fn exclude_cached_tabs(&self) -> Vec<String> {
    lock(&self.exclude_cached_tabs).iter().cloned().collect()
  }

  /// False while the current route view is being remounted by `refresh`.
  pub fn render_route_view(&self) -> bool {
    self.render_route_view.load(Ordering::SeqCst)
  }

  /// Bumped on every reorder.
  pub fn drag_end_index(&self) -> u64 {
    self.drag_end_index
  }

  pub fn menu_list(&self) -> &[TabMenuAction] {
    &self.menu_list
  }

  pub fn set_menu_list(&mut self, list: Vec<TabMenuAction>) {
    self.menu_list = list;
  }

  /// URL to open when a tab is detached into a new window.
  pub fn new_window_target(tab: &TabDefinition) -> String {
    if tab.full_path.is_empty() { tab.path.clone() } else { tab.full_path.clone() }
  }

  // -- Adding --

  /// Open `route_tab`, or merge it into the open tab with the same key.
  ///
  /// Returns the tab as stored. A tab hidden by `hide_in_tab` is returned
  /// without being opened.
  pub fn add_tab(&mut self, route_tab: TabDefinition) -> TabDefinition {
    let mut tab = route_tab;
    if tab.key.is_empty() {
      tab.key = tab.derive_key();
    }
    if !tab.is_shown() {
      return tab;
    }

    match self.position(&tab.key) {
      Some(index) => {
        merge_meta(&mut tab.meta, &self.tabs[index].meta);
        self.tabs[index] = tab.clone();
      }
      None => {
        self.evict_for(&tab);
        self.tabs.push(tab.clone());
      }
    }
    self.update_cache_tabs();
    tab
  }

  fn evict_for(&mut self, tab: &TabDefinition) {
    let per_route =
      tab.meta.max_num_of_open_tab.and_then(|n| usize::try_from(n).ok()).filter(|&n| n > 0);
    let same_route = self.tabs.iter().filter(|open| open.name == tab.name).count();

    let victim = match (per_route, self.max_count) {
      (Some(limit), _) if same_route >= limit => {
        self.tabs.iter().position(|open| open.name == tab.name)
      }
      (_, Some(max)) if self.tabs.len() >= max => {
        self.tabs.iter().position(|open| !open.is_affix())
      }
      _ => None,
    };
    if let Some(index) = victim {
      let evicted = self.tabs.remove(index);
      debug!(evicted = %evicted.key, opening = %tab.key, "tab limit reached");
    }
  }

  /// Pin every record whose meta declares `affix_tab`.
  pub fn set_affix_tabs(&mut self, records: &[RouteRecord]) {
    for record in records.iter().filter(|record| record.meta.is_affix_tab()) {
      let mut tab = TabDefinition::from_record(record);
      tab.meta.affix_tab = Some(true);
      self.add_tab(tab);
    }
  }

  // -- Closing --

  /// Close `tab`. Closing the active tab first navigates to the next tab in
  /// display order, or the previous one. The last remaining tab is never closed.
  pub async fn close_tab<R: Router + ?Sized>(
    &mut self,
    tab: &TabDefinition,
    router: &mut R,
  ) -> Result<CloseOutcome, TabbarError> {
    let key = tab.key();
    let Some(index) = self.position(&key) else {
      return Ok(CloseOutcome::NotOpen);
    };
    if self.tabs[index].is_affix() {
      debug!(key = %key, "ignoring close of affixed tab");
      return Ok(CloseOutcome::Affixed);
    }

    if get_tab_key(&router.current_route()) != key {
      self.tabs.remove(index);
      self.update_cache_tabs();
      return Ok(CloseOutcome::Closed { navigated_to: None });
    }

    let fallback = {
      let display = self.tabs();
      let at = display.iter().position(|open| open.key() == key).unwrap_or(0);
      let before = at.checked_sub(1).and_then(|i| display.get(i));
      display.get(at + 1).or(before).map(|open| (*open).clone())
    };
    let Some(next) = fallback else {
      error!(key = %key, "failed to close the tab; only one tab remains open");
      return Err(TabbarError::LastTab);
    };

    go_to_tab(&next, router).await?;
    if let Some(index) = self.position(&key) {
      self.tabs.remove(index);
    }
    self.update_cache_tabs();
    Ok(CloseOutcome::Closed { navigated_to: Some(next.key()) })
  }

  /// Close the tab whose (possibly URL-encoded) key is `key`.
  pub async fn close_tab_by_key<R: Router + ?Sized>(
    &mut self,
    key: &str,
    router: &mut R,
  ) -> Result<CloseOutcome, TabbarError> {
    let origin = urlencoding::decode(key).map_or_else(|_| key.to_string(), Cow::into_owned);
    let Some(tab) = self.tabs.iter().find(|tab| tab.key() == origin).cloned() else {
      return Ok(CloseOutcome::NotOpen);
    };
    self.close_tab(&tab, router).await
  }

  fn bulk_close(&mut self, keys: &HashSet<String>) -> usize {
    let before = self.tabs.len();
    self.tabs.retain(|tab| !keys.contains(&tab.key()));
    self.update_cache_tabs();
    before - self.tabs.len()
  }

  /// Close the unpinned tabs stored before `tab`. Returns how many were closed.
  pub fn close_left_tabs(&mut self, tab: &TabDefinition) -> usize {
    let Some(index) = self.position(&tab.key()) else {
      return 0;
    };
    let keys =
      self.tabs[..index].iter().filter(|t| !t.is_affix()).map(TabDefinition::key).collect();
    self.bulk_close(&keys)
  }

  /// Close the unpinned tabs stored after `tab`.
  pub fn close_right_tabs(&mut self, tab: &TabDefinition) -> usize {
    let Some(index) = self.position(&tab.key()) else {
      return 0;
    };
    let keys =
      self.tabs[index + 1..].iter().filter(|t| !t.is_affix()).map(TabDefinition::key).collect();
    self.bulk_close(&keys)
  }

  /// Close every unpinned tab except `tab`.
  pub fn close_other_tabs(&mut self, tab: &TabDefinition) -> usize {
    let keep = tab.key();
    let keys = self
      .tabs
      .iter()
      .filter(|t| !t.is_affix())
      .map(TabDefinition::key)
      .filter(|key| *key != keep)
      .collect();
    self.bulk_close(&keys)
  }

  /// Keep only the affixed tabs, or the first tab when none is affixed, then
  /// navigate to the first tab in display order.
  pub async fn close_all_tabs<R: Router + ?Sized>(
    &mut self,
    router: &mut R,
  ) -> Result<(), TabbarError> {
    if self.tabs.iter().any(TabDefinition::is_affix) {
      self.tabs.retain(TabDefinition::is_affix);
    } else {
      self.tabs.truncate(1);
    }
    self.update_cache_tabs();

    let first = self.tabs().first().map(|tab| (*tab).clone());
    if let Some(first) = first {
      go_to_tab(&first, router).await?;
    }
    Ok(())
  }

  // -- Pinning and ordering --

  /// Pin `tab` and move it right after the pinned tabs before it.
  pub fn pin_tab(&mut self, tab: &TabDefinition) {
    let key = tab.key();
    let Some(index) = self.position(&key) else {
      return;
    };
    let stored = &mut self.tabs[index];
    stored.meta.affix_tab = Some(true);
    freeze_title(&mut stored.meta);
    let new_index =
      self.tabs.iter().filter(|t| t.is_affix()).position(|t| t.key() == key).unwrap_or(index);
    self.sort_tabs(index, new_index);
    self.update_cache_tabs();
  }

  /// Unpin `tab` and move it to the first position after the pinned tabs.
  pub fn unpin_tab(&mut self, tab: &TabDefinition) {
    let Some(index) = self.position(&tab.key()) else {
      return;
    };
    let stored = &mut self.tabs[index];
    stored.meta.affix_tab = Some(false);
    freeze_title(&mut stored.meta);
    let new_index = self.tabs.iter().filter(|t| t.is_affix()).count();
    self.sort_tabs(index, new_index);
    self.update_cache_tabs();
  }

  pub fn toggle_tab_pin(&mut self, tab: &TabDefinition) {
    let pinned = self.position(&tab.key()).map_or(tab.is_affix(), |i| self.tabs[i].is_affix());
    if pinned {
      self.unpin_tab(tab);
    } else {
      self.pin_tab(tab);
    }
  }

  /// Move the tab at `old_index` to `new_index` (stored order).
  pub fn sort_tabs(&mut self, old_index: usize, new_index: usize) {
    if old_index >= self.tabs.len() {
      return;
    }
    let tab = self.tabs.remove(old_index);
    let new_index = new_index.min(self.tabs.len());
    self.tabs.insert(new_index, tab);
    self.drag_end_index += 1;
  }

  // -- Titles --

  pub fn set_tab_title(&mut self, tab: &TabDefinition, title: impl Into<TitleSource>) {
    if let Some(index) = self.position(&tab.key()) {
      self.tabs[index].meta.new_tab_title = Some(title.into());
      self.update_cache_tabs();
    }
  }

  pub fn reset_tab_title(&mut self, tab: &TabDefinition) {
    if let Some(index) = self.position(&tab.key()) {
      self.tabs[index].meta.new_tab_title = None;
      self.update_cache_tabs();
    }
  }

  // -- Keep-alive cache --

  /// Recompute the cached route names: for every keep-alive tab, its own name
  /// and the names of its matched records below the root.
  pub fn update_cache_tabs(&mut self) {
    let mut cached = BTreeSet::new();
    for tab in self.tabs.iter().filter(|tab| tab.meta.keep_alive) {
      cached.extend(
        tab.matched.iter().skip(1).map(|record| record.name.clone()).filter(|n| !n.is_empty()),
      );
      cached.insert(tab.name.clone());
    }
    self.cached_tabs = cached;
  }

  /// Remount the current route view: exclude the current route from the cache
  /// and hide the view until the settle delay has passed.
  ///
  /// The exclusion starts immediately; the returned future ends it.
  pub fn refresh<R: Router + ?Sized>(&self, router: &R) -> BoxFuture<'static, ()> {
    let name = router.current_route().name;
    self.render_route_view.store(false, Ordering::SeqCst);
    let render = Arc::clone(&self.render_route_view);
    let settle = self.exclude_until_settled(name);
    Box::pin(async move {
      settle.await;
      render.store(true, Ordering::SeqCst);
    })
  }

  /// Exclude `name` from the cache for the settle delay. Overlapping refreshes
  /// of one name share a single set entry.
  pub fn refresh_by_name(&self, name: &str) -> BoxFuture<'static, ()> {
    self.exclude_until_settled(name.to_string())
  }

  fn exclude_until_settled(&self, name: String) -> BoxFuture<'static, ()> {
    lock(&self.exclude_cached_tabs).insert(name.clone());
    debug!(route = %name, "refresh started");
    let excluded = Arc::clone(&self.exclude_cached_tabs);
    let delay = self.refresh_delay;
    Box::pin(async move {
      tokio::time::sleep(delay).await;
      lock(&excluded).remove(&name);
      debug!(route = %name, "refresh finished");
    })
  }
}

/// Fields already set on the open tab win over the re-added route for
/// `affix_tab` and `new_tab_title`; other optional fields fall back to it.
fn merge_meta(incoming: &mut TabMeta, open: &TabMeta) {
  if open.affix_tab.is_some() {
    incoming.affix_tab = open.affix_tab;
  }
  if open.new_tab_title.is_some() {
    incoming.new_tab_title.clone_from(&open.new_tab_title);
  }
  if incoming.icon.is_none() {
    incoming.icon.clone_from(&open.icon);
  }
  incoming.affix_tab_order = incoming.affix_tab_order.or(open.affix_tab_order);
  incoming.max_num_of_open_tab = incoming.max_num_of_open_tab.or(open.max_num_of_open_tab);
  incoming.full_path_key = incoming.full_path_key.or(open.full_path_key);
}

fn freeze_title(meta: &mut TabMeta) {
  if let Some(title) = meta.new_tab_title.as_mut() {
    *title = title.snapshot();
  }
}

async fn go_to_tab<R: Router + ?Sized>(tab: &TabDefinition, router: &mut R) -> Result<(), NavError> {
  let target =
    RouteTarget { path: tab.path.clone(), params: tab.params.clone(), query: tab.query.clone() };
  router.replace(target).await
}
