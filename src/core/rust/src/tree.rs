/* src/core/rust/src/tree.rs */

// Pure n-ary tree helpers shared by routes and menus.
// Inputs are consumed or borrowed, never mutated in place. Cyclic input cannot be
// expressed with owned children, so every tree here is finite.

/// A node that owns an ordered list of children of its own type.
pub trait TreeNode: Sized {
  fn children(&self) -> &[Self];
  fn children_mut(&mut self) -> &mut Vec<Self>;
}

/// What `prune_tree` does with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retain {
  /// Keep the node; its children are still pruned.
  Keep,
  /// Keep the node only if at least one descendant survives.
  IfDescendants,
  /// Drop the node itself and splice its surviving children into its place.
  Hoist,
}

/// Map every node bottom-up. `transform` receives the node with its children
/// detached, together with the already transformed children.
pub fn map_tree<T, U, F>(nodes: Vec<T>, mut transform: F) -> Vec<U>
where
  T: TreeNode,
  F: FnMut(T, Vec<U>) -> U,
{
  map_nodes(nodes, &mut transform)
}

fn map_nodes<T, U, F>(nodes: Vec<T>, transform: &mut F) -> Vec<U>
where
  T: TreeNode,
  F: FnMut(T, Vec<U>) -> U,
{
  nodes
    .into_iter()
    .map(|mut node| {
      let children = map_nodes(std::mem::take(node.children_mut()), transform);
      transform(node, children)
    })
    .collect()
}

/// Keep every node that satisfies `predicate`, plus every ancestor needed to reach one.
pub fn filter_tree<T, F>(nodes: Vec<T>, mut predicate: F) -> Vec<T>
where
  T: TreeNode,
  F: FnMut(&T) -> bool,
{
  prune_tree(nodes, |node| if predicate(node) { Retain::Keep } else { Retain::IfDescendants })
}

/// General pruning. `decide` sees each node with its original children attached.
/// Relative order of surviving nodes is preserved, hoisted children included.
pub fn prune_tree<T, F>(nodes: Vec<T>, mut decide: F) -> Vec<T>
where
  T: TreeNode,
  F: FnMut(&T) -> Retain,
{
  let mut out = Vec::with_capacity(nodes.len());
  prune_nodes(nodes, &mut decide, &mut out);
  out
}

fn prune_nodes<T, F>(nodes: Vec<T>, decide: &mut F, out: &mut Vec<T>)
where
  T: TreeNode,
  F: FnMut(&T) -> Retain,
{
  for mut node in nodes {
    let verdict = decide(&node);
    let mut kept = Vec::new();
    prune_nodes(std::mem::take(node.children_mut()), decide, &mut kept);
    match verdict {
      Retain::Keep => {
        *node.children_mut() = kept;
        out.push(node);
      }
      Retain::IfDescendants => {
        if !kept.is_empty() {
          *node.children_mut() = kept;
          out.push(node);
        }
      }
      Retain::Hoist => out.extend(kept),
    }
  }
}

/// Pre-order flat list of `extract` applied to every node.
pub fn traverse_tree_values<T, V, F>(nodes: &[T], mut extract: F) -> Vec<V>
where
  T: TreeNode,
  F: FnMut(&T) -> V,
{
  let mut values = Vec::new();
  collect_values(nodes, &mut extract, &mut values);
  values
}

fn collect_values<T, V, F>(nodes: &[T], extract: &mut F, values: &mut Vec<V>)
where
  T: TreeNode,
  F: FnMut(&T) -> V,
{
  for node in nodes {
    values.push(extract(node));
    collect_values(node.children(), extract, values);
  }
}

/// First node in pre-order that matches `predicate`.
pub fn find_tree_node<'a, T, F>(nodes: &'a [T], mut predicate: F) -> Option<&'a T>
where
  T: TreeNode,
  F: FnMut(&T) -> bool,
{
  find_node(nodes, &mut predicate)
}

fn find_node<'a, T, F>(nodes: &'a [T], predicate: &mut F) -> Option<&'a T>
where
  T: TreeNode,
  F: FnMut(&T) -> bool,
{
  for node in nodes {
    if predicate(node) {
      return Some(node);
    }
    if let Some(found) = find_node(node.children(), predicate) {
      return Some(found);
    }
  }
  None
}

/// Stable sort of every level by `key`.
pub fn sort_tree_by_key<T, K, F>(nodes: &mut [T], mut key: F)
where
  T: TreeNode,
  K: Ord,
  F: FnMut(&T) -> K,
{
  sort_level(nodes, &mut key);
}

fn sort_level<T, K, F>(nodes: &mut [T], key: &mut F)
where
  T: TreeNode,
  K: Ord,
  F: FnMut(&T) -> K,
{
  nodes.sort_by_cached_key(&mut *key);
  for node in nodes.iter_mut() {
    sort_level(node.children_mut(), key);
  }
}
