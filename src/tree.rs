use std::collections::HashMap;

use crate::path::{unify_path, Assignment, Path};
use crate::syntagm::Syntagm;

/// One node of a discrimination tree. Ground children are addressed by a
/// single `HashMap` lookup keyed on the whole next path — that's the
/// hash-indexed branching the spec's sub-logarithmic cost claim rests on.
/// Variable children (rules-tree only; a facts-tree node never has any,
/// since facts carry no variables) are kept in an insertion-ordered `Vec`
/// instead, since `Syntagm` promises no `Ord` to key a sorted structure by.
struct Node<S: Syntagm, V> {
  ground_children: HashMap<Path<S>, Box<Node<S, V>>>,
  variable_children: Vec<(Path<S>, Box<Node<S, V>>)>,
  payload: Vec<V>,
}

impl<S: Syntagm, V> Node<S, V> {
  fn new() -> Self {
    Self {
      ground_children: HashMap::new(),
      variable_children: Vec::new(),
      payload: Vec::new(),
    }
  }

  fn is_empty(&self) -> bool {
    self.payload.is_empty() && self.ground_children.is_empty() && self.variable_children.is_empty()
  }
}

impl<S: Syntagm, V: PartialEq> Node<S, V> {
  /// Returns whether the payload was newly added (`false` if an equal
  /// payload was already stored at this leaf — discrimination trees dedup
  /// at the leaf, not the caller).
  fn insert(&mut self, paths: &[Path<S>], idx: usize, payload: V) -> bool {
    if idx == paths.len() {
      if self.payload.contains(&payload) {
        return false;
      }
      self.payload.push(payload);
      return true;
    }

    let path = &paths[idx];
    if path.is_variable() {
      if let Some((_, child)) = self.variable_children.iter_mut().find(|(p, _)| p == path) {
        child.insert(paths, idx + 1, payload)
      } else {
        let mut child = Box::new(Node::new());
        let inserted = child.insert(paths, idx + 1, payload);
        self.variable_children.push((path.clone(), child));
        inserted
      }
    } else {
      let child = self
        .ground_children
        .entry(path.clone())
        .or_insert_with(|| Box::new(Node::new()));
      child.insert(paths, idx + 1, payload)
    }
  }

  /// Undoes a single `insert`. Returns whether the payload was actually
  /// found and removed — a caller unwinding its own undo log should treat
  /// `false` as an internal invariant violation, since it means the log
  /// disagreed with the tree's actual contents.
  fn remove(&mut self, paths: &[Path<S>], idx: usize, payload: &V) -> bool {
    if idx == paths.len() {
      return match self.payload.iter().position(|p| p == payload) {
        Some(pos) => {
          self.payload.remove(pos);
          true
        }
        None => false,
      };
    }

    let path = &paths[idx];
    if path.is_variable() {
      let Some(pos) = self.variable_children.iter().position(|(p, _)| p == path) else {
        return false;
      };
      let removed = self.variable_children[pos].1.remove(paths, idx + 1, payload);
      if removed && self.variable_children[pos].1.is_empty() {
        self.variable_children.remove(pos);
      }
      removed
    } else {
      let mut prune = false;
      let removed = match self.ground_children.get_mut(path) {
        Some(child) => {
          let removed = child.remove(paths, idx + 1, payload);
          if removed && child.is_empty() {
            prune = true;
          }
          removed
        }
        None => false,
      };
      if prune {
        self.ground_children.remove(path);
      }
      removed
    }
  }

  /// Exact descent on a fully ground path-set: one `HashMap` lookup per
  /// level, no unification. Used for dedup checks.
  fn contains(&self, paths: &[Path<S>], idx: usize) -> bool {
    if idx == paths.len() {
      return !self.payload.is_empty();
    }
    match self.ground_children.get(&paths[idx]) {
      Some(child) => child.contains(paths, idx + 1),
      None => false,
    }
  }

  fn query<'a>(
    &'a self,
    paths: &[Path<S>],
    idx: usize,
    assignment: &Assignment<S>,
    out: &mut Vec<(&'a V, Assignment<S>)>,
  ) {
    if idx == paths.len() {
      out.extend(self.payload.iter().map(|v| (v, assignment.clone())));
      return;
    }

    let path = &paths[idx];
    if path.is_ground() {
      // Fast path: single hash lookup for the ground branch.
      if let Some(child) = self.ground_children.get(path) {
        child.query(paths, idx + 1, assignment, out);
      }
      // The node may *also* have variable branches (rules tree only) whose
      // shape matches this ground query path; visit them in insertion
      // order (see module docs on tie-breaking).
      for (pattern, child) in &self.variable_children {
        if let Some(step) = unify_path(pattern, path) {
          if let Some(merged) = assignment.merge(&step) {
            child.query(paths, idx + 1, &merged, out);
          }
        }
      }
    } else {
      // The query itself carries a variable (a rule premise being
      // pre-populated against the facts tree). The facts tree never has
      // variable children of its own, so every candidate lives in
      // `ground_children`; each one has to be tried, since a `HashMap`
      // keyed on the ground value can't be looked up by a pattern.
      for (candidate, child) in &self.ground_children {
        if let Some(step) = unify_path(path, candidate) {
          if let Some(merged) = assignment.merge(&step) {
            child.query(paths, idx + 1, &merged, out);
          }
        }
      }
    }
  }
}

/// A mutable n-ary tree addressed by path-suffixes, shared by the rules
/// tree and the facts tree (see `rules_tree` / `facts_tree`).
pub struct DiscriminationTree<S: Syntagm, V> {
  root: Node<S, V>,
}

impl<S: Syntagm, V: PartialEq> DiscriminationTree<S, V> {
  pub fn new() -> Self {
    Self { root: Node::new() }
  }

  /// Returns whether the payload was newly added (see `Node::insert`).
  pub fn insert(&mut self, paths: &[Path<S>], payload: V) -> bool {
    self.root.insert(paths, 0, payload)
  }

  pub fn remove(&mut self, paths: &[Path<S>], payload: &V) -> bool {
    self.root.remove(paths, 0, payload)
  }

  pub fn contains(&self, paths: &[Path<S>]) -> bool {
    self.root.contains(paths, 0)
  }

  pub fn query(&self, paths: &[Path<S>]) -> Vec<(&V, Assignment<S>)> {
    let mut out = Vec::new();
    self.root.query(paths, 0, &Assignment::new(), &mut out);
    out
  }
}

impl<S: Syntagm, V: PartialEq> Default for DiscriminationTree<S, V> {
  fn default() -> Self {
    Self::new()
  }
}
