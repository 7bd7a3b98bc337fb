use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::syntagm::Syntagm;

/// A root-to-leaf tuple of syntagms through a sentence's syntax tree.
///
/// Non-empty by construction. A path is *variable* iff its final syntagm is
/// a variable — the grammar contract disallows variables anywhere but a
/// leaf, so every other position is guaranteed ground.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<S: Syntagm>(Vec<S>);

impl<S: Syntagm> Path<S> {
  pub fn new(syntagms: Vec<S>) -> Self {
    assert!(!syntagms.is_empty(), "path must be non-empty");
    Self(syntagms)
  }

  pub fn syntagms(&self) -> &[S] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    false
  }

  /// The leaf syntagm — always present, a path is never empty.
  pub fn leaf(&self) -> &S {
    self.0.last().expect("path is non-empty")
  }

  pub fn is_variable(&self) -> bool {
    self.leaf().is_variable()
  }

  pub fn is_ground(&self) -> bool {
    !self.is_variable()
  }

  /// Key used for the canonical total order over paths (see module docs):
  /// `Display` string at every position, except the last, where ground
  /// syntagms are keyed to sort before variables sharing the same prefix.
  fn order_key(&self) -> Vec<(bool, String)> {
    let last = self.0.len() - 1;
    self
      .0
      .iter()
      .enumerate()
      .map(|(i, s)| (i == last && s.is_variable(), s.to_string()))
      .collect()
  }
}

impl<S: Syntagm> PartialOrd for Path<S> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<S: Syntagm> Ord for Path<S> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.order_key().cmp(&other.order_key())
  }
}

impl<S: Syntagm> fmt::Display for Path<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, s) in self.0.iter().enumerate() {
      if i > 0 {
        write!(f, ".")?;
      }
      write!(f, "{}", s)?;
    }
    Ok(())
  }
}

/// Sort a sentence's path set into the canonical order the discrimination
/// tree descends through: ground prefixes first, variable-terminal paths
/// sharing a prefix last.
pub fn canonical_order<S: Syntagm>(paths: impl IntoIterator<Item = Path<S>>) -> Vec<Path<S>> {
  let mut v: Vec<_> = paths.into_iter().collect();
  v.sort();
  v
}

/// A finite mapping from variable-syntagms to the syntagm they're bound to
/// (possibly another variable, pending further resolution).
#[derive(Debug, Clone)]
pub struct Assignment<S: Syntagm>(HashMap<S, S>);

impl<S: Syntagm> Default for Assignment<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: Syntagm> Assignment<S> {
  pub fn new() -> Self {
    Self(HashMap::new())
  }

  pub fn single(var: S, value: S) -> Self {
    let mut m = HashMap::new();
    m.insert(var, value);
    Self(m)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn get(&self, var: &S) -> Option<&S> {
    self.0.get(var)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&S, &S)> {
    self.0.iter()
  }

  /// Follows a chain of variable bindings to its final image. Bounded by
  /// the assignment's own size so a (shouldn't-happen) binding cycle can't
  /// spin forever — it just returns the last value seen.
  pub fn resolve(&self, s: &S) -> S {
    let mut current = s.clone();
    for _ in 0..=self.0.len() {
      if !current.is_variable() {
        return current;
      }
      match self.0.get(&current) {
        Some(next) if *next != current => current = next.clone(),
        _ => return current,
      }
    }
    current
  }

  /// Binds `var` to `value`, resolving `value` first. Fails if `var` is
  /// already bound to something else.
  pub fn bind(&mut self, var: S, value: S) -> bool {
    let value = self.resolve(&value);
    match self.0.get(&var) {
      Some(existing) if *existing != value => false,
      _ => {
        self.0.insert(var, value);
        true
      }
    }
  }

  /// Combines two assignments, failing if they disagree on any shared
  /// variable.
  pub fn merge(&self, other: &Self) -> Option<Self> {
    let mut merged = self.clone();
    for (var, value) in other.iter() {
      if !merged.bind(var.clone(), value.clone()) {
        return None;
      }
    }
    Some(merged)
  }
}

impl<S: Syntagm> PartialEq for Assignment<S> {
  fn eq(&self, other: &Self) -> bool {
    self.0 == other.0
  }
}
impl<S: Syntagm> Eq for Assignment<S> {}

impl<S: Syntagm> Hash for Assignment<S> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    let mut pairs: Vec<_> = self.0.iter().collect();
    pairs.sort_by_key(|(k, _)| k.to_string());
    for (k, v) in pairs {
      k.hash(state);
      v.hash(state);
    }
  }
}

/// Replaces every variable syntagm in `path` that's bound in `assignment`
/// with its resolved image; everything else passes through unchanged.
pub fn substitute_path<S: Syntagm>(path: &Path<S>, assignment: &Assignment<S>) -> Path<S> {
  let substituted = path
    .syntagms()
    .iter()
    .map(|s| if s.is_variable() { assignment.resolve(s) } else { s.clone() })
    .collect();
  Path::new(substituted)
}

/// Unifies a single pattern path against a single ground fact path. Both
/// must have identical length. Since only a path's leaf may be a variable,
/// this only ever produces zero or one binding.
pub fn unify_path<S: Syntagm>(pattern: &Path<S>, fact: &Path<S>) -> Option<Assignment<S>> {
  if pattern.len() != fact.len() {
    return None;
  }
  let (p, f) = (pattern.syntagms(), fact.syntagms());
  for i in 0..p.len() - 1 {
    if p[i] != f[i] {
      return None;
    }
  }
  let (pl, fl) = (pattern.leaf(), fact.leaf());
  if pl.is_variable() {
    Some(Assignment::single(pl.clone(), fl.clone()))
  } else if pl == fl {
    Some(Assignment::new())
  } else {
    None
  }
}
