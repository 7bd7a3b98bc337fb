use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::error::Result;
use crate::path::{canonical_order, substitute_path, unify_path, Assignment, Path};
use crate::syntagm::Syntagm;

/// A fact or rule-premise tree, decomposed into a set of root-to-leaf paths.
///
/// `paths` and `from_paths` must round-trip: `from_paths(s.paths()) == s`.
/// The engine only ever calls `from_paths` on path-sets it derived itself
/// (by substitution), so a grammar that rejects a malformed reconstruction
/// surfaces as `Error::GrammarViolation`.
pub trait Sentence: Clone + Eq + Hash + fmt::Display + Sized {
  type Syntagm: Syntagm;

  fn paths(&self) -> HashSet<Path<Self::Syntagm>>;
  fn from_paths(paths: HashSet<Path<Self::Syntagm>>) -> Result<Self>;

  /// Whether every path in this sentence is ground — i.e. it's a fact, not
  /// a pattern.
  fn is_ground(&self) -> bool {
    self.paths().iter().all(|p| p.is_ground())
  }

  /// This sentence's paths in canonical order (see `path::canonical_order`).
  fn canonical_paths(&self) -> Vec<Path<Self::Syntagm>> {
    canonical_order(self.paths())
  }
}

/// Either half of what a caller can hand to `KnowledgeBase::tell`.
pub enum Told<T: Sentence> {
  Fact(T),
  Rule(crate::rule::Rule<T>),
}

impl<T: Sentence> From<T> for Told<T> {
  fn from(fact: T) -> Self {
    Told::Fact(fact)
  }
}

impl<T: Sentence> From<crate::rule::Rule<T>> for Told<T> {
  fn from(rule: crate::rule::Rule<T>) -> Self {
    Told::Rule(rule)
  }
}

/// Replaces every variable in `sentence` bound by `assignment`, then asks
/// the grammar to reconstruct a sentence from the resulting path-set.
pub fn substitute<T: Sentence>(sentence: &T, assignment: &Assignment<T::Syntagm>) -> Result<T> {
  let paths = sentence
    .canonical_paths()
    .into_iter()
    .map(|p| substitute_path(&p, assignment))
    .collect();
  T::from_paths(paths)
}

/// Computes a path-wise bijection between `pattern` and `fact`, succeeding
/// only if every path-level unification is mutually consistent.
pub fn matches<T: Sentence>(pattern: &T, fact: &T) -> Option<Assignment<T::Syntagm>> {
  let pattern_paths = pattern.canonical_paths();
  let fact_paths = fact.canonical_paths();
  if pattern_paths.len() != fact_paths.len() {
    return None;
  }

  let mut assignment = Assignment::new();
  for (p, f) in pattern_paths.iter().zip(fact_paths.iter()) {
    let step = unify_path(p, f)?;
    assignment = assignment.merge(&step)?;
  }
  Some(assignment)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::Triple;

  #[test]
  fn matches_binds_the_pattern_variable_to_the_fact_value() {
    let pattern = Triple::new("X1", "is", "b");
    let fact = Triple::new("a", "is", "b");
    let assignment = matches(&pattern, &fact).expect("pattern should match fact");
    assert_eq!(assignment.get(&crate::grammar::Word::new("X1")), Some(&crate::grammar::Word::new("a")));
  }

  #[test]
  fn matches_rejects_a_repeated_variable_bound_to_two_different_values() {
    let pattern = Triple::new("X1", "is", "X1");
    let fact = Triple::new("a", "is", "b");
    assert!(matches(&pattern, &fact).is_none());
  }
}
