use std::rc::Rc;

use crate::path::Assignment;
use crate::rule::Rule;
use crate::sentence::Sentence;
use crate::tree::DiscriminationTree;

/// What a rules-tree leaf carries: a shared reference to the rule plus
/// which of its conditions led to this leaf.
pub type RulePremise<T> = (Rc<Rule<T>>, usize);

/// Discrimination tree indexing every outstanding rule premise, admitting
/// variable paths (unlike the facts tree).
pub struct RulesTree<T: Sentence> {
  tree: DiscriminationTree<T::Syntagm, RulePremise<T>>,
}

impl<T: Sentence> RulesTree<T> {
  pub fn new() -> Self {
    Self { tree: DiscriminationTree::new() }
  }

  /// Inserts the premise at `condition_index` of `rule` as a leaf. Returns
  /// whether it was newly added.
  pub fn insert_condition(&mut self, rule: Rc<Rule<T>>, condition_index: usize) -> bool {
    let paths = rule.conditions()[condition_index].canonical_paths();
    self.tree.insert(&paths, (rule, condition_index))
  }

  /// Undoes a single `insert_condition`. Used only by rollback.
  pub fn remove_condition(&mut self, rule: &Rc<Rule<T>>, condition_index: usize) -> bool {
    let paths = rule.conditions()[condition_index].canonical_paths();
    self.tree.remove(&paths, &(rule.clone(), condition_index))
  }

  /// Matches an incoming ground fact against every outstanding premise,
  /// returning each hit paired with the assignment that produced it.
  pub fn query(&self, fact: &T) -> Vec<(&RulePremise<T>, Assignment<T::Syntagm>)> {
    self.tree.query(&fact.canonical_paths())
  }
}

impl<T: Sentence> Default for RulesTree<T> {
  fn default() -> Self {
    Self::new()
  }
}
