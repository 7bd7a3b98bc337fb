use crate::path::Assignment;
use crate::sentence::Sentence;
use crate::tree::DiscriminationTree;

/// Ground-only discrimination tree holding every fact the knowledge base
/// has asserted. A facts-tree node never has variable children (see
/// `tree::Node`), since `insert` is only ever called with ground paths.
pub struct FactsTree<T: Sentence> {
  tree: DiscriminationTree<T::Syntagm, T>,
}

impl<T: Sentence> FactsTree<T> {
  pub fn new() -> Self {
    Self { tree: DiscriminationTree::new() }
  }

  pub fn insert(&mut self, fact: &T) {
    self.tree.insert(&fact.canonical_paths(), fact.clone());
  }

  /// Undoes a single `insert`. Used only by `KnowledgeBase::tell`'s
  /// rollback path.
  pub fn remove(&mut self, fact: &T) -> bool {
    self.tree.remove(&fact.canonical_paths(), fact)
  }

  pub fn contains(&self, fact: &T) -> bool {
    self.tree.contains(&fact.canonical_paths())
  }

  /// Matches `pattern` (which may carry variables) against every stored
  /// fact, returning each hit paired with the assignment that produced it.
  pub fn query(&self, pattern: &T) -> Vec<(&T, Assignment<T::Syntagm>)> {
    self.tree.query(&pattern.canonical_paths())
  }
}

impl<T: Sentence> Default for FactsTree<T> {
  fn default() -> Self {
    Self::new()
  }
}
