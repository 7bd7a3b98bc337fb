use std::collections::VecDeque;
use std::rc::Rc;

use crate::activation::{self, Activation, Outcome};
use crate::error::{Error, Result};
use crate::facts_tree::FactsTree;
use crate::path::Assignment;
use crate::rule::Rule;
use crate::rules_tree::RulesTree;
use crate::sentence::{Sentence, Told};

/// One step this `tell` call performed, kept so a later error in the same
/// cascade can be unwound without leaving the trees or bookkeeping lists
/// partially mutated (spec §7).
enum UndoEntry<T: Sentence> {
  Fact(T),
  RuleCondition(Rc<Rule<T>>, usize),
  RuleRegistered(Rc<Rule<T>>),
}

/// Owns both discrimination trees and the activation queue; `tell` is the
/// only way in, `query`/`facts`/`rules` are read-only.
///
/// `tell` runs to a fixpoint before returning — between calls the knowledge
/// base always holds the full closure of everything told so far.
pub struct KnowledgeBase<T: Sentence> {
  facts_tree: FactsTree<T>,
  rules_tree: RulesTree<T>,
  facts: Vec<T>,
  rules: Vec<Rc<Rule<T>>>,
  queue: VecDeque<Activation<T>>,
}

impl<T: Sentence> KnowledgeBase<T> {
  pub fn new() -> Self {
    Self {
      facts_tree: FactsTree::new(),
      rules_tree: RulesTree::new(),
      facts: Vec::new(),
      rules: Vec::new(),
      queue: VecDeque::new(),
    }
  }

  /// Asserts a fact or tells a rule, driving the activation cascade it
  /// triggers to completion before returning. On an ordinary error (a
  /// malformed rule somewhere in the cascade) the knowledge base is left
  /// exactly as it was before this call. An `Error::InvariantViolation`
  /// means rollback itself couldn't finish, so that guarantee no longer
  /// holds — this should be unreachable in practice.
  pub fn tell(&mut self, input: impl Into<Told<T>>) -> Result<()> {
    let mut undo = Vec::new();

    let outcome = (|| -> Result<()> {
      match input.into() {
        Told::Fact(fact) => self.queue.push_back(Activation::fact(fact)),
        Told::Rule(rule) => self.tell_rule(rule, &mut undo)?,
      }
      self.drain(&mut undo)
    })();

    if let Err(err) = outcome {
      self.queue.clear();
      // A failure unwinding the undo log means the KB itself is now
      // inconsistent, not just that this one `tell` was rejected, so it
      // takes precedence over the original error.
      self.rollback(undo)?;
      return Err(err);
    }

    debug_assert!(self.queue.is_empty(), "tell must return at a fixpoint");
    Ok(())
  }

  /// Pattern query against the facts tree. Pure read: does not enqueue
  /// activations and may be freely interleaved with other queries.
  pub fn query<'a>(&'a self, pattern: &T) -> impl Iterator<Item = (&'a T, Assignment<T::Syntagm>)> {
    self.facts_tree.query(pattern).into_iter()
  }

  /// All asserted facts, in the order they were installed.
  pub fn facts(&self) -> impl Iterator<Item = &T> {
    self.facts.iter()
  }

  /// Every outstanding rule (both user-told and engine-derived
  /// specializations), in the order each was first registered.
  pub fn rules(&self) -> impl Iterator<Item = &Rc<Rule<T>>> {
    self.rules.iter()
  }

  fn drain(&mut self, undo: &mut Vec<UndoEntry<T>>) -> Result<()> {
    while let Some(activation) = self.queue.pop_front() {
      self.process(activation, undo)?;
    }
    Ok(())
  }

  fn process(&mut self, activation: Activation<T>, undo: &mut Vec<UndoEntry<T>>) -> Result<()> {
    let Activation { sentence, pinned } = activation;

    if let Some((rule, condition_index, assignment)) = pinned {
      return self.apply_outcome(
        activation::specialize_or_emit(&rule, condition_index, &assignment)?,
        undo,
      );
    }

    // Bare new-fact assertion: dedup, then match generically, then install.
    if self.facts_tree.contains(&sentence) {
      return Ok(());
    }

    let hits: Vec<(Rc<Rule<T>>, usize, Assignment<T::Syntagm>)> = self
      .rules_tree
      .query(&sentence)
      .into_iter()
      .map(|((rule, idx), assignment)| (rule.clone(), *idx, assignment))
      .collect();

    // Compute every outcome before mutating anything, so a malformed
    // derived rule aborts this whole activation cleanly.
    let outcomes = hits
      .iter()
      .map(|(rule, idx, assignment)| activation::specialize_or_emit(rule, *idx, assignment))
      .collect::<Result<Vec<_>>>()?;

    // Specializations are inserted before any consequence they're grouped
    // with in this activation is enqueued (spec §5), regardless of the
    // order the tree query happened to yield them in.
    let (specializations, emissions): (Vec<Rule<T>>, Vec<Vec<T>>) =
      outcomes.into_iter().fold((Vec::new(), Vec::new()), |mut acc, outcome| {
        match outcome {
          Outcome::Specialize(rule) => acc.0.push(rule),
          Outcome::Emit(consequences) => acc.1.push(consequences),
        }
        acc
      });

    for specialized in specializations {
      self.tell_rule(specialized, undo)?;
    }
    for consequences in emissions {
      for consequence in consequences {
        self.queue.push_back(Activation::fact(consequence));
      }
    }

    tracing::info!("adding fact \"{}\"", sentence);
    self.facts_tree.insert(&sentence);
    self.facts.push(sentence.clone());
    undo.push(UndoEntry::Fact(sentence));

    Ok(())
  }

  fn apply_outcome(&mut self, outcome: Outcome<T>, undo: &mut Vec<UndoEntry<T>>) -> Result<()> {
    match outcome {
      Outcome::Specialize(rule) => self.tell_rule(rule, undo),
      Outcome::Emit(consequences) => {
        for consequence in consequences {
          self.queue.push_back(Activation::fact(consequence));
        }
        Ok(())
      }
    }
  }

  /// Registers a rule (user-told or engine-derived), inserts each of its
  /// conditions into the rules tree, and pre-populates activations for
  /// facts already present. Idempotent: a structurally identical rule
  /// that's already registered is a no-op, matching the rules tree's own
  /// leaf-level idempotence.
  fn tell_rule(&mut self, rule: Rule<T>, undo: &mut Vec<UndoEntry<T>>) -> Result<()> {
    if self.rules.iter().any(|existing| **existing == rule) {
      return Ok(());
    }

    let rule = Rc::new(rule);
    tracing::info!("adding rule \"{}\"", rule);
    self.rules.push(rule.clone());
    undo.push(UndoEntry::RuleRegistered(rule.clone()));

    for condition_index in 0..rule.conditions().len() {
      if self.rules_tree.insert_condition(rule.clone(), condition_index) {
        undo.push(UndoEntry::RuleCondition(rule.clone(), condition_index));
      }

      let pattern = &rule.conditions()[condition_index];
      let hits: Vec<(T, Assignment<T::Syntagm>)> = self
        .facts_tree
        .query(pattern)
        .into_iter()
        .map(|(fact, assignment)| (fact.clone(), assignment))
        .collect();
      for (fact, assignment) in hits {
        self.queue.push_back(Activation::pinned(fact, rule.clone(), condition_index, assignment));
      }
    }

    Ok(())
  }

  /// Unwinds `undo` in reverse order. Every step here is expected to
  /// succeed: a step that can't find what it's supposed to remove means
  /// the undo log disagreed with the trees' or bookkeeping lists' actual
  /// contents, which `Error::InvariantViolation` reports rather than
  /// panicking the process.
  fn rollback(&mut self, undo: Vec<UndoEntry<T>>) -> Result<()> {
    for entry in undo.into_iter().rev() {
      match entry {
        UndoEntry::Fact(fact) => {
          if self.facts.pop().as_ref() != Some(&fact) {
            return Err(Error::InvariantViolation {
              detail: format!("fact bookkeeping desynced from undo log while removing \"{}\"", fact),
            });
          }
          if !self.facts_tree.remove(&fact) {
            return Err(Error::InvariantViolation {
              detail: format!("rollback couldn't find fact \"{}\" to remove", fact),
            });
          }
        }
        UndoEntry::RuleCondition(rule, condition_index) => {
          if !self.rules_tree.remove_condition(&rule, condition_index) {
            return Err(Error::InvariantViolation {
              detail: format!(
                "rollback couldn't find rule condition {} of \"{}\" to remove",
                condition_index, rule
              ),
            });
          }
        }
        UndoEntry::RuleRegistered(rule) => {
          let desynced = match self.rules.pop() {
            Some(popped) => *popped != *rule,
            None => true,
          };
          if desynced {
            return Err(Error::InvariantViolation {
              detail: format!("rule bookkeeping desynced from undo log while removing \"{}\"", rule),
            });
          }
        }
      }
    }
    Ok(())
  }
}

impl<T: Sentence> Default for KnowledgeBase<T> {
  fn default() -> Self {
    Self::new()
  }
}
