use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::sentence::Sentence;

/// Conditions + consequences, each a sentence, possibly carrying variables.
///
/// Constructed only through `Rule::new`, which enforces the two invariants
/// the spec demands: at least one condition, and every consequence variable
/// bound by some condition. Both user-told rules and engine-derived
/// specialized rules go through this same constructor, so both are checked
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule<T: Sentence> {
  conditions: Vec<T>,
  consequences: Vec<T>,
}

impl<T: Sentence> Rule<T> {
  pub fn new(conditions: Vec<T>, consequences: Vec<T>) -> Result<Self> {
    if conditions.is_empty() {
      return Err(Error::MalformedRule {
        detail: "rule has no conditions — assert a fact instead".to_string(),
      });
    }

    let condition_vars = variables_of(conditions.iter());
    let consequence_vars = variables_of(consequences.iter());
    if let Some(unbound) = consequence_vars.iter().find(|v| !condition_vars.contains(*v)) {
      return Err(Error::MalformedRule {
        detail: format!(
          "consequence variable \"{}\" is not bound by any condition",
          unbound
        ),
      });
    }

    Ok(Self { conditions, consequences })
  }

  pub fn conditions(&self) -> &[T] {
    &self.conditions
  }

  pub fn consequences(&self) -> &[T] {
    &self.consequences
  }
}

fn variables_of<'a, T: Sentence + 'a>(sentences: impl Iterator<Item = &'a T>) -> HashSet<T::Syntagm> {
  sentences
    .flat_map(|s| s.paths().into_iter().map(|p| p.leaf().clone()))
    .filter(|s| s.is_variable())
    .collect()
}

impl<T: Sentence> fmt::Display for Rule<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, c) in self.conditions.iter().enumerate() {
      if i > 0 {
        write!(f, "; ")?;
      }
      write!(f, "{}", c)?;
    }
    write!(f, " -> ")?;
    for (i, c) in self.consequences.iter().enumerate() {
      if i > 0 {
        write!(f, "; ")?;
      }
      write!(f, "{}", c)?;
    }
    Ok(())
  }
}
