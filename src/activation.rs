use std::rc::Rc;

use crate::error::{Error, Result};
use crate::path::Assignment;
use crate::rule::Rule;
use crate::sentence::{substitute, Sentence};

/// A unit of pending work: a sentence that still needs to be matched
/// against the rules tree and installed in the facts tree.
///
/// `pinned` is `None` for a bare new-fact assertion (the common case,
/// produced by `tell(fact)` and by every emitted consequence), and
/// `Some` for the activations a rule's pre-population scan produces —
/// those already know exactly which `(rule, condition, assignment)` triple
/// they came from and skip the generic dedup/match steps (spec §4.4).
pub struct Activation<T: Sentence> {
  pub sentence: T,
  pub pinned: Option<(Rc<Rule<T>>, usize, Assignment<T::Syntagm>)>,
}

impl<T: Sentence> Activation<T> {
  pub fn fact(sentence: T) -> Self {
    Self { sentence, pinned: None }
  }

  pub fn pinned(
    sentence: T,
    rule: Rc<Rule<T>>,
    condition_index: usize,
    assignment: Assignment<T::Syntagm>,
  ) -> Self {
    Self { sentence, pinned: Some((rule, condition_index, assignment)) }
  }
}

/// The result of matching one `(rule, condition_index, assignment)` triple:
/// either every other condition is already known to hold and consequences
/// are ready to emit, or a more specialized rule needs telling.
pub enum Outcome<T: Sentence> {
  Specialize(Rule<T>),
  Emit(Vec<T>),
}

/// Implements the "specialize-or-emit" step (spec §4.4): consumes
/// `condition_index` out of `rule`'s conditions, substituting `assignment`
/// through everything that remains.
pub fn specialize_or_emit<T: Sentence>(
  rule: &Rule<T>,
  condition_index: usize,
  assignment: &Assignment<T::Syntagm>,
) -> Result<Outcome<T>> {
  let remaining = rule
    .conditions()
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != condition_index)
    .map(|(_, c)| substitute(c, assignment))
    .collect::<Result<Vec<T>>>()?;

  let new_consequences = rule
    .consequences()
    .iter()
    .map(|c| substitute(c, assignment))
    .collect::<Result<Vec<T>>>()?;

  if remaining.is_empty() {
    if let Some(bad) = new_consequences.iter().find(|c| !c.is_ground()) {
      return Err(Error::MalformedRule {
        detail: format!(
          "consequence \"{}\" still has an unbound variable after matching all conditions",
          bad
        ),
      });
    }
    Ok(Outcome::Emit(new_consequences))
  } else {
    Ok(Outcome::Specialize(Rule::new(remaining, new_consequences)?))
  }
}
