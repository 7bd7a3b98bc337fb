use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::sentence::Sentence;
use crate::syntagm::Syntagm;

/// An atomic token: `likes`, `dog`, `susan` are words; a word starting
/// with a capital `X` (`X1`, `X2`, `Xfoo`) is a variable instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
  pub fn new(s: impl Into<String>) -> Self {
    Self(s.into())
  }
}

impl From<&str> for Word {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

impl From<String> for Word {
  fn from(s: String) -> Self {
    Self(s)
  }
}

impl Syntagm for Word {
  fn is_variable(&self) -> bool {
    self.0.starts_with('X')
  }
}

impl fmt::Display for Word {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

const SUBJECT: &str = "subject";
const PREDICATE: &str = "predicate";
const OBJECT: &str = "object";

/// A subject/predicate/object triple — `dog likes bone`, or `X likes Y` as
/// a rule premise. Each position is independently ground or a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
  pub subject: Word,
  pub predicate: Word,
  pub object: Word,
}

impl Triple {
  pub fn new(subject: impl Into<Word>, predicate: impl Into<Word>, object: impl Into<Word>) -> Self {
    Self { subject: subject.into(), predicate: predicate.into(), object: object.into() }
  }
}

impl Sentence for Triple {
  type Syntagm = Word;

  fn paths(&self) -> HashSet<Path<Word>> {
    [
      Path::new(vec![Word::new(SUBJECT), self.subject.clone()]),
      Path::new(vec![Word::new(PREDICATE), self.predicate.clone()]),
      Path::new(vec![Word::new(OBJECT), self.object.clone()]),
    ]
    .into_iter()
    .collect()
  }

  fn from_paths(paths: HashSet<Path<Word>>) -> Result<Self> {
    if paths.len() != 3 {
      return Err(Error::GrammarViolation {
        detail: format!("triple must reconstruct from exactly three paths, got {}", paths.len()),
      });
    }

    let mut subject = None;
    let mut predicate = None;
    let mut object = None;

    for path in &paths {
      let syntagms = path.syntagms();
      if syntagms.len() != 2 {
        return Err(Error::GrammarViolation {
          detail: format!("triple path \"{}\" does not have exactly two elements", path),
        });
      }
      let (field, slot) = match syntagms[0].0.as_str() {
        SUBJECT => (SUBJECT, &mut subject),
        PREDICATE => (PREDICATE, &mut predicate),
        OBJECT => (OBJECT, &mut object),
        other => {
          return Err(Error::GrammarViolation {
            detail: format!("unknown triple field \"{}\"", other),
          })
        }
      };
      if slot.is_some() {
        return Err(Error::GrammarViolation {
          detail: format!("triple path set names field \"{}\" more than once", field),
        });
      }
      *slot = Some(syntagms[1].clone());
    }

    let missing = [
      (SUBJECT, subject.is_none()),
      (PREDICATE, predicate.is_none()),
      (OBJECT, object.is_none()),
    ]
    .into_iter()
    .filter(|(_, missing)| *missing)
    .map(|(field, _)| field)
    .collect::<Vec<_>>();

    if !missing.is_empty() {
      return Err(Error::GrammarViolation {
        detail: format!("triple path set is missing field(s): {}", missing.join(", ")),
      });
    }

    Ok(Self {
      subject: subject.expect("checked above"),
      predicate: predicate.expect("checked above"),
      object: object.expect("checked above"),
    })
  }
}

impl fmt::Display for Triple {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} {}", self.subject, self.predicate, self.object)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn variables_are_words_starting_with_capital_x() {
    assert!(!Word::new("dog").is_variable());
    assert!(!Word::new("Who").is_variable());
    assert!(Word::new("X1").is_variable());
    assert!(Word::new("Xfoo").is_variable());
  }

  #[test]
  fn paths_round_trip() {
    let t = Triple::new("dog", "likes", "bone");
    assert_eq!(Triple::from_paths(t.paths()).unwrap(), t);
  }

  #[test]
  fn from_paths_rejects_wrong_count() {
    let mut paths = Triple::new("dog", "likes", "bone").paths();
    paths.remove(&Path::new(vec![Word::new(OBJECT), Word::new("bone")]));
    assert!(Triple::from_paths(paths).is_err());
  }

  #[test]
  fn from_paths_rejects_a_missing_field_even_with_three_paths() {
    // Same path count as a valid triple, but "subject" appears twice and
    // "object" is absent — must error, not panic on the missing object.
    let mut paths = Triple::new("dog", "likes", "bone").paths();
    paths.remove(&Path::new(vec![Word::new(OBJECT), Word::new("bone")]));
    paths.insert(Path::new(vec![Word::new(SUBJECT), Word::new("cat")]));
    assert_eq!(paths.len(), 3);
    assert!(matches!(Triple::from_paths(paths), Err(Error::GrammarViolation { .. })));
  }
}
