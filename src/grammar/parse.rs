//! Tiny line-oriented grammar for `demo/` and the integration tests: one
//! triple per fact, `;`-separated groups joined by `->` for a rule,
//! `#`-comments and blank lines ignored.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::sentence::Told;

use super::triples::Triple;

lazy_static! {
  static ref COMMENT_OR_BLANK: Regex = Regex::new(r"^\s*(#.*)?$").unwrap();
}

/// Whether a line of input carries nothing worth parsing.
pub fn is_comment_or_blank(line: &str) -> bool {
  COMMENT_OR_BLANK.is_match(line)
}

/// Parses one line into a fact or a rule. `->` splits premises from
/// consequences; `;` separates triples within each side.
pub fn parse_line(line: &str) -> Result<Told<Triple>> {
  let line = line.trim();
  match line.split_once("->") {
    Some((conditions, consequences)) => {
      let conditions = parse_triples(conditions)?;
      let consequences = parse_triples(consequences)?;
      Ok(Told::Rule(Rule::new(conditions, consequences)?))
    }
    None => {
      let mut triples = parse_triples(line)?;
      if triples.len() != 1 {
        return Err(Error::MalformedRule {
          detail: format!("expected one triple, got {} in \"{}\"", triples.len(), line),
        });
      }
      Ok(Told::Fact(triples.remove(0)))
    }
  }
}

/// Parses a bare pattern — same grammar as a fact, but not asserted, used
/// for `?`-prefixed queries.
pub fn parse_query(line: &str) -> Result<Triple> {
  let mut triples = parse_triples(line)?;
  if triples.len() != 1 {
    return Err(Error::MalformedRule {
      detail: format!("expected one triple in query, got {}", triples.len()),
    });
  }
  Ok(triples.remove(0))
}

fn parse_triples(group: &str) -> Result<Vec<Triple>> {
  group
    .split(';')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(parse_triple)
    .collect()
}

fn parse_triple(s: &str) -> Result<Triple> {
  match s.split_whitespace().collect::<Vec<_>>().as_slice() {
    [subject, predicate, object] => Ok(Triple::new(*subject, *predicate, *object)),
    words => Err(Error::MalformedRule {
      detail: format!("triple \"{}\" has {} words, expected 3", s, words.len()),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_a_fact() {
    match parse_line("dog likes bone").unwrap() {
      Told::Fact(t) => assert_eq!(t.to_string(), "dog likes bone"),
      Told::Rule(_) => panic!("expected a fact"),
    }
  }

  #[test]
  fn parses_a_rule() {
    match parse_line("X likes Y; Y likes X -> X friends Y").unwrap() {
      Told::Rule(r) => {
        assert_eq!(r.conditions().len(), 2);
        assert_eq!(r.consequences().len(), 1);
      }
      Told::Fact(_) => panic!("expected a rule"),
    }
  }

  #[test]
  fn rejects_malformed_triple() {
    assert!(parse_line("dog likes").is_err());
  }

  #[test]
  fn recognizes_comments_and_blanks() {
    assert!(is_comment_or_blank("  "));
    assert!(is_comment_or_blank("# a comment"));
    assert!(!is_comment_or_blank("dog likes bone"));
  }
}
