use std::collections::HashSet;

use rulekit::grammar::{Triple, Word};
use rulekit::{Error, KnowledgeBase, Rule};

fn fact_strings<T: rulekit::Sentence>(kb: &KnowledgeBase<T>) -> HashSet<String> {
  kb.facts().map(|f| f.to_string()).collect()
}

fn transitive_subset_kb() -> KnowledgeBase<Triple> {
  let mut kb = KnowledgeBase::new();

  kb.tell(Rule::new(
    vec![Triple::new("X1", "is", "X2"), Triple::new("X2", "is", "X3")],
    vec![Triple::new("X1", "is", "X3")],
  ).unwrap()).unwrap();

  kb.tell(Rule::new(
    vec![Triple::new("X1", "isa", "X2"), Triple::new("X2", "is", "X3")],
    vec![Triple::new("X1", "isa", "X3")],
  ).unwrap()).unwrap();

  kb.tell(Triple::new("animal", "is", "thing")).unwrap();
  kb.tell(Triple::new("mammal", "is", "animal")).unwrap();
  kb.tell(Triple::new("primate", "is", "mammal")).unwrap();
  kb.tell(Triple::new("human", "is", "primate")).unwrap();
  kb.tell(Triple::new("susan", "isa", "human")).unwrap();

  kb
}

#[test]
fn transitive_subset_closure_is_exact() {
  let kb = transitive_subset_kb();
  let facts = fact_strings(&kb);

  let expected: HashSet<String> = [
    "animal is thing",
    "mammal is animal",
    "primate is mammal",
    "human is primate",
    "susan isa human",
    "mammal is thing",
    "primate is animal",
    "primate is thing",
    "human is mammal",
    "human is animal",
    "human is thing",
    "susan isa primate",
    "susan isa mammal",
    "susan isa animal",
    "susan isa thing",
  ]
  .into_iter()
  .map(str::to_string)
  .collect();

  assert_eq!(facts, expected);
}

#[test]
fn retelling_the_same_fact_is_a_no_op() {
  let mut kb = KnowledgeBase::new();
  kb.tell(Triple::new("a", "is", "b")).unwrap();
  kb.tell(Triple::new("a", "is", "b")).unwrap();
  assert_eq!(kb.facts().count(), 1);
}

#[test]
fn specialization_before_fact() {
  let mut kb = KnowledgeBase::new();

  kb.tell(Rule::new(
    vec![Triple::new("X1", "is", "X2"), Triple::new("X2", "is", "X3")],
    vec![Triple::new("X1", "is", "X3")],
  ).unwrap()).unwrap();

  kb.tell(Triple::new("a", "is", "b")).unwrap();

  assert!(kb.rules().any(|r| r.to_string() == "b is X3 -> a is X3"));

  kb.tell(Triple::new("b", "is", "c")).unwrap();
  assert!(fact_strings(&kb).contains("a is c"));
}

#[test]
fn fact_before_specialization() {
  let mut kb = KnowledgeBase::new();

  kb.tell(Triple::new("a", "is", "b")).unwrap();

  kb.tell(Rule::new(
    vec![Triple::new("X1", "is", "X2"), Triple::new("X2", "is", "X3")],
    vec![Triple::new("X1", "is", "X3")],
  ).unwrap()).unwrap();

  assert!(kb.rules().any(|r| r.to_string() == "b is X3 -> a is X3"));
  assert_eq!(kb.facts().count(), 1, "no derivation before \"b is c\" is known");

  kb.tell(Triple::new("b", "is", "c")).unwrap();
  assert!(fact_strings(&kb).contains("a is c"));
}

#[test]
fn malformed_rule_is_rejected_and_kb_is_untouched() {
  let mut kb = KnowledgeBase::new();
  kb.tell(Triple::new("a", "is", "b")).unwrap();

  let result = Rule::new(
    vec![Triple::new("X1", "is", "X2")],
    vec![Triple::new("X1", "is", "X3")],
  );

  assert!(matches!(result, Err(Error::MalformedRule { .. })));
  assert_eq!(kb.facts().count(), 1);
}

#[test]
fn query_with_variable_binds_it() {
  let kb = transitive_subset_kb();

  let pattern = Triple::new("X1", "isa", "thing");
  let hits: Vec<_> = kb.query(&pattern).collect();

  assert_eq!(hits.len(), 1);
  let (fact, assignment) = &hits[0];
  assert_eq!(fact.to_string(), "susan isa thing");
  assert_eq!(assignment.get(&Word::new("X1")), Some(&Word::new("susan")));
}
