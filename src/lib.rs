//! A forward-chaining production rule engine built around a discrimination
//! network: facts and rule premises are both indexed by a hash-branching
//! tree keyed on path-suffixes, so matching a new fact against the
//! outstanding rule premises costs a handful of `HashMap` lookups rather
//! than a scan. Asserting anything (`KnowledgeBase::tell`) runs the
//! resulting activation cascade — specialization of partially matched
//! rules, emission of fully matched consequences — to a fixpoint before
//! returning.
//!
//! The engine is generic over what a "sentence" is: `grammar::triples`
//! ships one concrete grammar (subject/predicate/object triples, bindable
//! on any position) as both a demonstration and a test fixture.

pub mod activation;
pub mod error;
pub mod facts_tree;
pub mod grammar;
pub mod kb;
pub mod path;
pub mod rule;
pub mod rules_tree;
pub mod sentence;
pub mod syntagm;
pub mod tree;

pub use crate::error::{Error, Result};
pub use crate::kb::KnowledgeBase;
pub use crate::path::{Assignment, Path};
pub use crate::rule::Rule;
pub use crate::sentence::{Sentence, Told};
pub use crate::syntagm::Syntagm;
