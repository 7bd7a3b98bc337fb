//! A concrete grammar: subject/predicate/object triples. Ships as both a
//! demonstration grammar for `demo/` and a fixture for the engine's own
//! integration tests — a real `Syntagm`/`Sentence` pair exercises the
//! trait boundary the way no unit test over the trees alone can.

pub mod parse;
pub mod triples;

pub use triples::{Triple, Word};
