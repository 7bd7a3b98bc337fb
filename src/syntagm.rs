use std::fmt;
use std::hash::Hash;

/// An atomic, opaque element of a sentence's syntax tree.
///
/// The engine never inspects a syntagm beyond these capabilities: it hashes
/// them, compares them, displays them in logs, and asks whether they stand
/// for a universally quantified variable. Everything else is the grammar's
/// business.
///
/// Two syntagms with equal `Display` output must be `Eq` and hash equal —
/// the discrimination tree's canonical path order (see `path::canonical_key`)
/// relies on `Display` as a total-order proxy, since the trait doesn't
/// require `Ord`.
pub trait Syntagm: Clone + Eq + Hash + fmt::Display {
  /// Whether this syntagm stands for a universally quantified variable.
  /// Variables are themselves syntagms — there's no separate type for them.
  fn is_variable(&self) -> bool;
}
