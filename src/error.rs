use thiserror::Error;

/// Everything that can go wrong in a single `tell` call.
///
/// `GrammarViolation` and `MalformedRule` abort the `tell` that raised
/// them and leave the knowledge base exactly as it was before that call
/// started (see `kb::KnowledgeBase::tell` for the undo-log that makes
/// this true even partway through a multi-activation cascade).
/// `InvariantViolation` means that guarantee itself failed to hold.
#[derive(Debug, Error)]
pub enum Error {
  /// The grammar rejected a path-set the engine tried to reconstruct into a
  /// sentence, either the one the caller told directly or one produced
  /// internally by substitution during rule specialization.
  #[error("grammar violation: {detail}")]
  GrammarViolation { detail: String },

  /// A rule has no conditions, or mentions a consequence variable that no
  /// condition binds.
  #[error("malformed rule: {detail}")]
  MalformedRule { detail: String },

  /// Internal consistency was broken; this should be unreachable.
  #[error("invariant violation: {detail}")]
  InvariantViolation { detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;
