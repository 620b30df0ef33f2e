/// Crate-wide result alias.
pub type BlockmotionResult<T> = Result<T, BlockmotionError>;

/// Crate error taxonomy.
///
/// Construction-time errors (`InvalidDuration`, `EmptyGroup`,
/// `ConflictingAnimation`) are surfaced synchronously when a timeline is
/// declared and never during playback. Playback-time errors (`UnknownEntity`,
/// `ResolverFailure`) abort the entire run; there is no partial-frame
/// recovery and nothing is retried automatically.
#[derive(thiserror::Error, Debug)]
pub enum BlockmotionError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("empty group: {0}")]
    EmptyGroup(String),

    #[error("conflicting animation: {0}")]
    ConflictingAnimation(String),

    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("resolver failure: {0}")]
    ResolverFailure(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlockmotionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    pub fn empty_group(msg: impl Into<String>) -> Self {
        Self::EmptyGroup(msg.into())
    }

    pub fn conflicting_animation(msg: impl Into<String>) -> Self {
        Self::ConflictingAnimation(msg.into())
    }

    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }

    pub fn resolver_failure(msg: impl Into<String>) -> Self {
        Self::ResolverFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
