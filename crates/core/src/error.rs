// Error handling for playback sessions

/// Playback session error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// An operation that drives the engine was called before `prepare()`
    #[error("{operation}: no engine held, call prepare() first")]
    NoEngine { operation: &'static str },

    /// The creator is not associated with any engine pool
    #[error("creator has no engine pool")]
    NoPool,

    /// A surface can only be attached while an engine is held
    #[error("cannot attach a surface without an engine, call prepare() first")]
    SurfaceWithoutEngine,

    /// The pool could not hand out an engine
    #[error("engine acquisition failed: {0}")]
    Acquire(String),

    /// The creator could not build a media source
    #[error("media source error: {0}")]
    MediaSource(String),
}

impl SessionError {
    pub fn no_engine(operation: &'static str) -> Self {
        Self::NoEngine { operation }
    }

    /// True when the error is a caller contract violation rather than a collaborator failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::NoEngine { .. } | Self::SurfaceWithoutEngine | Self::NoPool
        )
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
