//! Providers of the "current" session identifier.
//!
//! A validator constructed without an explicit identifier asks its source.

/// Capability that yields the active session identifier, if any.
pub trait SessionIdSource {
    /// Returns the identifier of the current session.
    fn current_session_id(&self) -> Option<String>;
}

/// A source with no active session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSession;

impl SessionIdSource for NoSession {
    fn current_session_id(&self) -> Option<String> {
        None
    }
}

/// A source that always yields the same identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSessionId(pub String);

impl FixedSessionId {
    /// Creates a source for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl SessionIdSource for FixedSessionId {
    fn current_session_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl SessionIdSource for Option<String> {
    fn current_session_id(&self) -> Option<String> {
        self.clone()
    }
}

impl<F> SessionIdSource for F
where
    F: Fn() -> Option<String>,
{
    fn current_session_id(&self) -> Option<String> {
        self()
    }
}
