use crate::error::{Level, Py2JlErrorExt};
use crate::location::Location;

/// Raised when lowering asks for a nested scope the scope tree does not have.
#[derive(Debug, Clone)]
pub struct ScopeError {
    scope: String,
    requested: usize,
    available: usize,
}

impl ScopeError {
    pub fn with(scope: String, requested: usize, available: usize) -> Self {
        ScopeError {
            scope,
            requested,
            available,
        }
    }

    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scope '{}' has {} nested scope(s) but child #{} was requested",
            self.scope, self.available, self.requested
        )
    }
}

impl std::error::Error for ScopeError {}

impl Py2JlErrorExt for ScopeError {
    fn level(&self) -> Level {
        Level::Critical
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "py2jl.analyzers.table.enter_scope".into()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
