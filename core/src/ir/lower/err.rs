use crate::error::{Level, Py2JlErrorExt};
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoweringErrorKind {
    /// A source form this lowering deliberately refuses.
    Unsupported { feature: String },
    /// A node whose class tag has no lowering rule at all.
    UnknownNode { category: String },
    /// Traversal order and the external scope tree disagree.
    ScopeMismatch { detail: String },
}

/// Fatal lowering failure; aborts the whole compilation unit.
#[derive(Debug, Clone)]
pub struct LoweringError {
    kind: LoweringErrorKind,
    issuer: String,
    location: Option<Location>,
}

impl LoweringError {
    pub fn with(kind: LoweringErrorKind, issuer: String, location: Option<Location>) -> Self {
        LoweringError {
            kind,
            issuer,
            location,
        }
    }

    pub fn unsupported(feature: impl Into<String>, issuer: &str, location: Location) -> Self {
        Self::with(
            LoweringErrorKind::Unsupported {
                feature: feature.into(),
            },
            issuer.into(),
            Some(location),
        )
    }

    pub fn unknown_node(category: &str, issuer: &str, location: Location) -> Self {
        Self::with(
            LoweringErrorKind::UnknownNode {
                category: category.into(),
            },
            issuer.into(),
            Some(location),
        )
    }

    pub fn scope_mismatch(detail: String, location: Option<Location>) -> Self {
        Self::with(
            LoweringErrorKind::ScopeMismatch { detail },
            "py2jl.lower.context.enter_scope".into(),
            location,
        )
    }

    pub fn kind(&self) -> &LoweringErrorKind {
        &self.kind
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, LoweringErrorKind::Unsupported { .. })
    }
}

impl std::fmt::Display for LoweringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} at {}", self.message(), loc),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for LoweringError {}

impl Py2JlErrorExt for LoweringError {
    fn level(&self) -> Level {
        match self.kind {
            LoweringErrorKind::ScopeMismatch { .. } => Level::Critical,
            _ => Level::Error,
        }
    }

    fn message(&self) -> String {
        match &self.kind {
            LoweringErrorKind::Unsupported { feature } => format!("unsupported: {feature}"),
            LoweringErrorKind::UnknownNode { category } => {
                format!("no lowering rule for this {category} node")
            }
            LoweringErrorKind::ScopeMismatch { detail } => {
                format!("scope tree does not match the syntax tree: {detail}")
            }
        }
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}
