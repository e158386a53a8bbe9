use serde::{Deserialize, Deserializer, Serialize};

use crate::location::Location;

/// Free stack that must remain before descending one more tree level.
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each extra stack segment allocated once the red zone is hit.
pub(crate) const STACK_SEGMENT: usize = 1024 * 1024;

/// A source node: its variant payload plus the position it was parsed at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode<K> {
    #[serde(flatten)]
    pub kind: K,
    #[serde(default)]
    pub lineno: usize,
    #[serde(default)]
    pub colno: usize,
}

#[derive(Deserialize)]
struct NodeFields<K> {
    #[serde(flatten)]
    kind: K,
    #[serde(default)]
    lineno: usize,
    #[serde(default)]
    colno: usize,
}

// Long expressions nest one node per operator, so each level may need a
// fresh stack segment.
impl<'de, K: Deserialize<'de>> Deserialize<'de> for AstNode<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            let NodeFields { kind, lineno, colno } = NodeFields::deserialize(deserializer)?;
            Ok(AstNode { kind, lineno, colno })
        })
    }
}

impl<K> AstNode<K> {
    pub fn new(kind: K) -> Self {
        AstNode { kind, lineno: 0, colno: 0 }
    }

    pub fn at(kind: K, lineno: usize, colno: usize) -> Self {
        AstNode { kind, lineno, colno }
    }

    pub fn get_kind(&self) -> &K {
        &self.kind
    }

    /// Source position of the node inside the unit called `file`.
    pub fn location(&self, file: &str) -> Location {
        Location::new(file.to_string(), self.lineno, self.colno)
    }
}
