//! Scope tree produced by the front end's symbol-table analysis.
//!
//! One `ScopeNode` per lexical scope. `children` are listed in the order the
//! nested scopes appear in the source, which is the order lowering descends
//! into them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Module,
    Function,
    Lambda,
    Comprehension,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeNode {
    pub name: String,
    pub kind: ScopeKind,
    /// Names bound in this scope, parameters included.
    #[serde(default)]
    pub locals: Vec<String>,
    /// Names explicitly declared `global` in this scope.
    #[serde(default)]
    pub globals: Vec<String>,
    #[serde(default)]
    pub children: Vec<ScopeNode>,
}

impl ScopeNode {
    pub fn new(name: &str, kind: ScopeKind) -> Self {
        ScopeNode {
            name: name.to_string(),
            kind,
            locals: Vec::new(),
            globals: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn module(name: &str) -> Self {
        Self::new(name, ScopeKind::Module)
    }

    pub fn function(name: &str) -> Self {
        Self::new(name, ScopeKind::Function)
    }

    pub fn lambda() -> Self {
        Self::new("lambda", ScopeKind::Lambda)
    }

    pub fn comprehension() -> Self {
        Self::new("listcomp", ScopeKind::Comprehension)
    }

    pub fn with_locals(mut self, names: &[&str]) -> Self {
        self.locals.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_globals(mut self, names: &[&str]) -> Self {
        self.globals.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_child(mut self, child: ScopeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether `name`, as seen from this scope, binds at module level.
    pub fn is_global(&self, name: &str) -> bool {
        self.kind == ScopeKind::Module || self.globals.iter().any(|g| g == name)
    }
}
