//! file: core/src/ir/lower/lowering_context.rs
//! description: per-unit state threaded through lowering.
//!
//! `LoweringContext` owns the two pieces of mutable state a compilation unit
//! has: the scope tracker and the synthetic-name counter. Everything else is
//! built and consumed within a single lowering call.

use std::ops::{Deref, DerefMut};

use crate::analyzers::{ScopeKind, ScopeTracker};
use crate::ast::AstNode;
use crate::ir::ident::NameGen;
use crate::location::Location;

use super::LowerOptions;
use super::err::LoweringError;

pub struct LoweringContext<'s> {
    pub options: LowerOptions,
    pub scopes: ScopeTracker<'s>,
    pub names: NameGen,
}

impl<'s> LoweringContext<'s> {
    pub fn new(options: LowerOptions, scopes: ScopeTracker<'s>) -> Self {
        LoweringContext {
            options,
            scopes,
            names: NameGen::new(),
        }
    }

    pub fn gensym(&mut self, hint: &str) -> String {
        self.names.gensym(hint)
    }

    pub fn location<K>(&self, node: &AstNode<K>) -> Location {
        node.location(&self.options.unit_name)
    }

    /// Descends into the next nested scope. The returned guard leaves it
    /// again when dropped, whether or not lowering of the body succeeded.
    pub fn enter_scope(
        &mut self,
        expected: ScopeKind,
        location: Location,
    ) -> Result<ScopeGuard<'_, 's>, LoweringError> {
        self.scopes
            .enter_scope()
            .map_err(|e| LoweringError::scope_mismatch(e.to_string(), Some(location.clone())))?;
        let guard = ScopeGuard { ctx: self };
        let found = guard.scopes.current_scope();
        if found.kind != expected {
            return Err(LoweringError::scope_mismatch(
                format!(
                    "expected a {:?} scope but the scope tree has {:?} scope '{}'",
                    expected, found.kind, found.name
                ),
                Some(location),
            ));
        }
        Ok(guard)
    }
}

/// Keeps a nested scope entered for as long as it lives.
pub struct ScopeGuard<'a, 's> {
    ctx: &'a mut LoweringContext<'s>,
}

impl<'s> Deref for ScopeGuard<'_, 's> {
    type Target = LoweringContext<'s>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<'s> DerefMut for ScopeGuard<'_, 's> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        self.ctx.scopes.exit_scope();
    }
}
