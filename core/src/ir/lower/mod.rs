//! Lowering of a source module into a target-language document.

pub mod err;
pub mod function_builder;
pub mod lower_expr;
pub mod lower_stmt;
pub mod lowering_context;

use log::{debug, warn};

use crate::analyzers::{ScopeNode, ScopeTracker};
use crate::ast::Module;
use crate::layout::Doc;

pub use err::{LoweringError, LoweringErrorKind};
pub use lowering_context::{LoweringContext, ScopeGuard};

/// Knobs for one lowering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerOptions {
    /// Name used in line markers and error locations.
    pub unit_name: String,
    pub emit_line_markers: bool,
}

impl LowerOptions {
    pub fn new(unit_name: &str) -> Self {
        LowerOptions {
            unit_name: unit_name.to_string(),
            emit_line_markers: true,
        }
    }

    pub fn without_line_markers(mut self) -> Self {
        self.emit_line_markers = false;
        self
    }
}

impl Default for LowerOptions {
    fn default() -> Self {
        LowerOptions::new("<unit>")
    }
}

/// Lowers the top-level statements of `module`, walking `scopes` in step.
///
/// Each call owns a fresh scope tracker and synthetic-name counter, so
/// separate units can be lowered independently.
pub fn lower_module(
    module: &Module,
    scopes: &ScopeNode,
    options: &LowerOptions,
) -> Result<Doc, LoweringError> {
    debug!(
        "lowering unit '{}' ({} top-level statements)",
        options.unit_name,
        module.body.len()
    );
    let mut ctx = LoweringContext::new(options.clone(), ScopeTracker::new(scopes));
    let stmts = lower_stmt::lower_stmt_list(&module.body, &mut ctx)?;

    let remaining = ctx.scopes.remaining_children();
    if remaining > 0 {
        warn!(
            "unit '{}' left {} nested scope(s) of the scope tree unvisited",
            options.unit_name, remaining
        );
    }
    debug!(
        "finished unit '{}' ({} synthetic names)",
        options.unit_name,
        ctx.names.count()
    );
    Ok(Doc::lines(stmts.into_iter().map(|s| s.into_doc())))
}
