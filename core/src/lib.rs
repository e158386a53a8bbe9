pub mod analyzers;
pub mod ast;
pub mod error;
pub mod ir;
pub mod layout;
pub mod location;
pub mod unit;

pub use analyzers::{ScopeKind, ScopeNode, ScopeTracker};
pub use error::{Level, Py2JlErrorExt};
pub use ir::{Intrinsic, LowerOptions, LoweringError, LoweringErrorKind, lower_module};
pub use layout::Doc;
pub use location::Location;
pub use unit::{CompilationUnit, UnitLoadError};

pub fn generate_error_report<E: Py2JlErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("PY2JL | {} | {} | {}", level, location, message)
}

/// Lowers a unit into a layout document.
pub fn lower_unit(
    unit: &CompilationUnit,
    options: &LowerOptions,
) -> Result<Doc, Box<dyn Py2JlErrorExt>> {
    lower_module(&unit.module, &unit.symtable, options)
        .map_err(|e| Box::new(e) as Box<dyn Py2JlErrorExt>)
}

/// Lowers a unit and renders it to target source text.
pub fn compile_unit(
    unit: &CompilationUnit,
    options: &LowerOptions,
) -> Result<String, Box<dyn Py2JlErrorExt>> {
    Ok(lower_unit(unit, options)?.pretty())
}

/// Loads a unit document from `text` and compiles it with default options.
pub fn compile_json(text: &str, fallback_name: &str) -> Result<String, Box<dyn Py2JlErrorExt>> {
    let unit = CompilationUnit::from_json(text, fallback_name)
        .map_err(|e| Box::new(e) as Box<dyn Py2JlErrorExt>)?;
    compile_unit(&unit, &unit.default_options())
}
