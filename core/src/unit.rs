use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analyzers::ScopeNode;
use crate::ast::Module;
use crate::error::{Level, Py2JlErrorExt};
use crate::ir::LowerOptions;
use crate::location::Location;

/// One source file's syntax tree and scope tree, as handed over by the
/// front end.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub name: String,
    pub path: Option<PathBuf>,
    pub module: Module,
    pub symtable: ScopeNode,
}

#[derive(Deserialize)]
struct UnitDocument {
    #[serde(default)]
    name: Option<String>,
    module: Module,
    symtable: ScopeNode,
}

impl CompilationUnit {
    pub fn new(name: &str, module: Module, symtable: ScopeNode) -> Self {
        CompilationUnit {
            name: name.to_string(),
            path: None,
            module,
            symtable,
        }
    }

    /// Reads a unit document from disk. Without a `name` field the unit is
    /// named after the file.
    pub fn load(path: &Path) -> Result<Self, UnitLoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| UnitLoadError {
            path: Some(path.to_path_buf()),
            message: format!("cannot read unit: {e}"),
            line: 0,
            column: 0,
        })?;
        let fallback = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mut unit = Self::from_json(&text, &fallback).map_err(|mut e| {
            e.path = Some(path.to_path_buf());
            e
        })?;
        unit.path = Some(path.to_path_buf());
        Ok(unit)
    }

    pub fn from_json(text: &str, fallback_name: &str) -> Result<Self, UnitLoadError> {
        let malformed = |e: serde_json::Error| UnitLoadError {
            path: None,
            message: format!("malformed unit document: {e}"),
            line: e.line(),
            column: e.column(),
        };
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let doc = UnitDocument::deserialize(serde_stacker::Deserializer::new(&mut de))
            .map_err(malformed)?;
        de.end().map_err(malformed)?;
        Ok(CompilationUnit {
            name: doc.name.unwrap_or_else(|| fallback_name.to_string()),
            path: None,
            module: doc.module,
            symtable: doc.symtable,
        })
    }

    pub fn default_options(&self) -> LowerOptions {
        LowerOptions::new(&self.name)
    }
}

impl std::fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Unit: {} at {:?}", self.name, path),
            None => write!(f, "Unit: {}", self.name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnitLoadError {
    path: Option<PathBuf>,
    message: String,
    line: usize,
    column: usize,
}

impl std::fmt::Display for UnitLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({:?})", self.message, path),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for UnitLoadError {}

impl Py2JlErrorExt for UnitLoadError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        "py2jl.unit.load".to_string()
    }

    fn location(&self) -> Option<Location> {
        let file = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        Some(Location::new(file, self.line, self.column))
    }
}
