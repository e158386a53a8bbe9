//! cli/src/output.rs
//! description: Styled status lines, error reports, the batch progress bar
//! and the intrinsic table printed by `py2jl intrinsics`.

use std::io::{self, Write};

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use py2jl_core::{Intrinsic, Py2JlErrorExt, generate_error_report};
use serde::Serialize;

/// Styles for different output elements
pub struct FormatStyle {
    pub warning: Style,
    pub error: Style,
    pub success: Style,
}

impl FormatStyle {
    /// No colors or attributes; what tests compare against.
    pub fn plain() -> Self {
        FormatStyle {
            warning: Style::new(),
            error: Style::new(),
            success: Style::new(),
        }
    }
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

/// Printer that writes styled lines into any `Write`.
pub struct OutputHandler<T: Write> {
    out: T,
    formatting: FormatStyle,
}

impl<T: Write> OutputHandler<T> {
    pub fn new(out: T) -> Self {
        OutputHandler {
            out,
            formatting: FormatStyle::default(),
        }
    }

    pub fn with_formatting(mut self, formatting: FormatStyle) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn line(&mut self, text: &str, style: Option<&Style>) -> io::Result<()> {
        match style {
            Some(s) => writeln!(self.out, "{}", s.apply_to(text)),
            None => writeln!(self.out, "{}", text),
        }
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.warning.clone();
        self.line(text, Some(&style))
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.error.clone();
        self.line(text, Some(&style))
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.success.clone();
        self.line(text, Some(&style))
    }

    /// One `PY2JL | LEVEL | location | message` line.
    pub fn report(&mut self, error: &dyn Py2JlErrorExt) -> io::Result<()> {
        self.error(&generate_error_report(error))
    }
}

/// Progress bar for a batch of `len` units. Draws to stderr and stays
/// hidden when stderr is not a terminal.
pub fn batch_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("█▒░"));
    }
    pb
}

#[derive(Debug, Serialize)]
struct IntrinsicRow {
    name: &'static str,
    source_form: &'static str,
    category: &'static str,
}

fn intrinsic_rows() -> Vec<IntrinsicRow> {
    Intrinsic::ALL
        .iter()
        .map(|i| IntrinsicRow {
            name: i.name(),
            source_form: i.source_form(),
            category: i.category(),
        })
        .collect()
}

pub fn intrinsics_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Intrinsic", "Source form", "Category"]);
    for row in intrinsic_rows() {
        table.add_row(vec![row.name, row.source_form, row.category]);
    }
    table
}

pub fn intrinsics_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&intrinsic_rows())
}
