/// Position of a source node inside a compilation unit.
///
/// Lines are 1-based as the front end reports them; columns are 0-based
/// offsets. Line 0 means the position is unknown (a node without position
/// fields, or a whole-file failure).
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// The unit (source file) in which the location is found.
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: String, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// A location naming only the unit.
    pub fn unit(file: &str) -> Self {
        Self::new(file.to_string(), 0, 0)
    }

    pub fn has_position(&self) -> bool {
        self.line > 0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_position() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "{}", self.file)
        }
    }
}
