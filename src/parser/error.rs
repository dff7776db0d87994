//! Error type for metadata parsing

/// Error returned when a `.SRCINFO` file cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A line is neither blank, a comment, nor `key = value`
    #[error("line {line}: expected `key = value`, found {content:?}")]
    InvalidSyntax { line: usize, content: String },

    /// A field appears before the `pkgbase` line
    #[error("line {line}: `{key}` appears before `pkgbase`")]
    FieldBeforePkgbase { line: usize, key: String },

    /// A single-valued field is declared twice in the same section
    #[error("line {line}: `{key}` is declared more than once")]
    DuplicateField { line: usize, key: String },

    /// A required field has an empty value
    #[error("line {line}: `{key}` has an empty value")]
    EmptyValue { line: usize, key: String },

    /// A required field is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
