#[derive(Debug)]
/// Represents all errors that can occur while scanning source text or
/// reading a token table.
pub enum LexError {
    /// The input contained a character sequence no rule matches.
    UnrecognizedLexeme {
        /// The rejected input slice.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A comment was opened with `{` but never closed.
    UnclosedComment {
        /// The source line where the comment was opened.
        line: usize,
    },
    /// A `}` appeared with no open comment to close.
    UnexpectedCommentClose {
        /// The source line where the stray `}` occurred.
        line: usize,
    },
    /// A token table did not start with the expected header.
    MalformedHeader {
        /// The header line that was found instead.
        found: String,
        /// The table line where the error occurred.
        line:  usize,
    },
    /// A token table row did not hold three fields with a numeric line.
    MalformedRow {
        /// The rejected row.
        row:  String,
        /// The table line where the error occurred.
        line: usize,
    },
    /// A token table row named an unknown classification.
    UnknownClass {
        /// The classification field that was found.
        class: String,
        /// The table line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedLexeme { lexeme, line } => {
                write!(f, "Error on line {line}: Input '{lexeme}' could not be scanned.")
            },

            Self::UnclosedComment { line } => {
                write!(f, "Error on line {line}: Comment opened with '{{' is never closed.")
            },

            Self::UnexpectedCommentClose { line } => {
                write!(f, "Error on line {line}: Found '}}' with no open comment to close.")
            },

            Self::MalformedHeader { found, line } => write!(f,
                                                            "Error on line {line}: Invalid token table header '{found}'. Expected 'token,classification,line'."),

            Self::MalformedRow { row, line } => {
                write!(f, "Error on line {line}: Invalid token table row '{row}'.")
            },

            Self::UnknownClass { class, line } => {
                write!(f, "Error on line {line}: '{class}' is not a token classification.")
            },
        }
    }
}

impl std::error::Error for LexError {}
