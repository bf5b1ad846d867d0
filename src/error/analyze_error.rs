use crate::analyzer::{scope::ScopeError, type_control::TypeError};

#[derive(Debug)]
/// Represents all errors that can occur while analyzing a token stream.
pub enum AnalyzeError {
    /// Found an unexpected token where a specific construct was mandatory.
    UnexpectedToken {
        /// The expectation that was violated, and the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of the token stream unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The program's compound command is not followed by the final `.`.
    MissingFinalPeriod {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after the final `.`.
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A declaration named something other than `integer`, `real` or
    /// `boolean` in its type position.
    InvalidType {
        /// The token found in the type position.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An identifier was declared twice in the same scope.
    Redeclaration {
        /// The identifier that was already bound.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An identifier was used without any visible declaration.
    Undeclared {
        /// The identifier that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression or assignment failed type evaluation.
    IncompatibleTypes {
        /// Details about the failed typing rule.
        details: String,
        /// The source line of the expression boundary.
        line:    usize,
    },
}

impl AnalyzeError {
    /// Attaches a source line to a symbol table error.
    pub(crate) fn from_scope(error: ScopeError, line: usize) -> Self {
        match error {
            ScopeError::Redeclaration { name } => Self::Redeclaration { name, line },
            ScopeError::Undeclared { name } => Self::Undeclared { name, line },
        }
    }

    /// Attaches a source line to a type evaluation error.
    pub(crate) fn from_type(error: TypeError, line: usize) -> Self {
        Self::IncompatibleTypes { details: error.to_string(),
                                  line }
    }
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::MissingFinalPeriod { line } => {
                write!(f, "Error on line {line}: The program does not end with a final '.'.")
            },

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after the final '.'. Check your input: {token}"),

            Self::InvalidType { token, line } => {
                write!(f, "Error on line {line}: '{token}' is not a valid type.")
            },

            Self::Redeclaration { name, line } => write!(f,
                                                         "Error on line {line}: Tried to redefine already existing identifier '{name}'."),

            Self::Undeclared { name, line } => write!(f,
                                                      "Error on line {line}: Identifier '{name}' was used before declaration."),

            Self::IncompatibleTypes { details, line } => {
                write!(f, "Error on line {line}: {details}")
            },
        }
    }
}

impl std::error::Error for AnalyzeError {}
